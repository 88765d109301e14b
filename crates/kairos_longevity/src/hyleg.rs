//! Hyleg selection.
//!
//! Candidates are evaluated in a fixed order: the luminary of the sect,
//! the other luminary, the Ascendant, the Part of Fortune and the prenatal
//! syzygy. The first candidate that qualifies is the Hyleg.
//!
//! A candidate qualifies when it stands in a hylegical house (1, 7, 9, 10,
//! 11) and is aspected either by the domicile lord of its sign or by a
//! prorogatory planet: one that stands in a hylegical house itself and
//! holds domicile, exaltation or triplicity at the candidate's degree. A
//! luminary in its own sign counts as aspected by its lord. Only the five
//! Ptolemaic aspects count.

use kairos_base::{
    AspectSet, ChartSnapshot, DignityConfig, DignityType, HouseCusps, Planet, Sect,
    TRADITIONAL_PLANETS, dignity_at_longitude, domicile_lord, normalize_360,
    position_from_longitude,
};
use kairos_search::SyzygyResult;

use crate::error::LongevityError;
use crate::hyleg_types::{
    HylegCandidate, HylegConfig, HylegData, HylegPoint, HylegResult, is_hylegical_house,
};
use crate::pipeline::{FirstMatch, evaluate_candidates};

const NOT_HYLEGICAL: &str = "not in a hylegical place";

/// Candidate order for a chart of the given sect.
pub const fn hyleg_order(sect: Sect) -> [HylegPoint; 5] {
    let (first, second) = match sect {
        Sect::Diurnal => (HylegPoint::Sun, HylegPoint::Moon),
        Sect::Nocturnal => (HylegPoint::Moon, HylegPoint::Sun),
    };
    [
        first,
        second,
        HylegPoint::Ascendant,
        HylegPoint::PartOfFortune,
        HylegPoint::PrenatalSyzygy,
    ]
}

/// Part of Fortune: Asc + Moon − Sun by day, Asc + Sun − Moon by night.
pub fn part_of_fortune(ascendant: f64, sun: f64, moon: f64, sect: Sect) -> f64 {
    match sect {
        Sect::Diurnal => normalize_360(ascendant + moon - sun),
        Sect::Nocturnal => normalize_360(ascendant + sun - moon),
    }
}

/// Select the Hyleg of a chart.
///
/// The syzygy candidate is only evaluated when `syzygy` is supplied. Not
/// finding a Hyleg is a valid outcome, reported as
/// [`HylegResult::NotFound`] with every evaluated candidate.
pub fn select_hyleg(
    chart: &ChartSnapshot,
    syzygy: Option<&SyzygyResult>,
    config: &HylegConfig,
) -> Result<HylegResult, LongevityError> {
    chart.validate()?;
    let cusps = chart.cusps()?;
    let sect = chart.sect()?;
    let sun = chart.require_planet(Planet::Sun)?;
    let moon = chart.require_planet(Planet::Moon)?;
    let ascendant = chart.ascendant()?;
    let fortune = part_of_fortune(ascendant, sun.longitude, moon.longitude, sect);

    let placements: Vec<(HylegPoint, f64, u8)> = hyleg_order(sect)
        .into_iter()
        .filter_map(|point| match point {
            HylegPoint::Sun => Some((point, sun.longitude, chart.house_of(sun, &cusps))),
            HylegPoint::Moon => Some((point, moon.longitude, chart.house_of(moon, &cusps))),
            HylegPoint::Ascendant => Some((point, ascendant, 1)),
            HylegPoint::PartOfFortune => Some((point, fortune, cusps.house_of(fortune))),
            HylegPoint::PrenatalSyzygy => syzygy.map(|s| {
                let lon = normalize_360(s.longitude);
                (point, lon, cusps.house_of(lon))
            }),
        })
        .collect();

    let ctx = Qualifier {
        chart,
        cusps: &cusps,
        sect,
        aspects: chart.aspect_set(),
        dignity: config.dignity(),
    };
    let outcome = evaluate_candidates(
        placements,
        |(point, lon, house)| ctx.evaluate(point, lon, house),
        |c: &HylegCandidate| c.is_qualified,
        &FirstMatch,
    )?;

    let Some(winner) = outcome.winner().cloned() else {
        let reason = format!(
            "none of the {} evaluated candidates qualified",
            outcome.evaluated.len()
        );
        log::debug!("no hyleg: {reason}");
        return Ok(HylegResult::NotFound {
            candidates: outcome.evaluated,
            reason,
        });
    };

    log::debug!("hyleg: {} ({})", winner.name, winner.qualification_reason);
    let dignity = winner
        .name
        .planet()
        .map(|p| dignity_at_longitude(p, winner.longitude, sect, &ctx.dignity))
        .transpose()?;
    Ok(HylegResult::Found(HylegData {
        dignity,
        domicile_lord: domicile_lord(winner.sign),
        aspects: ctx.aspects.aspects_to(winner.name.name()),
        hyleg: winner,
        candidates: outcome.evaluated,
    }))
}

struct Qualifier<'a> {
    chart: &'a ChartSnapshot,
    cusps: &'a HouseCusps,
    sect: Sect,
    aspects: AspectSet<'a>,
    dignity: DignityConfig,
}

impl Qualifier<'_> {
    fn evaluate(
        &self,
        point: HylegPoint,
        longitude: f64,
        house: u8,
    ) -> Result<HylegCandidate, LongevityError> {
        let pos = position_from_longitude(longitude);
        let in_hylegical_place = is_hylegical_house(house);
        let (is_qualified, qualification_reason) = if in_hylegical_place {
            self.qualify(point, longitude, house)?
        } else {
            (false, format!("{NOT_HYLEGICAL} (house {house})"))
        };
        log::trace!("hyleg candidate {point}: {qualification_reason}");

        Ok(HylegCandidate {
            name: point,
            longitude,
            sign: pos.sign,
            degree_in_sign: pos.degree_in_sign,
            house,
            in_hylegical_place,
            aspecting_planets: self.aspecting_planets(point),
            is_qualified,
            qualification_reason,
        })
    }

    fn qualify(
        &self,
        point: HylegPoint,
        longitude: f64,
        house: u8,
    ) -> Result<(bool, String), LongevityError> {
        let lord = domicile_lord(position_from_longitude(longitude).sign);
        if point.planet() == Some(lord) {
            return Ok((
                true,
                format!("in house {house}, aspected by its domicile lord {lord} (own sign)"),
            ));
        }
        if self.aspects.ptolemaic_between(lord.name(), point.name()).is_some() {
            return Ok((
                true,
                format!("in house {house}, aspected by its domicile lord {lord}"),
            ));
        }
        if let Some((planet, planet_house)) = self.prorogator(point, longitude)? {
            return Ok((
                true,
                format!("in house {house}, aspected by prorogatory planet {planet} in house {planet_house}"),
            ));
        }
        Ok((
            false,
            format!("in house {house} but not aspected by its domicile lord {lord} or a prorogatory planet"),
        ))
    }

    /// First traditional planet in a hylegical house with domicile,
    /// exaltation or triplicity at `longitude` that aspects the candidate.
    fn prorogator(
        &self,
        point: HylegPoint,
        longitude: f64,
    ) -> Result<Option<(Planet, u8)>, LongevityError> {
        for planet in TRADITIONAL_PLANETS {
            if point.planet() == Some(planet) {
                continue;
            }
            let Some(pos) = self.chart.planet(planet) else {
                continue;
            };
            let house = self.chart.house_of(pos, self.cusps);
            if !is_hylegical_house(house) {
                continue;
            }
            let score = dignity_at_longitude(planet, longitude, self.sect, &self.dignity)?;
            let affinity = score.holds(DignityType::Domicile)
                || score.holds(DignityType::Exaltation)
                || score.holds(DignityType::Triplicity);
            if affinity && self.aspects.ptolemaic_between(planet.name(), point.name()).is_some() {
                return Ok(Some((planet, house)));
            }
        }
        Ok(None)
    }

    fn aspecting_planets(&self, point: HylegPoint) -> Vec<Planet> {
        let mut planets = Vec::new();
        for aspect in self.aspects.aspects_to(point.name()) {
            if !aspect.kind.is_ptolemaic() {
                continue;
            }
            if let Ok(planet) = aspect.other.parse::<Planet>() {
                if !planets.contains(&planet) {
                    planets.push(planet);
                }
            }
        }
        planets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairos_base::{AspectEdge, HouseCusps, PlanetPosition, Sign};

    fn aspect(a: &str, b: &str, name: &str, orb: f64) -> AspectEdge {
        AspectEdge {
            planet1: a.to_string(),
            planet2: b.to_string(),
            aspect_name: name.to_string(),
            angle: 0.0,
            orb,
            applying: false,
        }
    }

    /// Scorpio rising, equal houses; Sun at 15° Leo in the tenth.
    fn chart() -> ChartSnapshot {
        ChartSnapshot {
            planets: vec![
                PlanetPosition::new(Planet::Sun, 135.0, 0.96),
                PlanetPosition::new(Planet::Moon, 20.0, 13.1),
                PlanetPosition::new(Planet::Mercury, 118.0, 1.2),
                PlanetPosition::new(Planet::Venus, 175.0, 1.1),
                PlanetPosition::new(Planet::Mars, 200.0, 0.6),
                PlanetPosition::new(Planet::Jupiter, 15.0, -0.05),
                PlanetPosition::new(Planet::Saturn, 290.0, 0.03),
            ],
            houses: HouseCusps::equal(220.0).unwrap().iter().collect(),
            aspects: vec![
                aspect("Sun", "Jupiter", "Trine", 0.0),
                aspect("Mars", "Sun", "Sextile", 5.0),
                aspect("Moon", "Jupiter", "Conjunction", 5.0),
            ],
            ascendant: Some(220.0),
            sect: Some(Sect::Diurnal),
            birth_jd: None,
        }
    }

    fn set_longitude(chart: &mut ChartSnapshot, planet: Planet, lon: f64) {
        for p in chart.planets.iter_mut().filter(|p| p.name == planet) {
            p.longitude = lon;
        }
    }

    #[test]
    fn order_follows_sect() {
        assert_eq!(hyleg_order(Sect::Diurnal)[0], HylegPoint::Sun);
        assert_eq!(hyleg_order(Sect::Nocturnal)[0], HylegPoint::Moon);
        assert_eq!(hyleg_order(Sect::Nocturnal)[1], HylegPoint::Sun);
        assert_eq!(hyleg_order(Sect::Diurnal)[4], HylegPoint::PrenatalSyzygy);
    }

    #[test]
    fn fortune_by_sect() {
        assert!((part_of_fortune(220.0, 320.0, 20.0, Sect::Diurnal) - 280.0).abs() < 1e-9);
        assert!((part_of_fortune(220.0, 320.0, 20.0, Sect::Nocturnal) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn sun_in_own_sign_in_tenth() {
        let r = select_hyleg(&chart(), None, &HylegConfig::default()).unwrap();
        let data = r.hyleg().unwrap();
        assert_eq!(data.hyleg.name, HylegPoint::Sun);
        assert_eq!(data.hyleg.house, 10);
        assert!(data.hyleg.qualification_reason.contains("aspected by its domicile lord"));
        assert_eq!(data.domicile_lord, Planet::Sun);
        assert_eq!(data.candidates.len(), 1);
        let dignity = data.dignity.as_ref().unwrap();
        assert_eq!(dignity.classification, DignityType::Domicile);
        assert_eq!(dignity.points, 8);
        assert_eq!(data.aspects.len(), 2);
        assert_eq!(data.hyleg.aspecting_planets, vec![Planet::Jupiter, Planet::Mars]);
    }

    #[test]
    fn nocturnal_chart_tries_moon_first() {
        let mut c = chart();
        c.sect = Some(Sect::Nocturnal);
        let r = select_hyleg(&c, None, &HylegConfig::default()).unwrap();
        let cands = r.candidates();
        assert_eq!(cands.len(), 2);
        assert_eq!(cands[0].name, HylegPoint::Moon);
        assert!(!cands[0].in_hylegical_place);
        assert!(cands[0].qualification_reason.contains(NOT_HYLEGICAL));
        assert_eq!(r.hyleg().unwrap().hyleg.name, HylegPoint::Sun);
    }

    #[test]
    fn ascendant_through_prorogatory_planet() {
        let mut c = chart();
        // Sun to the fourth; Venus to 10° Virgo in the eleventh, sextile
        // the Ascendant and day ruler of the water triplicity.
        set_longitude(&mut c, Planet::Sun, 320.0);
        set_longitude(&mut c, Planet::Venus, 160.0);
        c.aspects = vec![aspect("Venus", "Asc", "sextile", 0.0)];
        let r = select_hyleg(&c, None, &HylegConfig::default()).unwrap();
        let data = r.hyleg().unwrap();
        assert_eq!(data.hyleg.name, HylegPoint::Ascendant);
        assert_eq!(data.hyleg.house, 1);
        assert!(data.hyleg.qualification_reason.contains("prorogatory planet Venus"));
        assert_eq!(data.domicile_lord, Planet::Mars);
        assert!(data.dignity.is_none());
        assert_eq!(data.candidates.len(), 3);
    }

    #[test]
    fn ascendant_through_domicile_lord() {
        let mut c = chart();
        set_longitude(&mut c, Planet::Sun, 320.0);
        c.aspects = vec![aspect("ASC", "Mars", "Conjunction", 4.0)];
        let r = select_hyleg(&c, None, &HylegConfig::default()).unwrap();
        let data = r.hyleg().unwrap();
        assert_eq!(data.hyleg.name, HylegPoint::Ascendant);
        assert!(data.hyleg.qualification_reason.contains("aspected by its domicile lord Mars"));
    }

    #[test]
    fn minor_aspects_do_not_qualify() {
        let mut c = chart();
        set_longitude(&mut c, Planet::Sun, 320.0);
        c.aspects = vec![aspect("Ascendant", "Mars", "Semisextile", 1.0)];
        let r = select_hyleg(&c, None, &HylegConfig::default()).unwrap();
        assert!(r.hyleg().is_none());
    }

    #[test]
    fn not_found_records_every_candidate() {
        let mut c = chart();
        set_longitude(&mut c, Planet::Sun, 320.0);
        c.aspects.clear();
        let r = select_hyleg(&c, None, &HylegConfig::default()).unwrap();
        match &r {
            HylegResult::NotFound { candidates, reason } => {
                assert_eq!(candidates.len(), 4);
                assert!(candidates.iter().all(|c| !c.is_qualified));
                assert!(reason.contains('4'));
            }
            HylegResult::Found(_) => panic!("unexpected hyleg"),
        }
        // Fortune at 10° Capricorn falls in the third.
        let fortune = &r.candidates()[3];
        assert_eq!(fortune.name, HylegPoint::PartOfFortune);
        assert_eq!(fortune.sign, Sign::Capricorn);
        assert_eq!(fortune.house, 3);
    }

    #[test]
    fn candidates_outside_hylegical_houses_never_qualify() {
        for sun in (0..360).step_by(15) {
            let mut c = chart();
            set_longitude(&mut c, Planet::Sun, sun as f64);
            let r = select_hyleg(&c, None, &HylegConfig::default()).unwrap();
            for cand in r.candidates() {
                if !is_hylegical_house(cand.house) {
                    assert!(!cand.is_qualified, "{cand:?}");
                }
            }
        }
    }

    #[test]
    fn missing_moon_is_hard_failure() {
        let mut c = chart();
        c.planets.retain(|p| p.name != Planet::Moon);
        let r = select_hyleg(&c, None, &HylegConfig::default());
        assert_eq!(r, Err(LongevityError::MissingRequiredPlanet("Moon")));
    }

    #[test]
    fn invalid_longitude_is_hard_failure() {
        let mut c = chart();
        set_longitude(&mut c, Planet::Mars, 361.0);
        let r = select_hyleg(&c, None, &HylegConfig::default());
        assert!(matches!(r, Err(LongevityError::Base(_))));
    }
}
