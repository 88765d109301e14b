//! Alcochoden selection and planetary years.
//!
//! Every traditional planet in the chart is scored at the Hyleg's degree.
//! A planet qualifies with positive dignity there and a Ptolemaic aspect
//! to the Hyleg; a luminary that is itself the Hyleg counts as aspecting
//! it at orb 0. Among qualifiers the highest score wins, then the tighter
//! aspect, then the earlier planet in traditional order.
//!
//! The winner grants its minor, middle or major years according to its
//! condition at its own position, adjusted by angularity, retrograde
//! motion, combustion and aspects from the benefics and malefics.

use std::cmp::Ordering;

use kairos_base::{
    Angularity, AspectKind, BaseError, ChartSnapshot, DignityScore, DignityType, Planet,
    PlanetPosition, TRADITIONAL_PLANETS, YearType, angularity, dignity_at_longitude, is_combust,
    planetary_years,
};

use crate::alcochoden_types::{
    AlcochodenCandidate, AlcochodenConfig, AlcochodenData, AlcochodenResult, ModificationKind,
    YearModification,
};
use crate::error::LongevityError;
use crate::hyleg_types::HylegResult;
use crate::pipeline::{BestBy, evaluate_candidates};

const NO_CANDIDATE: &str = "no planet with dignity at Hyleg's degree aspects the Hyleg";

/// Year type from the Alcochoden's own condition.
///
/// Combustion forces minor years. Otherwise domicile or exaltation grant
/// major years, detriment or fall minor years, anything else middle years.
pub fn year_type_for(own: &DignityScore, combust: bool) -> YearType {
    if combust {
        return YearType::Minor;
    }
    match own.classification {
        DignityType::Domicile | DignityType::Exaltation => YearType::Major,
        DignityType::Detriment | DignityType::Fall => YearType::Minor,
        _ => YearType::Middle,
    }
}

/// Select the Alcochoden for a Hyleg.
///
/// Without a Hyleg the result is [`AlcochodenResult::NoHyleg`]; without a
/// qualifying planet it is [`AlcochodenResult::NoCandidate`] listing every
/// planet evaluated.
pub fn select_alcochoden(
    chart: &ChartSnapshot,
    hyleg: &HylegResult,
    config: &AlcochodenConfig,
) -> Result<AlcochodenResult, LongevityError> {
    config.validate().map_err(LongevityError::InvalidConfig)?;
    let Some(hyleg) = hyleg.hyleg() else {
        return Ok(AlcochodenResult::NoHyleg {
            reason: "no qualified Hyleg".to_string(),
        });
    };
    chart.validate()?;
    let sect = chart.sect()?;
    let dignity = config.dignity();
    let aspects = chart.aspect_set();
    let target = &hyleg.hyleg;

    let planets: Vec<&PlanetPosition> = TRADITIONAL_PLANETS
        .iter()
        .filter_map(|&p| chart.planet(p))
        .collect();

    let outcome = evaluate_candidates(
        planets,
        |pos| -> Result<AlcochodenCandidate, LongevityError> {
            let score = dignity_at_longitude(pos.name, target.longitude, sect, &dignity)?;
            let (aspect_type, orb) = if target.name.planet() == Some(pos.name) {
                (Some(AspectKind::Conjunction), Some(0.0))
            } else {
                match aspects.ptolemaic_between(pos.name.name(), target.name.name()) {
                    Some(edge) => (Some(edge.kind()), Some(edge.orb.abs())),
                    None => (None, None),
                }
            };
            let aspects_hyleg = aspect_type.is_some();
            Ok(AlcochodenCandidate {
                planet: pos.name,
                is_qualified: qualifies(&score, aspects_hyleg),
                dignity_at_hyleg_degree: score,
                aspects_hyleg,
                aspect_type,
                orb,
            })
        },
        |c: &AlcochodenCandidate| c.is_qualified,
        &BestBy(rank),
    )?;

    let Some(winner) = outcome.winner().cloned() else {
        log::debug!("no alcochoden among {} planets", outcome.evaluated.len());
        return Ok(AlcochodenResult::NoCandidate {
            candidates: outcome.evaluated,
            reason: NO_CANDIDATE.to_string(),
        });
    };

    let data = grant_years(chart, winner, outcome.evaluated, config)?;
    log::debug!(
        "alcochoden: {} grants {} {} years, {:.1} after adjustments",
        data.planet,
        data.base_years,
        data.year_type,
        data.final_years
    );
    Ok(AlcochodenResult::Found(data))
}

/// Higher score first, then tighter orb.
/// Qualification reads the net score at the Hyleg's degree, not whether
/// the planet holds some dignity there: a term or face outweighed by
/// detriment or fall does not qualify.
fn qualifies(score: &DignityScore, aspects_hyleg: bool) -> bool {
    score.points > 0 && aspects_hyleg
}

fn rank(a: &AlcochodenCandidate, b: &AlcochodenCandidate) -> Ordering {
    let orb = |c: &AlcochodenCandidate| c.orb.unwrap_or(f64::INFINITY);
    a.dignity_at_hyleg_degree
        .points
        .cmp(&b.dignity_at_hyleg_degree.points)
        .then_with(|| orb(b).total_cmp(&orb(a)))
}

fn grant_years(
    chart: &ChartSnapshot,
    winner: AlcochodenCandidate,
    candidates: Vec<AlcochodenCandidate>,
    config: &AlcochodenConfig,
) -> Result<AlcochodenData, LongevityError> {
    let planet = winner.planet;
    let pos = chart.require_planet(planet)?;
    let sect = chart.sect()?;
    let cusps = chart.cusps()?;
    let house = chart.house_of(pos, &cusps);
    let own_dignity = dignity_at_longitude(planet, pos.longitude, sect, &config.dignity())?;
    let combust = chart
        .planet(Planet::Sun)
        .is_some_and(|sun| is_combust(planet, pos.longitude, sun.longitude, config.combustion_orb_deg));
    let years = planetary_years(planet)
        .ok_or_else(|| BaseError::UnknownPlanet(planet.name().to_string()))?;
    let year_type = year_type_for(&own_dignity, combust);
    let base_years = years.get(year_type);

    let mut modifications = Vec::new();
    match angularity(house) {
        Angularity::Angular => modifications.push(YearModification {
            reason: format!("angular in house {house}"),
            adjustment_years: config.angular_bonus_years,
            kind: ModificationKind::Angularity,
        }),
        Angularity::Cadent => modifications.push(YearModification {
            reason: format!("cadent in house {house}"),
            adjustment_years: -config.cadent_penalty_years,
            kind: ModificationKind::Angularity,
        }),
        Angularity::Succedent => {}
    }
    if pos.is_retrograde() {
        modifications.push(YearModification {
            reason: "retrograde".to_string(),
            adjustment_years: -config.retrograde_penalty_years,
            kind: ModificationKind::Retrograde,
        });
    }
    if combust {
        modifications.push(YearModification {
            reason: "combust".to_string(),
            adjustment_years: -config.combustion_penalty_years,
            kind: ModificationKind::Combustion,
        });
    }
    modifications.extend(aspect_modifications(chart, planet));

    let total: f64 = modifications.iter().map(|m| m.adjustment_years).sum();
    let final_years = (base_years + total).max(config.min_years);

    Ok(AlcochodenData {
        planet,
        candidate: winner,
        own_dignity,
        house,
        is_retrograde: pos.is_retrograde(),
        is_combust: combust,
        planetary_years: years,
        year_type,
        base_years,
        modifications,
        final_years,
        candidates,
    })
}

/// Benefics in Ptolemaic aspect add their minor years, malefics subtract
/// theirs. Traditional planet order.
fn aspect_modifications(chart: &ChartSnapshot, alcochoden: Planet) -> Vec<YearModification> {
    let aspects = chart.aspect_set();
    TRADITIONAL_PLANETS
        .iter()
        .filter(|&&p| p != alcochoden && (p.is_benefic() || p.is_malefic()))
        .filter_map(|&p| {
            let edge = aspects.ptolemaic_between(p.name(), alcochoden.name())?;
            let minor = planetary_years(p)?.minor;
            let sign = if p.is_benefic() { 1.0 } else { -1.0 };
            Some(YearModification {
                reason: format!("{} from {p}", edge.kind()),
                adjustment_years: sign * minor,
                kind: ModificationKind::Aspect,
            })
        })
        .collect()
}
