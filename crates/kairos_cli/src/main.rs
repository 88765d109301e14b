mod config;
mod error;
mod render;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use kairos_base::{
    ChartSnapshot, HouseCusps, Planet, Sect, Sign, TermSystem, evaluate_dignity, lunar_phase,
    position_from_longitude, sect_from_longitudes, solar_phase, term_for,
};
use kairos_core::{AnalyticEphemeris, Body, Ephemeris};
use kairos_longevity::longevity_summary;
use kairos_search::{
    SyzygyResult, elongation_at, prenatal_syzygy, saturn_longitude_at, saturn_returns,
};
use kairos_time::utc_to_jd;
use serde::Serialize;
use serde_json::json;

use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "kairos", version, about = "Traditional astrology engine CLI")]
struct Cli {
    /// Log search progress and selection decisions
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SectArg {
    Diurnal,
    Nocturnal,
}

impl From<SectArg> for Sect {
    fn from(s: SectArg) -> Self {
        match s {
            SectArg::Diurnal => Sect::Diurnal,
            SectArg::Nocturnal => Sect::Nocturnal,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Essential dignity of a planet at a sign and degree
    Dignity {
        /// Planet name (Sun..Saturn score; others are peregrine)
        planet: Planet,
        /// Zodiac sign
        #[arg(long)]
        sign: Sign,
        /// Degree within the sign [0, 30)
        #[arg(long)]
        degree: f64,
        /// Chart sect; selects the triplicity ruler
        #[arg(long, value_enum, default_value_t = SectArg::Diurnal)]
        sect: SectArg,
        /// Term system (overrides the config file)
        #[arg(long)]
        terms: Option<TermSystem>,
    },
    /// Term ruler at an ecliptic longitude
    Term {
        /// Ecliptic longitude in degrees
        longitude: f64,
        /// Term system (overrides the config file)
        #[arg(long)]
        system: Option<TermSystem>,
    },
    /// Sect from Ascendant and Sun longitudes
    Sect {
        /// Ascendant longitude in degrees
        #[arg(long)]
        asc: f64,
        /// Sun longitude in degrees
        #[arg(long)]
        sun: f64,
    },
    /// Lunar and solar phase
    #[command(group(
        ArgGroup::new("input")
            .required(true)
            .multiple(true)
            .args(["elongation", "sun_sign", "jd"])
    ))]
    Phase {
        /// Moon - Sun elongation in degrees
        #[arg(long)]
        elongation: Option<f64>,
        /// Sign of the Sun
        #[arg(long)]
        sun_sign: Option<Sign>,
        /// Julian Day; both phases from the built-in ephemeris
        #[arg(long, conflicts_with_all = ["elongation", "sun_sign"])]
        jd: Option<f64>,
    },
    /// Hyleg, Alcochoden and longevity summary for a stored chart
    Longevity {
        /// Chart snapshot (JSON)
        #[arg(long)]
        chart: PathBuf,
        /// Skip the prenatal syzygy even when the chart has a birth moment
        #[arg(long)]
        no_syzygy: bool,
    },
    /// Last New or Full Moon before a moment
    Syzygy {
        /// Julian Day (UT) of birth
        #[arg(long, required_unless_present = "date")]
        jd: Option<f64>,
        /// UTC birth moment (RFC 3339)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Chart snapshot whose cusps place the syzygy in a house
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Ascendant for equal houses when no chart is given
        #[arg(long, default_value_t = 0.0, conflicts_with = "chart")]
        asc: f64,
    },
    /// Saturn returns from birth to the age horizon
    SaturnReturn {
        /// Julian Day (UT) of birth
        #[arg(long)]
        birth_jd: f64,
        /// Reference Julian Day for past/current/future (default: now)
        #[arg(long)]
        as_of_jd: Option<f64>,
        /// Natal Saturn longitude (default: from the built-in ephemeris)
        #[arg(long)]
        natal_saturn: Option<f64>,
    },
}

fn parse_date(s: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| CliError::Date(s.to_string()))
}

fn load_chart(path: &Path) -> Result<ChartSnapshot, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let chart: ChartSnapshot = serde_json::from_str(&text).map_err(|source| CliError::Chart {
        path: path.to_path_buf(),
        source,
    })?;
    chart.validate()?;
    Ok(chart)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let eph = AnalyticEphemeris::new();

    match cli.command {
        Commands::Dignity {
            planet,
            sign,
            degree,
            sect,
            terms,
        } => {
            let mut dignity = config.dignity;
            if let Some(system) = terms {
                dignity.term_system = system;
            }
            let sect = Sect::from(sect);
            let score = evaluate_dignity(planet, sign, degree, sect, &dignity)?;
            if cli.json {
                print_json(&score)?;
            } else {
                let at = position_from_longitude(sign.start_longitude() + degree);
                render::dignity(&format!("{planet} at {}", render::degree_minute(&at)), sect, &score);
            }
        }

        Commands::Term { longitude, system } => {
            let system = system.unwrap_or(config.dignity.term_system);
            if !longitude.is_finite() || !(0.0..360.0).contains(&longitude) {
                return Err(kairos_base::BaseError::InvalidLongitude(longitude).into());
            }
            let pos = position_from_longitude(longitude);
            let entry = term_for(pos.sign, pos.degree_in_sign, system)?;
            if cli.json {
                print_json(&json!({
                    "longitude": longitude,
                    "sign": pos.sign,
                    "system": system,
                    "term": entry,
                }))?;
            } else {
                render::term(longitude, system.name(), &entry);
            }
        }

        Commands::Sect { asc, sun } => {
            let sect = sect_from_longitudes(asc, sun);
            if cli.json {
                print_json(&json!({ "ascendant": asc, "sun": sun, "sect": sect }))?;
            } else {
                println!("{sect}");
            }
        }

        Commands::Phase {
            elongation,
            sun_sign,
            jd,
        } => {
            let (elongation, sun_sign) = match jd {
                Some(jd) => {
                    let sun = eph.position(jd, Body::Sun)?;
                    let sign = position_from_longitude(sun.longitude_deg).sign;
                    (Some(elongation_at(&eph, jd)?), Some(sign))
                }
                None => (elongation, sun_sign),
            };
            let lunar = elongation.map(lunar_phase);
            let solar = sun_sign.map(solar_phase);
            if cli.json {
                print_json(&json!({
                    "elongation": elongation,
                    "lunarPhase": lunar,
                    "sunSign": sun_sign,
                    "solarPhase": solar,
                }))?;
            } else {
                if let (Some(e), Some(phase)) = (elongation, lunar) {
                    println!("Lunar phase: {phase} (elongation {e:.2}°)");
                }
                if let (Some(sign), Some(phase)) = (sun_sign, solar) {
                    println!("Solar phase: {phase} (Sun in {sign})");
                }
            }
        }

        Commands::Longevity { chart, no_syzygy } => {
            let chart = load_chart(&chart)?;
            let syzygy = match chart.birth_jd {
                Some(jd) if !no_syzygy => Some(chart_syzygy(&eph, &chart, jd, &config)?),
                _ => None,
            };
            let summary = longevity_summary(&chart, syzygy.as_ref(), &config.longevity)?;
            if cli.json {
                print_json(&json!({ "prenatalSyzygy": syzygy, "longevity": summary }))?;
            } else {
                render::longevity(&summary, syzygy.as_ref());
            }
        }

        Commands::Syzygy {
            jd,
            date,
            chart,
            asc,
        } => {
            let birth_jd = match (jd, date) {
                (Some(jd), _) => jd,
                (None, Some(date)) => utc_to_jd(&parse_date(&date)?),
                (None, None) => return Err(CliError::Date(String::new())),
            };
            let cusps = match chart {
                Some(path) => load_chart(&path)?.cusps()?,
                None => HouseCusps::equal(asc)?,
            };
            let result = prenatal_syzygy(&eph, birth_jd, &cusps, &config.syzygy)?;
            if cli.json {
                print_json(&result)?;
            } else {
                render::syzygy(&result);
            }
        }

        Commands::SaturnReturn {
            birth_jd,
            as_of_jd,
            natal_saturn,
        } => {
            let as_of_jd = as_of_jd.unwrap_or_else(|| utc_to_jd(&Utc::now()));
            let natal = match natal_saturn {
                Some(lon) => lon,
                None => saturn_longitude_at(&eph, birth_jd)?,
            };
            let analysis = saturn_returns(&eph, natal, birth_jd, as_of_jd, &config.saturn_return)?;
            if cli.json {
                print_json(&analysis)?;
            } else {
                render::saturn_returns(&analysis);
            }
        }
    }
    Ok(())
}

/// Prenatal syzygy placed in the chart's houses. Only `--no-syzygy` drops
/// it; a failed search is an error.
fn chart_syzygy<E: Ephemeris + ?Sized>(
    eph: &E,
    chart: &ChartSnapshot,
    birth_jd: f64,
    config: &CliConfig,
) -> Result<SyzygyResult, CliError> {
    let cusps = chart.cusps()?;
    let syzygy = prenatal_syzygy(eph, birth_jd, &cusps, &config.syzygy)?;
    log::debug!("prenatal syzygy: {} at JD {:.5}", syzygy.syzygy_type.name(), syzygy.julian_day);
    Ok(syzygy)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use kairos_core::EphemerisError;
    use kairos_search::SearchError;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dignity_args_parse() {
        let cli = Cli::try_parse_from([
            "kairos", "dignity", "mars", "--sign", "aries", "--degree", "3", "--sect", "nocturnal",
            "--terms", "ptolemaic",
        ])
        .unwrap();
        match cli.command {
            Commands::Dignity {
                planet,
                sign,
                sect,
                terms,
                ..
            } => {
                assert_eq!(planet, Planet::Mars);
                assert_eq!(sign, Sign::Aries);
                assert_eq!(Sect::from(sect), Sect::Nocturnal);
                assert_eq!(terms, Some(TermSystem::Ptolemaic));
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn unknown_planet_rejected() {
        assert!(Cli::try_parse_from(["kairos", "dignity", "vulcan", "--sign", "leo", "--degree", "1"]).is_err());
    }

    #[test]
    fn phase_needs_an_input() {
        assert!(Cli::try_parse_from(["kairos", "phase"]).is_err());
        assert!(Cli::try_parse_from(["kairos", "phase", "--jd", "2460000.5", "--elongation", "3"]).is_err());
        assert!(Cli::try_parse_from(["kairos", "phase", "--elongation", "200"]).is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["kairos", "sect", "--asc", "0", "--sun", "90", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn syzygy_requires_a_moment() {
        assert!(Cli::try_parse_from(["kairos", "syzygy"]).is_err());
        assert!(Cli::try_parse_from(["kairos", "syzygy", "--date", "2024-01-20T00:00:00Z"]).is_ok());
    }

    struct Offline;

    impl Ephemeris for Offline {
        fn position(&self, _jd: f64, _body: Body) -> Result<kairos_core::BodyPosition, EphemerisError> {
            Err(EphemerisError::Unavailable("ephemeris files not installed".into()))
        }
    }

    fn chart_with_cusps() -> ChartSnapshot {
        ChartSnapshot {
            houses: HouseCusps::equal(10.0).unwrap().iter().collect(),
            birth_jd: Some(2_451_545.0),
            ..Default::default()
        }
    }

    #[test]
    fn syzygy_ephemeris_failure_is_an_error() {
        let err = chart_syzygy(&Offline, &chart_with_cusps(), 2_451_545.0, &CliConfig::default()).unwrap_err();
        assert!(
            matches!(err, CliError::Search(SearchError::Ephemeris(EphemerisError::Unavailable(_)))),
            "{err:?}"
        );
        assert!(err.to_string().contains("not installed"));
    }

    #[test]
    fn syzygy_out_of_range_is_an_error() {
        let err = chart_syzygy(&AnalyticEphemeris, &chart_with_cusps(), 2_300_000.5, &CliConfig::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Search(SearchError::Ephemeris(EphemerisError::OutOfRange(_)))));
    }

    #[test]
    fn syzygy_without_cusps_is_an_error() {
        let chart = ChartSnapshot {
            birth_jd: Some(2_451_545.0),
            ..Default::default()
        };
        let err = chart_syzygy(&AnalyticEphemeris, &chart, 2_451_545.0, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Base(_)));
    }

    #[test]
    fn syzygy_found_with_builtin_ephemeris() {
        let s = chart_syzygy(&AnalyticEphemeris, &chart_with_cusps(), 2_451_545.0, &CliConfig::default()).unwrap();
        assert!(s.julian_day < 2_451_545.0);
        assert!((1..=12).contains(&s.house));
    }

    #[test]
    fn rfc3339_dates() {
        let d = parse_date("2024-01-11T11:57:00Z").unwrap();
        assert!((utc_to_jd(&d) - 2_460_320.997_916_7).abs() < 1e-6);
        assert!(matches!(parse_date("11/01/2024"), Err(CliError::Date(_))));
    }
}
