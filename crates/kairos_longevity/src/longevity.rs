//! Longevity summary: Hyleg, then Alcochoden, then a qualitative reading.

use kairos_base::{ChartSnapshot, DignityType};
use kairos_search::SyzygyResult;

use crate::alcochoden::select_alcochoden;
use crate::alcochoden_types::AlcochodenResult;
use crate::error::LongevityError;
use crate::hyleg::select_hyleg;
use crate::hyleg_types::HylegResult;
use crate::longevity_types::{
    DISCLAIMER, LongevityConfig, LongevitySummary, VitalForce, YearsConfidence,
};

/// Strong at 4 points or more, weak below 0. A calculated point has no
/// dignity and reads as moderate.
pub fn classify_vital_force(hyleg: &HylegResult) -> VitalForce {
    let Some(data) = hyleg.hyleg() else {
        return VitalForce::Undetermined;
    };
    match &data.dignity {
        None => VitalForce::Moderate,
        Some(score) if score.points >= 4 => VitalForce::Strong,
        Some(score) if score.points >= 0 => VitalForce::Moderate,
        Some(_) => VitalForce::Weak,
    }
}

/// Low when the Alcochoden is combust or in detriment or fall at its own
/// position, high in domicile or exaltation, moderate otherwise.
pub fn classify_years_confidence(alcochoden: &AlcochodenResult) -> YearsConfidence {
    let Some(data) = alcochoden.alcochoden() else {
        return YearsConfidence::Undetermined;
    };
    match data.own_dignity.classification {
        _ if data.is_combust => YearsConfidence::Low,
        DignityType::Detriment | DignityType::Fall => YearsConfidence::Low,
        DignityType::Domicile | DignityType::Exaltation => YearsConfidence::High,
        _ => YearsConfidence::Moderate,
    }
}

/// Run both selectors and classify the outcome.
pub fn longevity_summary(
    chart: &ChartSnapshot,
    syzygy: Option<&SyzygyResult>,
    config: &LongevityConfig,
) -> Result<LongevitySummary, LongevityError> {
    let hyleg = select_hyleg(chart, syzygy, &config.hyleg)?;
    let alcochoden = select_alcochoden(chart, &hyleg, &config.alcochoden)?;
    let vital_force = classify_vital_force(&hyleg);
    let years_confidence = classify_years_confidence(&alcochoden);
    let estimated_years = alcochoden.alcochoden().map(|a| a.final_years);
    log::debug!(
        "longevity: vital force {}, years confidence {}",
        vital_force.name(),
        years_confidence.name()
    );

    Ok(LongevitySummary {
        hyleg,
        alcochoden,
        vital_force,
        years_confidence,
        estimated_years,
        disclaimer: DISCLAIMER,
    })
}
