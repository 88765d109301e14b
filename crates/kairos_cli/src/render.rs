//! Human-readable output. `--json` bypasses this module entirely.

use kairos_base::{DignityScore, Sect, TermEntry, ZodiacPosition, position_from_longitude};
use kairos_longevity::{AlcochodenResult, HylegCandidate, HylegResult, LongevitySummary};
use kairos_search::{SaturnReturnAnalysis, SyzygyResult};

/// `15°07' Leo`
pub fn degree_minute(pos: &ZodiacPosition) -> String {
    format!("{}°{:02}' {}", pos.degree, pos.minute, pos.sign)
}

fn signed(points: i32) -> String {
    format!("{points:+}")
}

pub fn dignity(label: &str, sect: Sect, score: &DignityScore) {
    println!(
        "{label} ({} chart): {}, {} points",
        sect.name().to_lowercase(),
        score.classification,
        signed(score.points)
    );
    for d in &score.constituent_dignities {
        println!("  {:<12} {}", d.dignity_type.name(), signed(d.points));
    }
}

pub fn term(longitude: f64, system: &str, entry: &TermEntry) {
    let pos = position_from_longitude(longitude);
    println!(
        "{} lies in the {} term of {} ({}°-{}° {}, {system})",
        degree_minute(&pos),
        entry.ruler,
        pos.sign,
        entry.start_deg,
        entry.end_deg,
        pos.sign
    );
}

fn candidate_line(c: &HylegCandidate) -> String {
    let pos = position_from_longitude(c.longitude);
    let mark = if c.is_qualified { '*' } else { ' ' };
    format!(
        "{mark} {:<16} {:<14} house {:>2}  {}",
        c.name.name(),
        degree_minute(&pos),
        c.house,
        c.qualification_reason
    )
}

fn hyleg(result: &HylegResult) {
    match result {
        HylegResult::Found(data) => {
            let pos = position_from_longitude(data.hyleg.longitude);
            println!(
                "Hyleg: {} at {}, house {} (lord {})",
                data.hyleg.name,
                degree_minute(&pos),
                data.hyleg.house,
                data.domicile_lord
            );
        }
        HylegResult::NotFound { reason, .. } => println!("Hyleg: none ({reason})"),
    }
    for c in result.candidates() {
        println!("  {}", candidate_line(c));
    }
}

fn alcochoden(result: &AlcochodenResult) {
    match result {
        AlcochodenResult::Found(data) => {
            println!(
                "Alcochoden: {} ({} at the Hyleg's degree), house {}",
                data.planet,
                signed(data.candidate.dignity_at_hyleg_degree.points),
                data.house
            );
            println!("  {} years: {}", data.year_type, data.base_years);
            for m in &data.modifications {
                println!("  {:>+6.1}  {}", m.adjustment_years, m.reason);
            }
            println!("  final: {:.1} years", data.final_years);
        }
        AlcochodenResult::NoCandidate { reason, .. } => println!("Alcochoden: none ({reason})"),
        AlcochodenResult::NoHyleg { reason } => println!("Alcochoden: not evaluated ({reason})"),
    }
}

pub fn longevity(summary: &LongevitySummary, syzygy: Option<&SyzygyResult>) {
    if let Some(s) = syzygy {
        println!(
            "Prenatal syzygy: {} at {}, house {}",
            s.syzygy_type.name(),
            degree_minute(&s.position()),
            s.house
        );
    }
    hyleg(&summary.hyleg);
    alcochoden(&summary.alcochoden);
    println!("Vital force: {}", summary.vital_force.name());
    println!("Years confidence: {}", summary.years_confidence.name());
    if let Some(years) = summary.estimated_years {
        println!("Estimated years: {years:.1}");
    }
    println!();
    println!("{}", summary.disclaimer);
}

pub fn syzygy(s: &SyzygyResult) {
    println!("{} {}", s.syzygy_type.name(), s.date_utc.format("%Y-%m-%d %H:%M UTC"));
    println!("  JD {:.5}", s.julian_day);
    println!("  {} (house {})", degree_minute(&s.position()), s.house);
    println!(
        "  elongation {:.4}°, residual {:.4}° ({:?})",
        s.elongation_deg, s.residual_deg, s.precision
    );
}

pub fn saturn_returns(a: &SaturnReturnAnalysis) {
    println!(
        "Natal Saturn {} ({} returns within the horizon)",
        degree_minute(&position_from_longitude(a.natal_longitude)),
        a.returns.len()
    );
    for r in &a.returns {
        println!(
            "Return {} at age {:.1} [{:?}]",
            r.return_number, r.age_at_return, r.status
        );
        for p in &r.passes {
            println!(
                "  pass {}  {}  {}",
                p.pass_number,
                p.date_utc.format("%Y-%m-%d"),
                if p.is_retrograde { "retrograde" } else { "direct" }
            );
        }
    }
    match &a.current_return {
        Some(r) => println!("Current: return {}", r.return_number),
        None => println!("Current: none"),
    }
    match (&a.next_return, a.days_until_next_return) {
        (Some(r), Some(days)) => println!("Next: return {} in {days:.0} days", r.return_number),
        _ => println!("Next: unknown"),
    }
    println!("Cycle progress: {:.1}%", a.cycle_progress_percent);
}
