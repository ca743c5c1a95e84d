use super::{ModeListing, TableReport};
use crate::batch::{BatchReport, TripScore};
use crate::types::outcome::Assessment;
use crate::types::rules::DistanceRule;

pub fn trip_to_markdown(trip: &TripScore) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {} ({} km)\n\n", trip.mode, trip.input_km));
    let result = trip.assessment.result();
    match &trip.assessment {
        Assessment::Scored(_) => output.push_str("Outcome: scored\n\n"),
        Assessment::NotViable { reason, .. } => {
            output.push_str(&format!("Outcome: not viable ({reason})\n\n"));
        }
    }
    output.push_str(&format!(
        "- score: {:.1}\n- coins: {}\n- co2e_saved_kg: {:.2}\n- distance_km: {}\n",
        result.score, result.coins, result.co2e_saved_kg, result.distance_km
    ));
    output
}

pub fn modes_to_markdown(listing: &ModeListing) -> String {
    let mut output = String::new();
    output.push_str("# Transport Modes\n\n");
    output.push_str(&format!(
        "Baseline: {}\nFallback factor: {}\n\n",
        listing.baseline_mode, listing.fallback_mode
    ));
    output.push_str("| mode | gCO2e/pkm | rules |\n|---|---|---|\n");
    for info in &listing.modes {
        let rules = if info.rules.is_empty() {
            "-".to_string()
        } else {
            info.rules
                .iter()
                .map(describe_rule)
                .collect::<Vec<_>>()
                .join(", ")
        };
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            info.mode, info.factor_g_per_km, rules
        ));
    }
    output
}

pub fn table_to_markdown(report: &TableReport) -> String {
    let summary = &report.summary;
    let span = match (summary.first_band_km, summary.last_band_km) {
        (Some(first), Some(last)) => format!("{first}-{last} km"),
        _ => "none".to_string(),
    };
    let mut output = String::new();
    output.push_str("# Score Table\n\n");
    output.push_str(&format!(
        "- source: {}\n- rows: {}\n- step_km: {}\n- bands: {}\n- missing_bands: {}\n- fingerprint: {}\n- modes: {}\n",
        report.source,
        summary.rows,
        summary.step_km,
        span,
        summary.missing_bands,
        summary.fingerprint.as_deref().unwrap_or("-"),
        summary.modes.join(", ")
    ));
    output
}

pub fn batch_to_markdown(report: &BatchReport) -> String {
    let totals = &report.totals;
    let mut output = String::new();
    output.push_str("# Batch Scores\n\n");
    output.push_str(&format!(
        "- trips: {}\n- scored: {}\n- not_viable: {}\n- coins: {}\n- co2e_saved_kg: {:.2}\n",
        totals.trips, totals.scored, totals.not_viable, totals.coins, totals.co2e_saved_kg
    ));
    output
}

fn describe_rule(rule: &DistanceRule) -> String {
    match rule {
        DistanceRule::MinimumKm(km) => format!("not viable below {km} km"),
        DistanceRule::MaximumKm(km) => format!("not viable beyond {km} km"),
        DistanceRule::CapKm(km) => format!("capped at {km} km"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::emission::EmissionFactors;
    use crate::types::outcome::{NotViableReason, ScoreResult};
    use crate::types::rules::ModeRules;

    #[test]
    fn markdown_trip_shows_reason_when_not_viable() {
        let trip = TripScore {
            mode: "plane (domestic)".to_string(),
            input_km: 100.0,
            assessment: Assessment::NotViable {
                reason: NotViableReason::BelowMinimum { min_km: 250.0 },
                distance_km: 100,
            },
        };

        let rendered = trip_to_markdown(&trip);
        assert!(rendered.contains("not viable below 250 km"));
        assert!(rendered.contains("- coins: 0"));
        assert!(rendered.contains("- distance_km: 100"));
    }

    #[test]
    fn markdown_trip_lists_result() {
        let trip = TripScore {
            mode: "bike".to_string(),
            input_km: 100.0,
            assessment: Assessment::Scored(ScoreResult {
                score: 8.0,
                coins: 160,
                co2e_saved_kg: 17.1,
                distance_km: 100,
            }),
        };

        let rendered = trip_to_markdown(&trip);
        assert!(rendered.contains("Outcome: scored"));
        assert!(rendered.contains("- co2e_saved_kg: 17.10"));
    }

    #[test]
    fn markdown_modes_lists_rules() {
        let listing = ModeListing::new(&EmissionFactors::default(), &ModeRules::standard());
        let rendered = modes_to_markdown(&listing);
        assert!(rendered.contains("Baseline: car (solo/taxi)"));
        assert!(rendered.contains("| walking | 0 | not viable beyond 25 km |"));
        assert!(rendered.contains("| train (intercity) | 29 | capped at 1500 km |"));
    }
}
