//! Formatted terminal output for predictions and sweeps.
//!
//! We keep formatting code in one place so:
//! - the engine code stays clean and testable
//! - output changes are localized

use crate::domain::{Objective, PredictionResult, SimulationPoint};

/// Format a single prediction as a two-column summary.
pub fn format_prediction(result: &PredictionResult) -> String {
    let mut out = String::new();

    out.push_str("=== pricecast - Prediction ===\n");
    for (label, value) in [
        ("Unit price", result.unit_price),
        ("Unit cost", result.unit_cost),
        ("Predicted revenue", result.predicted_revenue),
        ("Estimated quantity", result.estimated_quantity),
        ("Total cost", result.total_cost),
        ("Profit", result.profit),
    ] {
        out.push_str(&format!("{label:<20} {value:>14.2}\n"));
    }
    out.push_str(&format!(
        "{:<20} {:>13.2}%\n",
        "Profit margin", result.profit_margin_pct
    ));

    out
}

/// Format a sweep as a table, one row per scenario.
pub fn format_sweep(points: &[SimulationPoint]) -> String {
    if points.is_empty() {
        return "No scenarios could be simulated.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:>7} {:>12} {:>14} {:>10} {:>14}\n",
            "scenario", "factor", "price", "revenue", "quantity", "profit"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<16} {:-<7} {:-<12} {:-<14} {:-<10} {:-<14}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for p in points {
        out.push_str(
            format!(
                "{:<16} {:>7.3} {:>12.2} {:>14.2} {:>10.2} {:>14.2}\n",
                truncate(&p.scenario_label, 16),
                p.price_factor,
                p.unit_price,
                p.predicted_revenue,
                p.predicted_quantity,
                p.profit,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if points.iter().any(|p| p.predicted_quantity != p.raw_quantity) {
        out.push_str("(quantities rescaled to the plausibility ceiling)\n");
    }

    out
}

/// Format the optimizer's pick.
pub fn format_optimum(best: Option<&SimulationPoint>, objective: Objective) -> String {
    match best {
        None => format!("No optimal price found for {}: the sweep was empty.\n", objective.as_str()),
        Some(p) => format!(
            "Best price for {}: {:.2} ({}, factor {:.3})\nrevenue={:.2} quantity={:.2} profit={:.2}\n",
            objective.as_str(),
            p.unit_price,
            p.scenario_label,
            p.price_factor,
            p.predicted_revenue,
            p.predicted_quantity,
            p.profit,
        ),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
