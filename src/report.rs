use std::fmt::Write;

use chrono::NaiveDate;

use crate::aggregate::{aggregate_by, reduce_kpis, status_breakdown};
use crate::models::{Dimension, TrainingRecord};

pub fn build_report(
    scope: Option<&str>,
    generated_on: NaiveDate,
    subset: &[&TrainingRecord],
) -> String {
    let kpis = reduce_kpis(subset);
    let mut countries = aggregate_by(subset, Dimension::Country);
    countries.sort_by(|a, b| {
        b.completion_rate
            .partial_cmp(&a.completion_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let statuses = status_breakdown(subset);

    let mut output = String::new();
    let scope_label = scope.unwrap_or("all records");

    let _ = writeln!(output, "# Training Analytics Report");
    let _ = writeln!(output, "Generated for {} on {}", scope_label, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Performance Indicators");

    if subset.is_empty() {
        let _ = writeln!(output, "No training records match this scope.");
    } else {
        let _ = writeln!(output, "- Completion rate: {:.1}%", kpis.completion_rate);
        let _ = writeln!(
            output,
            "- Avg hours per associate: {:.1}",
            kpis.avg_hours_per_associate
        );
        let _ = writeln!(output, "- Total associates: {}", kpis.total_associates);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Completion by Country");

    if countries.is_empty() {
        let _ = writeln!(output, "No countries in scope.");
    } else {
        for country in countries.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({}): {:.1}% completion, {} associates, {:.1} hours",
                country.name,
                country.region.as_deref().unwrap_or("unknown region"),
                country.completion_rate,
                country.associates,
                country.total_hours
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if subset.is_empty() {
        let _ = writeln!(output, "No assignments recorded for this scope.");
    } else {
        for status in statuses.iter() {
            let _ = writeln!(output, "- {}: {} assignments", status.name, status.value);
        }
    }

    output
}
