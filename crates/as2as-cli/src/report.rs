//! Human-readable conversion report.

use as2as_core::{Converted, Policy};

use crate::commands::convert::ConvertSummary;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn day_label(day: u8) -> &'static str {
    usize::from(day)
        .checked_sub(1)
        .and_then(|i| WEEKDAY_LABELS.get(i))
        .copied()
        .unwrap_or("?")
}

pub fn format_report(converted: &Converted, summary: &ConvertSummary) -> String {
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Autoscaler Policy Conversion            ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Spaces:    {:<29}║\n", converted.spaces.len()));
    out.push_str(&format!("║  Converted: {:<29}║\n", summary.converted));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str(&format!(
        "Apps: {} converted, {} disabled, {} skipped\n\n",
        summary.converted, summary.disabled, summary.skipped
    ));

    for space in &converted.spaces {
        out.push_str(&format!("Space {}\n", space.guid));
        for app in &space.apps {
            match &app.policy {
                Some(policy) => format_policy(&mut out, &app.guid, policy),
                None => out.push_str(&format!("  • {} (autoscaling disabled)\n", app.guid)),
            }
        }
        out.push('\n');
    }

    out
}

fn format_policy(out: &mut String, guid: &str, policy: &Policy) {
    out.push_str(&format!(
        "  • {} instances {}..{}\n",
        guid, policy.instance_min_count, policy.instance_max_count
    ));

    for rule in &policy.scaling_rules {
        out.push_str(&format!(
            "      rule    {} {} {} → {}\n",
            rule.metric_type,
            rule.operator.symbol(),
            rule.threshold,
            rule.adjustment.symbol()
        ));
    }

    for window in policy.recurring_windows() {
        let days: Vec<&str> = window.days_of_week.iter().map(|&d| day_label(d)).collect();
        out.push_str(&format!(
            "      window  {}–{} [{}] instances {}..{}\n",
            window.start_time,
            window.end_time,
            days.join(","),
            window.instance_min_count,
            window.instance_max_count
        ));
    }
}
