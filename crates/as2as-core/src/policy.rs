//! Whole-app policy translation.

use tracing::debug;

use crate::error::ConvertResult;
use crate::rules::translate_rule;
use crate::schedule::recurring_windows;
use crate::source::SourceApp;
use crate::target::{Policy, Schedules};

/// Instance bounds below 1 are raised to 1. An unset (zero) maximum is
/// raised too, not left unbounded.
fn clamp_instance_bound(count: i64) -> i64 {
    if count > 0 { count } else { 1 }
}

/// Translate one app's source configuration into a target policy.
///
/// Returns `Ok(None)` for apps with autoscaling disabled. Any rule that
/// can't be translated fails the whole app.
pub fn translate_policy(app: &SourceApp) -> ConvertResult<Option<Policy>> {
    if !app.enabled {
        debug!(app = %app.guid, "autoscaling disabled, no policy");
        return Ok(None);
    }

    let mut scaling_rules = Vec::with_capacity(app.rules.len() * 2);
    for rule in &app.rules {
        scaling_rules.extend(translate_rule(rule)?);
    }

    let windows = recurring_windows(&app.scheduled_limit_changes);
    debug!(
        app = %app.guid,
        rules = scaling_rules.len(),
        windows = windows.len(),
        "translated policy"
    );

    Ok(Some(Policy {
        instance_min_count: clamp_instance_bound(app.instance_limits.min),
        instance_max_count: clamp_instance_bound(app.instance_limits.max),
        scaling_rules,
        schedules: (!windows.is_empty()).then(|| Schedules::utc(windows)),
    }))
}
