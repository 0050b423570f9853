//! Assembly of source apps from raw autoscaler API records.
//!
//! The source API returns an app, its rules, and its scheduled limit
//! changes as separate paginated collections. A scrape document stores
//! them per app unmodified; [`assemble_app`] folds them into a
//! [`SourceApp`], keeping only the hour and minute of each change's
//! `executes_at` timestamp.

use chrono::{DateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};
use crate::recurrence::Recurrence;
use crate::source::{InstanceLimits, LimitChangeEvent, SourceApp, ThresholdRule};
use crate::time::TimeOfDay;

/// Raw API records for every scraped app, grouped by space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scrape {
    pub spaces: Vec<ScrapedSpace>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedSpace {
    pub guid: String,
    #[serde(default)]
    pub apps: Vec<ScrapedApp>,
}

/// An app record together with its rule and schedule records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedApp {
    #[serde(flatten)]
    pub app: ApiApp,
    #[serde(default)]
    pub rules: Vec<ApiRule>,
    #[serde(default)]
    pub scheduled_limit_changes: Vec<ApiScheduledLimitChange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiApp {
    pub guid: String,
    pub enabled: bool,
    pub instance_limits: InstanceLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRule {
    #[serde(default)]
    pub guid: String,
    /// Spelled this way by the source API.
    #[serde(default, rename = "comparision_metric")]
    pub comparison_metric: String,
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub queue_name: String,
    pub rule_type: String,
    #[serde(default)]
    pub rule_sub_type: String,
    pub threshold: ApiThreshold,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApiThreshold {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiScheduledLimitChange {
    #[serde(default)]
    pub guid: String,
    pub enabled: bool,
    /// RFC 3339 timestamp of the first execution.
    pub executes_at: String,
    pub instance_limits: InstanceLimits,
    pub recurrence: u8,
}

/// Wall-clock start of a limit change, read in the timestamp's own
/// offset.
pub fn start_time_of(executes_at: &str) -> ConvertResult<TimeOfDay> {
    let at = DateTime::parse_from_rfc3339(executes_at).map_err(|source| {
        ConvertError::MalformedTimestamp {
            value: executes_at.to_string(),
            source,
        }
    })?;
    TimeOfDay::new(at.hour() as u8, at.minute() as u8)
}

impl From<&ApiRule> for ThresholdRule {
    fn from(rule: &ApiRule) -> Self {
        ThresholdRule {
            comparison_metric: rule.comparison_metric.clone(),
            metric: rule.metric.clone(),
            queue_name: rule.queue_name.clone(),
            rule_type: rule.rule_type.clone(),
            rule_sub_type: rule.rule_sub_type.clone(),
            threshold_min: rule.threshold.min,
            threshold_max: rule.threshold.max,
        }
    }
}

impl TryFrom<&ApiScheduledLimitChange> for LimitChangeEvent {
    type Error = ConvertError;

    fn try_from(change: &ApiScheduledLimitChange) -> Result<Self, Self::Error> {
        Ok(LimitChangeEvent {
            enabled: change.enabled,
            start_time: start_time_of(&change.executes_at)?,
            instance_limits: change.instance_limits,
            recurrence: Recurrence::from_bits(change.recurrence),
        })
    }
}

/// Build the source model for one app from its raw records.
pub fn assemble_app(
    app: &ApiApp,
    rules: &[ApiRule],
    changes: &[ApiScheduledLimitChange],
) -> ConvertResult<SourceApp> {
    let scheduled_limit_changes = changes
        .iter()
        .map(LimitChangeEvent::try_from)
        .collect::<ConvertResult<Vec<_>>>()?;

    debug!(
        app = %app.guid,
        rules = rules.len(),
        changes = scheduled_limit_changes.len(),
        "assembled app"
    );

    Ok(SourceApp {
        guid: app.guid.clone(),
        enabled: app.enabled,
        instance_limits: app.instance_limits,
        rules: rules.iter().map(ThresholdRule::from).collect(),
        scheduled_limit_changes,
    })
}
