//! Target (OCF app-autoscaler) policy model.

use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, hhmm};

/// The only timezone emitted in converted schedules.
pub const TIMEZONE_UTC: &str = "Etc/UTC";

/// Metric identifiers understood by the target autoscaler.
pub mod metric {
    pub const CPU_UTIL: &str = "cpu";
    pub const MEMORY_UTIL: &str = "memoryutil";
    pub const THROUGHPUT: &str = "throughput";
    pub const RESPONSE_TIME: &str = "responsetime";
}

/// A scaling policy for one app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub instance_min_count: i64,
    pub instance_max_count: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scaling_rules: Vec<ScalingRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedules: Option<Schedules>,
}

impl Policy {
    /// Stamp cooldown and breach duration onto every scaling rule.
    ///
    /// `None` leaves the corresponding field untouched.
    pub fn apply_rule_timing(&mut self, cool_down_secs: Option<i64>, breach_duration_secs: Option<i64>) {
        for rule in &mut self.scaling_rules {
            if cool_down_secs.is_some() {
                rule.cool_down_secs = cool_down_secs;
            }
            if breach_duration_secs.is_some() {
                rule.breach_duration_secs = breach_duration_secs;
            }
        }
    }

    pub fn recurring_windows(&self) -> &[RecurringWindow] {
        self.schedules
            .as_ref()
            .map(|s| s.recurring_schedule.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }
}

/// Instance count change applied when a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    #[serde(rename = "-1")]
    Down,
    #[serde(rename = "+1")]
    Up,
}

impl Adjustment {
    pub fn symbol(self) -> &'static str {
        match self {
            Adjustment::Down => "-1",
            Adjustment::Up => "+1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingRule {
    pub metric_type: String,
    pub operator: Operator,
    pub threshold: i64,
    pub adjustment: Adjustment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cool_down_secs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breach_duration_secs: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedules {
    pub timezone: String,
    pub recurring_schedule: Vec<RecurringWindow>,
}

impl Schedules {
    pub fn utc(recurring_schedule: Vec<RecurringWindow>) -> Self {
        Self {
            timezone: TIMEZONE_UTC.to_string(),
            recurring_schedule,
        }
    }
}

/// A recurring `[start_time, end_time]` window (both inclusive, minute
/// precision) on a set of weekdays, Monday = 1 through Sunday = 7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringWindow {
    #[serde(with = "hhmm")]
    pub start_time: TimeOfDay,
    #[serde(with = "hhmm")]
    pub end_time: TimeOfDay,
    pub days_of_week: Vec<u8>,
    pub instance_min_count: i64,
    pub instance_max_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_min_instance_count: Option<i64>,
}

impl RecurringWindow {
    /// Number of minutes covered on each of its days.
    pub fn minutes_per_day(&self) -> u32 {
        let span = self
            .end_time
            .minute_of_day()
            .saturating_sub(self.start_time.minute_of_day());
        u32::from(span) + 1
    }
}

/// Converted policies, grouped the same way as the dump they came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Converted {
    pub spaces: Vec<ConvertedSpace>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedSpace {
    pub guid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<ConvertedApp>,
}

/// An app and its converted policy. `policy` is omitted for apps whose
/// autoscaling is disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedApp {
    pub guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<Policy>,
}
