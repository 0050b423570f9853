//! Source (PCF autoscaler) policy model, as stored in a dump document.

use serde::{Deserialize, Serialize};

use crate::recurrence::Recurrence;
use crate::time::TimeOfDay;

/// All scraped apps, grouped by space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dump {
    pub spaces: Vec<Space>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub guid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<SourceApp>,
}

/// Autoscaling configuration of one app on the source platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceApp {
    pub guid: String,
    pub enabled: bool,
    pub instance_limits: InstanceLimits,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ThresholdRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scheduled_limit_changes: Vec<LimitChangeEvent>,
}

/// Min/max instance count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceLimits {
    pub min: i64,
    pub max: i64,
}

impl InstanceLimits {
    /// Midpoint of the limits, rounded down.
    pub fn midpoint(self) -> i64 {
        (self.min + self.max).div_euclid(2)
    }
}

/// A threshold rule: scale down below `threshold_min`, up above
/// `threshold_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comparison_metric: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metric: String,
    /// Only meaningful for queue-depth rules.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub queue_name: String,
    pub rule_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rule_sub_type: String,
    pub threshold_min: f64,
    pub threshold_max: f64,
}

/// "Starting at `start_time` on every day in `recurrence`, use these
/// limits."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitChangeEvent {
    pub enabled: bool,
    pub start_time: TimeOfDay,
    pub instance_limits: InstanceLimits,
    pub recurrence: Recurrence,
}
