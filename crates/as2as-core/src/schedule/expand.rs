//! Recurrence expansion.

use chrono::Weekday;

use crate::recurrence::WEEK;
use crate::source::{InstanceLimits, LimitChangeEvent};
use crate::time::TimeOfDay;

/// One weekday occurrence of a recurring limit change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPoint {
    pub weekday: Weekday,
    pub start: TimeOfDay,
    pub limits: InstanceLimits,
}

impl DayPoint {
    /// Sort key: Sunday first, then start time.
    pub fn week_position(&self) -> (u32, TimeOfDay) {
        (self.weekday.num_days_from_sunday(), self.start)
    }
}

/// Emit a day-point for every (enabled event, active weekday) pair, in
/// event order and Sunday-first within an event.
pub fn expand(changes: &[LimitChangeEvent]) -> Vec<DayPoint> {
    changes
        .iter()
        .filter(|change| change.enabled)
        .flat_map(|change| {
            WEEK.into_iter()
                .filter(move |day| change.recurrence.active_on(*day))
                .map(move |weekday| DayPoint {
                    weekday,
                    start: change.start_time,
                    limits: change.instance_limits,
                })
        })
        .collect()
}
