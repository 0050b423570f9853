//! Window construction from weekly change points.
//!
//! Each change point opens a regime that lasts until one minute before the
//! next point in the week; the last point runs on into the first point of
//! the following week. Regimes that cross midnight are cut at 23:59 and
//! resumed at 00:00, and every day with no point of its own gets a
//! full-day window carrying the regime in force.

use chrono::Weekday;
use tracing::debug;

use crate::recurrence::Recurrence;
use crate::schedule::expand::DayPoint;
use crate::source::InstanceLimits;
use crate::target::RecurringWindow;
use crate::time::TimeOfDay;

/// An inclusive `[start, end]` interval on each day in `days`, internal
/// weekday representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub days: Recurrence,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub limits: InstanceLimits,
}

impl Window {
    fn on(day: Weekday, start: TimeOfDay, end: TimeOfDay, limits: InstanceLimits) -> Self {
        Self {
            days: Recurrence::only(day),
            start,
            end,
            limits,
        }
    }

    fn full_day(day: Weekday, limits: InstanceLimits) -> Self {
        Self::on(day, TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY, limits)
    }

    /// Target form: weekdays renumbered Monday = 1 .. Sunday = 7, initial
    /// instance count at the midpoint of the limits.
    pub fn to_recurring(&self) -> RecurringWindow {
        let mut days_of_week: Vec<u8> = self
            .days
            .days()
            .map(|day| day.number_from_monday() as u8)
            .collect();
        days_of_week.sort_unstable();

        RecurringWindow {
            start_time: self.start,
            end_time: self.end,
            days_of_week,
            instance_min_count: self.limits.min,
            instance_max_count: self.limits.max,
            initial_min_instance_count: Some(self.limits.midpoint()),
        }
    }
}

/// Turn a week's change points into windows covering the whole week.
///
/// When every point carries the same limits the regime never changes,
/// which is emitted as one 00:00–23:59 window on every day.
pub fn build_windows(mut points: Vec<DayPoint>) -> Vec<Window> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let limits = first.limits;
    if points.iter().all(|point| point.limits == limits) {
        return vec![Window {
            days: Recurrence::EVERY_DAY,
            start: TimeOfDay::MIDNIGHT,
            end: TimeOfDay::END_OF_DAY,
            limits,
        }];
    }

    // Stable: among points at the same instant the last one wins.
    points.sort_by_key(DayPoint::week_position);
    let windows = cyclic_windows(&points);
    debug!(points = points.len(), windows = windows.len(), "built schedule windows");
    windows
}

/// Walk `sorted` as a cycle, folding each (previous, next) pair into the
/// windows of the previous point's regime. `sorted` must be non-empty and
/// in week order.
fn cyclic_windows(sorted: &[DayPoint]) -> Vec<Window> {
    let Some(&first) = sorted.first() else {
        return Vec::new();
    };

    let steps = sorted
        .iter()
        .skip(1)
        .map(|point| (*point, false))
        .chain(std::iter::once((first, true)));

    let (_, windows) = steps.fold(
        (first, Vec::with_capacity(sorted.len() * 2)),
        |(prev, mut windows), (next, wraps_week)| {
            close_regime(&prev, &next, wraps_week, &mut windows);
            (next, windows)
        },
    );
    windows
}

/// Emit the windows for `prev`'s regime, which ends one minute before
/// `next` starts.
fn close_regime(prev: &DayPoint, next: &DayPoint, wraps_week: bool, out: &mut Vec<Window>) {
    let limits = prev.limits;
    let end = next.start.preceding_minute();
    let days_ahead = days_between(prev.weekday, next.weekday, wraps_week);

    if days_ahead == 0 {
        // Same day. An equal start means `next` replaces `prev` outright.
        if next.start > prev.start {
            out.push(Window::on(prev.weekday, prev.start, end, limits));
        }
        return;
    }

    out.push(Window::on(prev.weekday, prev.start, TimeOfDay::END_OF_DAY, limits));

    let mut day = prev.weekday;
    for _ in 1..days_ahead {
        day = day.succ();
        out.push(Window::full_day(day, limits));
    }

    // Starting at midnight leaves nothing of the regime on `next`'s day.
    if next.start != TimeOfDay::MIDNIGHT {
        out.push(Window::on(next.weekday, TimeOfDay::MIDNIGHT, end, limits));
    }
}

/// Whole days from `from` forward to `to`. When wrapping into the next
/// week, the same weekday is seven days away rather than zero.
fn days_between(from: Weekday, to: Weekday, wraps_week: bool) -> u32 {
    let ahead = (to.num_days_from_sunday() + 7 - from.num_days_from_sunday()) % 7;
    if wraps_week && ahead == 0 { 7 } else { ahead }
}
