//! Weekly schedule conversion.
//!
//! Source limit changes only say when a regime *starts*. Target windows
//! need both ends, may not span midnight, and must cover days on which
//! nothing changed. Conversion runs in three stages:
//!
//! 1. [`expand`]: enabled events → one [`DayPoint`] per active weekday.
//! 2. [`build_windows`]: day-points → non-overlapping [`Window`]s
//!    covering the whole week.
//! 3. [`condense`]: merge windows that differ only in their weekday.

pub mod condense;
pub mod expand;
pub mod window;

pub use condense::condense;
pub use expand::{DayPoint, expand};
pub use window::{Window, build_windows};

use crate::source::LimitChangeEvent;
use crate::target::RecurringWindow;

/// Run the full pipeline over an app's limit changes.
///
/// Returns an empty list when no enabled change is active on any day.
pub fn recurring_windows(changes: &[LimitChangeEvent]) -> Vec<RecurringWindow> {
    let windows = build_windows(expand(changes));
    condense(windows.iter().map(Window::to_recurring).collect())
}
