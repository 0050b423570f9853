//! PCF autoscaler to OCF autoscaler policy conversion.
//!
//! The source autoscaler describes an app with instance limits, threshold
//! rules, and weekly *limit changes*: "at 08:00 on these weekdays, set the
//! limits to min/max". The target autoscaler wants scaling rules with a
//! direction and recurring schedules with explicit start *and* end times.
//!
//! # Pipeline
//!
//! ```text
//! SourceApp
//!   ├─ rules ──────────────► rules::translate_rule ──► [ScalingRule; 2] each
//!   └─ scheduled_limit_changes
//!        ──► schedule::expand            (one DayPoint per active weekday)
//!        ──► schedule::build_windows     (end = next start - 1 minute,
//!                                         fill idle days, split at midnight)
//!        ──► Window::to_recurring        (weekdays remapped to Monday=1..Sunday=7)
//!        ──► schedule::condense          (merge identical windows across days)
//!                                   ▼
//!                              Policy (None if the app is disabled)
//! ```
//!
//! Everything here is pure and synchronous. Network retrieval and policy
//! submission are handled elsewhere.

pub mod error;
pub mod ingest;
pub mod policy;
pub mod recurrence;
pub mod rules;
pub mod schedule;
pub mod source;
pub mod target;
pub mod time;

pub use error::{ConvertError, ConvertResult};
pub use policy::translate_policy;
pub use recurrence::Recurrence;
pub use source::*;
pub use target::*;
pub use time::TimeOfDay;
