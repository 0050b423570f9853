//! Wall-clock time of day with minute precision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// An `HH:MM` time of day. Always normalized (hour < 24, minute < 60).
///
/// Ordering is chronological within a day. In dump documents this is
/// written as `{"hour": 8, "minute": 30}`; target policies use the
/// `"08:30"` string form via [`hhmm`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawTimeOfDay")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// 00:00
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };
    /// 23:59, the last minute a window may cover on a given day.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay { hour: 23, minute: 59 };

    pub fn new(hour: u8, minute: u8) -> ConvertResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(ConvertError::InvalidTimeOfDay { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Minutes elapsed since midnight (0..1440).
    pub fn minute_of_day(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// The time one minute earlier. 00:00 wraps to 23:59.
    pub fn preceding_minute(self) -> Self {
        match (self.hour, self.minute) {
            (0, 0) => Self::END_OF_DAY,
            (hour, 0) => Self {
                hour: hour - 1,
                minute: 59,
            },
            (hour, minute) => Self {
                hour,
                minute: minute - 1,
            },
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConvertError::MalformedTimeOfDay(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour = hour.parse::<u8>().map_err(|_| malformed())?;
        let minute = minute.parse::<u8>().map_err(|_| malformed())?;

        Self::new(hour, minute)
    }
}

/// Unvalidated wire form, checked by `TryFrom` on deserialize.
#[derive(Deserialize)]
struct RawTimeOfDay {
    hour: u8,
    minute: u8,
}

impl TryFrom<RawTimeOfDay> for TimeOfDay {
    type Error = ConvertError;

    fn try_from(raw: RawTimeOfDay) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute)
    }
}

/// Serde adapter for the `"HH:MM"` string form.
///
/// Use with `#[serde(with = "crate::time::hhmm")]`.
pub mod hhmm {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TimeOfDay;

    pub fn serialize<S: Serializer>(time: &TimeOfDay, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(time)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeOfDay, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
