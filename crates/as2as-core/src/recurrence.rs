//! Weekday recurrence bitmask.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// The week in bitmask order, Sunday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A set of weekdays packed into the low 7 bits of a byte.
///
/// Sunday is the most significant of the seven (`0x40`), Saturday the
/// least (`0x01`). Bits above the seventh are dropped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Recurrence(u8);

impl Recurrence {
    const MASK: u8 = 0x7f;

    pub const NEVER: Recurrence = Recurrence(0);
    pub const EVERY_DAY: Recurrence = Recurrence(Self::MASK);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// The set containing just `day`.
    pub fn only(day: Weekday) -> Self {
        Self(Self::bit(day))
    }

    pub fn active_on(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | Self::bit(day))
    }

    /// Active weekdays, Sunday through Saturday.
    pub fn days(self) -> impl Iterator<Item = Weekday> {
        WEEK.into_iter().filter(move |day| self.active_on(*day))
    }

    fn bit(day: Weekday) -> u8 {
        1 << (6 - day.num_days_from_sunday())
    }
}

impl From<u8> for Recurrence {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<Recurrence> for u8 {
    fn from(recurrence: Recurrence) -> Self {
        recurrence.0
    }
}

impl FromIterator<Weekday> for Recurrence {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NEVER, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_is_most_significant_bit() {
        let sunday = Recurrence::from_bits(0b100_0000);
        assert!(sunday.active_on(Weekday::Sun));
        assert!(!sunday.active_on(Weekday::Sat));

        let saturday = Recurrence::from_bits(0b000_0001);
        assert!(saturday.active_on(Weekday::Sat));
        assert!(!saturday.active_on(Weekday::Sun));
    }

    #[test]
    fn monday_and_wednesday() {
        let r = Recurrence::from_bits(0b010_1000);
        let days: Vec<Weekday> = r.days().collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn high_bit_is_ignored() {
        let r = Recurrence::from_bits(0xff);
        assert_eq!(r, Recurrence::EVERY_DAY);
        assert_eq!(r.bits(), 0x7f);
        assert_eq!(r.days().count(), 7);
    }

    #[test]
    fn never_has_no_days() {
        assert_eq!(Recurrence::NEVER.bits(), 0);
        assert_eq!(Recurrence::NEVER.days().count(), 0);
    }

    #[test]
    fn collects_from_weekdays() {
        let r: Recurrence = [Weekday::Fri, Weekday::Sun].into_iter().collect();
        assert_eq!(r.bits(), 0b100_0010);
        assert_eq!(Recurrence::only(Weekday::Thu).bits(), 0b000_0100);
    }

    #[test]
    fn serializes_as_integer() {
        let r: Recurrence = serde_json::from_str("40").unwrap();
        assert!(r.active_on(Weekday::Mon));
        assert!(r.active_on(Weekday::Wed));
        assert_eq!(serde_json::to_string(&r).unwrap(), "40");
    }
}
