//! Merge windows that differ only in their weekdays.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::target::RecurringWindow;
use crate::time::TimeOfDay;

type WindowKey = (TimeOfDay, TimeOfDay, i64, i64);

fn key(window: &RecurringWindow) -> WindowKey {
    (
        window.start_time,
        window.end_time,
        window.instance_min_count,
        window.instance_max_count,
    )
}

/// Group windows by (start, end, min, max) and union their weekdays.
///
/// Groups come out in the order their first member appeared; each group's
/// weekdays are deduplicated and ascending. Condensing an already
/// condensed list returns it unchanged.
pub fn condense(windows: Vec<RecurringWindow>) -> Vec<RecurringWindow> {
    let input_len = windows.len();
    let mut index: HashMap<WindowKey, usize> = HashMap::new();
    let mut groups: Vec<(RecurringWindow, BTreeSet<u8>)> = Vec::new();

    for window in windows {
        let k = key(&window);
        match index.get(&k) {
            Some(&slot) => groups[slot].1.extend(window.days_of_week.iter().copied()),
            None => {
                index.insert(k, groups.len());
                let days = window.days_of_week.iter().copied().collect();
                groups.push((window, days));
            }
        }
    }

    debug!(windows = input_len, condensed = groups.len(), "condensed recurring windows");

    groups
        .into_iter()
        .map(|(window, days)| RecurringWindow {
            days_of_week: days.into_iter().collect(),
            ..window
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn window(start: (u8, u8), end: (u8, u8), days: &[u8], min: i64, max: i64) -> RecurringWindow {
        RecurringWindow {
            start_time: TimeOfDay::new(start.0, start.1).unwrap(),
            end_time: TimeOfDay::new(end.0, end.1).unwrap(),
            days_of_week: days.to_vec(),
            instance_min_count: min,
            instance_max_count: max,
            initial_min_instance_count: Some((min + max) / 2),
        }
    }

    fn sorted(mut windows: Vec<RecurringWindow>) -> Vec<RecurringWindow> {
        windows.sort_by_key(|w| (key(w), w.days_of_week.clone()));
        windows
    }

    #[test]
    fn merges_identical_windows_across_days() {
        let condensed = condense(vec![
            window((0, 0), (23, 59), &[4], 1, 2),
            window((8, 0), (17, 59), &[1], 3, 6),
            window((0, 0), (23, 59), &[2], 1, 2),
        ]);

        assert_eq!(
            condensed,
            vec![
                window((0, 0), (23, 59), &[2, 4], 1, 2),
                window((8, 0), (17, 59), &[1], 3, 6),
            ]
        );
    }

    #[test]
    fn different_limits_stay_separate() {
        let condensed = condense(vec![
            window((0, 0), (23, 59), &[1], 1, 2),
            window((0, 0), (23, 59), &[2], 1, 3),
        ]);
        assert_eq!(condensed.len(), 2);
    }

    #[test]
    fn duplicate_days_are_collapsed() {
        let condensed = condense(vec![
            window((9, 0), (9, 59), &[3, 1], 1, 1),
            window((9, 0), (9, 59), &[1], 1, 1),
        ]);
        assert_eq!(condensed[0].days_of_week, vec![1, 3]);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(condense(vec![]).is_empty());
    }

    fn arb_window() -> impl Strategy<Value = RecurringWindow> {
        (0u8..3, 1u8..8, 0i64..3).prop_map(|(slot, day, min)| {
            let start = (slot * 8, 0);
            let end = (slot * 8 + 7, 59);
            window(start, end, &[day], min, min + 1)
        })
    }

    proptest! {
        #[test]
        fn result_is_independent_of_input_order(
            windows in proptest::collection::vec(arb_window(), 0..24),
            seed in any::<u64>(),
        ) {
            let mut shuffled = windows.clone();
            // Deterministic rotation plus reversal stands in for a shuffle.
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left((seed as usize) % len);
            }
            if seed % 2 == 0 {
                shuffled.reverse();
            }

            prop_assert_eq!(sorted(condense(windows)), sorted(condense(shuffled)));
        }

        #[test]
        fn condensing_twice_changes_nothing(windows in proptest::collection::vec(arb_window(), 0..24)) {
            let once = condense(windows);
            let twice = condense(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn no_two_results_share_a_key(windows in proptest::collection::vec(arb_window(), 0..24)) {
            let condensed = condense(windows);
            let keys: BTreeSet<WindowKey> = condensed.iter().map(key).collect();
            prop_assert_eq!(keys.len(), condensed.len());
        }
    }
}
