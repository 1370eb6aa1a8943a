//! Streak computation engine.
//!
//! Derives the current and longest completion streaks for a habit from
//! its raw completion log. The engine is a pure function over in-memory
//! data: it owns no connection, keeps no state between calls, and treats
//! the completion list as an immutable snapshot.
//!
//! Streak rules:
//! - Completions are truncated to calendar dates and sorted ascending.
//! - A date exactly one cadence interval after its predecessor extends
//!   the running streak.
//! - A date closer than one interval is a duplicate within the same
//!   window: it neither extends nor breaks the run, and the next pair
//!   is still compared against it.
//! - A gap wider than one interval breaks the run.
//! - The current streak drops to zero once more than one interval has
//!   passed since the last completion.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::habit::Cadence;

/// Current and longest streak counts for one habit.
///
/// `longest_streak >= current_streak` holds for every input; both are
/// zero when the completion log is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Compute streaks against the local wall-clock date.
pub fn compute_streaks(cadence: Cadence, completions: &[NaiveDateTime]) -> StreakResult {
    compute_streaks_at(cadence, completions, Local::now().date_naive())
}

/// Compute streaks against an explicit reference date.
///
/// `today` decides whether the final run is still alive: if the last
/// completion is more than one interval older, the current streak is 0.
pub fn compute_streaks_at(
    cadence: Cadence,
    completions: &[NaiveDateTime],
    today: NaiveDate,
) -> StreakResult {
    if completions.is_empty() {
        return StreakResult::default();
    }

    let mut dates: Vec<NaiveDate> = completions.iter().map(|ts| ts.date()).collect();
    dates.sort_unstable();

    let interval = cadence.interval_days();
    let mut running: u32 = 1;
    let mut longest: u32 = 1;

    for pair in dates.windows(2) {
        let gap = (pair[1] - pair[0]).num_days();
        if gap == interval {
            running += 1;
        } else if gap < interval {
            // Same-window duplicate: inert.
            continue;
        } else {
            longest = longest.max(running);
            running = 1;
        }
    }
    longest = longest.max(running);

    let last = dates[dates.len() - 1];
    let current = if (today - last).num_days() > interval {
        0
    } else {
        running
    };

    StreakResult {
        current_streak: current,
        longest_streak: longest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    /// Completion timestamps N days before the fixed reference date,
    /// with an arbitrary time-of-day component.
    fn days_ago(days: &[i64]) -> Vec<NaiveDateTime> {
        let base = today().and_hms_opt(14, 30, 0).unwrap();
        days.iter().map(|d| base - Duration::days(*d)).collect()
    }

    #[test]
    fn empty_log_yields_zero() {
        assert_eq!(
            compute_streaks_at(Cadence::Daily, &[], today()),
            StreakResult::default()
        );
    }

    #[test]
    fn streak_scenarios() {
        // (cadence, completions as days-ago, expected current/longest)
        let cases: &[(Cadence, &[i64], (u32, u32))] = &[
            (Cadence::Daily, &[1, 2, 3], (3, 3)),
            (Cadence::Daily, &[1, 3, 4], (1, 2)),
            (Cadence::Daily, &[2, 3, 4], (0, 3)),
            (Cadence::Daily, &[5, 6, 7], (0, 3)),
            (Cadence::Weekly, &[7, 14, 21], (3, 3)),
            (Cadence::Weekly, &[8, 15, 22], (0, 3)),
        ];

        for (cadence, days, (current, longest)) in cases {
            let result = compute_streaks_at(*cadence, &days_ago(days), today());
            assert_eq!(
                result,
                StreakResult {
                    current_streak: *current,
                    longest_streak: *longest,
                },
                "cadence {cadence:?}, completions {days:?} days ago"
            );
        }
    }

    #[test]
    fn single_fresh_completion() {
        let result = compute_streaks_at(Cadence::Daily, &days_ago(&[0]), today());
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.longest_streak, 1);
    }

    #[test]
    fn single_stale_completion() {
        let result = compute_streaks_at(Cadence::Daily, &days_ago(&[3]), today());
        assert_eq!(result.current_streak, 0);
        assert_eq!(result.longest_streak, 1);
    }

    #[test]
    fn same_day_duplicates_are_inert() {
        let clean = compute_streaks_at(Cadence::Daily, &days_ago(&[1, 2, 3]), today());
        let duped = compute_streaks_at(Cadence::Daily, &days_ago(&[1, 1, 2, 2, 3]), today());
        assert_eq!(clean, duped);
    }

    #[test]
    fn same_week_duplicates_are_inert() {
        // Only an exact-date repeat is guaranteed inert for weekly habits;
        // a distinct mid-window date re-anchors the walk (see below).
        let clean = compute_streaks_at(Cadence::Weekly, &days_ago(&[7, 14]), today());
        let duped = compute_streaks_at(Cadence::Weekly, &days_ago(&[7, 14, 14]), today());
        assert_eq!(clean, duped);
    }

    #[test]
    fn mid_window_completion_reanchors_weekly_walk() {
        // A completion inside the window neither breaks nor extends the
        // run, but the next gap is measured from it: ascending dates
        // [14, 10, 7] days ago walk gaps of 4 and 3, both inert.
        let result = compute_streaks_at(Cadence::Weekly, &days_ago(&[7, 10, 14]), today());
        assert_eq!(
            result,
            StreakResult {
                current_streak: 1,
                longest_streak: 1,
            }
        );
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let sorted = compute_streaks_at(Cadence::Daily, &days_ago(&[1, 2, 3]), today());
        let shuffled = compute_streaks_at(Cadence::Daily, &days_ago(&[2, 1, 3]), today());
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn weekly_off_by_one_gap_breaks_run() {
        // 8-day gap is strictly more than the weekly interval.
        let result = compute_streaks_at(Cadence::Weekly, &days_ago(&[0, 8]), today());
        assert_eq!(result.current_streak, 1);
        assert_eq!(result.longest_streak, 1);
    }

    proptest! {
        #[test]
        fn longest_never_below_current(
            days in proptest::collection::vec(0i64..60, 0..20),
            weekly in any::<bool>(),
        ) {
            let cadence = if weekly { Cadence::Weekly } else { Cadence::Daily };
            let result = compute_streaks_at(cadence, &days_ago(&days), today());
            prop_assert!(result.longest_streak >= result.current_streak);
        }

        #[test]
        fn computation_is_idempotent(
            days in proptest::collection::vec(0i64..60, 0..20),
        ) {
            let completions = days_ago(&days);
            let first = compute_streaks_at(Cadence::Daily, &completions, today());
            let second = compute_streaks_at(Cadence::Daily, &completions, today());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn repeating_an_existing_date_changes_nothing(
            days in proptest::collection::vec(0i64..60, 1..20),
            pick in any::<usize>(),
        ) {
            let base = compute_streaks_at(Cadence::Daily, &days_ago(&days), today());
            let mut with_dup = days.clone();
            with_dup.push(days[pick % days.len()]);
            let duped = compute_streaks_at(Cadence::Daily, &days_ago(&with_dup), today());
            prop_assert_eq!(base, duped);
        }
    }
}
