//! Habit analytics.
//!
//! Read-only views over the stored habit set: listings, cadence filters,
//! longest-streak lookups, and the "due now" report. Everything here
//! takes an explicit [`Database`] reference and returns plain data; the
//! CLI decides how to render it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::eligibility::{check_eligibility, Eligibility};
use crate::error::Result;
use crate::habit::{Cadence, Habit};
use crate::storage::Database;
use crate::streak::compute_streaks_at;

/// A habit annotated with its eligibility at some instant.
#[derive(Debug, Clone, Serialize)]
pub struct DueHabit {
    #[serde(flatten)]
    pub habit: Habit,
    pub last_completion: Option<NaiveDateTime>,
}

/// All habits a user tracks, newest first.
pub fn tracked_habits(db: &Database, user_id: i64) -> Result<Vec<Habit>> {
    db.list_habits(user_id)
}

/// A user's habits filtered to one cadence, newest first.
pub fn habits_by_cadence(db: &Database, user_id: i64, cadence: Cadence) -> Result<Vec<Habit>> {
    let habits = db.list_habits(user_id)?;
    Ok(habits.into_iter().filter(|h| h.cadence == cadence).collect())
}

/// The highest recorded `longest_streak` for a user, with every habit
/// sharing it. `None` when the user tracks no habits.
pub fn longest_overall_streak(db: &Database, user_id: i64) -> Result<Option<(u32, Vec<Habit>)>> {
    let habits = db.list_habits(user_id)?;
    let Some(max) = habits.iter().map(|h| h.longest_streak).max() else {
        return Ok(None);
    };
    let champions = habits
        .into_iter()
        .filter(|h| h.longest_streak == max)
        .collect();
    Ok(Some((max, champions)))
}

/// A single habit's longest recorded run, recomputed from its
/// completion log rather than read from the cached column.
pub fn longest_streak_for(db: &Database, habit: &Habit, today: NaiveDate) -> Result<u32> {
    let completions = db.completions(habit.id)?;
    Ok(compute_streaks_at(habit.cadence, &completions, today).longest_streak)
}

/// Habits whose cadence interval has elapsed since their last
/// completion (or that have never been completed), i.e. everything the
/// user could mark done right now.
pub fn habits_due(db: &Database, user_id: i64, now: NaiveDateTime) -> Result<Vec<DueHabit>> {
    let mut due = Vec::new();
    for habit in db.list_habits(user_id)? {
        let last = db.last_completion(habit.id)?;
        if check_eligibility(habit.cadence, last, now) == Eligibility::Eligible {
            due.push(DueHabit {
                habit,
                last_completion: last,
            });
        }
    }
    Ok(due)
}
