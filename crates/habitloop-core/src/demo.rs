//! Demo-data seeding.
//!
//! Populates a database with example users and six weeks of completion
//! history so listings and streak analytics have something to show.
//! Seeded with a fixed PRNG so repeated runs on a fresh database produce
//! identical fixtures.

use chrono::{Duration, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::Serialize;

use crate::error::Result;
use crate::habit::Cadence;
use crate::storage::Database;

/// Weeks of history generated per habit.
const HISTORY_WEEKS: i64 = 6;

/// Rows inserted by [`seed`].
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DemoSummary {
    pub users: usize,
    pub habits: usize,
    pub completions: usize,
}

/// Habit fixtures per user: (habit name, cadence, skip probability).
/// A higher skip probability produces intentionally broken streaks.
fn fixtures() -> Vec<(&'static str, Vec<(&'static str, Cadence, f64)>)> {
    vec![
        (
            "Luna",
            vec![
                ("Morning Run", Cadence::Daily, 0.1),
                ("Read 20 Pages", Cadence::Daily, 0.05),
                ("Meal Prep", Cadence::Weekly, 0.1),
                ("Call Grandma", Cadence::Weekly, 0.4),
                ("Journal", Cadence::Daily, 0.3),
            ],
        ),
        (
            "Milo",
            vec![
                ("Stretch", Cadence::Daily, 0.1),
                ("Water Plants", Cadence::Weekly, 0.2),
            ],
        ),
        (
            "Ivy",
            vec![
                ("Meditate", Cadence::Daily, 0.05),
                ("Review Budget", Cadence::Weekly, 0.35),
            ],
        ),
        (
            "Otis",
            vec![
                ("Practice Guitar", Cadence::Daily, 0.25),
                ("Deep Clean", Cadence::Weekly, 0.15),
            ],
        ),
        (
            "Ruby",
            vec![
                ("Walk 10k Steps", Cadence::Daily, 0.1),
                ("Plan the Week", Cadence::Weekly, 0.05),
            ],
        ),
    ]
}

/// Seed the database with demo users, habits, and completion history,
/// then refresh every habit's stored streak values.
///
/// # Errors
/// Fails if any of the fixture users or habits already exist.
pub fn seed(db: &Database, now: NaiveDateTime, seed: u64) -> Result<DemoSummary> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut summary = DemoSummary::default();

    for (username, habits) in fixtures() {
        let user = db.create_user(username)?;
        summary.users += 1;

        for (habit_name, cadence, skip_probability) in habits {
            let habit = db.create_habit(user.id, habit_name, cadence)?;
            summary.habits += 1;

            let steps = match cadence {
                Cadence::Daily => HISTORY_WEEKS * 7,
                Cadence::Weekly => HISTORY_WEEKS,
            };
            for step in (1..=steps).rev() {
                if rng.gen_bool(skip_probability) {
                    continue;
                }
                let at = now - Duration::days(step * cadence.interval_days());
                db.record_completion(habit.id, at)?;
                summary.completions += 1;
            }

            db.update_streaks(habit.id, now.date())?;
        }
    }

    Ok(summary)
}
