//! Habit and user domain types.
//!
//! A habit carries a [`Cadence`] fixed at creation time, plus its most
//! recently computed streak values. Names are stored twice: a lowercase
//! key used for per-user uniqueness and the original casing for display.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Required repetition interval for a habit.
///
/// Immutable once the habit is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Completions must be exactly 1 day apart to extend a streak
    Daily,
    /// Completions must be exactly 7 days apart to extend a streak
    Weekly,
}

impl Cadence {
    /// The interval a completion must land on to extend a streak.
    pub fn interval(&self) -> Duration {
        Duration::days(self.interval_days())
    }

    /// Interval length in whole days.
    pub fn interval_days(&self) -> i64 {
        match self {
            Cadence::Daily => 1,
            Cadence::Weekly => 7,
        }
    }

    /// Database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
        }
    }

    /// Unit label for streak counts shown to the user.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Cadence::Daily => "day(s)",
            Cadence::Weekly => "week(s)",
        }
    }
}

impl FromStr for Cadence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            other => Err(ValidationError::InvalidCadence(other.to_string())),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Lowercase uniqueness key
    pub name: String,
    /// Original casing for display
    pub display_name: String,
}

/// A tracked habit with its cached streak values.
///
/// `current_streak` and `longest_streak` are derived values, recomputed
/// from the completion log on every completion event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub user_id: i64,
    /// Lowercase uniqueness key (per user)
    pub name: String,
    /// Original casing for display
    pub display_name: String,
    pub cadence: Cadence,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub created_at: NaiveDateTime,
}
