//! Due/eligibility checking.
//!
//! Decides whether a habit may be completed right now, using the same
//! interval arithmetic as the streak engine so the two never disagree on
//! what "one interval elapsed" means. The remaining duration on refusal
//! is returned raw; decomposing it into days/hours/minutes is a display
//! concern left to the caller.

use chrono::{Duration, NaiveDateTime};

use crate::habit::Cadence;

/// Whether a habit is currently eligible for a new completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The habit may be completed now
    Eligible,
    /// The cadence interval has not elapsed yet
    NotEligible {
        /// Time until the next interval boundary after the last completion
        remaining: Duration,
    },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Check whether a habit may be completed at `now`.
///
/// A habit with no completions yet is always eligible. Otherwise it
/// becomes eligible once `last_completion + interval` has been reached.
pub fn check_eligibility(
    cadence: Cadence,
    last_completion: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Eligibility {
    let Some(last) = last_completion else {
        return Eligibility::Eligible;
    };

    let next_eligible = last + cadence.interval();
    if now >= next_eligible {
        Eligibility::Eligible
    } else {
        Eligibility::NotEligible {
            remaining: next_eligible - now,
        }
    }
}
