//! # Habitloop Core Library
//!
//! Core business logic for the Habitloop habit tracker. All operations
//! are available through a standalone CLI binary built on top of this
//! library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: pure computation of current/longest completion
//!   streaks from a habit's completion log and cadence
//! - **Eligibility Checker**: cadence arithmetic deciding whether a
//!   habit is due for a new completion and, if not, how long remains
//! - **Storage**: SQLite-backed users, habits, and completions plus
//!   TOML-based configuration
//! - **Analytics**: listings, cadence filters, longest-streak lookups,
//!   and due-now reports
//!
//! ## Key Components
//!
//! - [`compute_streaks`]: the streak computation engine
//! - [`check_eligibility`]: the due/eligibility checker
//! - [`Database`]: user, habit, and completion persistence
//! - [`Config`]: application configuration

pub mod analytics;
pub mod demo;
pub mod eligibility;
pub mod error;
pub mod habit;
pub mod storage;
pub mod streak;
pub mod validate;

pub use eligibility::{check_eligibility, Eligibility};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{Cadence, Habit, User};
pub use storage::{Config, Database};
pub use streak::{compute_streaks, compute_streaks_at, StreakResult};
