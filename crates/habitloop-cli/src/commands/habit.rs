//! Habit management commands.

use chrono::Local;
use clap::Subcommand;
use habitloop_core::analytics;
use habitloop_core::storage::{Config, Database};
use habitloop_core::{check_eligibility, Cadence, Eligibility, Habit};

use crate::common::{format_remaining, resolve_user};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
        /// Cadence: daily or weekly
        #[arg(long)]
        cadence: String,
        /// User the habit belongs to (default user if omitted)
        #[arg(long)]
        user: Option<String>,
    },
    /// List habits, newest first
    List {
        /// Filter by cadence (daily or weekly)
        #[arg(long)]
        cadence: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Mark a habit completed (if its cadence interval has elapsed)
    Complete {
        /// Habit name
        name: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Habits that can be completed right now
    Due {
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete a habit and its completion history
    Delete {
        /// Habit name
        name: String,
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HabitAction::Create {
            name,
            cadence,
            user,
        } => {
            let user = resolve_user(&db, user)?;
            let cadence: Cadence = cadence.parse()?;
            let habit = db.create_habit(user.id, &name, cadence)?;
            println!(
                "Habit created: {} ({}) for {}",
                habit.display_name, habit.cadence, user.display_name
            );
        }
        HabitAction::List { cadence, user } => {
            let user = resolve_user(&db, user)?;
            let habits = match cadence {
                Some(c) => analytics::habits_by_cadence(&db, user.id, c.parse()?)?,
                None => analytics::tracked_habits(&db, user.id)?,
            };
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Complete { name, user } => {
            let user = resolve_user(&db, user)?;
            let habit = find_habit(&db, user.id, &name)?;
            let now = Local::now().naive_local();

            let last = db.last_completion(habit.id)?;
            if let Eligibility::NotEligible { remaining } =
                check_eligibility(habit.cadence, last, now)
            {
                println!(
                    "'{}' was already completed this {}.",
                    habit.display_name,
                    match habit.cadence {
                        Cadence::Daily => "day",
                        Cadence::Weekly => "week",
                    }
                );
                println!(
                    "You can complete it again in {}.",
                    format_remaining(remaining)
                );
                return Ok(());
            }

            db.record_completion(habit.id, now)?;
            let streaks = db.update_streaks(habit.id, now.date())?;
            let unit = habit.cadence.unit_label();
            println!("Habit '{}' marked as completed!", habit.display_name);
            println!(
                "Current streak: {} {unit} | Longest streak: {} {unit}",
                streaks.current_streak, streaks.longest_streak
            );
        }
        HabitAction::Due { user } => {
            let user = resolve_user(&db, user)?;
            let due = analytics::habits_due(&db, user.id, Local::now().naive_local())?;
            if due.is_empty() {
                println!("No habits due right now.");
            } else {
                let date_format = Config::load()?.display.date_format;
                println!("Habits due now:");
                for entry in due {
                    let last = entry
                        .last_completion
                        .map(|ts| ts.format(&date_format).to_string())
                        .unwrap_or_else(|| "never".to_string());
                    println!(
                        "  {} ({}) - last completed: {last}",
                        entry.habit.display_name, entry.habit.cadence
                    );
                }
            }
        }
        HabitAction::Delete { name, user } => {
            let user = resolve_user(&db, user)?;
            let habit = find_habit(&db, user.id, &name)?;
            db.delete_habit(habit.id)?;
            println!("Habit deleted: {}", habit.display_name);
        }
    }
    Ok(())
}

fn find_habit(db: &Database, user_id: i64, name: &str) -> Result<Habit, Box<dyn std::error::Error>> {
    Ok(db
        .find_habit(user_id, name)?
        .ok_or_else(|| format!("habit not found: {name}"))?)
}
