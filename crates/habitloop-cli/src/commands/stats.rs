//! Streak statistics commands.

use chrono::Local;
use clap::Subcommand;
use habitloop_core::analytics;
use habitloop_core::compute_streaks_at;
use habitloop_core::storage::Database;

use crate::common::resolve_user;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Recompute and show a habit's streaks
    Streaks {
        /// Habit name
        name: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Habits sharing the longest recorded streak
    Longest {
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Streaks { name, user } => {
            let user = resolve_user(&db, user)?;
            let habit = db
                .find_habit(user.id, &name)?
                .ok_or_else(|| format!("habit not found: {name}"))?;
            let completions = db.completions(habit.id)?;
            let result =
                compute_streaks_at(habit.cadence, &completions, Local::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        StatsAction::Longest { user } => {
            let user = resolve_user(&db, user)?;
            match analytics::longest_overall_streak(&db, user.id)? {
                None => println!("No habits found to evaluate."),
                Some((max, champions)) => {
                    println!("Longest streak: {max} completion(s)");
                    for habit in champions {
                        println!("  {} ({})", habit.display_name, habit.cadence);
                    }
                }
            }
        }
    }
    Ok(())
}
