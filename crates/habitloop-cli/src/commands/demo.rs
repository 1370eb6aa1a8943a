//! Demo data commands.

use chrono::Local;
use clap::Subcommand;
use habitloop_core::demo;
use habitloop_core::storage::Database;

#[derive(Subcommand)]
pub enum DemoAction {
    /// Seed the database with example users and six weeks of history
    Seed {
        /// PRNG seed for reproducible fixtures
        #[arg(long, default_value = "7")]
        seed: u64,
    },
}

pub fn run(action: DemoAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        DemoAction::Seed { seed } => {
            let summary = demo::seed(&db, Local::now().naive_local(), seed)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
