//! User account commands.

use clap::Subcommand;
use habitloop_core::storage::{Config, Database};

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a new user
    Create {
        /// Username (letters and numbers only)
        name: String,
    },
    /// List all users
    List,
    /// Set the default user for other commands
    Use {
        /// Username
        name: String,
    },
    /// Delete a user and all their habits
    Delete {
        /// Username
        name: String,
    },
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        UserAction::Create { name } => {
            let user = db.create_user(&name)?;
            println!("User created: {}", user.display_name);
        }
        UserAction::List => {
            let users = db.list_users()?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        UserAction::Use { name } => {
            let user = db
                .find_user(&name)?
                .ok_or_else(|| format!("user not found: {name}"))?;
            let mut config = Config::load()?;
            config.default_user = Some(user.name.clone());
            config.save()?;
            println!("Default user set: {}", user.display_name);
        }
        UserAction::Delete { name } => {
            let user = db
                .find_user(&name)?
                .ok_or_else(|| format!("user not found: {name}"))?;
            db.delete_user(user.id)?;

            // Drop a stale default pointing at the deleted account.
            let mut config = Config::load()?;
            if config.default_user.as_deref() == Some(user.name.as_str()) {
                config.default_user = None;
                config.save()?;
            }
            println!("User deleted: {}", user.display_name);
        }
    }
    Ok(())
}
