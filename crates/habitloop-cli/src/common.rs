//! Shared helpers for CLI commands.

use chrono::Duration;
use habitloop_core::storage::{Config, Database};
use habitloop_core::User;

/// Resolve the user a command acts on: the explicit `--user` flag if
/// given, otherwise the configured default user.
pub fn resolve_user(
    db: &Database,
    explicit: Option<String>,
) -> Result<User, Box<dyn std::error::Error>> {
    let name = match explicit {
        Some(name) => name,
        None => Config::load()?.default_user.ok_or(
            "no user given: pass --user <name> or set a default with `habitloop-cli user use`",
        )?,
    };
    db.find_user(&name)?
        .ok_or_else(|| format!("user not found: {name}").into())
}

/// Render a remaining duration as days/hours/minutes for display.
pub fn format_remaining(remaining: Duration) -> String {
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    if days > 0 {
        format!("{days} day(s), {hours} hour(s), and {minutes} minute(s)")
    } else {
        format!("{hours} hour(s) and {minutes} minute(s)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sub_day_remainders() {
        assert_eq!(
            format_remaining(Duration::hours(12) + Duration::minutes(5)),
            "12 hour(s) and 5 minute(s)"
        );
    }

    #[test]
    fn formats_multi_day_remainders() {
        assert_eq!(
            format_remaining(Duration::days(4) + Duration::hours(3)),
            "4 day(s), 3 hour(s), and 0 minute(s)"
        );
    }
}
