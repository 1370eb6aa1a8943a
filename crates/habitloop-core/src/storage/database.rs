//! SQLite-based storage for users, habits, and completions.
//!
//! The database owns the only connection; everything algorithmic
//! (streaks, eligibility) happens in pure modules that receive plain
//! data loaded here. Completion timestamps persist as ISO-8601 local
//! date-time strings without a timezone.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError, Result, ValidationError};
use crate::habit::{Cadence, Habit, User};
use crate::streak::{compute_streaks_at, StreakResult};
use crate::validate::{validate_habit_name, validate_username};

/// Storage format for completion timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a persisted timestamp.
///
/// Accepts the ISO-8601 form written by [`Database::record_completion`]
/// as well as SQLite's space-separated `CURRENT_TIMESTAMP` form. A row
/// that parses as neither fails the whole computation; silently dropping
/// it would corrupt streak accuracy.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| ValidationError::MalformedTimestamp(raw.to_string()))
}

/// Intermediate habit row before cadence/timestamp parsing.
struct HabitRow {
    id: i64,
    user_id: i64,
    name: String,
    display_name: String,
    frequency: Option<String>,
    streak: u32,
    longest_streak: u32,
    created_at: String,
}

impl HabitRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            display_name: row.get(3)?,
            frequency: row.get(4)?,
            streak: row.get(5)?,
            longest_streak: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn into_habit(self) -> Result<Habit> {
        let cadence: Cadence = self
            .frequency
            .as_deref()
            .unwrap_or("")
            .parse()
            .map_err(CoreError::Validation)?;
        Ok(Habit {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            display_name: self.display_name,
            cadence,
            current_streak: self.streak,
            longest_streak: self.longest_streak,
            created_at: parse_timestamp(&self.created_at).map_err(CoreError::Validation)?,
        })
    }
}

const HABIT_COLUMNS: &str = "habit_id, user_id, habit_name, habit_name_display, \
     frequency, streak, longest_streak, created_at";

/// SQLite database for habit tracking.
///
/// Stores users, their habits, and the append-only completion log.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `data_dir()/habitloop.db`.
    ///
    /// Creates the database file and schema if they don't exist and
    /// enables foreign key enforcement so deletes cascade.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("habitloop.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        Self::init(conn)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(DatabaseError::from)?;
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // === Users ===

    /// Create a user. The name is validated and stored lowercase for
    /// uniqueness, with the original casing kept for display.
    pub fn create_user(&self, display_name: &str) -> Result<User> {
        let display_name = display_name.trim();
        validate_username(display_name)?;
        let name = display_name.to_lowercase();

        if self.find_user(&name)?.is_some() {
            return Err(ValidationError::DuplicateUser(display_name.to_string()).into());
        }

        self.conn.execute(
            "INSERT INTO users (user_name, user_name_display) VALUES (?1, ?2)",
            params![name, display_name],
        )?;
        Ok(User {
            id: self.conn.last_insert_rowid(),
            name,
            display_name: display_name.to_string(),
        })
    }

    /// Look up a user by name (case-insensitive).
    pub fn find_user(&self, name: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT user_id, user_name, user_name_display
                 FROM users WHERE user_name = ?1",
                params![name.to_lowercase()],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        display_name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// All users, oldest first.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, user_name, user_name_display FROM users ORDER BY user_id",
        )?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    display_name: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Delete a user. Habits and completions cascade away.
    pub fn delete_user(&self, user_id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1", params![user_id])?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound {
                kind: "User",
                name: user_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // === Habits ===

    /// Create a habit for a user. The cadence is immutable afterwards.
    pub fn create_habit(&self, user_id: i64, display_name: &str, cadence: Cadence) -> Result<Habit> {
        let display_name = display_name.trim();
        validate_habit_name(display_name)?;
        let name = display_name.to_lowercase();

        if self.find_habit(user_id, &name)?.is_some() {
            return Err(ValidationError::DuplicateHabit(display_name.to_string()).into());
        }

        self.conn.execute(
            "INSERT INTO habits (user_id, habit_name, habit_name_display, frequency)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, name, display_name, cadence.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_habit(id)?.ok_or_else(|| {
            DatabaseError::NotFound {
                kind: "Habit",
                name: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a habit by id.
    pub fn get_habit(&self, habit_id: i64) -> Result<Option<Habit>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE habit_id = ?1"),
                params![habit_id],
                HabitRow::from_row,
            )
            .optional()?;
        row.map(HabitRow::into_habit).transpose()
    }

    /// Look up a user's habit by name (case-insensitive).
    pub fn find_habit(&self, user_id: i64, name: &str) -> Result<Option<Habit>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {HABIT_COLUMNS} FROM habits
                     WHERE user_id = ?1 AND habit_name = ?2"
                ),
                params![user_id, name.to_lowercase()],
                HabitRow::from_row,
            )
            .optional()?;
        row.map(HabitRow::into_habit).transpose()
    }

    /// All habits for a user, newest first.
    pub fn list_habits(&self, user_id: i64) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits
             WHERE user_id = ?1
             ORDER BY created_at DESC, habit_id DESC"
        ))?;
        let rows = stmt
            .query_map(params![user_id], HabitRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(HabitRow::into_habit).collect()
    }

    /// Delete a habit. Its completions cascade away.
    pub fn delete_habit(&self, habit_id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM habits WHERE habit_id = ?1", params![habit_id])?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound {
                kind: "Habit",
                name: habit_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // === Completions ===

    /// Append a completion to the log. Completions are never edited or
    /// removed individually; only a habit deletion cascades them away.
    pub fn record_completion(&self, habit_id: i64, at: NaiveDateTime) -> Result<()> {
        self.conn.execute(
            "INSERT INTO habit_completions (habit_id, completed_at) VALUES (?1, ?2)",
            params![habit_id, at.format(TIMESTAMP_FORMAT).to_string()],
        )?;
        Ok(())
    }

    /// The full completion log for a habit, oldest first.
    pub fn completions(&self, habit_id: i64) -> Result<Vec<NaiveDateTime>> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_at FROM habit_completions
             WHERE habit_id = ?1
             ORDER BY completed_at ASC",
        )?;
        let raw = stmt
            .query_map(params![habit_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        raw.iter()
            .map(|s| parse_timestamp(s).map_err(CoreError::Validation))
            .collect()
    }

    /// The most recent completion for a habit, if any.
    pub fn last_completion(&self, habit_id: i64) -> Result<Option<NaiveDateTime>> {
        let raw = self
            .conn
            .query_row(
                "SELECT completed_at FROM habit_completions
                 WHERE habit_id = ?1
                 ORDER BY completed_at DESC
                 LIMIT 1",
                params![habit_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        raw.as_deref()
            .map(|s| parse_timestamp(s).map_err(CoreError::Validation))
            .transpose()
    }

    // === Streaks ===

    /// Recompute streaks from the completion log and persist them on the
    /// habit record. Called after every completion event.
    pub fn update_streaks(&self, habit_id: i64, today: NaiveDate) -> Result<StreakResult> {
        let habit = self.get_habit(habit_id)?.ok_or(DatabaseError::NotFound {
            kind: "Habit",
            name: habit_id.to_string(),
        })?;
        let completions = self.completions(habit_id)?;
        let result = compute_streaks_at(habit.cadence, &completions, today);

        self.conn.execute(
            "UPDATE habits SET streak = ?1, longest_streak = ?2 WHERE habit_id = ?3",
            params![result.current_streak, result.longest_streak, habit_id],
        )?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn days_ago(n: i64) -> NaiveDateTime {
        Local::now().naive_local() - Duration::days(n)
    }

    fn seeded_habit(db: &Database, cadence: Cadence, days: &[i64]) -> Habit {
        let user = db.create_user("Tester").unwrap();
        let habit = db.create_habit(user.id, "TestHabit", cadence).unwrap();
        for d in days {
            db.record_completion(habit.id, days_ago(*d)).unwrap();
        }
        habit
    }

    #[test]
    fn user_roundtrip() {
        let db = Database::open_memory().unwrap();
        let user = db.create_user("Anna").unwrap();
        assert_eq!(user.name, "anna");
        assert_eq!(user.display_name, "Anna");

        let found = db.find_user("ANNA").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_user_rejected() {
        let db = Database::open_memory().unwrap();
        db.create_user("Anna").unwrap();
        let err = db.create_user("anna").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DuplicateUser(_))
        ));
    }

    #[test]
    fn habit_roundtrip() {
        let db = Database::open_memory().unwrap();
        let user = db.create_user("Anna").unwrap();
        let habit = db.create_habit(user.id, "Morning Run", Cadence::Daily).unwrap();
        assert_eq!(habit.name, "morning run");
        assert_eq!(habit.display_name, "Morning Run");
        assert_eq!(habit.cadence, Cadence::Daily);
        assert_eq!(habit.current_streak, 0);

        let found = db.find_habit(user.id, "Morning Run").unwrap().unwrap();
        assert_eq!(found.id, habit.id);
    }

    #[test]
    fn duplicate_habit_rejected_per_user() {
        let db = Database::open_memory().unwrap();
        let anna = db.create_user("Anna").unwrap();
        let ben = db.create_user("Ben").unwrap();
        db.create_habit(anna.id, "Read", Cadence::Daily).unwrap();

        let err = db.create_habit(anna.id, "READ", Cadence::Weekly).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DuplicateHabit(_))
        ));
        // Same name under another user is fine.
        assert!(db.create_habit(ben.id, "Read", Cadence::Daily).is_ok());
    }

    #[test]
    fn deleting_user_cascades() {
        let db = Database::open_memory().unwrap();
        let habit = seeded_habit(&db, Cadence::Daily, &[1, 2]);

        db.delete_user(habit.user_id).unwrap();
        assert!(db.get_habit(habit.id).unwrap().is_none());
        assert!(db.completions(habit.id).unwrap().is_empty());
    }

    #[test]
    fn deleting_habit_cascades_completions() {
        let db = Database::open_memory().unwrap();
        let habit = seeded_habit(&db, Cadence::Daily, &[1]);

        db.delete_habit(habit.id).unwrap();
        assert!(db.completions(habit.id).unwrap().is_empty());
    }

    #[test]
    fn completions_load_in_order() {
        let db = Database::open_memory().unwrap();
        let habit = seeded_habit(&db, Cadence::Daily, &[1, 3, 2]);

        let completions = db.completions(habit.id).unwrap();
        assert_eq!(completions.len(), 3);
        assert!(completions.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(db.last_completion(habit.id).unwrap(), Some(completions[2]));
    }

    #[test]
    fn update_streaks_persists_values() {
        let db = Database::open_memory().unwrap();
        let habit = seeded_habit(&db, Cadence::Daily, &[1, 2, 3]);

        let result = db
            .update_streaks(habit.id, Local::now().date_naive())
            .unwrap();
        assert_eq!(result.current_streak, 3);
        assert_eq!(result.longest_streak, 3);

        let stored = db.get_habit(habit.id).unwrap().unwrap();
        assert_eq!(stored.current_streak, 3);
        assert_eq!(stored.longest_streak, 3);
    }

    #[test]
    fn malformed_timestamp_fails_loudly() {
        let db = Database::open_memory().unwrap();
        let habit = seeded_habit(&db, Cadence::Daily, &[]);
        db.conn()
            .execute(
                "INSERT INTO habit_completions (habit_id, completed_at) VALUES (?1, 'yesterday')",
                params![habit.id],
            )
            .unwrap();

        let err = db.completions(habit.id).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn missing_cadence_is_an_error_not_a_default() {
        let db = Database::open_memory().unwrap();
        let user = db.create_user("Anna").unwrap();
        db.conn()
            .execute(
                "INSERT INTO habits (user_id, habit_name, habit_name_display, frequency)
                 VALUES (?1, 'legacy', 'Legacy', NULL)",
                params![user.id],
            )
            .unwrap();

        let err = db.find_habit(user.id, "legacy").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidCadence(_))
        ));
    }
}
