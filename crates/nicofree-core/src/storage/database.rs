//! SQLite-backed state storage.
//!
//! Provides persistent storage for:
//! - Key-value application state (daily usage counter, persisted timer snapshot)
//! - Per-day usage history

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::{CoreError, DatabaseError};

use super::data_dir;

/// SQLite database for small key-value state and usage history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/nicofree.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("nicofree.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS usage_days (
                date  TEXT PRIMARY KEY,
                count INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Increment the usage history row for `date`, returning the new count.
    pub fn bump_usage_day(&self, date: NaiveDate) -> Result<u32, DatabaseError> {
        self.conn.execute(
            "INSERT INTO usage_days (date, count) VALUES (?1, 1)
             ON CONFLICT(date) DO UPDATE SET count = count + 1",
            params![date.to_string()],
        )?;
        let count = self.conn.query_row(
            "SELECT count FROM usage_days WHERE date = ?1",
            params![date.to_string()],
            |row| row.get::<_, u32>(0),
        )?;
        Ok(count)
    }

    /// Zero the usage history row for `date` (explicit user reset).
    pub fn zero_usage_day(&self, date: NaiveDate) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO usage_days (date, count) VALUES (?1, 0)",
            params![date.to_string()],
        )?;
        Ok(())
    }

    /// Recent daily usage totals, newest first.
    pub fn usage_history(&self, limit: u32) -> Result<Vec<(NaiveDate, u32)>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, count FROM usage_days ORDER BY date DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (date_str, count) = row?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| DatabaseError::QueryFailed(format!("bad date '{date_str}': {e}")))?;
            history.push((date, count));
        }
        Ok(history)
    }

    /// Drop all usage history rows.
    pub fn clear_usage_days(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM usage_days", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn usage_day_bump_and_zero() {
        let db = Database::open_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(db.bump_usage_day(date).unwrap(), 1);
        assert_eq!(db.bump_usage_day(date).unwrap(), 2);
        db.zero_usage_day(date).unwrap();
        assert_eq!(db.bump_usage_day(date).unwrap(), 1);
    }

    #[test]
    fn usage_history_newest_first() {
        let db = Database::open_memory().unwrap();
        let d1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        db.bump_usage_day(d1).unwrap();
        db.bump_usage_day(d2).unwrap();
        db.bump_usage_day(d2).unwrap();

        let history = db.usage_history(10).unwrap();
        assert_eq!(history, vec![(d2, 2), (d1, 1)]);

        db.clear_usage_days().unwrap();
        assert!(db.usage_history(10).unwrap().is_empty());
    }
}
