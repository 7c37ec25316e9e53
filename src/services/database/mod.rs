// Database service module
// SQLite database connection and schema management

use anyhow::{Context, Result};
use rusqlite::Connection;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file (or ":memory:" for in-memory)
    ///
    /// # Examples
    /// ```
    /// use flightboard::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .context(format!("Failed to open database at {}", path))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        Ok(Self { conn })
    }

    /// Initialize the database schema
    /// Creates all required tables if they don't exist
    pub fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS flights (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    tail_number TEXT NOT NULL,
                    aircraft_type TEXT,
                    arrival_datetime TEXT,
                    departure_datetime TEXT,
                    origin TEXT,
                    destination TEXT,
                    contact TEXT,
                    status TEXT NOT NULL DEFAULT 'scheduled',
                    services TEXT,
                    notes TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                [],
            )
            .context("Failed to create flights table")?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_flights_tail_number
                 ON flights (tail_number)",
                [],
            )
            .context("Failed to create tail number index")?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS settings (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    theme TEXT NOT NULL DEFAULT 'system',
                    first_day_of_week INTEGER NOT NULL DEFAULT 1,
                    time_format TEXT NOT NULL DEFAULT '24h',
                    day_start_hour INTEGER NOT NULL DEFAULT 0,
                    day_end_hour INTEGER NOT NULL DEFAULT 24,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create settings table")?;

        self.conn
            .execute(
                "INSERT OR IGNORE INTO settings (id, theme, first_day_of_week, time_format)
                 VALUES (1, 'system', 1, '24h')",
                [],
            )
            .context("Failed to insert default settings")?;

        Ok(())
    }

    /// Get a reference to the database connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
