//! Flight store entry point.
//! Database-backed create/read/update/delete plus the window queries the
//! board refreshes from, organized across focused submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing flight movements stored in SQLite.
pub struct FlightService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> FlightService<'a> {
    /// Create a new FlightService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
