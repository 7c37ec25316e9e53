use super::FlightService;
use crate::models::flight::Flight;
use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite;

impl<'a> FlightService<'a> {
    /// List every flight ordered by its scheduled anchor time.
    pub fn list_all(&self) -> Result<Vec<Flight>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tail_number, aircraft_type, arrival_datetime, departure_datetime,
                    origin, destination, contact, status, services, notes,
                    created_at, updated_at
             FROM flights
             ORDER BY COALESCE(arrival_datetime, departure_datetime) ASC",
        )?;

        let flights = stmt
            .query_map([], Self::row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(flights)
    }

    /// Find flights whose arrival or departure falls inside the window.
    pub fn find_by_date_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Flight>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tail_number, aircraft_type, arrival_datetime, departure_datetime,
                    origin, destination, contact, status, services, notes,
                    created_at, updated_at
             FROM flights
             WHERE (arrival_datetime IS NOT NULL
                     AND arrival_datetime >= ?2 AND arrival_datetime < ?1)
                OR (departure_datetime IS NOT NULL
                     AND departure_datetime >= ?2 AND departure_datetime < ?1)
             ORDER BY COALESCE(arrival_datetime, departure_datetime) ASC",
        )?;

        let flights = stmt
            .query_map([end.to_rfc3339(), start.to_rfc3339()], Self::row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(flights)
    }

    /// All flights for one aircraft, most recent movement first.
    pub fn find_by_tail_number(&self, tail_number: &str) -> Result<Vec<Flight>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tail_number, aircraft_type, arrival_datetime, departure_datetime,
                    origin, destination, contact, status, services, notes,
                    created_at, updated_at
             FROM flights
             WHERE tail_number = ?
             ORDER BY COALESCE(arrival_datetime, departure_datetime) DESC",
        )?;

        let flights = stmt
            .query_map([tail_number], Self::row_to_flight)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(flights)
    }
}
