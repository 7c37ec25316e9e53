use super::shared::{serialize_services, to_optional_local_datetime};
use super::FlightService;
use crate::models::flight::Flight;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

impl<'a> FlightService<'a> {
    /// Create a new flight in the database.
    pub fn create(&self, mut flight: Flight) -> Result<Flight> {
        flight.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();
        let services_json = serialize_services(&flight.services);

        self.conn
            .execute(
                "INSERT INTO flights (
                    tail_number, aircraft_type, arrival_datetime, departure_datetime,
                    origin, destination, contact, status, services, notes,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    flight.tail_number,
                    flight.aircraft_type,
                    flight.arrival_time.map(|dt| dt.to_rfc3339()),
                    flight.departure_time.map(|dt| dt.to_rfc3339()),
                    flight.origin,
                    flight.destination,
                    flight.contact,
                    flight.status.as_str(),
                    services_json,
                    flight.notes,
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert flight")?;

        let id = self.conn.last_insert_rowid();
        flight.id = Some(id);
        flight.created_at = Some(Local::now());
        flight.updated_at = Some(Local::now());

        Ok(flight)
    }

    /// Retrieve a flight by ID.
    pub fn get(&self, id: i64) -> Result<Option<Flight>> {
        let result = self.conn.query_row(
            "SELECT id, tail_number, aircraft_type, arrival_datetime, departure_datetime,
                    origin, destination, contact, status, services, notes,
                    created_at, updated_at
             FROM flights WHERE id = ?",
            [id],
            Self::row_to_flight,
        );

        match result {
            Ok(flight) => Ok(Some(flight)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing flight.
    pub fn update(&self, flight: &Flight) -> Result<()> {
        let id = flight
            .id
            .ok_or_else(|| anyhow!("Flight ID is required for update"))?;
        flight.validate().map_err(|e| anyhow!(e))?;

        let services_json = serialize_services(&flight.services);
        let rows_affected = self
            .conn
            .execute(
                "UPDATE flights SET
                    tail_number = ?, aircraft_type = ?, arrival_datetime = ?,
                    departure_datetime = ?, origin = ?, destination = ?, contact = ?,
                    status = ?, services = ?, notes = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    flight.tail_number,
                    flight.aircraft_type,
                    flight.arrival_time.map(|dt| dt.to_rfc3339()),
                    flight.departure_time.map(|dt| dt.to_rfc3339()),
                    flight.origin,
                    flight.destination,
                    flight.contact,
                    flight.status.as_str(),
                    services_json,
                    flight.notes,
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .context("Failed to update flight")?;

        if rows_affected == 0 {
            return Err(anyhow!("Flight with id {} not found", id));
        }

        Ok(())
    }

    /// Delete a flight by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM flights WHERE id = ?", [id])
            .context("Failed to delete flight")?;

        if rows_affected == 0 {
            return Err(anyhow!("Flight with id {} not found", id));
        }

        Ok(())
    }

    pub(crate) fn row_to_flight(row: &rusqlite::Row<'_>) -> rusqlite::Result<Flight> {
        use super::shared::deserialize_services;
        use crate::models::flight::FlightStatus;

        Ok(Flight {
            id: Some(row.get(0)?),
            tail_number: row.get(1)?,
            aircraft_type: row.get(2)?,
            arrival_time: to_optional_local_datetime(row.get(3)?)?,
            departure_time: to_optional_local_datetime(row.get(4)?)?,
            origin: row.get(5)?,
            destination: row.get(6)?,
            contact: row.get(7)?,
            status: FlightStatus::parse(&row.get::<_, String>(8)?),
            services: deserialize_services(row.get(9)?),
            notes: row.get(10)?,
            created_at: to_optional_local_datetime(row.get(11)?)?,
            updated_at: to_optional_local_datetime(row.get(12)?)?,
        })
    }
}
