// Flight module
// Flight movement record for the operations board

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operational status of a flight movement.
///
/// Closed enumeration; stored as a text code and round-tripped through
/// [`FlightStatus::as_str`] / [`FlightStatus::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightStatus {
    Scheduled,
    EnRoute,
    Arrived,
    Departed,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub const ALL: [FlightStatus; 6] = [
        FlightStatus::Scheduled,
        FlightStatus::EnRoute,
        FlightStatus::Arrived,
        FlightStatus::Departed,
        FlightStatus::Delayed,
        FlightStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::EnRoute => "en-route",
            FlightStatus::Arrived => "arrived",
            FlightStatus::Departed => "departed",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a stored status code. Unknown codes fall back to `Scheduled`
    /// so a database edited by hand cannot take the board down.
    pub fn parse(code: &str) -> Self {
        match code {
            "en-route" => FlightStatus::EnRoute,
            "arrived" => FlightStatus::Arrived,
            "departed" => FlightStatus::Departed,
            "delayed" => FlightStatus::Delayed,
            "cancelled" => FlightStatus::Cancelled,
            _ => FlightStatus::Scheduled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "Scheduled",
            FlightStatus::EnRoute => "En Route",
            FlightStatus::Arrived => "Arrived",
            FlightStatus::Departed => "Departed",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

impl Default for FlightStatus {
    fn default() -> Self {
        FlightStatus::Scheduled
    }
}

/// Ground service requested for a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTag {
    Fuel,
    Hangar,
    Catering,
    Deicing,
    Gpu,
    Lavatory,
}

impl ServiceTag {
    pub const ALL: [ServiceTag; 6] = [
        ServiceTag::Fuel,
        ServiceTag::Hangar,
        ServiceTag::Catering,
        ServiceTag::Deicing,
        ServiceTag::Gpu,
        ServiceTag::Lavatory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceTag::Fuel => "Fuel",
            ServiceTag::Hangar => "Hangar",
            ServiceTag::Catering => "Catering",
            ServiceTag::Deicing => "De-icing",
            ServiceTag::Gpu => "GPU",
            ServiceTag::Lavatory => "Lavatory",
        }
    }
}

/// Validation failure for a flight record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlightValidationError {
    #[error("Tail number cannot be empty")]
    EmptyTailNumber,
    #[error("Flight needs an arrival time, a departure time, or both")]
    NoTimestamps,
    #[error("Arrival time must not be after departure time")]
    ArrivalAfterDeparture,
}

/// A single aircraft movement on the operations board.
///
/// `arrival_time` and `departure_time` are both optional in the raw record;
/// which of them is present determines the movement's kind (see
/// `services::schedule::classify`). Kind and duration are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: Option<i64>,
    /// Aircraft registration; the identity used for turnaround linking.
    pub tail_number: String,
    pub aircraft_type: Option<String>,
    pub arrival_time: Option<DateTime<Local>>,
    pub departure_time: Option<DateTime<Local>>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub contact: Option<String>,
    pub status: FlightStatus,
    pub services: Vec<ServiceTag>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Flight {
    /// Create a departure-only flight with required fields.
    pub fn new(
        tail_number: impl Into<String>,
        departure_time: DateTime<Local>,
    ) -> Result<Self, FlightValidationError> {
        let tail_number: String = tail_number.into();
        let flight = Self {
            id: None,
            tail_number: tail_number.trim().to_string(),
            aircraft_type: None,
            arrival_time: None,
            departure_time: Some(departure_time),
            origin: None,
            destination: None,
            contact: None,
            status: FlightStatus::Scheduled,
            services: Vec::new(),
            notes: None,
            created_at: None,
            updated_at: None,
        };
        flight.validate()?;
        Ok(flight)
    }

    /// Create a builder for constructing flights with optional fields
    pub fn builder() -> FlightBuilder {
        FlightBuilder::new()
    }

    /// Validate the record for storage.
    ///
    /// The reconciled invariant (arrival not after departure) is enforced
    /// here, at the store boundary only; transient drag state is allowed
    /// to violate it until commit.
    pub fn validate(&self) -> Result<(), FlightValidationError> {
        if self.tail_number.trim().is_empty() {
            return Err(FlightValidationError::EmptyTailNumber);
        }
        match (self.arrival_time, self.departure_time) {
            (None, None) => Err(FlightValidationError::NoTimestamps),
            (Some(arrival), Some(departure)) if arrival > departure => {
                Err(FlightValidationError::ArrivalAfterDeparture)
            }
            _ => Ok(()),
        }
    }

    pub fn has_service(&self, tag: ServiceTag) -> bool {
        self.services.contains(&tag)
    }

    /// Short route label like "KSEA → KPDX", omitting missing legs.
    pub fn route_label(&self) -> String {
        match (self.origin.as_deref(), self.destination.as_deref()) {
            (Some(origin), Some(destination)) => format!("{} → {}", origin, destination),
            (Some(origin), None) => format!("{} →", origin),
            (None, Some(destination)) => format!("→ {}", destination),
            (None, None) => String::new(),
        }
    }
}

/// Builder for creating flights with optional fields
pub struct FlightBuilder {
    tail_number: Option<String>,
    aircraft_type: Option<String>,
    arrival_time: Option<DateTime<Local>>,
    departure_time: Option<DateTime<Local>>,
    origin: Option<String>,
    destination: Option<String>,
    contact: Option<String>,
    status: FlightStatus,
    services: Vec<ServiceTag>,
    notes: Option<String>,
}

impl FlightBuilder {
    pub fn new() -> Self {
        Self {
            tail_number: None,
            aircraft_type: None,
            arrival_time: None,
            departure_time: None,
            origin: None,
            destination: None,
            contact: None,
            status: FlightStatus::Scheduled,
            services: Vec::new(),
            notes: None,
        }
    }

    pub fn tail_number(mut self, tail: impl Into<String>) -> Self {
        self.tail_number = Some(tail.into());
        self
    }

    pub fn aircraft_type(mut self, aircraft_type: impl Into<String>) -> Self {
        self.aircraft_type = Some(aircraft_type.into());
        self
    }

    pub fn arrival_time(mut self, arrival: DateTime<Local>) -> Self {
        self.arrival_time = Some(arrival);
        self
    }

    pub fn departure_time(mut self, departure: DateTime<Local>) -> Self {
        self.departure_time = Some(departure);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn status(mut self, status: FlightStatus) -> Self {
        self.status = status;
        self
    }

    pub fn service(mut self, tag: ServiceTag) -> Self {
        if !self.services.contains(&tag) {
            self.services.push(tag);
        }
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> Result<Flight, FlightValidationError> {
        let flight = Flight {
            id: None,
            tail_number: self
                .tail_number
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            aircraft_type: self.aircraft_type,
            arrival_time: self.arrival_time,
            departure_time: self.departure_time,
            origin: self.origin,
            destination: self.destination,
            contact: self.contact,
            status: self.status,
            services: self.services,
            notes: self.notes,
            created_at: None,
            updated_at: None,
        };
        flight.validate()?;
        Ok(flight)
    }
}

impl Default for FlightBuilder {
    fn default() -> Self {
        Self::new()
    }
}
