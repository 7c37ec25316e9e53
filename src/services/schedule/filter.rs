//! Board filter predicate.

use crate::models::flight::{Flight, FlightStatus, ServiceTag};

/// Status clause: wildcard or exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(FlightStatus),
}

/// Filter over the working set. All three clauses are ANDed.
#[derive(Debug, Clone, Default)]
pub struct FlightFilter {
    /// Case-insensitive substring matched against tail number, aircraft
    /// type, origin, destination and contact. Empty matches everything.
    pub search: String,
    pub status: StatusFilter,
    /// Required services; the flight's set must contain every one of them.
    pub services: Vec<ServiceTag>,
}

impl FlightFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.status == StatusFilter::All
            && self.services.is_empty()
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        self.matches_search(flight) && self.matches_status(flight) && self.matches_services(flight)
    }

    fn matches_search(&self, flight: &Flight) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let fields = [
            Some(flight.tail_number.as_str()),
            flight.aircraft_type.as_deref(),
            flight.origin.as_deref(),
            flight.destination.as_deref(),
            flight.contact.as_deref(),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_status(&self, flight: &Flight) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => flight.status == status,
        }
    }

    fn matches_services(&self, flight: &Flight) -> bool {
        self.services.iter().all(|tag| flight.has_service(*tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample_flight() -> Flight {
        Flight::builder()
            .tail_number("N421HB")
            .aircraft_type("Citation XLS")
            .departure_time(Local.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap())
            .origin("KSLC")
            .destination("KDEN")
            .contact("West Ramp Ops")
            .status(FlightStatus::Delayed)
            .service(ServiceTag::Fuel)
            .service(ServiceTag::Hangar)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FlightFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&sample_flight()));
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let flight = sample_flight();

        for term in ["n421", "citation", "kslc", "kden", "west ramp"] {
            let filter = FlightFilter {
                search: term.to_string(),
                ..Default::default()
            };
            assert!(filter.matches(&flight), "term {:?} should match", term);
        }

        let filter = FlightFilter {
            search: "gulfstream".to_string(),
            ..Default::default()
        };
        assert!(!filter.matches(&flight));
    }

    #[test]
    fn test_status_clause_excludes_even_when_others_match() {
        let filter = FlightFilter {
            status: StatusFilter::Only(FlightStatus::Arrived),
            ..Default::default()
        };
        assert!(!filter.matches(&sample_flight()));
    }

    #[test]
    fn test_required_services_subset_matches() {
        let filter = FlightFilter {
            services: vec![ServiceTag::Fuel],
            ..Default::default()
        };
        assert!(filter.matches(&sample_flight()));
    }

    #[test]
    fn test_required_services_superset_excludes() {
        let filter = FlightFilter {
            services: vec![ServiceTag::Fuel, ServiceTag::Catering],
            ..Default::default()
        };
        assert!(!filter.matches(&sample_flight()));
    }

    #[test]
    fn test_clauses_are_anded() {
        let filter = FlightFilter {
            search: "n421".to_string(),
            status: StatusFilter::Only(FlightStatus::Delayed),
            services: vec![ServiceTag::Hangar],
        };
        assert!(filter.matches(&sample_flight()));

        let filter = FlightFilter {
            status: StatusFilter::Only(FlightStatus::Cancelled),
            ..filter
        };
        assert!(!filter.matches(&sample_flight()));
    }
}
