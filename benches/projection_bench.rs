// Benchmark for the weekly board projection

use chrono::{Duration, Local, NaiveDate, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flightboard::models::flight::{Flight, FlightStatus, ServiceTag};
use flightboard::services::schedule::{project_week, FlightFilter, StatusFilter, TimeGridLayout};

fn build_week(flight_count: i64) -> (Vec<Flight>, Vec<NaiveDate>) {
    let monday = Local.with_ymd_and_hms(2024, 6, 3, 6, 0, 0).unwrap();
    let dates: Vec<NaiveDate> = (0..7)
        .map(|i| monday.date_naive() + Duration::days(i))
        .collect();

    let mut flights = Vec::new();
    for i in 0..flight_count {
        let day = i % 7;
        let hour_offset = (i % 12) * 80;
        let arrival = monday + Duration::days(day) + Duration::minutes(hour_offset);

        let mut flight = Flight::builder()
            .tail_number(format!("N{:03}X", i % 40))
            .aircraft_type("PC-12")
            .departure_time(arrival + Duration::minutes(90))
            .origin("KBFI")
            .destination("KGEG")
            .status(if i % 5 == 0 {
                FlightStatus::Delayed
            } else {
                FlightStatus::Scheduled
            })
            .service(ServiceTag::Fuel)
            .build()
            .expect("valid flight");

        // A third of the fleet arrives only, a third turns around.
        match i % 3 {
            0 => {
                flight.arrival_time = Some(arrival);
                flight.departure_time = None;
            }
            1 => {
                flight.arrival_time = Some(arrival);
            }
            _ => {}
        }
        flight.id = Some(i + 1);
        flights.push(flight);
    }

    (flights, dates)
}

fn projection_benchmark(c: &mut Criterion) {
    let layout = TimeGridLayout::full_day();
    let (flights, dates) = build_week(500);

    c.bench_function("project_week_500_unfiltered", |b| {
        let filter = FlightFilter::default();
        b.iter(|| {
            black_box(project_week(
                black_box(&flights),
                &filter,
                &dates,
                &layout,
            ))
        })
    });

    c.bench_function("project_week_500_filtered", |b| {
        let filter = FlightFilter {
            search: "n01".to_string(),
            status: StatusFilter::Only(FlightStatus::Scheduled),
            services: vec![ServiceTag::Fuel],
        };
        b.iter(|| {
            black_box(project_week(
                black_box(&flights),
                &filter,
                &dates,
                &layout,
            ))
        })
    });
}

criterion_group!(benches, projection_benchmark);
criterion_main!(benches);
