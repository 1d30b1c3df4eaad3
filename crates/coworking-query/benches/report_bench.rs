//! Report evaluation benchmarks.
//!
//! Run with: cargo bench -p coworking-query

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{NaiveDate, NaiveTime};
use coworking_core::{Dataset, Member, MemberId, Reservation, ReservationId, Room, RoomId};
use coworking_query::{Executor, Report, ReportParams};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const ROOMS: u32 = 20;
const MEMBERS: u32 = 200;

/// Generate a snapshot with the given number of reservations.
fn generate_dataset(num_reservations: u32) -> Dataset {
    let surnames = ["Martín", "Beltrán", "Pérez", "Gómez", "Ruiz"];
    let statuses = ["ASISTIDA", "CONFIRMADA", "PENDIENTE", "CANCELADA"];
    let signup = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let members = (1..=MEMBERS)
        .map(|i| {
            let surname = surnames[i as usize % surnames.len()];
            Member::new(
                MemberId(i),
                format!("Miembro{i} {surname}"),
                format!("m{i}@example.com"),
                signup + chrono::Duration::days(i64::from(i)),
            )
        })
        .collect();

    let rooms = (1..=ROOMS)
        .map(|i| {
            Room::new(
                RoomId(i),
                format!("Sala {i}"),
                dec!(10) + Decimal::from(i),
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            )
            .with_capacity(i)
        })
        .collect();

    let reservations = (1..=num_reservations)
        .map(|i| {
            let day = NaiveDate::from_ymd_opt(2025, i % 12 + 1, i % 28 + 1).unwrap();
            let start = i % 10 + 8;
            let mut r = Reservation::new(
                ReservationId(i),
                MemberId(i % MEMBERS + 1),
                RoomId(i % ROOMS + 1),
                day,
                NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(start + 1 + i % 2, 30, 0).unwrap(),
            )
            .with_status(statuses[i as usize % statuses.len()])
            .with_attendees(i % 12);
            if i % 3 == 0 {
                r = r.with_discount(Decimal::from(i % 25));
            }
            r
        })
        .collect();

    Dataset::new(members, rooms, reservations).unwrap()
}

fn bench_all_reports(c: &mut Criterion) {
    let dataset = generate_dataset(1000);
    let params = ReportParams::default();

    let mut group = c.benchmark_group("report_all");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("catalogue", |b| {
        b.iter(|| {
            let executor = Executor::new(black_box(&dataset));
            for report in Report::ALL {
                let _ = black_box(report.execute(&executor, &params));
            }
        });
    });

    group.finish();
}

fn bench_overlap(c: &mut Criterion) {
    let dataset = generate_dataset(1000);

    let mut group = c.benchmark_group("report_overlap");
    group.throughput(Throughput::Elements(1000));

    group.bench_function("members_overlapping_with", |b| {
        let executor = Executor::new(&dataset);
        b.iter(|| executor.members_overlapping_with(black_box("Miembro5 Beltrán")));
    });

    group.bench_function("overlapping_pairs", |b| {
        b.iter(|| coworking_core::overlapping_pairs(black_box(&dataset)));
    });

    group.finish();
}

fn bench_report_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_scaling");

    for size in [100u32, 1000, 5000] {
        let dataset = generate_dataset(size);

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dataset, |b, dataset| {
            b.iter(|| {
                let executor = Executor::new(black_box(dataset));
                executor.revenue_by_room()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_all_reports, bench_overlap, bench_report_scaling);
criterion_main!(benches);
