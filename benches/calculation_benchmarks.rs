//! Performance benchmarks for the parental leave planner.
//!
//! This benchmark suite verifies that the planner is cheap enough to run on
//! every pointer move while a boundary is dragged:
//! - Allocation for a two-earner household: < 100μs mean
//! - Timeline generation for 60 weeks: < 50μs mean
//! - One drag move (re-slice plus timeline): < 100μs mean
//! - HTTP optimize round trip: < 1ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use parental_leave_planner::api::{AppState, OptimizeRequest, create_router};
use parental_leave_planner::calculation::{
    DragEvent, TimelineEditor, TimelineOptions, allocate, generate,
};
use parental_leave_planner::config::{BenefitConfig, ConfigLoader};
use parental_leave_planner::models::{CustodyType, Household, LeaveMonths, Preferences, Strategy};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/sweden").expect("Failed to load config");
    AppState::new(config)
}

fn preferences(months1: i64, months2: i64, floor: i64) -> Preferences {
    Preferences {
        part_time: false,
        leave_months: LeaveMonths {
            parent1: Decimal::from(months1),
            parent2: Decimal::from(months2),
        },
        minimum_combined_income: floor,
        strategy: Strategy::Longer,
    }
}

fn two_earners() -> Household {
    Household::new(30000, 30000, CustodyType::Joint)
}

/// Benchmark: Allocation with a floor met at one day per week.
///
/// Target: < 100μs mean
fn bench_allocate(c: &mut Criterion) {
    let config = BenefitConfig::default();
    let household = two_earners();
    let prefs = preferences(6, 6, 10000);

    c.bench_function("allocate_two_earners", |b| {
        b.iter(|| black_box(allocate(black_box(&prefs), &household, &config).unwrap()))
    });
}

/// Benchmark: Allocation where no day mix meets the floor, so the search
/// scans every candidate.
fn bench_allocate_unreachable_floor(c: &mut Criterion) {
    let config = BenefitConfig::default();
    let household = two_earners();
    let prefs = preferences(12, 6, 1_000_000);

    c.bench_function("allocate_unreachable_floor", |b| {
        b.iter(|| black_box(allocate(black_box(&prefs), &household, &config).unwrap()))
    });
}

/// Benchmark: Timeline generation.
///
/// Target: < 50μs mean
fn bench_generate(c: &mut Criterion) {
    let config = BenefitConfig::default();
    let result = allocate(&preferences(6, 6, 10000), &two_earners(), &config).unwrap();
    let options = TimelineOptions::from_config(&config, None);

    c.bench_function("generate_timeline", |b| {
        b.iter(|| black_box(generate(black_box(&result), &options)))
    });
}

/// Benchmark: A full drag of parent 1's end across twenty weeks.
///
/// Target: < 100μs mean per move
fn bench_drag_sequence(c: &mut Criterion) {
    let config = BenefitConfig::default();
    let result = allocate(&preferences(6, 6, 10000), &two_earners(), &config).unwrap();
    let editor = TimelineEditor::new(result, config, None);
    let start = editor.handles()[0].point_id;

    let mut group = c.benchmark_group("drag");
    group.throughput(Throughput::Elements(20));
    group.bench_function("move_20_weeks", |b| {
        b.iter(|| {
            let mut editor = editor.clone();
            editor.handle_event(DragEvent::Press { week: start });
            for offset in 1..=20 {
                editor.handle_event(DragEvent::Move {
                    week: start.saturating_sub(offset),
                });
            }
            editor.handle_event(DragEvent::Release);
            black_box(editor.current().plan1.weeks)
        })
    });
    group.finish();
}

/// Benchmark: Leave length to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let config = BenefitConfig::default();
    let household = two_earners();
    let options = TimelineOptions::from_config(&config, None);

    let mut group = c.benchmark_group("scaling");

    for months in [3i64, 6, 12, 18, 24].iter() {
        let prefs = preferences(*months, *months, 20000);

        group.bench_with_input(BenchmarkId::new("months", months), months, |b, _| {
            b.iter(|| {
                let result = allocate(&prefs, &household, &config).unwrap();
                black_box(generate(&result, &options))
            })
        });
    }

    group.finish();
}

/// Benchmark: HTTP optimize round trip.
///
/// Target: < 1ms mean
fn bench_http_optimize(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let request = OptimizeRequest {
        preferences: preferences(6, 6, 10000),
        household: two_earners(),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("http_optimize", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/optimize")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_allocate,
    bench_allocate_unreachable_floor,
    bench_generate,
    bench_drag_sequence,
    bench_scaling,
    bench_http_optimize,
);
criterion_main!(benches);
