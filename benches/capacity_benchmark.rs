// Staffing and analytics performance benchmarks
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wfm_analytics::capacity_planning::{
    CapacityPlanner, DateRange, PlanRequest, PlanningParameters, TrafficAssumptions,
};
use wfm_analytics::outliers::{analyze_outliers, OutlierMethod, Sensitivity};
use wfm_analytics::queueing::erlang_c;
use wfm_analytics::service_level::calculate_agents;
use wfm_analytics::statistics::calculate_statistical_summary;
use wfm_analytics::{AnalyticsEngine, TimeSeries, TimeSeriesPoint};

fn sample(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 1000.0 + 150.0 * (i as f64 * 0.9).sin() + (i % 11) as f64 * 3.0)
        .collect()
}

fn daily(name: &str, values: &[f64]) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    TimeSeries::from_points(
        name,
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(start + Duration::days(i as i64), v))
            .collect(),
    )
}

fn plan_request(lob: usize) -> PlanRequest {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let weekly = |name: &str, first: usize, count: usize| {
        TimeSeries::from_points(
            name,
            (first..first + count)
                .map(|w| TimeSeriesPoint::new(start + Duration::weeks(w as i64), 4000.0 + (w * 37 % 500) as f64))
                .collect(),
        )
    };

    PlanRequest {
        lob: format!("lob-{}", lob),
        assumptions: TrafficAssumptions {
            volume: 120.0 + lob as f64,
            average_handle_time_secs: 300.0,
            service_time_threshold_secs: 20.0,
            sla_target: 0.8,
            out_of_office_shrinkage_pct: 10.0,
            in_office_shrinkage_pct: 15.0,
            billable_break_pct: 5.0,
        },
        parameters: PlanningParameters::default(),
        date_range: DateRange::new(start, start + Duration::weeks(51)),
        historical: weekly("historical", 0, 26),
        forecast: weekly("forecast", 26, 26),
    }
}

fn erlang_c_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("erlang_c");

    for agents in [10u32, 50, 150].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(agents), agents, |b, &agents| {
            let traffic = agents as f64 * 0.85;
            b.iter(|| erlang_c(black_box(traffic), black_box(agents)));
        });
    }
    group.finish();
}

fn required_agents_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_agents");

    for volume in [50.0f64, 500.0, 1500.0].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(volume), volume, |b, &volume| {
            b.iter(|| calculate_agents(0.8, 20.0, black_box(volume), 300.0));
        });
    }
    group.finish();
}

fn statistical_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistical_summary");

    for size in [100usize, 1_000, 10_000].iter() {
        let data = sample(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| calculate_statistical_summary(black_box(data)));
        });
    }
    group.finish();
}

fn outlier_detection(c: &mut Criterion) {
    let data = sample(5_000);
    let mut group = c.benchmark_group("outliers");

    for method in [OutlierMethod::Iqr, OutlierMethod::ZScore, OutlierMethod::Mad] {
        group.bench_function(method.to_string(), |b| {
            b.iter(|| analyze_outliers(method, black_box(&data), Sensitivity::Medium));
        });
    }
    group.finish();
}

fn series_batch(c: &mut Criterion) {
    let engine = AnalyticsEngine::with_defaults();
    let series: Vec<TimeSeries> = (0..32).map(|i| daily(&format!("queue-{}", i), &sample(365))).collect();

    c.bench_function("analyze_many_32x365", |b| {
        b.iter(|| engine.analyze_many(black_box(&series)));
    });
}

fn capacity_batch(c: &mut Criterion) {
    let planner = CapacityPlanner::default();
    let mut group = c.benchmark_group("plan_many");

    for lobs in [1usize, 16, 64].iter() {
        let requests: Vec<PlanRequest> = (0..*lobs).map(plan_request).collect();
        group.throughput(Throughput::Elements(*lobs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lobs), &requests, |b, requests| {
            b.iter(|| planner.plan_many(black_box(requests)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    erlang_c_solver,
    required_agents_search,
    statistical_summary,
    outlier_detection,
    series_batch,
    capacity_batch
);
criterion_main!(benches);
