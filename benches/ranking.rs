use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use trip_planner::{rank_top_destinations, RankOptions};

/// Seven forecast days for a few hundred cities.
fn forecast(cities: usize) -> DataFrame {
    let rows = cities * 7;
    let day_id: Vec<i64> = (0..rows).map(|i| (i / cities) as i64 + 1).collect();
    let city: Vec<String> = (0..rows).map(|i| format!("City{}", i % cities)).collect();
    let lat: Vec<f64> = (0..rows).map(|i| 42.0 + (i % cities) as f64 * 0.01).collect();
    let lon: Vec<f64> = (0..rows).map(|i| -4.0 + (i % cities) as f64 * 0.02).collect();
    let temp_max: Vec<f64> = (0..rows).map(|i| 10.0 + ((i * 37) % 250) as f64 / 10.0).collect();
    let humidity: Vec<i64> = (0..rows).map(|i| 30 + ((i * 13) % 60) as i64).collect();
    let clouds: Vec<i64> = (0..rows).map(|i| ((i * 29) % 100) as i64).collect();
    let rain_prob: Vec<f64> = (0..rows).map(|i| ((i * 7) % 10) as f64 / 10.0).collect();
    df!(
        "day_id" => day_id,
        "city" => city,
        "lat" => lat,
        "lon" => lon,
        "temp_max" => temp_max,
        "humidity" => humidity,
        "clouds" => clouds,
        "rain_prob" => rain_prob,
    )
    .expect("benchmark frame")
}

fn bench_ranking(c: &mut Criterion) {
    let frame = forecast(350);
    let options = RankOptions::default();
    c.bench_function("rank_top_destinations", |b| {
        b.iter(|| rank_top_destinations(black_box(&frame), black_box(&options)))
    });
}

criterion_group!(benches, bench_ranking);
criterion_main!(benches);
