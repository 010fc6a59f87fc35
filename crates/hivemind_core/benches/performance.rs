use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hivemind_core::config::Config;
use hivemind_core::Engine;

fn bench_run(c: &mut Criterion) {
    let config = Config {
        rows: 30,
        cols: 30,
        max_ticks: 300,
        max_stations: 3,
        clients_count: 12,
        drones: 3,
        robots: 3,
        scooters: 3,
        total_packages: 80,
        spawn_frequency: 3,
        display_delay_ms: 0,
        map_file: None,
    };

    c.bench_function("run_to_completion", |b| {
        b.iter(|| {
            let mut engine = Engine::new(config.clone(), Some(1)).expect("engine builds");
            black_box(engine.run());
        });
    });
}

criterion_group!(benches, bench_run);
criterion_main!(benches);
