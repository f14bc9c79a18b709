use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tessera_data::ecs::{Archetype, Component, ComponentCollection};

#[derive(Debug, Clone, Copy, Default, Component)]
struct Position(u32);

#[derive(Debug, Clone, Copy, Default, Component)]
struct Velocity(u32);

#[derive(Debug, Clone, Copy, Default, Component)]
struct RenderTag;

type Mover = Archetype<(Position, Velocity, RenderTag)>;

fn bench_collections(c: &mut Criterion) {
    let mut group = c.benchmark_group("Component Collection");

    group.bench_function("Archetype create_instance", |b| {
        b.iter(|| black_box(Mover::create_instance()));
    });

    let populated = Mover::create_instance();
    group.bench_function("Deep clone (3 components)", |b| {
        b.iter(|| black_box(populated.clone()));
    });

    group.bench_function("has_all presence check", |b| {
        b.iter(|| black_box(populated.has_all::<(Position, Velocity, RenderTag)>()));
    });

    group.bench_function("get + read", |b| {
        b.iter(|| black_box(populated.get::<Position>().read(|p| p.0)));
    });

    group.bench_function("emplace + extract", |b| {
        let mut collection = ComponentCollection::new();
        b.iter(|| {
            collection.emplace(Position(1));
            black_box(collection.extract::<Position>())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_collections);
criterion_main!(benches);
