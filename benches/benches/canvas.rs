// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_canvas::{
    Canvas, CanvasConfig, Effect, Entity, Event, HitTarget, PointerId, PointerInput, PointerKind,
};
use corkboard_view2d::{Camera, Minimap};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

const SCREEN: Size = Size::new(1280.0, 800.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_coord(&mut self, extent: f64) -> f64 {
        (f64::from(self.next_u32()) / f64::from(u32::MAX) - 0.5) * extent
    }
}

fn scatter(n: usize, extent: f64, seed: u64) -> Vec<Entity> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|i| Entity::new(format!("e{i}"), rng.next_coord(extent), rng.next_coord(extent)))
        .collect()
}

fn started() -> (Canvas, Effect) {
    let mut canvas = Canvas::new(CanvasConfig::default(), SCREEN).unwrap();
    let effect = canvas.handle(0, Event::Start).remove(0);
    (canvas, effect)
}

fn bench_minimap(c: &mut Criterion) {
    let mut group = c.benchmark_group("corkboard_minimap");
    let camera = Camera::new(SCREEN);
    for &n in &[200_usize, 2_000, 20_000] {
        let points: Vec<Point> = scatter(n, 50_000.0, 0xC0DE_0000_0000_0001)
            .iter()
            .map(Entity::position)
            .collect();
        group.bench_function(format!("project(n={n})"), |b| {
            b.iter(|| {
                black_box(Minimap::project(
                    points.iter().copied(),
                    &camera,
                    Size::new(150.0, 150.0),
                    2_000.0,
                ))
            });
        });
    }
    group.finish();
}

fn bench_apply_fetch(c: &mut Criterion) {
    let mut group = c.benchmark_group("corkboard_apply_fetch");
    for &n in &[200_usize, 2_000] {
        let entities = scatter(n, 10_000.0, 0xC0DE_0000_0000_0002);
        group.bench_function(format!("window_fetched(n={n})"), |b| {
            b.iter_batched(
                || (started(), entities.clone()),
                |((mut canvas, effect), entities)| {
                    let Effect::FetchWindow { generation, .. } = effect else {
                        unreachable!("start issues a windowed fetch first")
                    };
                    canvas.handle(
                        100,
                        Event::WindowFetched {
                            generation,
                            result: Ok(entities),
                        },
                    );
                    black_box(canvas);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_pan_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("corkboard_pan");
    let id = PointerId(1);
    group.bench_function("drag_pan(samples=256)", |b| {
        b.iter_batched(
            || started().0,
            |mut canvas| {
                let mut at = Point::new(640.0, 400.0);
                canvas.handle(
                    1,
                    Event::Pointer {
                        input: PointerInput::down(id, PointerKind::Mouse, at),
                        target: HitTarget::Board,
                    },
                );
                for t in 0..256_u64 {
                    at.x += 3.0;
                    at.y -= 1.0;
                    canvas.handle(
                        2 + t,
                        Event::Pointer {
                            input: PointerInput::moved(id, at),
                            target: HitTarget::Board,
                        },
                    );
                }
                black_box(canvas.next_deadline());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_minimap, bench_apply_fetch, bench_pan_stream);
criterion_main!(benches);
