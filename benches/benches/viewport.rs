// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size, Vec2};
use pixelpane_geometry::{
    GeometryError, GridCoord, SurfaceGeometry, SurfaceGeometryProvider, ViewportConstraints,
};
use pixelpane_viewport::{ViewportManager, ViewportTuning, bounds};

#[derive(Clone, Copy)]
struct Surface(SurfaceGeometry);

impl SurfaceGeometryProvider for Surface {
    fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
        Ok(self.0)
    }
}

fn surface() -> Surface {
    Surface(SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 1920.0, 1080.0)))
}

fn constraints() -> ViewportConstraints {
    ViewportConstraints::new(10.0, 1000, 1000, 40.0)
}

fn manager() -> ViewportManager<Surface> {
    ViewportManager::new(constraints(), ViewportTuning::desktop(), surface())
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_bounds");
    let surface_px = Size::new(1920.0, 1080.0);

    for &zoom in &[0.5_f64, 4.0, 40.0] {
        group.bench_function(format!("pan_bounds(zoom={zoom})"), |b| {
            b.iter(|| {
                bounds::pan_bounds(
                    constraints(),
                    ViewportTuning::desktop(),
                    black_box(surface_px),
                    black_box(zoom),
                )
            });
        });
    }

    group.bench_function("fit_zoom", |b| {
        b.iter(|| {
            bounds::fit_zoom(
                constraints(),
                ViewportTuning::desktop(),
                black_box(surface_px),
            )
        });
    });

    group.finish();
}

fn bench_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_animation");

    group.bench_function("tick_mid_flight", |b| {
        b.iter_batched(
            || {
                let mut view = manager();
                view.set_zoom(40.0);
                view
            },
            |mut view| {
                view.tick();
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("settle_full_zoom", |b| {
        b.iter_batched(
            || {
                let mut view = manager();
                view.set_zoom(40.0);
                view.navigate_to_cell(GridCoord::new(999, 999));
                view
            },
            |mut view| {
                while view.tick() {}
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("retarget_pan_delta", |b| {
        b.iter_batched(
            || manager(),
            |mut view| {
                for step in 0..16 {
                    view.apply_pan_delta(Vec2::new(f64::from(step), 0.5));
                    view.tick();
                }
                black_box(view);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_bounds, bench_animation);
criterion_main!(benches);
