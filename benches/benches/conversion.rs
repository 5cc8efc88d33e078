// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Point, Rect, Vec2};
use pixelpane_geometry::{
    GeometryError, GridCoord, SurfaceGeometry, SurfaceGeometryProvider, ViewportConstraints,
    ViewportState,
};
use pixelpane_transform::{CoordinateTransform, DevicePolicy};

#[derive(Clone, Copy)]
struct Surface(SurfaceGeometry);

impl SurfaceGeometryProvider for Surface {
    fn surface_geometry(&self) -> Result<SurfaceGeometry, GeometryError> {
        Ok(self.0)
    }
}

fn constraints() -> ViewportConstraints {
    ViewportConstraints::new(10.0, 1000, 1000, 40.0)
}

fn scaled_surface() -> Surface {
    Surface(SurfaceGeometry {
        device_pixel_ratio: 2.0,
        content_inset: Insets::new(2.0, 2.0, 2.0, 2.0),
        visual_offset: Vec2::new(0.0, 120.0),
        ..SurfaceGeometry::from_rect(Rect::new(0.0, 0.0, 960.0, 540.0))
    })
}

fn state() -> ViewportState {
    ViewportState::new(
        4.0,
        Vec2::new(300.0, 400.0),
        Rect::new(-1.0, -1.0, 1001.0, 1001.0),
    )
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_conversion");

    for policy in [DevicePolicy::desktop(), DevicePolicy::touch()] {
        let name = if policy.use_visual_viewport_offset {
            "touch"
        } else {
            "desktop"
        };
        // A diagonal sweep of pointer positions, reused every iteration so
        // the geometry cache stays warm like it does during a drag.
        let points: Vec<Point> = (0..64)
            .map(|i| Point::new(3.0 + f64::from(i) * 14.5, 1.0 + f64::from(i) * 8.0))
            .collect();
        let mut transform = CoordinateTransform::new(constraints(), policy, scaled_surface());

        group.bench_function(format!("screen_to_grid({name})"), |b| {
            b.iter(|| {
                for &point in &points {
                    let cell = transform.screen_to_grid(black_box(point), state());
                    black_box(cell.expect("surface geometry is always available"));
                }
            });
        });

        group.bench_function(format!("grid_to_screen({name})"), |b| {
            b.iter(|| {
                for i in 0..64_u32 {
                    let cell = GridCoord::new(300 + i, 400 + i);
                    let position = transform.grid_to_screen(black_box(cell), state());
                    black_box(position.expect("surface geometry is always available"));
                }
            });
        });

        group.bench_function(format!("visible_grid_area({name})"), |b| {
            b.iter(|| {
                let area = transform.visible_grid_area(black_box(state()));
                black_box(area.expect("surface geometry is always available"));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
