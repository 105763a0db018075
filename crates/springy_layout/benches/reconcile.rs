//! Benchmarks for spring reconciliation over the demo grid.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use springy_core::{Point, Rect};
use springy_layout::{FlowConfig, FlowLayout, SpringyConfig, SpringyFlowLayout};

fn demo_layout() -> SpringyFlowLayout<FlowLayout> {
    let grid = FlowLayout::new(FlowConfig::default()).unwrap();
    let mut layout = SpringyFlowLayout::new(grid, SpringyConfig::default()).unwrap();
    layout.attach(Rect::new(0.0, 0.0, 320.0, 800.0));
    layout.prepare();
    layout
}

fn bench_scroll_through_grid(c: &mut Criterion) {
    c.bench_function("scroll_1000_items_60_unit_steps", |b| {
        b.iter(|| {
            let mut layout = demo_layout();
            for step in 1..=130 {
                let offset = step as f32 * 60.0;
                layout.on_bounds_changed(
                    Rect::new(0.0, offset, 320.0, 800.0),
                    Point::new(160.0, offset + 400.0),
                );
                layout.prepare();
            }
            black_box(layout.active_spring_count())
        });
    });
}

fn bench_settle(c: &mut Criterion) {
    c.bench_function("settle_after_fling_120_frames", |b| {
        b.iter(|| {
            let mut layout = demo_layout();
            layout.on_bounds_changed(Rect::new(0.0, 45.0, 320.0, 800.0), Point::new(160.0, 45.0));
            for _ in 0..120 {
                layout.tick(1.0 / 60.0);
            }
            black_box(layout.registry().max_offset())
        });
    });
}

fn bench_query(c: &mut Criterion) {
    let layout = demo_layout();
    let viewport = Rect::new(0.0, 0.0, 320.0, 800.0);
    c.bench_function("attributes_for_viewport", |b| {
        b.iter(|| black_box(layout.layout_attributes_for_elements(black_box(viewport))));
    });
}

criterion_group!(benches, bench_scroll_through_grid, bench_settle, bench_query);
criterion_main!(benches);
