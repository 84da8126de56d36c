//! Benchmarks for the flattening exporters
//!
//! Run with: cargo bench -p eurorack-panel-designer

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use eurorack_panel_designer::{
    build_kicad_pcb, build_panel_stl, PanelDimensions, PanelElement, PanelModel, Point,
};

/// A panel with `n` jacks laid out on a grid, plus satellite holes.
fn make_panel(n: usize) -> PanelModel {
    let mut model = PanelModel::new(PanelDimensions::from_hp(42, 5.08));
    model.element_hole_config.enabled = true;
    (0..n).fold(model, |model, i| {
        let x = 15.0 + (i % 12) as f64 * 15.0;
        let y = 20.0 + (i / 12) as f64 * 15.0;
        model.with_element_added(PanelElement::jack(Point::new(x, y), 6.0))
    })
}

fn bench_kicad_pcb(c: &mut Criterion) {
    let mut group = c.benchmark_group("export/kicad_pcb");
    for n in [1, 12, 48] {
        let model = make_panel(n);
        let holes = model.mounting_holes();
        group.bench_with_input(BenchmarkId::from_parameter(n), &model, |b, model| {
            b.iter(|| black_box(build_kicad_pcb(model, &holes)))
        });
    }
    group.finish();
}

fn bench_stl(c: &mut Criterion) {
    let mut group = c.benchmark_group("export/stl");
    for n in [1, 12, 48] {
        let model = make_panel(n);
        let holes = model.mounting_holes();
        group.bench_with_input(BenchmarkId::from_parameter(n), &model, |b, model| {
            b.iter(|| black_box(build_panel_stl(model, &holes, 2.0)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kicad_pcb, bench_stl);
criterion_main!(benches);
