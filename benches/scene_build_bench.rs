use category_chart::api::{
    BrushSelection, BrushState, ChartConfig, ChartEngine, PipelineInput, RenderStyle,
    compute_category_scale, map_selection, recompute,
};
use category_chart::core::{BarStyle, Dataset, PlotArea, Record, SeriesKeySet, Viewport};
use category_chart::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn dataset(categories: usize, keys: &SeriesKeySet) -> Dataset {
    Dataset::new(
        (0..categories)
            .map(|index| {
                keys.keys()
                    .iter()
                    .enumerate()
                    .fold(Record::new(format!("c{index}")), |record, (series, key)| {
                        let value = ((index * 7 + series * 13) % 50) as f64 - 10.0;
                        record.with_value(key.clone(), value)
                    })
            })
            .collect(),
    )
}

fn bench_full_recompute(c: &mut Criterion) {
    let keys = SeriesKeySet::new(["A", "B", "C", "D"]);
    let dataset = dataset(500, &keys);
    let style = RenderStyle::default();

    for (name, bar_style) in [
        ("recompute_rect_bars_500x4", BarStyle::Rectangular),
        ("recompute_curved_bars_500x4", BarStyle::Curved),
    ] {
        let config = ChartConfig::new(Viewport::new(1920, 1080)).with_bar_style(bar_style);
        let plot = PlotArea::from_viewport(config.viewport, config.margins, 0.0).expect("plot");
        let brush = BrushState::full(plot.width, dataset.categories());
        c.bench_function(name, |b| {
            b.iter(|| {
                let input = PipelineInput {
                    dataset: &dataset,
                    keys: &keys,
                    palette: &[],
                    config: &config,
                    style: &style,
                    plot,
                    brush: &brush,
                    hovered: None,
                };
                let _ = recompute(black_box(input)).expect("recompute");
            })
        });
    }
}

fn bench_brush_mapping(c: &mut Criterion) {
    let categories: Vec<String> = (0..2_000).map(|index| format!("c{index}")).collect();
    let scale = compute_category_scale(categories, 1_800.0, 0.2).expect("scale");

    c.bench_function("brush_map_selection_2k", |b| {
        b.iter(|| {
            let _ = map_selection(&scale, black_box(BrushSelection::new(400.0, 1_200.0)))
                .expect("visible");
        })
    });
}

fn bench_brush_drag_redraw(c: &mut Criterion) {
    let keys = SeriesKeySet::new(["A", "B"]);
    let config = ChartConfig::new(Viewport::new(1280, 720)).with_brush(true);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series_keys(keys.clone());
    engine.set_dataset(dataset(300, &keys));
    engine.render().expect("render");

    c.bench_function("brush_drag_redraw_300x2", |b| {
        let mut offset = 0.0;
        b.iter(|| {
            offset = (offset + 7.0) % 400.0;
            let _ = engine.on_brush(offset, offset + 300.0).expect("brush");
            engine.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_full_recompute,
    bench_brush_mapping,
    bench_brush_drag_redraw
);
criterion_main!(benches);
