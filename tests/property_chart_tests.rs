use approx::abs_diff_eq;
use category_chart::api::{
    BrushSelection, BrushState, ChartConfig, ChartEngine, PipelineInput, RenderStyle,
    compute_category_scale, compute_value_scale, map_selection, recompute,
};
use category_chart::core::{
    Dataset, PlotArea, Record, SeriesKeySet, ShapeGeometry, ValueScaleOptions, Viewport,
};
use category_chart::render::NullRenderer;
use proptest::prelude::*;

fn categories(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("c{index}")).collect()
}

fn dataset_from(values: &[(f64, f64)]) -> Dataset {
    Dataset::new(
        values
            .iter()
            .enumerate()
            .map(|(index, &(a, b))| {
                Record::new(format!("c{index}"))
                    .with_value("A", a)
                    .with_value("B", b)
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn bands_are_equal_ordered_and_fill_the_range(
        count in 1usize..40,
        width in 10.0f64..4_000.0,
        padding in 0.0f64..0.9
    ) {
        let scale = compute_category_scale(categories(count), width, padding).expect("scale");
        let bands: Vec<_> = scale.bands().collect();
        prop_assert_eq!(bands.len(), count);

        let mut previous_end = f64::NEG_INFINITY;
        for &(_, start, end) in &bands {
            prop_assert!(abs_diff_eq!(end - start, scale.bandwidth(), epsilon = 1e-9));
            prop_assert!(start >= -1e-9 && end <= width + 1e-9);
            prop_assert!(start >= previous_end - 1e-9);
            previous_end = end;
        }
        // Outer insets match, so the run is centered.
        let leading = bands[0].1;
        let trailing = width - bands[count - 1].2;
        prop_assert!(abs_diff_eq!(leading, trailing, epsilon = 1e-6));
        prop_assert!(abs_diff_eq!(leading, padding * scale.step(), epsilon = 1e-6));
    }

    #[test]
    fn value_domain_contains_zero_and_every_value(
        values in proptest::collection::vec(-1_000.0f64..1_000.0, 1..50),
        height in 10.0f64..2_000.0
    ) {
        let options = ValueScaleOptions::default();
        let scale = compute_value_scale(values.iter().copied(), options, height).expect("scale");
        prop_assert!(scale.contains(0.0));
        for &value in &values {
            prop_assert!(scale.contains(value));
        }
        let (start, end) = scale.domain();
        prop_assert!(start < end);
    }

    #[test]
    fn bars_are_anchored_on_the_baseline(
        values in proptest::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..12)
    ) {
        let config = ChartConfig::new(Viewport::new(640, 400));
        let dataset = dataset_from(&values);
        let keys = SeriesKeySet::new(["A", "B"]);
        let style = RenderStyle::default();
        let plot = PlotArea::from_viewport(config.viewport, config.margins, 0.0).expect("plot");
        let brush = BrushState::full(plot.width, dataset.categories());
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
        let (scene, scales) = recompute(input).expect("recompute");
        let scales = scales.expect("scales");
        let baseline = scales.value.baseline();

        prop_assert_eq!(scene.shapes.len(), values.len() * 2);
        for shape in &scene.shapes {
            let ShapeGeometry::Rect(rect) = shape.geometry else {
                return Err(TestCaseError::fail("rectangular bars expected"));
            };
            if shape.datum.value >= 0.0 {
                prop_assert!(abs_diff_eq!(rect.y + rect.height, baseline, epsilon = 1e-6));
            } else {
                prop_assert!(abs_diff_eq!(rect.y, baseline, epsilon = 1e-6));
            }
            prop_assert!(rect.x >= -1e-9 && rect.x + rect.width <= plot.width + 1e-9);
        }

        let (again, _) = recompute(input).expect("recompute");
        prop_assert_eq!(scene, again);
    }

    #[test]
    fn brush_maps_to_contiguous_midpoint_subset(
        count in 1usize..30,
        a in -100.0f64..900.0,
        b in -100.0f64..900.0
    ) {
        let width = 800.0;
        let scale = compute_category_scale(categories(count), width, 0.2).expect("scale");
        let selection = BrushSelection::new(a, b);
        match map_selection(&scale, selection) {
            Ok(visible) => {
                let clamped = selection.clamped(width);
                let indices: Vec<_> = visible
                    .iter()
                    .map(|key| scale.index_of(key).expect("known key"))
                    .collect();
                for window in indices.windows(2) {
                    prop_assert_eq!(window[1], window[0] + 1);
                }
                for key in &visible {
                    let mid = scale.midpoint(key).expect("midpoint");
                    prop_assert!(clamped.contains(mid));
                }
            }
            Err(_) => {
                let clamped = selection.clamped(width);
                for key in scale.domain() {
                    let mid = scale.midpoint(key).expect("midpoint");
                    prop_assert!(!clamped.contains(mid));
                }
            }
        }
    }

    #[test]
    fn full_extent_brush_shows_every_category(count in 1usize..30) {
        let scale = compute_category_scale(categories(count), 500.0, 0.2).expect("scale");
        let visible = map_selection(&scale, BrushSelection::full(500.0)).expect("visible");
        prop_assert_eq!(visible, categories(count));
    }

    #[test]
    fn pointer_over_bar_center_hovers_exactly_that_bar(
        values in proptest::collection::vec((1.0f64..100.0, 1.0f64..100.0), 1..8),
        pick in 0usize..16
    ) {
        let config = ChartConfig::new(Viewport::new(640, 400));
        let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.set_series_keys(SeriesKeySet::new(["A", "B"]));
        engine.set_dataset(dataset_from(&values));
        let snapshot = engine.snapshot().expect("snapshot");
        let shape = &snapshot.shapes[pick % snapshot.shapes.len()];
        let ShapeGeometry::Rect(rect) = shape.geometry else {
            return Err(TestCaseError::fail("rectangular bars expected"));
        };
        let x = snapshot.plot.left + rect.x + rect.width * 0.5;
        let y = snapshot.plot.top + rect.y + rect.height * 0.5;

        engine.pointer_move(x, y).expect("pointer move");
        prop_assert_eq!(engine.hovered_shape(), Some(shape.id));
        let tooltip = engine.tooltip().expect("tooltip");
        prop_assert!(abs_diff_eq!(tooltip.x, x + 15.0, epsilon = 1e-9));
    }
}
