use approx::assert_abs_diff_eq;
use category_chart::api::{
    BrushGesture, BrushOutcome, BrushSelection, ChartConfig, ChartEngine, RedrawScope,
};
use category_chart::core::{Dataset, Margins, Record, SeriesKeySet, Viewport};
use category_chart::render::{NullRenderer, SceneLayerKind};

fn quarterly() -> Dataset {
    Dataset::new(vec![
        Record::new("Jan").with_value("A", 5.0),
        Record::new("Feb").with_value("A", 10.0),
        Record::new("Mar").with_value("A", 15.0),
        Record::new("Apr").with_value("A", 40.0),
    ])
}

fn brushable_config() -> ChartConfig {
    ChartConfig::new(Viewport::new(300, 300))
        .with_margins(Margins::new(0.0, 0.0, 0.0, 0.0))
        .with_brush(true)
}

fn brushable_engine(config: ChartConfig) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series_keys(SeriesKeySet::new(["A"]));
    engine.set_dataset(quarterly());
    engine
}

fn visible(engine: &ChartEngine<NullRenderer>) -> Vec<&str> {
    engine.visible_categories().iter().map(String::as_str).collect()
}

#[test]
fn brush_band_is_reserved_below_the_plot() {
    let mut engine = brushable_engine(brushable_config());
    assert_abs_diff_eq!(engine.plot_area().height, 240.0);

    let scene = engine.scene().expect("scene");
    assert_eq!(scene.viewport, Viewport::new(300, 400));
    assert_eq!(scene.layer_kinds().last(), Some(&SceneLayerKind::BrushOverlay));
    let overlay = scene.layer(SceneLayerKind::BrushOverlay).expect("overlay");
    assert_abs_diff_eq!(overlay.transform.dy, 280.0);
    // Selection plus two handles.
    assert_eq!(overlay.rects.len(), 3);
    assert_abs_diff_eq!(overlay.rects[0].width, 300.0);
}

#[test]
fn full_extent_brush_is_identity() {
    let mut engine = brushable_engine(brushable_config());
    let before = engine.snapshot().expect("snapshot");

    let outcome = engine.on_brush(0.0, 300.0).expect("brush");
    assert_eq!(
        outcome,
        BrushOutcome::Applied {
            visible: ["Jan", "Feb", "Mar", "Apr"].map(str::to_owned).to_vec()
        }
    );
    let after = engine.snapshot().expect("snapshot");
    assert_eq!(before.shapes, after.shapes);
    assert_eq!(before.value_domain, after.value_domain);
}

#[test]
fn interval_without_midpoints_retains_previous_state() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 200.0).expect("brush");
    let before = engine.snapshot().expect("snapshot");

    // Jan midpoint is ~42.9 and Feb's ~114.3.
    let outcome = engine.on_brush(50.0, 60.0).expect("brush");
    assert_eq!(outcome, BrushOutcome::Retained);
    assert_eq!(visible(&engine), ["Feb", "Mar"]);
    assert_eq!(engine.brush_selection(), Some(BrushSelection::new(100.0, 200.0)));
    assert_eq!(engine.snapshot().expect("snapshot"), before);
}

#[test]
fn narrow_brush_rescopes_category_axis() {
    let mut engine = brushable_engine(brushable_config());
    let full_domain = engine.snapshot().expect("snapshot").value_domain;

    engine.on_brush(100.0, 130.0).expect("brush");
    assert_eq!(visible(&engine), ["Feb"]);
    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(snapshot.shapes.len(), 1);
    assert_eq!(snapshot.shapes[0].datum.category, "Feb");
    // Data-only redraw keeps the value scale.
    assert_eq!(snapshot.value_domain, full_domain);

    let scene = engine.scene().expect("scene");
    let data = scene.layer(SceneLayerKind::DataShapes).expect("data layer");
    let bar = data.rects[0];
    // One band with padding 0.2 over 300 px.
    let step = 300.0 / 1.2;
    assert_abs_diff_eq!(bar.x + bar.width * 0.5, 150.0, epsilon = 1e-9);
    assert!(bar.width <= step * 0.8 + 1e-9);
}

#[test]
fn data_only_brush_leaves_frame_layers_untouched() {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), brushable_config()).expect("engine init");
    engine.set_series_keys(SeriesKeySet::new(["A", "B"]));
    engine.set_dataset(Dataset::new(vec![
        Record::new("Jan").with_value("A", 5.0).with_value("B", -3.0),
        Record::new("Feb").with_value("A", -2.0).with_value("B", 4.0),
    ]));

    let frame_kinds = [
        SceneLayerKind::Grid,
        SceneLayerKind::Axes,
        SceneLayerKind::Baseline,
        SceneLayerKind::Title,
        SceneLayerKind::Legend,
    ];
    let scene = engine.scene().expect("scene");
    let before: Vec<_> = frame_kinds
        .iter()
        .map(|&kind| scene.layer(kind).expect("frame layer").clone())
        .collect();
    let full_domain = engine.snapshot().expect("snapshot").value_domain;

    // Jan's midpoint is ~81.8 and Feb's ~218.2.
    let outcome = engine.on_brush(150.0, 300.0).expect("brush");
    assert_eq!(
        outcome,
        BrushOutcome::Applied {
            visible: vec!["Feb".to_owned()]
        }
    );
    assert_eq!(engine.pending_redraw(), RedrawScope::DataShapes);

    let scene = engine.scene().expect("scene");
    let after: Vec<_> = frame_kinds
        .iter()
        .map(|&kind| scene.layer(kind).expect("frame layer").clone())
        .collect();
    assert_eq!(before, after);

    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(snapshot.value_domain, full_domain);
    let bars: Vec<_> = snapshot
        .shapes
        .iter()
        .map(|shape| {
            let datum = &shape.datum;
            (datum.category.as_str(), datum.series_key.as_str(), datum.value)
        })
        .collect();
    assert_eq!(bars, [("Feb", "A", -2.0), ("Feb", "B", 4.0)]);
}

#[test]
fn repeated_brush_is_idempotent() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 200.0).expect("brush");
    let once = engine.snapshot().expect("snapshot");
    engine.on_brush(100.0, 200.0).expect("brush");
    let twice = engine.snapshot().expect("snapshot");
    assert_eq!(once, twice);
}

#[test]
fn out_of_range_interval_is_clamped() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(-50.0, 900.0).expect("brush");
    assert_eq!(engine.brush_selection(), Some(BrushSelection::new(0.0, 300.0)));
    assert_eq!(visible(&engine).len(), 4);
}

#[test]
fn full_rescale_derives_value_domain_from_visible_subset() {
    let mut engine = brushable_engine(brushable_config().with_brush_full_rescale(true));
    let full = engine.snapshot().expect("snapshot").value_domain.expect("domain");

    engine.on_brush(100.0, 130.0).expect("brush");
    assert_eq!(engine.pending_redraw(), RedrawScope::Full);
    let narrowed = engine.snapshot().expect("snapshot").value_domain.expect("domain");
    assert!(narrowed.1 < full.1);
    assert_abs_diff_eq!(narrowed.1, 10.0);
}

#[test]
fn drag_inside_selection_moves_it() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 200.0).expect("brush");

    engine.brush_drag_start(150.0).expect("drag start");
    assert!(matches!(engine.brush_gesture(), BrushGesture::Moving { .. }));
    let outcome = engine.brush_drag_move(200.0).expect("drag move");
    assert!(matches!(outcome, BrushOutcome::Applied { .. }));
    assert_eq!(engine.brush_selection(), Some(BrushSelection::new(150.0, 250.0)));
    assert_eq!(visible(&engine), ["Mar"]);

    engine.brush_drag_end(200.0).expect("drag end");
    assert_eq!(engine.brush_gesture(), BrushGesture::Idle);
}

#[test]
fn drag_on_handle_resizes_one_edge() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 200.0).expect("brush");

    engine.brush_drag_start(203.0).expect("drag start");
    assert!(matches!(engine.brush_gesture(), BrushGesture::ResizingEnd { .. }));
    engine.brush_drag_end(280.0).expect("drag end");
    assert_eq!(engine.brush_selection(), Some(BrushSelection::new(100.0, 280.0)));
    assert_eq!(visible(&engine), ["Feb", "Mar", "Apr"]);
}

#[test]
fn click_outside_selection_is_ignored() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 200.0).expect("brush");

    engine.brush_drag_start(20.0).expect("drag start");
    assert!(matches!(engine.brush_gesture(), BrushGesture::Creating { .. }));
    let outcome = engine.brush_drag_end(20.0).expect("drag end");
    assert_eq!(outcome, BrushOutcome::Ignored);
    assert_eq!(engine.brush_selection(), Some(BrushSelection::new(100.0, 200.0)));
}

#[test]
fn sweeping_outside_creates_new_selection() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 200.0).expect("brush");

    engine.brush_drag_start(20.0).expect("drag start");
    engine.brush_drag_move(60.0).expect("drag move");
    assert_eq!(visible(&engine), ["Jan"]);
    engine.brush_drag_end(60.0).expect("drag end");
    assert_eq!(engine.brush_selection(), Some(BrushSelection::new(20.0, 60.0)));
}

#[test]
fn new_dataset_resets_brush_to_full_extent() {
    let mut engine = brushable_engine(brushable_config());
    engine.on_brush(100.0, 130.0).expect("brush");
    engine.set_dataset(quarterly());
    assert_eq!(engine.brush_selection(), Some(BrushSelection::full(300.0)));
    assert_eq!(visible(&engine).len(), 4);
}

#[test]
fn non_finite_interval_is_rejected() {
    let mut engine = brushable_engine(brushable_config());
    assert!(engine.on_brush(f64::NAN, 10.0).is_err());
    assert!(engine.brush_drag_start(f64::INFINITY).is_err());
}

#[test]
fn overlay_is_absent_without_brushing() {
    let mut engine = brushable_engine(brushable_config().with_brush(false));
    let scene = engine.scene().expect("scene");
    assert!(scene.layer(SceneLayerKind::BrushOverlay).is_none());
    assert_eq!(scene.viewport, Viewport::new(300, 300));
}
