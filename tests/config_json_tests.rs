use category_chart::ChartError;
use category_chart::api::{ChartConfig, ChartEngine, ChartVariant, LegendPosition};
use category_chart::core::{BarStyle, Dataset, Margins, SeriesKeySet, Viewport};
use category_chart::render::{Color, NullRenderer};

#[test]
fn config_json_round_trip_preserves_fields() {
    let config = ChartConfig::new(Viewport::new(640, 360))
        .with_title("Sales")
        .with_axis_labels("Month", "Units")
        .with_bar_style(BarStyle::Curved)
        .with_legend_position(LegendPosition::Bottom)
        .with_series_label("A", "Product A")
        .with_brush(true)
        .with_brush_color(Color::rgb(0.2, 0.4, 0.6));

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"bar_style\": \"curved\""));
    let parsed = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let parsed = ChartConfig::from_json_str(r#"{ "viewport": { "width": 800, "height": 500 } }"#)
        .expect("parse");
    assert_eq!(parsed, ChartConfig::new(Viewport::new(800, 500)));
    assert_eq!(parsed.title, "Bar Chart");
    assert_eq!(parsed.y_ticks, 5);
    assert!(parsed.show_grid);
    assert_eq!(parsed.variant, ChartVariant::Bar);
    assert_eq!(parsed.margins, Margins::new(50.0, 30.0, 60.0, 70.0));
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = ChartConfig::from_json_str("{ nope").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn engine_rejects_collapsed_plot_area() {
    let config = ChartConfig::new(Viewport::new(100, 100))
        .with_margins(Margins::new(60.0, 0.0, 60.0, 0.0));
    let err = ChartEngine::new(NullRenderer::default(), config)
        .err()
        .expect("plot area collapses");
    assert!(matches!(err, ChartError::InvalidPlotArea { .. }));
}

#[test]
fn engine_rejects_invalid_padding_and_ticks() {
    let bad_padding = ChartConfig::new(Viewport::new(400, 300)).with_category_padding(1.0);
    assert!(ChartEngine::new(NullRenderer::default(), bad_padding).is_err());

    let bad_ticks = ChartConfig::new(Viewport::new(400, 300)).with_y_ticks(0);
    assert!(ChartEngine::new(NullRenderer::default(), bad_ticks).is_err());
}

#[test]
fn invalid_config_update_keeps_previous_config() {
    let config = ChartConfig::new(Viewport::new(400, 300));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let err = engine
        .set_dimensions(0, 300)
        .expect_err("zero width is rejected");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert_eq!(engine.config().viewport, Viewport::new(400, 300));

    let bad = ChartConfig::new(Viewport::new(400, 300)).with_series_padding(-0.1);
    assert!(engine.set_config(bad).is_err());
    assert_eq!(engine.config().effective_series_padding(), 0.05);
}

#[test]
fn dataset_rows_detect_category_field() {
    let keys = SeriesKeySet::new(["A", "B"]);
    let json = r#"[
        { "month": "Jan", "A": 10, "B": -5 },
        { "month": "Feb", "A": 20, "B": "n/a" }
    ]"#;
    let dataset = Dataset::from_json_rows(json, &keys, None).expect("parse rows");
    assert_eq!(dataset.categories(), ["Jan", "Feb"]);
    assert_eq!(dataset.records()[0].value("B"), Some(-5.0));
    // Non-numeric values are dropped and read as missing.
    assert_eq!(dataset.records()[1].value("B"), None);
}

#[test]
fn dataset_rows_honor_explicit_category_field() {
    let keys = SeriesKeySet::new(["A"]);
    let json = r#"[{ "id": 1, "label": "North", "A": 3 }]"#;
    let dataset = Dataset::from_json_rows(json, &keys, Some("label")).expect("parse rows");
    assert_eq!(dataset.categories(), ["North"]);

    let err = Dataset::from_json_rows(json, &keys, Some("region")).expect_err("missing field");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn engine_loads_dataset_from_json() {
    let config = ChartConfig::new(Viewport::new(400, 300));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series_keys(SeriesKeySet::new(["A"]));
    engine
        .set_dataset_json(r#"[{ "q": "Q1", "A": 4 }, { "q": "Q2", "A": 6 }]"#, None)
        .expect("load rows");
    assert_eq!(engine.visible_categories(), ["Q1", "Q2"]);
    assert!(engine.set_dataset_json("{}", None).is_err());
}

#[test]
fn snapshot_serializes_to_json() {
    let config = ChartConfig::new(Viewport::new(400, 300));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series_keys(SeriesKeySet::new(["A"]));
    engine
        .set_dataset_json(r#"[{ "q": "Q1", "A": 4 }]"#, None)
        .expect("load rows");
    let json = engine.snapshot_json_pretty().expect("snapshot json");
    assert!(json.contains("\"visible_categories\""));
    assert!(json.contains("Q1"));
}

#[test]
fn empty_dataset_rows_render_a_blank_chart() {
    let keys = SeriesKeySet::new(["A", "B"]);
    let dataset = Dataset::from_json_rows("[]", &keys, None).expect("empty rows");
    assert!(dataset.is_empty());

    let config = ChartConfig::new(Viewport::new(400, 300));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series_keys(keys);
    engine.set_dataset_json("[]", None).expect("empty rows load");
    assert!(engine.visible_categories().is_empty());
    assert!(engine.scene().expect("scene").shapes.is_empty());
    engine.render().expect("blank render");
}
