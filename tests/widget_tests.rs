//! End-to-end tests of the widget controller against the recording
//! headless engine.

use regionmap::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn polygon_feature(name: &str, area: f64, origin: (f64, f64)) -> String {
    let (lng, lat) = origin;
    format!(
        r#"{{
            "type": "Feature",
            "properties": {{"area": {area}, "name": "{name}"}},
            "geometry": {{
                "type": "Polygon",
                "coordinates": [[
                    [{lng}, {lat}],
                    [{lng1}, {lat}],
                    [{lng1}, {lat1}],
                    [{lng}, {lat1}],
                    [{lng}, {lat}]
                ]]
            }}
        }}"#,
        area = area,
        name = name,
        lng = lng,
        lat = lat,
        lng1 = lng + 1.0,
        lat1 = lat + 1.0,
    )
}

fn collection(features: &[String]) -> GeoJson {
    let doc = format!(
        r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
        features.join(",")
    );
    GeoJson::from_str(&doc).unwrap()
}

fn mount_default() -> MapWidget {
    init_logging();
    MapWidget::mount(Box::new(HeadlessEngine::new()), WidgetConfig::default()).unwrap()
}

fn headless(widget: &MapWidget) -> &HeadlessEngine {
    widget
        .engine()
        .as_any()
        .downcast_ref::<HeadlessEngine>()
        .unwrap()
}

#[test]
fn repeated_set_location_keeps_exactly_one_marker() {
    let mut widget = mount_default();

    widget.set_location(10.0, 20.0, None).unwrap();
    widget.set_location(-5.0, 30.0, Some(12)).unwrap();
    widget.set_location(48.8566, 2.3522, Some(11)).unwrap();

    assert_eq!(
        widget.marker().map(|m| m.position()),
        Some(LatLng::new(48.8566, 2.3522))
    );
    assert_eq!(
        headless(&widget).marker_positions(),
        vec![LatLng::new(48.8566, 2.3522)]
    );
}

#[test]
fn sequence_ending_in_set_view_has_no_marker() {
    let mut widget = mount_default();

    widget.set_location(10.0, 20.0, None).unwrap();
    widget.set_view(0.0, 0.0, None).unwrap();

    assert!(widget.marker().is_none());
    assert!(headless(&widget).marker_positions().is_empty());
}

#[test]
fn location_then_overview_scenario() {
    let mut widget = mount_default();

    widget.set_location(10.0, 20.0, Some(9)).unwrap();
    assert_eq!(widget.viewport(), Viewport::new(LatLng::new(10.0, 20.0), 9));
    assert_eq!(
        headless(&widget).camera(),
        Some((LatLng::new(10.0, 20.0), 9))
    );
    assert_eq!(
        widget.marker().map(|m| m.position()),
        Some(LatLng::new(10.0, 20.0))
    );

    widget.set_view(0.0, 0.0, Some(3)).unwrap();
    assert!(widget.marker().is_none());
    assert_eq!(widget.viewport(), Viewport::new(LatLng::new(0.0, 0.0), 3));
    assert_eq!(headless(&widget).camera(), Some((LatLng::new(0.0, 0.0), 3)));
}

#[test]
fn add_overlay_with_refit_bounds_both_features() {
    let mut widget = mount_default();

    let style = OverlayStyle::uniform(Color::from_hex("#2b8cbe").unwrap(), 0.8, 0.3);
    let features = collection(&[
        polygon_feature("Region A", 12.345, (0.0, 0.0)),
        polygon_feature("Region B", 99.9, (5.0, 5.0)),
    ]);
    widget
        .add_overlay(
            features,
            OverlayOptions::default().with_style(style.clone()).with_refit(true),
        )
        .unwrap();

    let overlay = widget.overlay().unwrap();
    assert_eq!(overlay.feature_count(), 2);
    assert_eq!(overlay.style(), &style);

    let engine = headless(&widget);
    assert_eq!(
        engine.fitted_bounds(),
        Some(&LatLngBounds::from_coords(0.0, 0.0, 6.0, 6.0))
    );
    assert_eq!(engine.camera().map(|(c, _)| c), Some(LatLng::new(3.0, 3.0)));
}

#[test]
fn replacement_displays_only_the_latest_features() {
    let mut widget = mount_default();

    widget
        .add_overlay(
            collection(&[polygon_feature("Region A", 1.0, (0.0, 0.0))]),
            OverlayOptions::default(),
        )
        .unwrap();
    widget
        .add_overlay(
            collection(&[polygon_feature("Region B", 2.0, (5.0, 5.0))]),
            OverlayOptions::default(),
        )
        .unwrap();

    let engine = headless(&widget);
    let overlays = engine.overlays();
    assert_eq!(overlays.len(), 1);
    assert_eq!(
        overlays[0].features()[0].property("name"),
        Some(&serde_json::Value::String("Region B".to_string()))
    );
    assert_eq!(widget.overlay().map(|o| o.id()), Some(overlays[0].id()));
}

#[test]
fn replacement_without_remove_previous_still_ends_single() {
    let mut widget = mount_default();

    widget
        .add_overlay(
            collection(&[polygon_feature("Region A", 1.0, (0.0, 0.0))]),
            OverlayOptions::default(),
        )
        .unwrap();
    widget
        .add_overlay(
            collection(&[polygon_feature("Region B", 2.0, (5.0, 5.0))]),
            OverlayOptions::default().with_remove_previous(false),
        )
        .unwrap();

    let engine = headless(&widget);
    assert_eq!(engine.overlays().len(), 1);
    assert_eq!(
        engine.overlays()[0].features()[0].property("name"),
        Some(&serde_json::Value::String("Region B".to_string()))
    );
}

#[test]
fn overlay_without_style_uses_the_configured_default() {
    init_logging();
    let style = OverlayStyle::uniform(Color::rgb(43, 140, 190), 0.8, 0.3);
    let config = WidgetConfig::default().with_default_style(style.clone());
    let mut widget = MapWidget::mount(Box::new(HeadlessEngine::new()), config).unwrap();

    widget
        .add_overlay(
            collection(&[polygon_feature("Region A", 1.0, (0.0, 0.0))]),
            OverlayOptions::default(),
        )
        .unwrap();

    assert_eq!(widget.overlay().unwrap().style(), &style);
}

#[test]
fn empty_collection_yields_zero_extent_overlay() {
    let mut widget = mount_default();
    widget.set_view(10.0, 10.0, Some(4)).unwrap();

    widget
        .add_overlay(
            GeoJson::from_str(r#"{"type": "FeatureCollection", "features": []}"#).unwrap(),
            OverlayOptions::default().with_refit(true),
        )
        .unwrap();

    let overlay = widget.overlay().unwrap();
    assert!(overlay.is_empty());
    assert!(overlay.bounds().is_none());

    // Refit against no extent is a no-op: camera and fitted bounds untouched
    let engine = headless(&widget);
    assert_eq!(engine.camera(), Some((LatLng::new(10.0, 10.0), 4)));
    assert!(engine.fitted_bounds().is_none());
}

#[test]
fn hover_tooltips_carry_the_summary_value() {
    init_logging();
    let config = WidgetConfig::default().with_presentation(PresentationPolicy::HoverTooltip {
        summary_key: "name".to_string(),
    });
    let mut widget = MapWidget::mount(Box::new(HeadlessEngine::new()), config).unwrap();

    widget
        .add_overlay(
            collection(&[
                polygon_feature("Region A", 12.345, (0.0, 0.0)),
                polygon_feature("Region B", 99.9, (5.0, 5.0)),
            ]),
            OverlayOptions::default(),
        )
        .unwrap();

    let overlay_id = widget.overlay().unwrap().id().to_string();
    let affordances = headless(&widget).overlay_affordances(&overlay_id).unwrap();
    assert_eq!(affordances.len(), 2);
    match &affordances[0] {
        Some(Affordance::Tooltip(tooltip)) => assert_eq!(tooltip.text, "Region A"),
        other => panic!("unexpected affordance: {:?}", other),
    }
}

#[test]
fn popup_tables_format_numbers_to_one_decimal() {
    init_logging();
    let config = WidgetConfig::default().with_presentation(PresentationPolicy::ClickPopup);
    let mut widget = MapWidget::mount(Box::new(HeadlessEngine::new()), config).unwrap();

    widget
        .add_overlay(
            collection(&[polygon_feature("Region A", 12.345, (0.0, 0.0))]),
            OverlayOptions::default(),
        )
        .unwrap();

    let overlay_id = widget.overlay().unwrap().id().to_string();
    let affordances = headless(&widget).overlay_affordances(&overlay_id).unwrap();
    match &affordances[0] {
        Some(Affordance::Popup(table)) => {
            assert_eq!(
                table.rows,
                vec![
                    ("area".to_string(), "12.3".to_string()),
                    ("name".to_string(), "Region A".to_string()),
                ]
            );
        }
        other => panic!("unexpected affordance: {:?}", other),
    }
}

/// Engine wrapper that fails attaching the nth overlay
struct FlakyEngine {
    inner: HeadlessEngine,
    fail_on_attempt: usize,
    attempts: usize,
}

impl FlakyEngine {
    fn new(fail_on_attempt: usize) -> Self {
        Self {
            inner: HeadlessEngine::new(),
            fail_on_attempt,
            attempts: 0,
        }
    }
}

impl RenderEngine for FlakyEngine {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> regionmap::Result<()> {
        self.inner.set_view(center, zoom)
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) -> regionmap::Result<()> {
        self.inner.fit_bounds(bounds)
    }

    fn add_tile_layer(&mut self, source: &TileSource, active: bool) -> regionmap::Result<()> {
        self.inner.add_tile_layer(source, active)
    }

    fn add_marker(&mut self, marker: &Marker) -> regionmap::Result<()> {
        self.inner.add_marker(marker)
    }

    fn add_overlay(
        &mut self,
        overlay: &Overlay,
        affordances: &[Option<Affordance>],
    ) -> regionmap::Result<()> {
        self.attempts += 1;
        if self.attempts == self.fail_on_attempt {
            return Err(WidgetError::Engine("tile host rejected layer".to_string()));
        }
        self.inner.add_overlay(overlay, affordances)
    }

    fn remove_layer(&mut self, layer_id: &str) -> regionmap::Result<()> {
        self.inner.remove_layer(layer_id)
    }

    fn add_layer_control(&mut self, labels: &[String]) -> regionmap::Result<()> {
        self.inner.add_layer_control(labels)
    }

    fn add_scale_control(&mut self) -> regionmap::Result<()> {
        self.inner.add_scale_control()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

fn flaky(widget: &MapWidget) -> &FlakyEngine {
    widget.engine().as_any().downcast_ref::<FlakyEngine>().unwrap()
}

#[test]
fn failed_attach_with_eager_removal_leaves_no_overlay() {
    init_logging();
    let mut widget =
        MapWidget::mount(Box::new(FlakyEngine::new(2)), WidgetConfig::default()).unwrap();

    widget
        .add_overlay(
            collection(&[polygon_feature("Region A", 1.0, (0.0, 0.0))]),
            OverlayOptions::default(),
        )
        .unwrap();

    let err = widget
        .add_overlay(
            collection(&[polygon_feature("Region B", 2.0, (5.0, 5.0))]),
            OverlayOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, WidgetError::Engine(_)));

    // Degraded but consistent: the previous overlay was already torn down
    assert!(widget.overlay().is_none());
    assert!(flaky(&widget).inner.overlays().is_empty());
}

#[test]
fn failed_attach_with_deferred_removal_keeps_the_previous_overlay() {
    init_logging();
    let mut widget =
        MapWidget::mount(Box::new(FlakyEngine::new(2)), WidgetConfig::default()).unwrap();

    widget
        .add_overlay(
            collection(&[polygon_feature("Region A", 1.0, (0.0, 0.0))]),
            OverlayOptions::default(),
        )
        .unwrap();

    let err = widget
        .add_overlay(
            collection(&[polygon_feature("Region B", 2.0, (5.0, 5.0))]),
            OverlayOptions::default().with_remove_previous(false),
        )
        .unwrap_err();
    assert!(matches!(err, WidgetError::Engine(_)));

    let engine = flaky(&widget);
    assert_eq!(engine.inner.overlays().len(), 1);
    assert_eq!(
        engine.inner.overlays()[0].features()[0].property("name"),
        Some(&serde_json::Value::String("Region A".to_string()))
    );
    assert_eq!(
        widget.overlay().map(|o| o.id()),
        Some(engine.inner.overlays()[0].id())
    );
}
