use tracks_rs::TrackError;
use tracks_rs::api::{TrackView, TrackViewConfig};
use tracks_rs::core::{AxisAlignment, IndexDomain, Viewport};
use tracks_rs::interaction::{AutoScrollConfig, InertiaConfig};
use tracks_rs::render::NullPresenter;

#[test]
fn minimal_json_fills_defaults() {
    let config =
        TrackViewConfig::from_json_str(r#"{ "viewport": { "width": 800, "height": 600 } }"#)
            .expect("parse config");

    assert_eq!(config, TrackViewConfig::new(Viewport::new(800, 600)));
    assert_eq!(config.cell_width, 50.0);
    assert_eq!(config.line_height, 24.0);
    assert_eq!(config.alignment, AxisAlignment::Start);
    assert_eq!(config.inertia.stop_distance, 0.25);
    assert_eq!(config.visible_cells(), 16);
}

#[test]
fn config_json_round_trip_keeps_custom_values() {
    let config = TrackViewConfig::new(Viewport::new(1_000, 400))
        .with_cell_width(30.0)
        .with_alignment(AxisAlignment::Center)
        .with_track_names(false)
        .with_auto_scroll(AutoScrollConfig {
            border_distance: 40.0,
            speed: 900.0,
        });

    let json = config.to_json_pretty().expect("serialize");
    let parsed = TrackViewConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
    assert_eq!(parsed.visible_cells(), 34);
}

#[test]
fn invalid_geometry_is_rejected() {
    let zero_viewport = TrackViewConfig::new(Viewport::new(0, 300));
    assert!(matches!(
        zero_viewport.validate(),
        Err(TrackError::InvalidViewport { width: 0, height: 300 })
    ));

    let zero_cell = TrackViewConfig::new(Viewport::new(400, 300)).with_cell_width(0.0);
    assert!(matches!(zero_cell.validate(), Err(TrackError::InvalidStep(_))));

    let flat_lines = TrackViewConfig::new(Viewport::new(400, 300)).with_line_height(-1.0);
    assert!(matches!(flat_lines.validate(), Err(TrackError::InvalidData(_))));

    let frozen = TrackViewConfig::new(Viewport::new(400, 300)).with_inertia(InertiaConfig {
        time_to_stop: 0.0,
        ..InertiaConfig::default()
    });
    assert!(frozen.validate().is_err());
}

#[test]
fn view_construction_validates_config() {
    let domain = IndexDomain::new(1).expect("valid step");
    let config = TrackViewConfig::new(Viewport::new(400, 300)).with_cell_width(f64::NAN);
    assert!(TrackView::new(NullPresenter::default(), domain, 0, config).is_err());
}

#[test]
fn hidden_track_name_pane_is_not_synchronized() {
    let domain = IndexDomain::new(1).expect("valid step");
    let config = TrackViewConfig::new(Viewport::new(400, 300)).with_track_names(false);
    let view = TrackView::new(NullPresenter::default(), domain, 0, config).expect("view init");

    assert!(view.synchronizer().track_names().is_none());
    assert!(view.synchronizer().data_grid().is_some());
}

#[test]
fn narrow_viewport_still_shows_one_cell() {
    let config = TrackViewConfig::new(Viewport::new(10, 300)).with_cell_width(500.0);
    assert_eq!(config.visible_cells(), 1);
}
