use approx::assert_relative_eq;
use chart_zoom::api::{AxisLayout, ZoomChart, ZoomChartConfig};
use chart_zoom::core::{Axis, BrushExtent, Margins, Viewport, ZoomTransform};
use chart_zoom::host::StaticHost;
use chart_zoom::interaction::{BrushEvent, BrushEventSource, BrushPhase};
use chart_zoom::render::NullRenderer;

fn config(layout: AxisLayout) -> ZoomChartConfig {
    ZoomChartConfig::new(Viewport::new(400, 200))
        .with_margins(Margins::new(0.0, 0.0, 0.0, 0.0))
        .with_layout(layout)
        .without_transitions()
}

fn build_chart(config: ZoomChartConfig) -> ZoomChart<StaticHost, NullRenderer> {
    let host = StaticHost::new((0.0, 100.0))
        .expect("host")
        .with_y_domain((0.0, 50.0))
        .expect("host y");
    let mut chart = ZoomChart::new("brushed", host, NullRenderer::default(), config).expect("chart");
    chart.render(false, false).expect("first render");
    chart
}

#[test]
fn first_layout_initializes_full_brushes() {
    let chart = build_chart(config(AxisLayout::XY));
    assert_eq!(chart.brush_extent(Axis::X), Some(BrushExtent::full(400.0)));
    assert_eq!(chart.brush_extent(Axis::Y), Some(BrushExtent::full(200.0)));
    assert!(chart.zoom_transform().is_identity());
}

#[test]
fn x_brush_drives_the_transform() {
    let mut chart = build_chart(config(AxisLayout::X));
    let handled = chart
        .brush_overview(BrushEvent::user(
            Axis::X,
            BrushExtent::new(100.0, 200.0),
            BrushPhase::Brush,
        ))
        .expect("brush");
    assert!(handled);
    assert_eq!(chart.zoom_transform(), ZoomTransform::new(4.0, -400.0, 0.0));
    assert_relative_eq!(chart.zoom_y_multiplier(), 1.0);
    assert_eq!(
        chart.brush_extent(Axis::X),
        Some(BrushExtent::new(100.0, 200.0))
    );
}

#[test]
fn brush_echo_of_a_mirror_move_is_ignored() {
    let mut chart = build_chart(config(AxisLayout::X));
    let event = BrushEvent {
        axis: Axis::X,
        extent: Some(BrushExtent::new(0.0, 10.0)),
        phase: BrushPhase::Brush,
        source: BrushEventSource::Programmatic,
    };
    assert!(!chart.brush_overview(event).expect("brush echo"));
    assert!(chart.zoom_transform().is_identity());
}

#[test]
fn brush_events_are_ignored_when_brushing_is_disabled() {
    let mut chart = build_chart(config(AxisLayout::X).with_brush_enabled(false));
    let event = BrushEvent::user(Axis::X, BrushExtent::new(0.0, 100.0), BrushPhase::Brush);
    assert!(!chart.brush_overview(event).expect("brush"));
    assert!(chart.zoom_transform().is_identity());
}

#[test]
fn y_brush_on_one_dimensional_layout_is_rejected() {
    let mut chart = build_chart(config(AxisLayout::X));
    let event = BrushEvent::user(Axis::Y, BrushExtent::new(0.0, 100.0), BrushPhase::Brush);
    assert!(chart.brush_overview(event).is_err());
}

#[test]
fn cleared_brush_selection_restores_the_full_axis() {
    let mut chart = build_chart(config(AxisLayout::X));
    chart
        .brush_overview(BrushEvent::user(
            Axis::X,
            BrushExtent::new(100.0, 200.0),
            BrushPhase::End,
        ))
        .expect("brush");
    let cleared = BrushEvent {
        axis: Axis::X,
        extent: None,
        phase: BrushPhase::End,
        source: BrushEventSource::User,
    };
    chart.brush_overview(cleared).expect("clear");
    assert!(chart.zoom_transform().is_identity());
    assert_eq!(chart.brush_extent(Axis::X), Some(BrushExtent::full(400.0)));
}

#[test]
fn brush_beyond_zoom_level_max_is_widened_around_its_center() {
    let mut chart = build_chart(config(AxisLayout::X).with_zoom_level_bounds(1.0, Some(4.0)));
    chart
        .brush_overview(BrushEvent::user(
            Axis::X,
            BrushExtent::new(190.0, 210.0),
            BrushPhase::Brush,
        ))
        .expect("brush");
    let extent = chart.brush_extent(Axis::X).expect("extent");
    assert_relative_eq!(extent.low, 150.0, epsilon = 1e-9);
    assert_relative_eq!(extent.high, 250.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_transform().k, 4.0, epsilon = 1e-9);
}

#[test]
fn fixed_y_axis_brush_is_authoritative() {
    let mut chart = build_chart(config(AxisLayout::XY).with_zoom_enabled(true, false));
    chart
        .brush_overview(BrushEvent::user(
            Axis::Y,
            BrushExtent::new(50.0, 150.0),
            BrushPhase::End,
        ))
        .expect("y brush");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 1.0, epsilon = 1e-9);
    assert_relative_eq!(transform.y, -100.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_y_multiplier(), 2.0, epsilon = 1e-9);

    // X changes leave the fixed Y window alone.
    chart
        .brush_overview(BrushEvent::user(
            Axis::X,
            BrushExtent::new(0.0, 200.0),
            BrushPhase::End,
        ))
        .expect("x brush");
    assert_eq!(
        chart.brush_extent(Axis::Y),
        Some(BrushExtent::new(50.0, 150.0))
    );
    assert_relative_eq!(chart.zoom_transform().k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_y_multiplier(), 1.0, epsilon = 1e-9);
}

#[test]
fn x_brush_keeps_the_y_window_in_two_dimensional_layouts() {
    let mut chart = build_chart(config(AxisLayout::XY));
    chart
        .brush_overview(BrushEvent::user(
            Axis::Y,
            BrushExtent::new(0.0, 100.0),
            BrushPhase::End,
        ))
        .expect("y brush");
    chart
        .brush_overview(BrushEvent::user(
            Axis::X,
            BrushExtent::new(100.0, 300.0),
            BrushPhase::End,
        ))
        .expect("x brush");
    assert_eq!(
        chart.brush_extent(Axis::Y),
        Some(BrushExtent::new(0.0, 100.0))
    );
    assert_relative_eq!(chart.zoom_transform().k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_y_multiplier(), 1.0, epsilon = 1e-9);
}

#[test]
fn programmatic_transform_is_constrained_to_data_bounds() {
    let mut chart = build_chart(config(AxisLayout::X));
    chart
        .set_zoom_transform(ZoomTransform::new(2.0, 150.0, 0.0), None, false)
        .expect("set transform");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(transform.x, 0.0, epsilon = 1e-9);
    assert_eq!(
        chart.brush_extent(Axis::X),
        Some(BrushExtent::new(0.0, 200.0))
    );

    chart
        .set_zoom_transform(ZoomTransform::new(0.5, 0.0, 0.0), None, false)
        .expect("zoom out");
    assert!(chart.zoom_transform().is_identity());
}

#[test]
fn invalid_transform_is_rejected() {
    let mut chart = build_chart(config(AxisLayout::X));
    assert!(
        chart
            .set_zoom_transform(ZoomTransform::new(f64::NAN, 0.0, 0.0), None, false)
            .is_err()
    );
    assert!(
        chart
            .set_zoom_transform(ZoomTransform::IDENTITY, Some(0.0), false)
            .is_err()
    );
}

#[test]
fn transform_set_before_layout_is_constrained_on_first_render() {
    let host = StaticHost::new((0.0, 100.0)).expect("host");
    let mut chart = ZoomChart::new(
        "early",
        host,
        NullRenderer::default(),
        config(AxisLayout::X),
    )
    .expect("chart");
    chart
        .set_zoom_transform(ZoomTransform::new(2.0, -1_000.0, 0.0), None, false)
        .expect("early transform");
    assert_eq!(chart.brush_window(), None);

    chart.render(false, false).expect("render");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(transform.x, -400.0, epsilon = 1e-9);
    assert_eq!(
        chart.brush_extent(Axis::X),
        Some(BrushExtent::new(200.0, 400.0))
    );
}

#[test]
fn fixed_axis_without_brushes_keeps_the_committed_transform() {
    let mut chart = build_chart(
        config(AxisLayout::XY)
            .with_zoom_enabled(true, false)
            .with_brush_enabled(false),
    );
    chart
        .set_zoom_transform(ZoomTransform::new(2.0, -100.0, -80.0), Some(1.0), false)
        .expect("set transform");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(transform.x, -100.0, epsilon = 1e-9);
    assert_relative_eq!(transform.y, -80.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_y_multiplier(), 1.0, epsilon = 1e-9);

    // X is still held inside the data; Y is not touched by the clamp.
    chart
        .set_zoom_transform(ZoomTransform::new(2.0, 100.0, -80.0), Some(1.0), false)
        .expect("set transform");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(transform.y, -80.0, epsilon = 1e-9);
    assert_eq!(chart.brush_extent(Axis::Y), Some(BrushExtent::full(200.0)));
}

#[test]
fn fixed_axis_with_brushes_follows_its_brush() {
    let mut chart = build_chart(config(AxisLayout::XY).with_zoom_enabled(true, false));
    chart
        .set_zoom_transform(ZoomTransform::new(2.0, -100.0, -80.0), Some(1.0), false)
        .expect("set transform");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_y_multiplier(), 0.5, epsilon = 1e-9);
}
