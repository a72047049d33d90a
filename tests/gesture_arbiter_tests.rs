use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use chart_zoom::api::{AxisLayout, ZoomChart, ZoomChartConfig, ZoomInputBehavior};
use chart_zoom::core::{Axis, BrushExtent, Margins, PixelRect, ViewChange, ViewRequest, Viewport};
use chart_zoom::extensions::{ZoomEvent, ZoomListener};
use chart_zoom::host::StaticHost;
use chart_zoom::interaction::{GestureState, ZoomSource};
use chart_zoom::render::NullRenderer;

const GLIDE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, PartialEq)]
enum Logged {
    Start(ZoomSource),
    Zoom(ZoomSource),
    End(ZoomSource),
    View(bool),
}

struct Recorder {
    log: Rc<RefCell<Vec<Logged>>>,
}

impl ZoomListener for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn on_zoom_start(&mut self, event: &ZoomEvent) {
        self.log.borrow_mut().push(Logged::Start(event.source));
    }

    fn on_zoom(&mut self, event: &ZoomEvent) {
        self.log.borrow_mut().push(Logged::Zoom(event.source));
    }

    fn on_zoom_end(&mut self, event: &ZoomEvent) {
        self.log.borrow_mut().push(Logged::End(event.source));
    }

    fn on_view_change(&mut self, change: &ViewChange) {
        self.log.borrow_mut().push(Logged::View(change.caused_by_user));
    }
}

fn config(layout: AxisLayout) -> ZoomChartConfig {
    ZoomChartConfig::new(Viewport::new(400, 200))
        .with_margins(Margins::new(0.0, 0.0, 0.0, 0.0))
        .with_layout(layout)
}

fn build_chart(
    config: ZoomChartConfig,
) -> (ZoomChart<StaticHost, NullRenderer>, Rc<RefCell<Vec<Logged>>>) {
    let host = StaticHost::new((0.0, 100.0))
        .expect("host")
        .with_y_domain((0.0, 50.0))
        .expect("host y");
    let mut chart = ZoomChart::new("gestures", host, NullRenderer::default(), config).expect("chart");
    chart.render(false, false).expect("first render");

    let log = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_listener(Box::new(Recorder { log: Rc::clone(&log) }))
        .expect("register recorder");
    (chart, log)
}

fn starts_and_ends(log: &[Logged]) -> (usize, usize) {
    let starts = log.iter().filter(|entry| matches!(entry, Logged::Start(_))).count();
    let ends = log.iter().filter(|entry| matches!(entry, Logged::End(_))).count();
    (starts, ends)
}

#[test]
fn wheel_glides_toward_the_anchored_target() {
    let (mut chart, log) = build_chart(config(AxisLayout::X));
    assert!(chart.wheel(-120.0, 200.0, 100.0).expect("wheel"));
    assert_eq!(chart.gesture_state(), GestureState::Animating);
    assert!(chart.zoom_transform().is_identity());

    chart.tick(GLIDE).expect("tick");
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 1.2, epsilon = 1e-9);
    assert_relative_eq!(transform.x, -40.0, epsilon = 1e-9);
    assert_relative_eq!(transform.y, 0.0);
    assert_eq!(chart.gesture_state(), GestureState::Idle);

    let log = log.borrow();
    assert_eq!(log.first(), Some(&Logged::Start(ZoomSource::Wheel)));
    assert_eq!(starts_and_ends(&log), (1, 1));
    assert_eq!(log.last(), Some(&Logged::View(true)));
}

#[test]
fn rapid_wheel_ticks_accumulate_on_the_latest_target() {
    let (mut chart, log) = build_chart(config(AxisLayout::X));
    chart.wheel(-120.0, 200.0, 100.0).expect("first wheel");
    chart.tick(Duration::from_millis(50)).expect("partial tick");
    chart.wheel(-120.0, 200.0, 100.0).expect("second wheel");

    while chart.tick(Duration::from_millis(16)).expect("tick") {}

    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 1.44, epsilon = 1e-9);
    assert_relative_eq!(transform.x, -88.0, epsilon = 1e-9);
    assert!(!chart.is_animating());
    assert_eq!(starts_and_ends(&log.borrow()), (1, 1));
}

#[test]
fn wheel_with_transitions_disabled_commits_immediately() {
    let (mut chart, log) = build_chart(config(AxisLayout::X).without_transitions());
    chart.wheel(-120.0, 200.0, 100.0).expect("wheel");
    assert_relative_eq!(chart.zoom_transform().k, 1.2, epsilon = 1e-9);
    assert_eq!(
        *log.borrow(),
        vec![
            Logged::Start(ZoomSource::Wheel),
            Logged::Zoom(ZoomSource::Wheel),
            Logged::End(ZoomSource::Wheel),
            Logged::View(true),
        ]
    );
}

#[test]
fn wheel_zoom_out_at_identity_stays_within_bounds() {
    let (mut chart, _) = build_chart(config(AxisLayout::X).without_transitions());
    chart.wheel(240.0, 100.0, 100.0).expect("wheel out");
    assert!(chart.zoom_transform().is_identity());
    assert_eq!(chart.brush_extent(Axis::X), Some(BrushExtent::full(400.0)));
}

#[test]
fn wheel_with_y_zoom_disabled_moves_only_the_x_brush() {
    let (mut chart, _) = build_chart(
        config(AxisLayout::XY)
            .with_zoom_enabled(true, false)
            .without_transitions(),
    );
    chart.wheel(-120.0, 200.0, 100.0).expect("wheel");

    assert_eq!(chart.brush_extent(Axis::Y), Some(BrushExtent::full(200.0)));
    let x = chart.brush_extent(Axis::X).expect("x brush");
    assert_relative_eq!(x.width(), 400.0 / 1.2, epsilon = 1e-9);
    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(transform.k * chart.zoom_y_multiplier(), 1.0, epsilon = 1e-9);
}

#[test]
fn drag_pans_and_is_clamped_at_the_data_edge() {
    let (mut chart, log) = build_chart(config(AxisLayout::X).without_transitions());
    chart
        .set_zoom_to_limits(ViewRequest::new(25.0, 75.0), true)
        .expect("zoom in");
    log.borrow_mut().clear();

    assert!(chart.pointer_down(200.0, 100.0).expect("down"));
    assert_eq!(chart.gesture_state(), GestureState::Zooming);
    chart.pointer_move(250.0, 100.0).expect("move");
    assert_relative_eq!(chart.zoom_transform().x, -150.0, epsilon = 1e-9);

    chart.pointer_move(600.0, 100.0).expect("move past edge");
    assert_relative_eq!(chart.zoom_transform().x, 0.0, epsilon = 1e-9);
    assert_eq!(
        chart.brush_extent(Axis::X),
        Some(BrushExtent::new(0.0, 200.0))
    );

    chart.pointer_up(600.0, 100.0).expect("up");
    assert_eq!(chart.gesture_state(), GestureState::Idle);
    let log = log.borrow();
    assert_eq!(log.first(), Some(&Logged::Start(ZoomSource::Drag)));
    assert_eq!(log.last(), Some(&Logged::View(true)));
    assert_eq!(starts_and_ends(&log), (1, 1));
}

#[test]
fn pointer_down_outside_the_plot_is_ignored() {
    let config = config(AxisLayout::X)
        .with_margins(Margins::new(10.0, 10.0, 30.0, 50.0))
        .without_transitions();
    let (mut chart, _) = build_chart(config);
    assert!(!chart.pointer_down(20.0, 100.0).expect("down in margin"));
    assert_eq!(chart.gesture_state(), GestureState::Idle);
}

#[test]
fn drag_interrupts_a_running_transition() {
    let (mut chart, log) = build_chart(config(AxisLayout::X));
    chart
        .set_zoom_to_limits(ViewRequest::new(25.0, 75.0), true)
        .expect("glide");
    assert!(chart.is_animating());

    chart.pointer_down(100.0, 100.0).expect("down");
    assert!(!chart.is_animating());
    assert!(chart.zoom_transform().is_identity());
    assert_eq!(
        *log.borrow(),
        vec![
            Logged::Start(ZoomSource::Programmatic),
            Logged::End(ZoomSource::Programmatic),
            Logged::Start(ZoomSource::Drag),
        ]
    );
    assert!(!chart.tick(GLIDE).expect("tick"));
}

#[test]
fn pinch_zooms_around_its_center_and_blocks_the_wheel() {
    let (mut chart, log) = build_chart(config(AxisLayout::X));
    assert!(chart.pinch_start().expect("pinch start"));
    chart.pinch_update(2.0, 200.0, 100.0).expect("pinch update");

    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(transform.x, -200.0, epsilon = 1e-9);
    assert_relative_eq!(transform.y, 0.0);

    assert!(!chart.wheel(-120.0, 200.0, 100.0).expect("wheel during pinch"));
    assert!(!chart.pointer_down(200.0, 100.0).expect("drag during pinch"));

    chart.pinch_end().expect("pinch end");
    assert_eq!(chart.gesture_state(), GestureState::Idle);
    assert_eq!(starts_and_ends(&log.borrow()), (1, 1));
}

#[test]
fn invalid_pinch_factor_is_rejected() {
    let (mut chart, _) = build_chart(config(AxisLayout::X));
    chart.pinch_start().expect("pinch start");
    assert!(chart.pinch_update(0.0, 200.0, 100.0).is_err());
    assert!(chart.pinch_update(f64::NAN, 200.0, 100.0).is_err());
}

#[test]
fn region_selection_zooms_into_the_selected_span() {
    let (mut chart, log) = build_chart(config(AxisLayout::X));
    chart.set_region_select_modifier(true).expect("modifier");
    assert!(chart.pointer_down(100.0, 50.0).expect("down"));
    chart.pointer_move(300.0, 150.0).expect("move");

    assert_eq!(chart.gesture_state(), GestureState::Brushing);
    assert_eq!(
        chart.region_selection(),
        Some(PixelRect::new(100.0, 0.0, 200.0, 200.0))
    );
    let frame = chart.renderer().last_frame.clone().expect("frame");
    assert_eq!(frame.selection, chart.region_selection());

    chart.pointer_up(300.0, 150.0).expect("up");
    assert_eq!(chart.region_selection(), None);
    chart.tick(GLIDE).expect("tick");

    let transform = chart.zoom_transform();
    assert_relative_eq!(transform.k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(transform.x, -200.0, epsilon = 1e-9);
    let frame = chart.renderer().last_frame.clone().expect("frame");
    assert_eq!(frame.selection, None);

    let log = log.borrow();
    assert_eq!(log.first(), Some(&Logged::Start(ZoomSource::RegionSelect)));
    assert_eq!(log.last(), Some(&Logged::View(true)));
}

#[test]
fn two_dimensional_region_selection_sets_both_axes() {
    let (mut chart, _) = build_chart(config(AxisLayout::XY).without_transitions());
    chart.set_region_select_modifier(true).expect("modifier");
    chart.pointer_down(0.0, 0.0).expect("down");
    chart.pointer_up(200.0, 50.0).expect("up");

    assert_eq!(
        chart.brush_extent(Axis::X),
        Some(BrushExtent::new(0.0, 200.0))
    );
    assert_eq!(chart.brush_extent(Axis::Y), Some(BrushExtent::new(0.0, 50.0)));
    assert_relative_eq!(chart.zoom_transform().k, 2.0, epsilon = 1e-9);
    assert_relative_eq!(chart.zoom_y_multiplier(), 2.0, epsilon = 1e-9);
}

#[test]
fn degenerate_region_selection_is_discarded() {
    let (mut chart, log) = build_chart(config(AxisLayout::X));
    chart.set_region_select_modifier(true).expect("modifier");
    chart.pointer_down(100.0, 50.0).expect("down");
    chart.pointer_up(100.5, 60.0).expect("up");

    assert!(chart.zoom_transform().is_identity());
    assert!(!chart.is_animating());
    assert!(log.borrow().is_empty());
}

#[test]
fn releasing_the_modifier_cancels_the_selection() {
    let (mut chart, _) = build_chart(config(AxisLayout::X));
    chart.set_region_select_modifier(true).expect("modifier");
    chart.pointer_down(100.0, 50.0).expect("down");
    chart.set_region_select_modifier(false).expect("release");

    assert_eq!(chart.region_selection(), None);
    assert_eq!(chart.gesture_state(), GestureState::Idle);
    assert!(!chart.pointer_up(300.0, 50.0).expect("up"));
    assert!(chart.zoom_transform().is_identity());
}

#[test]
fn engine_driven_recognizer_updates_are_not_reprocessed() {
    let (mut chart, log) = build_chart(config(AxisLayout::X).without_transitions());
    let before = chart.ignored_zoom_signal_count();
    chart
        .set_zoom_to_limits(ViewRequest::new(0.0, 50.0), false)
        .expect("zoom");

    assert!(chart.ignored_zoom_signal_count() > before);
    let log = log.borrow();
    assert_eq!(starts_and_ends(&log), (1, 1));
    assert_eq!(
        log.iter()
            .filter(|entry| matches!(entry, Logged::Zoom(_)))
            .count(),
        1
    );
    assert_eq!(log.last(), Some(&Logged::View(false)));
}

#[test]
fn disabled_input_families_are_ignored() {
    let input = ZoomInputBehavior {
        wheel_zoom: false,
        drag_pan: false,
        pinch_zoom: false,
        region_select: true,
    };
    let (mut chart, log) = build_chart(config(AxisLayout::X).with_input_behavior(input));

    assert!(!chart.wheel(-120.0, 200.0, 100.0).expect("wheel"));
    assert!(!chart.pointer_down(200.0, 100.0).expect("down"));
    assert!(!chart.pinch_start().expect("pinch"));
    assert!(log.borrow().is_empty());
}
