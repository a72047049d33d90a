use tracing::{debug, trace};

use crate::core::{Axis, ChartSizes, PixelRect, Scale, linear_ticks, tick_step};
use crate::error::ChartResult;
use crate::host::{ChartHost, OverviewContext, RenderContext, RenderStatus};
use crate::interaction::ZoomSource;
use crate::render::{AxisFrame, AxisTick, ChromeFrame, OverviewFrame, Renderer};

use super::{
    AxisLabelConfig, OverviewBehavior, ZoomChart, ZoomChartConfig,
    brush_sync::{BrushGeometry, BrushSynchronizer},
    gesture_arbiter::GestureArbiter,
    transform_state::TransformCoordinator,
};

/// Layout and status remembered between render cycles.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct RenderState {
    /// Sizes of the last non-empty layout; `None` until the first one.
    pub(super) sizes: Option<ChartSizes>,
    pub(super) last_status: Option<RenderStatus>,
    pub(super) render_count: u64,
    /// Resolution limits of the host scales at the last layout, `[x, y]`.
    pub(super) min_extent: [f64; 2],
}

pub(super) struct RenderOrchestrator;

impl RenderOrchestrator {
    /// Plot and overview rectangles for the configured viewport; `None` when
    /// the plot area would be empty.
    pub(super) fn compute_sizes(config: &ZoomChartConfig) -> Option<ChartSizes> {
        let margins = config.margins;
        let overview_x = config.overview(Axis::X);
        let overview_y = config.overview(Axis::Y);
        let overview_y = if config.layout.is_two_dimensional() {
            overview_y
        } else {
            OverviewBehavior {
                enabled: false,
                ..overview_y
            }
        };

        let left = margins.left + overview_y.reserved();
        let plot_width = f64::from(config.viewport.width) - left - margins.right;
        let plot_height = f64::from(config.viewport.height)
            - margins.top
            - margins.bottom
            - overview_x.reserved();
        let plot = PixelRect::new(left, margins.top, plot_width, plot_height);
        if plot.is_empty() {
            return None;
        }

        Some(ChartSizes {
            viewport: config.viewport,
            plot,
            overview_x: overview_x.enabled.then(|| {
                PixelRect::new(
                    left,
                    margins.top + plot_height + margins.bottom + overview_x.margin,
                    plot_width,
                    overview_x.size,
                )
            }),
            overview_y: overview_y
                .enabled
                .then(|| PixelRect::new(0.0, margins.top, overview_y.size, plot_height)),
        })
    }

    pub(super) fn render<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        force_refresh: bool,
        update_zoom: bool,
    ) -> ChartResult<Option<RenderStatus>> {
        let Some(sizes) = Self::compute_sizes(&engine.config) else {
            debug!(
                chart = %engine.id,
                width = engine.config.viewport.width,
                height = engine.config.viewport.height,
                "render skipped: plot area is empty"
            );
            return Ok(None);
        };

        if force_refresh {
            GestureArbiter::rebind(engine);
        }

        let x_base = engine.host.x_scale((0.0, sizes.width()));
        let y_base = if engine.config.layout.is_two_dimensional() {
            engine.host.y_scale((sizes.height(), 0.0))
        } else {
            None
        };
        let min_extent = [
            x_base.min_zoom_extent(),
            y_base.as_ref().map_or(0.0, Scale::min_zoom_extent),
        ];
        Self::relayout(engine, sizes, min_extent)?;

        let transform = engine.state.transform;
        let y_multiplier = engine.state.y_multiplier;
        let x_scale = x_base.zoomed(Axis::X, transform, y_multiplier)?;
        let y_scale = y_base
            .as_ref()
            .map(|scale| scale.zoomed(Axis::Y, transform, y_multiplier))
            .transpose()?;

        let context = RenderContext {
            force_refresh,
            update_zoom,
            sizes,
            x_scale: &x_scale,
            y_scale: y_scale.as_ref(),
            transform,
            y_multiplier,
        };
        engine.host.prepare_chart(&context);
        let status = engine.host.create_chart(&context);

        let mut frame = ChromeFrame::new(sizes, status);
        match status {
            RenderStatus::NoData => {
                frame.placeholder = Some(engine.config.no_data_text.clone());
            }
            RenderStatus::Success => {
                frame.x_axis = Self::axis_frame(&engine.config, Axis::X, Some(&x_scale), sizes);
                frame.y_axis = Self::axis_frame(&engine.config, Axis::Y, y_scale.as_ref(), sizes);
                frame.overview_x = Self::overview(engine, Axis::X, sizes.overview_x, Some(&x_base));
                frame.overview_y = Self::overview(engine, Axis::Y, sizes.overview_y, y_base.as_ref());
                frame.selection = engine.region_selection();
            }
        }

        engine.renderer.render(&frame)?;
        engine.render_state.last_status = Some(status);
        engine.render_state.render_count += 1;
        trace!(
            chart = %engine.id,
            ?status,
            force_refresh,
            update_zoom,
            render_count = engine.render_state.render_count,
            "render cycle finished"
        );
        Ok(Some(status))
    }

    /// Initializes brushes on first layout, renormalizes them on size change
    /// and re-constrains the view when the host scales lost resolution.
    fn relayout<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        sizes: ChartSizes,
        min_extent: [f64; 2],
    ) -> ChartResult<()> {
        let previous = engine.render_state.sizes.replace(sizes);
        let previous_min_extent = std::mem::replace(&mut engine.render_state.min_extent, min_extent);
        let geometry = BrushGeometry::from_sizes(sizes, &engine.config, min_extent);

        let Some(previous) = previous else {
            engine.brushes = geometry.full_window();
            let view = geometry.constrain_transform(
                engine.state.transform,
                engine.state.y_multiplier,
                engine.brushes,
            );
            debug!(chart = %engine.id, width = sizes.width(), height = sizes.height(), "first layout");
            return TransformCoordinator::apply(engine, view, ZoomSource::Programmatic);
        };
        if previous.width() == sizes.width() && previous.height() == sizes.height() {
            if previous_min_extent == min_extent {
                return Ok(());
            }
            let view = geometry.constrain_window(engine.state.window, engine.brushes);
            if view.was_clamped {
                debug!(
                    chart = %engine.id,
                    min_x = min_extent[0],
                    min_y = min_extent[1],
                    "view widened to the host scale resolution"
                );
                TransformCoordinator::apply(engine, view, ZoomSource::Programmatic)?;
            }
            return Ok(());
        }

        // A running transition is completed before its pixel targets go stale.
        let finished = engine.transitions.cancel();
        if let Some(transition) = finished {
            let old_geometry = BrushGeometry::from_sizes(previous, &engine.config, previous_min_extent);
            TransformCoordinator::apply(engine, old_geometry.view_of(transition.to), transition.source)?;
        }

        engine.brushes = BrushSynchronizer::resize_brushes(engine.brushes, previous, sizes);
        let window = BrushSynchronizer::resize_window(engine.state.window, previous, sizes);
        let view = geometry.constrain_window(window, engine.brushes);
        TransformCoordinator::apply(engine, view, ZoomSource::Resize)?;
        debug!(
            chart = %engine.id,
            from_width = previous.width(),
            to_width = sizes.width(),
            from_height = previous.height(),
            to_height = sizes.height(),
            "brushes renormalized after resize"
        );

        if finished.is_some() {
            engine.end_zoom();
        }
        Ok(())
    }

    fn overview<H: ChartHost, R: Renderer>(
        engine: &mut ZoomChart<H, R>,
        axis: Axis,
        area: Option<PixelRect>,
        scale: Option<&Scale>,
    ) -> Option<OverviewFrame> {
        let (area, scale) = (area?, scale?);
        let context = OverviewContext { axis, scale, area };
        match axis {
            Axis::X => engine.host.create_overview_x(&context),
            Axis::Y => engine.host.create_overview_y(&context),
        }
        Some(OverviewFrame {
            axis,
            area,
            brush: engine
                .config
                .brush_enabled
                .then(|| engine.brushes.get(axis)),
        })
    }

    fn axis_frame(
        config: &ZoomChartConfig,
        axis: Axis,
        scale: Option<&Scale>,
        sizes: ChartSizes,
    ) -> Option<AxisFrame> {
        let labels = config.axis_labels(axis);
        if !labels.visible {
            return None;
        }
        Some(Self::ticks_frame(axis, scale?, labels, sizes.axis_size(axis)))
    }

    fn ticks_frame(axis: Axis, scale: &Scale, labels: &AxisLabelConfig, axis_size: f64) -> AxisFrame {
        let ticks = match scale {
            Scale::Linear(linear) => {
                let (start, end) = linear.domain();
                let step = tick_step(start, end, labels.tick_count);
                linear_ticks(start, end, labels.tick_count)
                    .into_iter()
                    .map(|value| AxisTick {
                        position: linear.apply(value),
                        label: labels.format.format(value, step),
                    })
                    .collect()
            }
            Scale::Band(band) => {
                let half_band = band.bandwidth() * 0.5;
                let stride = band.keys().len().div_ceil(labels.tick_count).max(1);
                band.keys()
                    .iter()
                    .enumerate()
                    .step_by(stride)
                    .filter_map(|(index, key)| {
                        let position = band.apply_index(index)? + half_band;
                        (0.0..=axis_size).contains(&position).then(|| AxisTick {
                            position,
                            label: key.clone(),
                        })
                    })
                    .collect()
            }
        };
        AxisFrame {
            axis,
            ticks,
            label: labels.label.clone(),
        }
    }
}

impl<H: ChartHost, R: Renderer> ZoomChart<H, R> {
    /// Runs one render cycle.
    ///
    /// `force_refresh` rebuilds gesture bindings (in-progress drags and
    /// pinches are dropped); `update_zoom` marks a transform-only change and
    /// never touches bindings. Returns `Ok(None)` when the plot area is empty.
    pub fn render(&mut self, force_refresh: bool, update_zoom: bool) -> ChartResult<Option<RenderStatus>> {
        RenderOrchestrator::render(self, force_refresh, update_zoom)
    }

    #[must_use]
    pub fn chart_sizes(&self) -> Option<ChartSizes> {
        self.render_state.sizes
    }

    #[must_use]
    pub fn last_render_status(&self) -> Option<RenderStatus> {
        self.render_state.last_status
    }

    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_state.render_count
    }

    /// Gesture binding generation; increments on every forced refresh.
    #[must_use]
    pub fn binding_generation(&self) -> u64 {
        self.recognizer.generation()
    }
}
