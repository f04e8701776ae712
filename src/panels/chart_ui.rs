use egui::{Color32, RichText, Stroke, Ui};
use egui_phosphor::regular as icons;
use egui_plot::{Legend, Plot, PlotPoints, PlotUi, Points, Polygon};

use super::panel_trait::{Panel, PanelData, PanelState};
use crate::color_scheme::{jet_in_range, with_alpha, ColorScheme, OVERLAY_ALPHA};
use crate::data::chart::{ScatterTrace, TraceKind};
use crate::data::state::AppState;

/// Markers with per-point values are drawn in this many colour bands.
const COLOR_BANDS: usize = 24;

/// The scatter plot and its overlap contour.
#[derive(Debug, Clone)]
pub struct ChartPanel {
    state: PanelState,
    pub marker_radius: f32,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Chart", icons::CHART_SCATTER),
            marker_radius: 3.0,
        }
    }
}

impl Panel for ChartPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let chart = data.state.chart();
        ui.vertical_centered(|ui| {
            let title = RichText::new(chart.title.as_str()).heading();
            if chart.is_placeholder() {
                ui.label(title.weak());
            } else {
                ui.label(title);
            }
        });

        let plot = Plot::new("fitscope_chart")
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_boxed_zoom(true)
            .x_axis_label(chart.x_title.clone())
            .y_axis_label(chart.y_title.clone());

        let radius = self.marker_radius;
        let scheme = data.scheme;
        let state: &AppState = data.state;
        plot.show(ui, |plot_ui| {
            for trace in state.chart().traces() {
                if let TraceKind::Scatter(scatter) = &trace.kind {
                    draw_scatter(plot_ui, scatter, radius, scheme);
                }
            }
            draw_overlay(plot_ui, state);
        });
    }
}

fn draw_scatter(plot_ui: &mut PlotUi, trace: &ScatterTrace, radius: f32, scheme: ColorScheme) {
    let range = trace.effective_color_range();
    let Some(range) = range.filter(|_| trace.colors.len() == trace.points.len()) else {
        plot_ui.points(
            Points::new(trace.name.clone(), trace.points.clone())
                .radius(radius)
                .color(scheme.marker_color()),
        );
        return;
    };

    let mut bands: Vec<Vec<[f64; 2]>> = vec![Vec::new(); COLOR_BANDS];
    for (point, value) in trace.points.iter().zip(&trace.colors) {
        bands[band_of(*value, range)].push(*point);
    }
    for (band, points) in bands.into_iter().enumerate() {
        if points.is_empty() {
            continue;
        }
        let color = jet_in_range(band_center(band, range), range);
        plot_ui.points(
            Points::new(trace.name.clone(), points)
                .radius(radius)
                .color(color),
        );
    }
}

fn draw_overlay(plot_ui: &mut PlotUi, state: &AppState) {
    let Some(range) = state.chart().overlay().and_then(|grid| grid.value_range()) else {
        return;
    };
    for (x0, x1, y0, y1, z) in state.visible_overlay_cells() {
        let fill = with_alpha(jet_in_range(z, range), OVERLAY_ALPHA);
        let cell = PlotPoints::new(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]);
        plot_ui.polygon(
            Polygon::new("", cell)
                .fill_color(fill)
                .stroke(Stroke::new(0.0, Color32::TRANSPARENT)),
        );
    }
}

/// Colour band of `value`; non-finite values fall in the lowest band.
fn band_of(value: f64, (lo, hi): (f64, f64)) -> usize {
    if !value.is_finite() || hi <= lo {
        return 0;
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    ((t * COLOR_BANDS as f64) as usize).min(COLOR_BANDS - 1)
}

fn band_center(band: usize, (lo, hi): (f64, f64)) -> f64 {
    lo + (hi - lo) * (band as f64 + 0.5) / COLOR_BANDS as f64
}
