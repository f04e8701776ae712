//! Colours: the window theme and the jet scale used for data colouring.

use eframe::egui::{Color32, Context, Visuals};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Opacity of the overlap contour (Plotly `opacity: 0.5`).
pub const OVERLAY_ALPHA: u8 = 128;

/// Control points of the jet scale, evenly spaced over `0.0..=1.0`.
static JET_STOPS: Lazy<Vec<Color32>> = Lazy::new(|| {
    vec![
        Color32::from_rgb(0, 0, 131),
        Color32::from_rgb(0, 60, 170),
        Color32::from_rgb(5, 255, 255),
        Color32::from_rgb(255, 255, 0),
        Color32::from_rgb(250, 0, 0),
        Color32::from_rgb(128, 0, 0),
    ]
});

/// Map `t` in `0.0..=1.0` onto the jet scale. Out-of-range values are clamped
/// and NaN maps to the low end.
pub fn jet(t: f64) -> Color32 {
    let stops = &*JET_STOPS;
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (stops.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    if lo >= stops.len() - 1 {
        return stops[stops.len() - 1];
    }
    let frac = (scaled - lo as f64) as f32;
    lerp(stops[lo], stops[lo + 1], frac)
}

/// Jet colour of `value` within `range`; a degenerate range maps to the middle.
pub fn jet_in_range(value: f64, range: (f64, f64)) -> Color32 {
    let (lo, hi) = range;
    if hi > lo {
        jet((value - lo) / (hi - lo))
    } else {
        jet(0.5)
    }
}

pub fn with_alpha(c: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha)
}

fn lerp(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Window theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Dark, ColorScheme::Light]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            ColorScheme::Dark => Visuals::dark(),
            ColorScheme::Light => Visuals::light(),
        }
    }

    pub fn apply(&self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
    }

    /// Colour for traces without per-point values.
    pub fn marker_color(&self) -> Color32 {
        match self {
            ColorScheme::Dark => Color32::from_rgb(100, 170, 255),
            ColorScheme::Light => Color32::from_rgb(31, 119, 180),
        }
    }
}
