//! Chart contents: the base scatter plot returned by the backend and the
//! optional overlap contour drawn on top of it.
//!
//! The backend speaks Plotly JSON (`graph_json` / `layout_json`, each an
//! encoded string). Only the parts the client draws are extracted: marker
//! positions and colour values of each trace, the title and the axis titles.

use serde_json::Value;

use crate::error::ApiError;

/// Fixed id of the overlay trace. At most one trace carries it.
pub const OVERLAY_TRACE_ID: &str = "overlap-contour-trace";

/// Title shown before the user has picked X, Y and a target.
pub const SELECT_COLUMNS_TITLE: &str = "Select the X axis, Y axis and target columns.";

/// A marker trace. `colors` holds the per-point value mapped through the colour scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterTrace {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub colors: Vec<f64>,
    pub color_range: Option<(f64, f64)>,
    pub color_title: Option<String>,
}

impl ScatterTrace {
    /// Colour range: explicit `cmin`/`cmax`, else the finite extent of `colors`.
    pub fn effective_color_range(&self) -> Option<(f64, f64)> {
        self.color_range.or_else(|| finite_extent(self.colors.iter().copied()))
    }
}

/// Regular grid of values: `z[row][col]` sits at `(x[col], y[row])`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<Option<f64>>>,
}

impl ContourGrid {
    /// Parse `{X, Y, Z}` (overlap data) or `{x, y, z}` (a Plotly contour trace).
    pub fn from_value(v: &Value) -> Result<Self, ApiError> {
        let field = |upper: &str, lower: &str| v.get(upper).or_else(|| v.get(lower));
        let x = field("X", "x")
            .map(number_list)
            .ok_or_else(|| ApiError::Decode("contour grid has no X values".into()))?;
        let y = field("Y", "y")
            .map(number_list)
            .ok_or_else(|| ApiError::Decode("contour grid has no Y values".into()))?;
        let z = field("Z", "z")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::Decode("contour grid has no Z values".into()))?
            .iter()
            .map(|row| {
                row.as_array()
                    .map(|r| r.iter().map(Value::as_f64).collect::<Vec<Option<f64>>>())
                    .unwrap_or_default()
            })
            .collect();
        Ok(Self {
            x: x.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
            y: y.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
            z,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.z
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_extent(self.z.iter().flatten().copied().flatten())
    }

    /// Cell rectangles `(x0, x1, y0, y1, z)`, each centred on its grid node.
    pub fn cells(&self) -> Vec<(f64, f64, f64, f64, f64)> {
        let xs = cell_edges(&self.x);
        let ys = cell_edges(&self.y);
        let mut out = Vec::new();
        for (row, (y0, y1)) in ys.iter().enumerate() {
            for (col, (x0, x1)) in xs.iter().enumerate() {
                if let Some(z) = self.value(row, col) {
                    out.push((*x0, *x1, *y0, *y1, z));
                }
            }
        }
        out
    }
}

/// One drawable layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceKind {
    Scatter(ScatterTrace),
    Contour(ContourGrid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartTrace {
    pub uid: Option<String>,
    pub kind: TraceKind,
}

/// Everything the chart widget needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    traces: Vec<ChartTrace>,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::placeholder(SELECT_COLUMNS_TITLE)
    }
}

impl ChartState {
    /// Empty chart showing only a title.
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_title: String::new(),
            y_title: String::new(),
            traces: Vec::new(),
        }
    }

    /// Chart for a failed request; no trace of an earlier render survives.
    pub fn error(message: &str) -> Self {
        Self::placeholder(format!("Plot error: {message}"))
    }

    pub fn traces(&self) -> &[ChartTrace] {
        &self.traces
    }

    pub fn is_placeholder(&self) -> bool {
        self.traces.is_empty()
    }

    /// Build a chart from the backend's `graph_json` and `layout_json` strings.
    pub fn from_plotly(graph_json: &str, layout_json: &str) -> Result<Self, ApiError> {
        let graph: Value = serde_json::from_str(graph_json)?;
        let layout: Value = serde_json::from_str(layout_json)?;
        let trace_values = match &graph {
            Value::Array(items) => items.clone(),
            Value::Object(obj) => match obj.get("data") {
                Some(Value::Array(items)) => items.clone(),
                _ => vec![graph.clone()],
            },
            _ => return Err(ApiError::Decode("graph_json is neither a list nor a figure".into())),
        };
        let traces = trace_values
            .iter()
            .enumerate()
            .map(|(i, t)| ChartTrace {
                uid: t.get("uid").and_then(Value::as_str).map(str::to_string),
                kind: TraceKind::Scatter(scatter_from_value(t, i)),
            })
            .collect();
        Ok(Self {
            title: title_text(layout.get("title")).unwrap_or_default(),
            x_title: title_text(layout.pointer("/xaxis/title")).unwrap_or_default(),
            y_title: title_text(layout.pointer("/yaxis/title")).unwrap_or_default(),
            traces,
        })
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay().is_some()
    }

    pub fn overlay(&self) -> Option<&ContourGrid> {
        self.traces.iter().find_map(|t| match (&t.uid, &t.kind) {
            (Some(uid), TraceKind::Contour(grid)) if uid == OVERLAY_TRACE_ID => Some(grid),
            _ => None,
        })
    }

    /// Add the overlay trace, replacing any existing one.
    pub fn set_overlay(&mut self, grid: ContourGrid) {
        self.remove_overlay();
        self.traces.push(ChartTrace {
            uid: Some(OVERLAY_TRACE_ID.to_string()),
            kind: TraceKind::Contour(grid),
        });
    }

    /// Remove the overlay trace; returns whether one was present.
    pub fn remove_overlay(&mut self) -> bool {
        let before = self.traces.len();
        self.traces
            .retain(|t| t.uid.as_deref() != Some(OVERLAY_TRACE_ID));
        before != self.traces.len()
    }
}

fn scatter_from_value(t: &Value, index: usize) -> ScatterTrace {
    let xs = t.get("x").map(number_list).unwrap_or_default();
    let ys = t.get("y").map(number_list).unwrap_or_default();
    let marker = t.get("marker");
    let colors_raw = marker
        .and_then(|m| m.get("color"))
        .map(number_list)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(xs.len().min(ys.len()));
    let mut colors = Vec::new();
    for (i, (x, y)) in xs.iter().zip(ys.iter()).enumerate() {
        if let (Some(x), Some(y)) = (x, y) {
            points.push([*x, *y]);
            colors.push(colors_raw.get(i).copied().flatten().unwrap_or(f64::NAN));
        }
    }
    if colors.iter().all(|c| c.is_nan()) {
        colors.clear();
    }

    let cmin = marker.and_then(|m| m.get("cmin")).and_then(Value::as_f64);
    let cmax = marker.and_then(|m| m.get("cmax")).and_then(Value::as_f64);
    ScatterTrace {
        name: t
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("trace {index}")),
        points,
        colors,
        color_range: cmin.zip(cmax).filter(|(lo, hi)| hi > lo),
        color_title: marker.and_then(|m| title_text(m.pointer("/colorbar/title"))),
    }
}

/// Plotly titles are either plain strings or `{text: "..."}`.
fn title_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Numbers from a JSON list. Plotly may also encode arrays as
/// `{dtype, bdata}`; those are not decoded and yield an empty list.
fn number_list(v: &Value) -> Vec<Option<f64>> {
    match v {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn finite_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Half-way boundaries between neighbouring coordinates.
fn cell_edges(coords: &[f64]) -> Vec<(f64, f64)> {
    match coords.len() {
        0 => Vec::new(),
        1 => vec![(coords[0] - 0.5, coords[0] + 0.5)],
        n => (0..n)
            .map(|i| {
                let lo = if i == 0 {
                    coords[0] - (coords[1] - coords[0]) / 2.0
                } else {
                    (coords[i - 1] + coords[i]) / 2.0
                };
                let hi = if i == n - 1 {
                    coords[n - 1] + (coords[n - 1] - coords[n - 2]) / 2.0
                } else {
                    (coords[i] + coords[i + 1]) / 2.0
                };
                (lo, hi)
            })
            .collect(),
    }
}
