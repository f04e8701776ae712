//! Column role assignment for feature columns and target selection.
//!
//! Each feature column is either held at a constant value or mapped onto the
//! X or Y axis of the plot. At most one column holds each axis role at a time:
//! claiming an axis demotes its previous holder back to `Constant`, restoring
//! the constant value that column had before it was promoted.

use serde::{Deserialize, Serialize};

/// Identifier column that never takes part in plotting or fitting.
pub const MAIN_ID: &str = "main_id";

/// Case-insensitive match against [`MAIN_ID`].
pub fn is_main_id(header: &str) -> bool {
    header.eq_ignore_ascii_case(MAIN_ID)
}

/// How a feature column maps onto the plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureRole {
    #[default]
    Constant,
    #[serde(rename = "X_axis")]
    XAxis,
    #[serde(rename = "Y_axis")]
    YAxis,
}

impl FeatureRole {
    pub const ALL: [FeatureRole; 3] = [FeatureRole::Constant, FeatureRole::XAxis, FeatureRole::YAxis];

    /// Wire label, also used in the role dropdown.
    pub fn label(self) -> &'static str {
        match self {
            FeatureRole::Constant => "Constant",
            FeatureRole::XAxis => "X_axis",
            FeatureRole::YAxis => "Y_axis",
        }
    }

    pub fn is_axis(self) -> bool {
        !matches!(self, FeatureRole::Constant)
    }
}

/// Role and constant value of one feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSelection {
    pub name: String,
    pub role: FeatureRole,
    /// Text of the constant-value field. Kept while the column holds an axis
    /// role so that demotion restores it.
    pub constant: String,
}

impl FeatureSelection {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: FeatureRole::Constant,
            constant: "0".to_string(),
        }
    }

    /// Whether the constant field holds a finite number. Only meaningful for
    /// `Constant` columns; axis columns always pass.
    pub fn constant_is_numeric(&self) -> bool {
        !matches!(self.role, FeatureRole::Constant) || parse_constant(&self.constant).is_some()
    }

    /// Value sent to the backend: the constant for `Constant`, empty otherwise.
    pub fn wire_value(&self) -> &str {
        match self.role {
            FeatureRole::Constant => &self.constant,
            _ => "",
        }
    }
}

/// Parse a constant-value field. Blank, non-numeric and non-finite text is rejected.
pub fn parse_constant(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One entry of the `featureParams` list sent with a plot request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureParam {
    pub name: String,
    #[serde(rename = "type")]
    pub role: FeatureRole,
    pub value: String,
}

/// Column lists of the loaded asset folder plus the user's selections.
#[derive(Debug, Clone, Default)]
pub struct AxisSelection {
    feature_headers: Vec<String>,
    target_headers: Vec<String>,
    features: Vec<FeatureSelection>,
    target: Option<String>,
}

impl AxisSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feature_headers(&self) -> &[String] {
        &self.feature_headers
    }

    pub fn target_headers(&self) -> &[String] {
        &self.target_headers
    }

    /// Feature columns eligible for plotting (header order, `main_id` skipped).
    pub fn features(&self) -> &[FeatureSelection] {
        &self.features
    }

    pub fn feature(&self, name: &str) -> Option<&FeatureSelection> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Target columns offered in the target dropdown.
    pub fn target_choices(&self) -> impl Iterator<Item = &String> {
        self.target_headers.iter().filter(|h| !is_main_id(h))
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn has_headers(&self) -> bool {
        !self.feature_headers.is_empty() && !self.target_headers.is_empty()
    }

    /// Replace the feature column list.
    ///
    /// Columns that survive keep their role and constant; new columns start
    /// as `Constant` with value `"0"`.
    pub fn set_feature_headers(&mut self, headers: Vec<String>) {
        let mut previous = std::mem::take(&mut self.features);
        self.features = headers
            .iter()
            .filter(|h| !is_main_id(h))
            .map(|h| match previous.iter().position(|f| &f.name == h) {
                Some(idx) => previous.swap_remove(idx),
                None => FeatureSelection::new(h.clone()),
            })
            .collect();
        self.feature_headers = headers;
    }

    /// Replace the target column list. A selected target that disappeared is cleared.
    pub fn set_target_headers(&mut self, headers: Vec<String>) {
        self.target_headers = headers;
        if let Some(t) = &self.target {
            if !self.target_headers.iter().any(|h| h == t && !is_main_id(h)) {
                self.target = None;
            }
        }
    }

    /// Reset every column to `Constant "0"` and clear the target.
    pub fn reset_selections(&mut self) {
        self.features = self
            .feature_headers
            .iter()
            .filter(|h| !is_main_id(h))
            .map(|h| FeatureSelection::new(h.clone()))
            .collect();
        self.target = None;
    }

    /// Drop all columns and selections.
    pub fn clear(&mut self) {
        self.feature_headers.clear();
        self.target_headers.clear();
        self.features.clear();
        self.target = None;
    }

    /// Assign `role` to the column `name`.
    ///
    /// When `role` is an axis role, any other column holding it is demoted to
    /// `Constant`. Returns `false` if the column is unknown or nothing changed.
    pub fn set_role(&mut self, name: &str, role: FeatureRole) -> bool {
        let Some(idx) = self.features.iter().position(|f| f.name == name) else {
            return false;
        };
        if self.features[idx].role == role {
            return false;
        }
        if role.is_axis() {
            for (i, other) in self.features.iter_mut().enumerate() {
                if i != idx && other.role == role {
                    tracing::debug!(column = %other.name, role = role.label(), "demoting previous axis holder");
                    other.role = FeatureRole::Constant;
                }
            }
        }
        self.features[idx].role = role;
        true
    }

    /// Update the constant value of a column without touching its role.
    pub fn set_constant(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.features.iter_mut().find(|f| f.name == name) {
            Some(f) => {
                f.constant = value.into();
                true
            }
            None => false,
        }
    }

    /// Select the target column; `None` or an empty name clears it.
    pub fn set_target(&mut self, target: Option<String>) {
        self.target = target.filter(|t| !t.is_empty());
    }

    /// Column currently holding `role`, if any.
    pub fn axis_holder(&self, role: FeatureRole) -> Option<&str> {
        self.features
            .iter()
            .find(|f| f.role == role)
            .map(|f| f.name.as_str())
    }

    fn count_role(&self, role: FeatureRole) -> usize {
        self.features.iter().filter(|f| f.role == role).count()
    }

    /// Exactly one X axis, exactly one Y axis and a non-empty target.
    pub fn axis_params_selected(&self) -> bool {
        self.count_role(FeatureRole::XAxis) == 1
            && self.count_role(FeatureRole::YAxis) == 1
            && self.target.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Every `Constant` column holds a number, so the payload can be sent.
    pub fn constants_valid(&self) -> bool {
        self.features.iter().all(FeatureSelection::constant_is_numeric)
    }

    /// `featureParams` payload in column order.
    pub fn feature_params(&self) -> Vec<FeatureParam> {
        self.features
            .iter()
            .map(|f| FeatureParam {
                name: f.name.clone(),
                role: f.role,
                value: f.wire_value().to_string(),
            })
            .collect()
    }

    /// Non-`main_id` feature columns, used as fitting matrix rows.
    pub fn fitting_features(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name.clone()).collect()
    }

    /// Non-`main_id` target columns, used as fitting matrix columns.
    pub fn fitting_targets(&self) -> Vec<String> {
        self.target_choices().cloned().collect()
    }
}
