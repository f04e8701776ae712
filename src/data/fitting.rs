//! Assignment of fit functions to (feature, target) column pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::axis::is_main_id;

/// feature column -> target column -> function name (`""` = none).
///
/// This map is the only record of the user's choices; the matrix widget reads
/// from it and writes into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FittingAssignment {
    cells: BTreeMap<String, BTreeMap<String, String>>,
}

impl FittingAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(cells: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { cells }
    }

    /// Function assigned to a pair, `None` when unassigned or unknown.
    pub fn get(&self, feature: &str, target: &str) -> Option<&str> {
        self.cells
            .get(feature)
            .and_then(|row| row.get(target))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Assign `function` (empty string clears) to an existing pair.
    pub fn assign(&mut self, feature: &str, target: &str, function: impl Into<String>) -> bool {
        match self.cells.get_mut(feature).and_then(|row| row.get_mut(target)) {
            Some(cell) => {
                *cell = function.into();
                true
            }
            None => false,
        }
    }

    /// Regenerate the matrix for the current columns and functions.
    ///
    /// Exactly the non-`main_id` pairs get an entry. Previous choices are kept
    /// when the function still exists; anything else becomes `""`.
    pub fn rebuild(&mut self, features: &[String], targets: &[String], function_names: &[String]) {
        let mut previous = std::mem::take(&mut self.cells);
        for feature in features.iter().filter(|f| !is_main_id(f)) {
            let mut old_row = previous.remove(feature).unwrap_or_default();
            let row: BTreeMap<String, String> = targets
                .iter()
                .filter(|t| !is_main_id(t))
                .map(|target| {
                    let chosen = old_row
                        .remove(target)
                        .filter(|name| function_names.iter().any(|n| n == name))
                        .unwrap_or_default();
                    (target.clone(), chosen)
                })
                .collect();
            self.cells.insert(feature.clone(), row);
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, String>)> {
        self.cells.iter()
    }

    /// `fittingConfig` payload.
    pub fn to_payload(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.cells.clone()
    }
}
