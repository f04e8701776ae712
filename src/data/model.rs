//! Model configuration: what gets saved, what comes back on load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::functions::FitFunction;

/// How per-feature fits are combined into a target prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FittingMethod {
    #[default]
    #[serde(rename = "線形結合", alias = "linear combination")]
    LinearCombination,
    #[serde(rename = "乗積", alias = "product")]
    Product,
}

impl FittingMethod {
    /// Label understood by the backend.
    pub fn wire_label(self) -> &'static str {
        match self {
            FittingMethod::LinearCombination => "線形結合",
            FittingMethod::Product => "乗積",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FittingMethod::LinearCombination => "Linear combination",
            FittingMethod::Product => "Product",
        }
    }

    /// Anything that is not the linear-combination label means product.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "線形結合" | "linear combination" => FittingMethod::LinearCombination,
            _ => FittingMethod::Product,
        }
    }
}

/// Body of `POST /model/save_model_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub model_name: String,
    pub fitting_config: BTreeMap<String, BTreeMap<String, String>>,
    pub fitting_method: FittingMethod,
    pub functions: Vec<FitFunction>,
}

/// Body of a successful load. The backend has used both camelCase and
/// snake_case spellings for the same fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadedModel {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default, alias = "fittingMethod")]
    pub fitting_method: Option<String>,
    /// `None` when the field is absent; an explicit empty list stays empty.
    #[serde(default)]
    pub functions: Option<Vec<FitFunction>>,
    #[serde(default, alias = "fittingConfig")]
    pub fitting_config: Option<BTreeMap<String, BTreeMap<String, Option<String>>>>,
}

impl LoadedModel {
    /// A missing `fittingMethod` reads as product, like any other non-linear label.
    pub fn method(&self) -> FittingMethod {
        FittingMethod::from_label(self.fitting_method.as_deref().unwrap_or(""))
    }

    /// Assignment map with `null` cells turned into "no function".
    pub fn assignment(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        self.fitting_config
            .iter()
            .flatten()
            .map(|(feature, row)| {
                let row = row
                    .iter()
                    .map(|(target, f)| (target.clone(), f.clone().unwrap_or_default()))
                    .collect();
                (feature.clone(), row)
            })
            .collect()
    }
}

/// Which saved model, if any, the client is working against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSession {
    loaded: bool,
    base_file: Option<String>,
}

impl ModelSession {
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// File name used as the base for finetuning.
    pub fn base_file(&self) -> Option<&str> {
        self.base_file.as_deref()
    }

    pub fn mark_loaded(&mut self, file: Option<String>) {
        self.loaded = true;
        if file.is_some() {
            self.base_file = file;
        }
    }

    /// Forget the loaded flag but keep the base file.
    pub fn unload(&mut self) {
        self.loaded = false;
    }

    pub fn clear(&mut self) {
        self.loaded = false;
        self.base_file = None;
    }
}

/// File-name part of a path reported by the backend (`/a/b/LAW_MODEL_1.json` -> `LAW_MODEL_1.json`).
pub fn file_name_of(path: &str) -> Option<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    let tail = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    Path::new(tail)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_method_label_means_product() {
        assert_eq!(FittingMethod::from_label("線形結合"), FittingMethod::LinearCombination);
        assert_eq!(FittingMethod::from_label("乗積"), FittingMethod::Product);
        assert_eq!(FittingMethod::from_label("whatever"), FittingMethod::Product);
    }

    #[test]
    fn missing_method_in_loaded_model_means_product() {
        let model: LoadedModel = serde_json::from_str(r#"{"model_name": "m1"}"#).unwrap();
        assert_eq!(model.method(), FittingMethod::Product);
        let model: LoadedModel = serde_json::from_str(r#"{"fittingMethod": "線形結合"}"#).unwrap();
        assert_eq!(model.method(), FittingMethod::LinearCombination);
    }

    #[test]
    fn file_name_from_backend_paths() {
        assert_eq!(file_name_of("/a/b/LAW_MODEL_1.json").as_deref(), Some("LAW_MODEL_1.json"));
        assert_eq!(file_name_of(r"C:\models\m.json").as_deref(), Some("m.json"));
        assert_eq!(file_name_of("  "), None);
    }

    #[test]
    fn unload_keeps_base_file() {
        let mut session = ModelSession::default();
        session.mark_loaded(Some("m.json".into()));
        session.mark_loaded(None);
        assert_eq!(session.base_file(), Some("m.json"));
        session.unload();
        assert!(!session.is_loaded());
        assert_eq!(session.base_file(), Some("m.json"));
        session.clear();
        assert_eq!(session.base_file(), None);
    }
}
