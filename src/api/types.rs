//! Request and response bodies of the fitting backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::axis::FeatureParam;

/// Column lists returned after an asset folder upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetHeaders {
    #[serde(default)]
    pub feature: Vec<String>,
    #[serde(default)]
    pub target: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetUploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub headers: AssetHeaders,
}

/// `/upload_csv` answers with the header list or, for non-CSV files, only metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvUploadResponse {
    pub headers: Option<Vec<String>>,
    pub raw: Value,
}

impl<'de> Deserialize<'de> for CsvUploadResponse {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(d)?;
        let headers = raw.get("headers").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
        Ok(Self { headers, raw })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotRequest {
    pub feature_params: Vec<FeatureParam>,
    pub target_param: String,
}

/// Plotly figure pieces, each a JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlotResponse {
    pub graph_json: String,
    pub layout_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinetuneRequest {
    pub base_model_filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FinetuneResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub new_model_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourRequest {
    pub json_filename: String,
    #[serde(rename = "featureParams")]
    pub feature_params: Vec<FeatureParam>,
    #[serde(rename = "targetParam")]
    pub target_param: String,
}

/// `contour_json` is an encoded Plotly contour trace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContourResponse {
    pub contour_json: String,
}

/// `data` is `null` until the backend has computed a grid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OverlapResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModelTableHeaders {
    #[serde(default)]
    pub feature_headers: Vec<String>,
    #[serde(default)]
    pub target_headers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveModelResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub filepath: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFileRequest {
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CalculationDemoResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub num_points: Option<u64>,
}
