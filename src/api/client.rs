//! HTTP implementation of [`Backend`] on top of `reqwest::blocking`.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::types::{
    AssetUploadResponse, CalculationDemoResponse, ContourRequest, ContourResponse,
    CsvUploadResponse, FinetuneRequest, FinetuneResponse, MessageResponse, ModelFileRequest,
    ModelTableHeaders, OverlapResponse, PlotRequest, PlotResponse, SaveModelResponse,
};
use super::Backend;
use crate::data::assets::{AssetFiles, CsvKind};
use crate::data::model::{LoadedModel, ModelConfig};
use crate::error::{ApiError, ApiResult};

const USER_AGENT_VALUE: &str = concat!("fitscope/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> ApiResult<T> {
        tracing::debug!("Calling backend {}", path);
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        decode_body(status, &body)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(path, self.client.post(self.url(path)).json(body))
    }

    fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json");
        self.send(path, request)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(path, self.client.get(self.url(path)))
    }

    fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> ApiResult<T> {
        self.send(path, self.client.post(self.url(path)).multipart(form))
    }
}

fn attach(form: Form, field: &'static str, path: &Path) -> ApiResult<Form> {
    form.file(field, path).map_err(|e| ApiError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Backend for HttpBackend {
    fn upload_asset_folder(&self, files: &AssetFiles) -> ApiResult<AssetUploadResponse> {
        let form = attach(Form::new(), "files[]", &files.feature)?;
        let form = attach(form, "files[]", &files.target)?;
        self.post_form("/upload_asset_folder", form)
    }

    fn upload_csv(&self, kind: CsvKind, path: &Path) -> ApiResult<CsvUploadResponse> {
        let form = attach(Form::new(), "file", path)?.text("file_type", kind.as_str());
        self.post_form("/upload_csv", form)
    }

    fn get_plot_data(&self, request: &PlotRequest) -> ApiResult<PlotResponse> {
        self.post_json("/get_plot_data", request)
    }

    fn finetune(&self, request: &FinetuneRequest) -> ApiResult<FinetuneResponse> {
        self.post_json("/finetune_grid", request)
    }

    fn get_calculated_contour(&self, request: &ContourRequest) -> ApiResult<ContourResponse> {
        self.post_json("/get_calculated_contour", request)
    }

    fn get_overlap_data(&self) -> ApiResult<OverlapResponse> {
        self.get("/get_overlap_data")
    }

    fn get_model_table_headers(&self) -> ApiResult<ModelTableHeaders> {
        self.get("/get_model_table_headers")
    }

    fn save_model_config(&self, config: &ModelConfig) -> ApiResult<SaveModelResponse> {
        self.post_json("/model/save_model_config", config)
    }

    fn load_model_config(&self, filename: &str) -> ApiResult<LoadedModel> {
        let body = ModelFileRequest {
            filename: filename.to_string(),
        };
        self.post_json("/model/load_model_config", &body)
    }

    fn delete_model_config(&self, filename: &str) -> ApiResult<MessageResponse> {
        let body = ModelFileRequest {
            filename: filename.to_string(),
        };
        self.post_json("/model/delete_model_config", &body)
    }

    fn run_calculation_demo(&self) -> ApiResult<CalculationDemoResponse> {
        self.post_empty("/model/run_calculation_demo")
    }
}

/// Turn a status code and raw body into a typed result.
///
/// Non-2xx statuses become errors via [`error_from_response`]. A 2xx body that
/// is a JSON object with a string `error` field is also an error.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !(200..300).contains(&status) {
        return Err(error_from_response(status, body));
    }
    let value: Value = serde_json::from_str(body)?;
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(ApiError::Rejected {
            status: None,
            message: message.to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Error for a non-success status.
///
/// A JSON body yields its `error` text (or a generic message naming the
/// status); anything else yields [`ApiError::Status`].
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("The server reported an error (status {status})."));
            ApiError::Rejected {
                status: Some(status),
                message,
            }
        }
        Err(_) => {
            tracing::warn!(status, "backend returned a non-JSON error body");
            ApiError::Status { status }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("/get_plot_data"), "http://localhost:5000/get_plot_data");
    }
}
