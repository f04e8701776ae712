//! Access to the fitting backend.
//!
//! | Sub-module   | Responsibility |
//! | ------------ | -------------- |
//! | [`types`]    | Request/response bodies |
//! | [`client`]   | [`HttpBackend`]: the real HTTP implementation of [`Backend`] |
//! | [`worker`]   | Background thread that runs [`ApiRequest`]s off the UI thread |
//!
//! UI state never talks to the network directly. Handlers return
//! [`ApiRequest`] values; the worker runs them through a [`Backend`] and
//! hands back matching [`ApiResponse`] values.

pub mod client;
pub mod types;
pub mod worker;

use std::path::PathBuf;

pub use client::HttpBackend;
pub use worker::RequestWorker;

use crate::data::assets::{AssetFiles, CsvKind};
use crate::data::model::{LoadedModel, ModelConfig};
use crate::error::ApiResult;
use types::{
    AssetUploadResponse, CalculationDemoResponse, ContourRequest, ContourResponse,
    CsvUploadResponse, FinetuneRequest, FinetuneResponse, MessageResponse, ModelTableHeaders,
    OverlapResponse, PlotRequest, PlotResponse, SaveModelResponse,
};

/// One method per backend endpoint.
///
/// Implementations are shared between worker threads.
pub trait Backend: Send + Sync {
    /// `POST /upload_asset_folder`, multipart `files[]`.
    fn upload_asset_folder(&self, files: &AssetFiles) -> ApiResult<AssetUploadResponse>;
    /// `POST /upload_csv`, multipart `file` + `file_type`.
    fn upload_csv(&self, kind: CsvKind, path: &std::path::Path) -> ApiResult<CsvUploadResponse>;
    /// `POST /get_plot_data`.
    fn get_plot_data(&self, request: &PlotRequest) -> ApiResult<PlotResponse>;
    /// `POST /finetune_grid`.
    fn finetune(&self, request: &FinetuneRequest) -> ApiResult<FinetuneResponse>;
    /// `POST /get_calculated_contour`.
    fn get_calculated_contour(&self, request: &ContourRequest) -> ApiResult<ContourResponse>;
    /// `GET /get_overlap_data`.
    fn get_overlap_data(&self) -> ApiResult<OverlapResponse>;
    /// `GET /get_model_table_headers`.
    fn get_model_table_headers(&self) -> ApiResult<ModelTableHeaders>;
    /// `POST /model/save_model_config`.
    fn save_model_config(&self, config: &ModelConfig) -> ApiResult<SaveModelResponse>;
    /// `POST /model/load_model_config`.
    fn load_model_config(&self, filename: &str) -> ApiResult<LoadedModel>;
    /// `POST /model/delete_model_config`.
    fn delete_model_config(&self, filename: &str) -> ApiResult<MessageResponse>;
    /// `POST /model/run_calculation_demo`.
    fn run_calculation_demo(&self) -> ApiResult<CalculationDemoResponse>;
}

/// A backend call requested by the UI state.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    UploadAssetFolder(AssetFiles),
    UploadCsv { kind: CsvKind, path: PathBuf },
    PlotData(PlotRequest),
    OverlapData,
    CalculatedContour(ContourRequest),
    Finetune(FinetuneRequest),
    ModelTableHeaders,
    SaveModel(ModelConfig),
    LoadModel { filename: String },
    DeleteModel { filename: String },
    CalculationDemo,
}

impl ApiRequest {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ApiRequest::UploadAssetFolder(_) => "upload_asset_folder",
            ApiRequest::UploadCsv { .. } => "upload_csv",
            ApiRequest::PlotData(_) => "get_plot_data",
            ApiRequest::OverlapData => "get_overlap_data",
            ApiRequest::CalculatedContour(_) => "get_calculated_contour",
            ApiRequest::Finetune(_) => "finetune_grid",
            ApiRequest::ModelTableHeaders => "get_model_table_headers",
            ApiRequest::SaveModel(_) => "save_model_config",
            ApiRequest::LoadModel { .. } => "load_model_config",
            ApiRequest::DeleteModel { .. } => "delete_model_config",
            ApiRequest::CalculationDemo => "run_calculation_demo",
        }
    }

    /// Calls that may run for minutes and must not hold up the rest.
    pub fn is_long_running(&self) -> bool {
        matches!(self, ApiRequest::Finetune(_))
    }
}

/// Outcome of an [`ApiRequest`], carrying whatever context the handler needs.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    UploadAssetFolder {
        files: AssetFiles,
        result: ApiResult<AssetUploadResponse>,
    },
    UploadCsv {
        kind: CsvKind,
        path: PathBuf,
        result: ApiResult<CsvUploadResponse>,
    },
    PlotData(ApiResult<PlotResponse>),
    OverlapData(ApiResult<OverlapResponse>),
    CalculatedContour(ApiResult<ContourResponse>),
    Finetune(ApiResult<FinetuneResponse>),
    ModelTableHeaders(ApiResult<ModelTableHeaders>),
    SaveModel(ApiResult<SaveModelResponse>),
    LoadModel {
        filename: String,
        result: ApiResult<LoadedModel>,
    },
    DeleteModel {
        filename: String,
        result: ApiResult<MessageResponse>,
    },
    CalculationDemo(ApiResult<CalculationDemoResponse>),
}

impl ApiResponse {
    /// Error carried by the response, if the call failed.
    pub fn error(&self) -> Option<&crate::error::ApiError> {
        match self {
            ApiResponse::UploadAssetFolder { result, .. } => result.as_ref().err(),
            ApiResponse::UploadCsv { result, .. } => result.as_ref().err(),
            ApiResponse::PlotData(r) => r.as_ref().err(),
            ApiResponse::OverlapData(r) => r.as_ref().err(),
            ApiResponse::CalculatedContour(r) => r.as_ref().err(),
            ApiResponse::Finetune(r) => r.as_ref().err(),
            ApiResponse::ModelTableHeaders(r) => r.as_ref().err(),
            ApiResponse::SaveModel(r) => r.as_ref().err(),
            ApiResponse::LoadModel { result, .. } => result.as_ref().err(),
            ApiResponse::DeleteModel { result, .. } => result.as_ref().err(),
            ApiResponse::CalculationDemo(r) => r.as_ref().err(),
        }
    }
}

/// Run one request against `backend`.
pub fn dispatch<B: Backend + ?Sized>(backend: &B, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::UploadAssetFolder(files) => {
            let result = backend.upload_asset_folder(&files);
            ApiResponse::UploadAssetFolder { files, result }
        }
        ApiRequest::UploadCsv { kind, path } => {
            let result = backend.upload_csv(kind, &path);
            ApiResponse::UploadCsv { kind, path, result }
        }
        ApiRequest::PlotData(req) => ApiResponse::PlotData(backend.get_plot_data(&req)),
        ApiRequest::OverlapData => ApiResponse::OverlapData(backend.get_overlap_data()),
        ApiRequest::CalculatedContour(req) => {
            ApiResponse::CalculatedContour(backend.get_calculated_contour(&req))
        }
        ApiRequest::Finetune(req) => ApiResponse::Finetune(backend.finetune(&req)),
        ApiRequest::ModelTableHeaders => {
            ApiResponse::ModelTableHeaders(backend.get_model_table_headers())
        }
        ApiRequest::SaveModel(config) => ApiResponse::SaveModel(backend.save_model_config(&config)),
        ApiRequest::LoadModel { filename } => {
            let result = backend.load_model_config(&filename);
            ApiResponse::LoadModel { filename, result }
        }
        ApiRequest::DeleteModel { filename } => {
            let result = backend.delete_model_config(&filename);
            ApiResponse::DeleteModel { filename, result }
        }
        ApiRequest::CalculationDemo => ApiResponse::CalculationDemo(backend.run_calculation_demo()),
    }
}
