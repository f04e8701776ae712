//! All mutable client state and the handlers that change it.
//!
//! Handlers never touch the network. A handler that needs the backend returns
//! the [`ApiRequest`]s to issue; the caller hands them to the request worker
//! and feeds the matching [`ApiResponse`]s back through
//! [`AppState::apply_response`]. An empty list means nothing is sent.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use serde_json::Value;

use super::actions::{ActionInputs, ActionState};
use super::assets::{AssetFiles, CsvKind};
use super::axis::{AxisSelection, FeatureRole};
use super::chart::{ChartState, ContourGrid, SELECT_COLUMNS_TITLE};
use super::fitting::FittingAssignment;
use super::functions::{default_functions, FunctionField, FunctionTable};
use super::model::{file_name_of, FittingMethod, LoadedModel, ModelConfig, ModelSession};
use crate::api::types::{
    AssetUploadResponse, CalculationDemoResponse, ContourRequest, ContourResponse,
    CsvUploadResponse, FinetuneRequest, FinetuneResponse, MessageResponse, ModelTableHeaders,
    OverlapResponse, PlotRequest, PlotResponse, SaveModelResponse,
};
use crate::api::{ApiRequest, ApiResponse};
use crate::config::OverlaySource;
use crate::error::{ApiResult, AssetError};

/// How long a finished progress bar stays on screen.
pub const PROGRESS_HIDE_AFTER: Duration = Duration::from_secs(2);

pub const FINETUNE_RUNNING_TEXT: &str = "Finetuning...";
pub const FINETUNE_DONE_TEXT: &str = "Finetuning complete!";
pub const FINETUNE_FAILED_TEXT: &str = "Finetuning failed.";

// ── Notices ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub at: DateTime<Local>,
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// 0.0 ..= 1.0
    pub fraction: f32,
    pub text: String,
    pub failed: bool,
    finished_at: Option<Instant>,
}

impl Progress {
    fn started(text: &str) -> Self {
        Self {
            fraction: 0.0,
            text: text.to_string(),
            failed: false,
            finished_at: None,
        }
    }

    fn finished(text: &str, failed: bool) -> Self {
        Self {
            fraction: 1.0,
            text: text.to_string(),
            failed,
            finished_at: Some(Instant::now()),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Finished for at least [`PROGRESS_HIDE_AFTER`].
    pub fn expired(&self, now: Instant) -> bool {
        self.finished_at
            .is_some_and(|t| now.saturating_duration_since(t) >= PROGRESS_HIDE_AFTER)
    }
}

// ── Threshold ────────────────────────────────────────────────────────────────

/// Threshold button state and the typed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Threshold {
    pub active: bool,
    pub value: String,
}

impl Threshold {
    pub fn parsed(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

// ── AppState ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AppState {
    axis: AxisSelection,
    functions: FunctionTable,
    fitting: FittingAssignment,
    fitting_method: FittingMethod,
    /// Display name sent as `modelName` on save.
    pub model_name: String,
    /// Model file typed or picked for loading/deleting.
    pub model_file_input: String,
    session: ModelSession,
    chart: ChartState,
    actions: ActionState,
    overlay_checked: bool,
    overlay_source: OverlaySource,
    threshold: Threshold,
    progress: Option<Progress>,
    finetune_running: bool,
    notices: VecDeque<Notice>,
    asset_folder: Option<String>,
    pending_delete: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(OverlaySource::default())
    }
}

impl AppState {
    pub fn new(overlay_source: OverlaySource) -> Self {
        Self {
            axis: AxisSelection::new(),
            functions: FunctionTable::default(),
            fitting: FittingAssignment::new(),
            fitting_method: FittingMethod::default(),
            model_name: String::new(),
            model_file_input: String::new(),
            session: ModelSession::default(),
            chart: ChartState::default(),
            actions: ActionState::default(),
            overlay_checked: false,
            overlay_source,
            threshold: Threshold::default(),
            progress: None,
            finetune_running: false,
            notices: VecDeque::new(),
            asset_folder: None,
            pending_delete: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn axis(&self) -> &AxisSelection {
        &self.axis
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn fitting(&self) -> &FittingAssignment {
        &self.fitting
    }

    pub fn fitting_method(&self) -> FittingMethod {
        self.fitting_method
    }

    pub fn session(&self) -> &ModelSession {
        &self.session
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn actions(&self) -> ActionState {
        self.actions
    }

    pub fn overlay_checked(&self) -> bool {
        self.overlay_checked
    }

    pub fn overlay_source(&self) -> OverlaySource {
        self.overlay_source
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    pub fn finetune_running(&self) -> bool {
        self.finetune_running
    }

    pub fn asset_folder(&self) -> Option<&str> {
        self.asset_folder.as_deref()
    }

    /// Model file load/delete needs an asset folder first.
    pub fn model_actions_enabled(&self) -> bool {
        self.asset_folder.is_some()
    }

    /// Saving needs both header lists.
    pub fn save_enabled(&self) -> bool {
        self.axis.has_headers()
    }

    /// Model name waiting for delete confirmation.
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    /// Oldest unacknowledged notice.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Threshold applied to the overlay, when the threshold button is active.
    pub fn overlay_threshold(&self) -> Option<f64> {
        if self.actions.threshold_active {
            self.threshold.parsed()
        } else {
            None
        }
    }

    /// Overlay cells to draw, `(x0, x1, y0, y1, z)`; cells under the threshold are hidden.
    pub fn visible_overlay_cells(&self) -> Vec<(f64, f64, f64, f64, f64)> {
        let threshold = self.overlay_threshold();
        self.chart
            .overlay()
            .map(|grid| {
                grid.cells()
                    .into_iter()
                    .filter(|cell| threshold.map_or(true, |t| cell.4 >= t))
                    .collect()
            })
            .unwrap_or_default()
    }

    // ── Notices (internal) ───────────────────────────────────────────────────

    fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!("{}", text);
        self.notices.push_back(Notice {
            kind: NoticeKind::Info,
            text,
            at: Local::now(),
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!("{}", text);
        self.notices.push_back(Notice {
            kind: NoticeKind::Error,
            text,
            at: Local::now(),
        });
    }

    // ── Action state ─────────────────────────────────────────────────────────

    /// Re-derive control enablement. A checked overlay whose preconditions no
    /// longer hold is switched off and its trace removed.
    pub fn recompute_actions(&mut self) {
        let actions = ActionState::derive(ActionInputs {
            model_loaded: self.session.is_loaded(),
            axis_selected: self.axis.axis_params_selected(),
            overlay_checked: self.overlay_checked,
            threshold_active: self.threshold.active,
            finetune_running: self.finetune_running,
        });
        if actions.overlay_forced_off {
            tracing::info!("overlay switched off: no model loaded or axes incomplete");
            self.overlay_checked = false;
            self.chart.remove_overlay();
        }
        if !actions.threshold_enabled {
            self.threshold.active = false;
        }
        self.actions = actions;
    }

    /// Drop a finished progress bar once it has been shown long enough.
    pub fn tick(&mut self, now: Instant) {
        if self.progress.as_ref().is_some_and(|p| p.expired(now)) {
            self.progress = None;
        }
    }

    // ── Assets and columns ───────────────────────────────────────────────────

    /// Upload the CSV pair of a chosen folder.
    pub fn select_asset_folder(&mut self, files: AssetFiles) -> Vec<ApiRequest> {
        tracing::info!(folder = %files.folder.display(), "uploading asset folder");
        vec![ApiRequest::UploadAssetFolder(files)]
    }

    /// The chosen folder did not contain the expected files.
    pub fn asset_folder_failed(&mut self, err: &AssetError) -> Vec<ApiRequest> {
        self.error(err.to_string());
        self.clear_assets()
    }

    /// Forget the asset folder, its columns and every selection.
    pub fn clear_assets(&mut self) -> Vec<ApiRequest> {
        self.asset_folder = None;
        self.axis.clear();
        self.fitting.clear();
        self.headers_changed()
    }

    /// Upload one CSV file for either side.
    pub fn upload_csv(&mut self, kind: CsvKind, path: PathBuf) -> Vec<ApiRequest> {
        vec![ApiRequest::UploadCsv { kind, path }]
    }

    /// Re-read the column lists from the backend.
    pub fn resync_headers(&mut self) -> Vec<ApiRequest> {
        vec![ApiRequest::ModelTableHeaders]
    }

    fn headers_changed(&mut self) -> Vec<ApiRequest> {
        self.rebuild_fitting();
        self.update_plot()
    }

    fn rebuild_fitting(&mut self) {
        if !self.axis.has_headers() {
            self.session.unload();
        }
        self.fitting.rebuild(
            &self.axis.fitting_features(),
            &self.axis.fitting_targets(),
            &self.functions.names(),
        );
    }

    pub fn set_role(&mut self, column: &str, role: FeatureRole) -> Vec<ApiRequest> {
        if self.axis.set_role(column, role) {
            self.update_plot()
        } else {
            Vec::new()
        }
    }

    /// Store the constant text; a plot is requested only once it is a number.
    pub fn set_constant(&mut self, column: &str, value: impl Into<String>) -> Vec<ApiRequest> {
        if self.axis.set_constant(column, value) && self.axis.constants_valid() {
            self.update_plot()
        } else {
            Vec::new()
        }
    }

    pub fn set_target(&mut self, target: Option<String>) -> Vec<ApiRequest> {
        self.axis.set_target(target);
        self.update_plot()
    }

    // ── Plot and overlay ─────────────────────────────────────────────────────

    /// Request a new base plot, or show the column prompt if axes are incomplete.
    pub fn update_plot(&mut self) -> Vec<ApiRequest> {
        self.recompute_actions();
        let Some(target) = self
            .axis
            .target()
            .filter(|_| self.axis.axis_params_selected())
            .map(str::to_string)
        else {
            self.chart = ChartState::placeholder(SELECT_COLUMNS_TITLE);
            return Vec::new();
        };
        if !self.axis.constants_valid() {
            tracing::debug!("constant value is not a number; plot request held back");
            return Vec::new();
        }
        vec![ApiRequest::PlotData(PlotRequest {
            feature_params: self.axis.feature_params(),
            target_param: target,
        })]
    }

    /// Switch the overlay on or off.
    pub fn toggle_overlay(&mut self, on: bool) -> Vec<ApiRequest> {
        self.recompute_actions();
        if on && !self.actions.overlay_enabled {
            self.overlay_checked = false;
            return Vec::new();
        }
        self.overlay_checked = on;
        self.chart.remove_overlay();
        self.recompute_actions();
        if on {
            self.overlay_request()
        } else {
            Vec::new()
        }
    }

    fn overlay_request(&mut self) -> Vec<ApiRequest> {
        match self.overlay_source {
            OverlaySource::OverlapData => vec![ApiRequest::OverlapData],
            OverlaySource::CalculatedContour => {
                let file = self.session.base_file().map(str::to_string);
                let target = self.axis.target().map(str::to_string);
                let (Some(file), Some(target)) = (file, target) else {
                    self.error("The overlap needs a saved model file and a target column.");
                    self.force_overlay_off();
                    return Vec::new();
                };
                vec![ApiRequest::CalculatedContour(ContourRequest {
                    json_filename: file,
                    feature_params: self.axis.feature_params(),
                    target_param: target,
                })]
            }
        }
    }

    fn force_overlay_off(&mut self) {
        self.overlay_checked = false;
        self.chart.remove_overlay();
        self.recompute_actions();
    }

    fn apply_plot(&mut self, result: ApiResult<PlotResponse>) -> Vec<ApiRequest> {
        if !self.axis.axis_params_selected() {
            tracing::debug!("dropping plot response; axis selection is incomplete");
            return Vec::new();
        }
        let chart =
            result.and_then(|resp| ChartState::from_plotly(&resp.graph_json, &resp.layout_json));
        match chart {
            Ok(chart) => {
                self.chart = chart;
                if self.overlay_checked {
                    self.overlay_request()
                } else {
                    Vec::new()
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "plot request failed");
                self.chart = ChartState::error(&err.user_message());
                Vec::new()
            }
        }
    }

    fn apply_overlay(&mut self, grid: ApiResult<Option<ContourGrid>>) {
        if !self.overlay_checked {
            tracing::debug!("dropping overlay response; overlay is off");
            return;
        }
        match grid {
            Ok(Some(grid)) if !grid.is_empty() => self.chart.set_overlay(grid),
            Ok(_) => tracing::debug!("backend has no overlap grid yet"),
            Err(err) => {
                self.error(format!("Could not show the overlap: {}", err.user_message()));
                self.force_overlay_off();
            }
        }
    }

    // ── Threshold ────────────────────────────────────────────────────────────

    /// Flip the threshold button. Ignored while the control is disabled.
    pub fn toggle_threshold(&mut self) {
        if self.actions.threshold_enabled {
            self.threshold.active = !self.threshold.active;
            self.recompute_actions();
        }
    }

    pub fn set_threshold_value(&mut self, value: impl Into<String>) {
        self.threshold.value = value.into();
    }

    // ── Finetune ─────────────────────────────────────────────────────────────

    pub fn finetune(&mut self) -> Vec<ApiRequest> {
        let Some(base) = self.session.base_file().map(str::to_string) else {
            self.error("No base model is loaded.");
            return Vec::new();
        };
        if !self.actions.finetune_enabled {
            tracing::debug!(running = self.finetune_running, "finetune is not available");
            return Vec::new();
        }
        tracing::info!(base_model = %base, "starting finetune");
        self.finetune_running = true;
        self.progress = Some(Progress::started(FINETUNE_RUNNING_TEXT));
        self.recompute_actions();
        vec![ApiRequest::Finetune(FinetuneRequest {
            base_model_filename: base,
        })]
    }

    fn apply_finetune(&mut self, result: ApiResult<FinetuneResponse>) {
        self.finetune_running = false;
        match result {
            Ok(resp) => {
                self.info(format!("{}\nNew model: {}", resp.message, resp.new_model_name));
                self.progress = Some(Progress::finished(FINETUNE_DONE_TEXT, false));
            }
            Err(err) => {
                self.error(format!("Finetuning failed: {}", err.user_message()));
                self.progress = Some(Progress::finished(FINETUNE_FAILED_TEXT, true));
            }
        }
        self.recompute_actions();
    }

    // ── Functions and fitting ────────────────────────────────────────────────

    pub fn add_function(&mut self) {
        self.functions.add();
        self.rebuild_fitting();
    }

    pub fn remove_last_function(&mut self) {
        if self.functions.remove_last() {
            self.rebuild_fitting();
        }
    }

    /// Edit one field of a function row. Renaming refreshes the matrix choices.
    pub fn edit_function(&mut self, index: usize, field: FunctionField, value: impl Into<String>) {
        if self.functions.set_field(index, field, value) && field == FunctionField::Name {
            self.rebuild_fitting();
        }
    }

    /// Choose the function of one matrix cell; an empty name clears it.
    pub fn assign_function(&mut self, feature: &str, target: &str, function: impl Into<String>) -> bool {
        self.fitting.assign(feature, target, function)
    }

    pub fn set_fitting_method(&mut self, method: FittingMethod) {
        self.fitting_method = method;
    }

    // ── Model files ──────────────────────────────────────────────────────────

    /// Validate the function table and send the model settings.
    pub fn save_model(&mut self) -> Vec<ApiRequest> {
        if let Err(err) = self.functions.validate() {
            self.error(err.to_string());
            return Vec::new();
        }
        self.rebuild_fitting();
        let config = ModelConfig {
            model_name: self.model_name.trim().to_string(),
            fitting_config: self.fitting.to_payload(),
            fitting_method: self.fitting_method,
            functions: self.functions.to_payload(),
        };
        tracing::info!(model = %config.model_name, "saving model settings");
        vec![ApiRequest::SaveModel(config)]
    }

    fn apply_save(&mut self, result: ApiResult<SaveModelResponse>) -> Vec<ApiRequest> {
        match result {
            Ok(resp) => {
                self.info(format!("Settings saved: {}", resp.message));
                let file = resp.filepath.as_deref().and_then(file_name_of);
                if let Some(file) = &file {
                    self.model_file_input = file.clone();
                }
                self.session.mark_loaded(file);
                self.update_plot()
            }
            Err(err) => {
                self.error(format!("Could not save the settings: {}", err.user_message()));
                self.session.unload();
                self.recompute_actions();
                Vec::new()
            }
        }
    }

    /// Load a saved model by file name. An empty name resets the model settings.
    pub fn load_model(&mut self, filename: &str) -> Vec<ApiRequest> {
        let filename = filename.trim();
        if filename.is_empty() {
            return self.reset_model();
        }
        self.model_file_input = filename.to_string();
        vec![ApiRequest::LoadModel {
            filename: filename.to_string(),
        }]
    }

    fn apply_load(&mut self, filename: String, result: ApiResult<LoadedModel>) -> Vec<ApiRequest> {
        match result {
            Ok(model) => {
                let message = model
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("Model \"{filename}\" loaded."));
                self.info(message);
                self.model_name = model.model_name.clone().unwrap_or_else(|| filename.clone());
                self.fitting_method = model.method();
                self.functions
                    .replace(model.functions.clone().unwrap_or_else(default_functions));
                self.fitting = FittingAssignment::from_map(model.assignment());
                self.rebuild_fitting();
                self.session.mark_loaded(Some(filename.clone()));
                self.model_file_input = filename;
                self.update_plot()
            }
            Err(err) => {
                self.error(format!("Could not load the model: {}", err.user_message()));
                self.model_file_input.clear();
                self.reset_model()
            }
        }
    }

    /// Ask for confirmation before deleting `filename`.
    pub fn request_delete(&mut self, filename: &str) {
        let filename = filename.trim();
        if !filename.is_empty() {
            self.pending_delete = Some(filename.to_string());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Vec<ApiRequest> {
        match self.pending_delete.take() {
            Some(filename) => vec![ApiRequest::DeleteModel { filename }],
            None => Vec::new(),
        }
    }

    fn apply_delete(&mut self, filename: String, result: ApiResult<MessageResponse>) -> Vec<ApiRequest> {
        match result {
            Ok(_) => {
                self.info(format!("Model \"{filename}\" deleted."));
                self.model_file_input.clear();
                self.reset_model()
            }
            Err(err) => {
                self.error(format!("Could not delete the model: {}", err.user_message()));
                Vec::new()
            }
        }
    }

    /// Back to the example functions with nothing loaded; the overlay goes off.
    pub fn reset_model(&mut self) -> Vec<ApiRequest> {
        tracing::info!("resetting model settings");
        self.fitting.clear();
        self.functions.reset();
        self.session.clear();
        self.fitting_method = FittingMethod::default();
        self.model_name.clear();
        self.rebuild_fitting();
        self.overlay_checked = false;
        self.chart.remove_overlay();
        self.update_plot()
    }

    pub fn run_calculation_demo(&mut self) -> Vec<ApiRequest> {
        vec![ApiRequest::CalculationDemo]
    }

    // ── Responses ────────────────────────────────────────────────────────────

    /// Apply a finished backend call. Returns any follow-up requests.
    pub fn apply_response(&mut self, response: ApiResponse) -> Vec<ApiRequest> {
        match response {
            ApiResponse::UploadAssetFolder { files, result } => self.apply_asset_upload(files, result),
            ApiResponse::UploadCsv { kind, path, result } => self.apply_csv_upload(kind, path, result),
            ApiResponse::PlotData(result) => self.apply_plot(result),
            ApiResponse::OverlapData(result) => {
                self.apply_overlay(result.and_then(overlap_grid));
                Vec::new()
            }
            ApiResponse::CalculatedContour(result) => {
                self.apply_overlay(result.and_then(contour_grid).map(Some));
                Vec::new()
            }
            ApiResponse::Finetune(result) => {
                self.apply_finetune(result);
                Vec::new()
            }
            ApiResponse::ModelTableHeaders(result) => self.apply_table_headers(result),
            ApiResponse::SaveModel(result) => self.apply_save(result),
            ApiResponse::LoadModel { filename, result } => self.apply_load(filename, result),
            ApiResponse::DeleteModel { filename, result } => self.apply_delete(filename, result),
            ApiResponse::CalculationDemo(result) => {
                self.apply_demo(result);
                Vec::new()
            }
        }
    }

    fn apply_asset_upload(
        &mut self,
        files: AssetFiles,
        result: ApiResult<AssetUploadResponse>,
    ) -> Vec<ApiRequest> {
        match result {
            Ok(resp) => {
                tracing::info!(
                    folder = %files.folder.display(),
                    features = resp.headers.feature.len(),
                    targets = resp.headers.target.len(),
                    "asset folder loaded"
                );
                self.asset_folder = Some(files.folder_name());
                self.axis.clear();
                self.axis.set_feature_headers(resp.headers.feature);
                self.axis.set_target_headers(resp.headers.target);
                self.fitting.clear();
                self.headers_changed()
            }
            Err(err) => {
                self.error(format!("Could not upload the folder: {}", err.user_message()));
                self.clear_assets()
            }
        }
    }

    fn apply_csv_upload(
        &mut self,
        kind: CsvKind,
        path: PathBuf,
        result: ApiResult<CsvUploadResponse>,
    ) -> Vec<ApiRequest> {
        match result {
            Ok(CsvUploadResponse {
                headers: Some(headers),
                ..
            }) => {
                tracing::info!(kind = kind.as_str(), columns = headers.len(), "csv uploaded");
                match kind {
                    CsvKind::Feature => self.axis.set_feature_headers(headers),
                    CsvKind::Target => self.axis.set_target_headers(headers),
                }
                self.headers_changed()
            }
            Ok(_) => {
                self.info(format!("Uploaded {}.", path.display()));
                Vec::new()
            }
            Err(err) => {
                self.error(format!("Could not upload the file: {}", err.user_message()));
                match kind {
                    CsvKind::Feature => self.axis.set_feature_headers(Vec::new()),
                    CsvKind::Target => self.axis.set_target_headers(Vec::new()),
                }
                self.headers_changed()
            }
        }
    }

    fn apply_table_headers(&mut self, result: ApiResult<ModelTableHeaders>) -> Vec<ApiRequest> {
        match result {
            Ok(headers) => {
                self.axis.set_feature_headers(headers.feature_headers);
                self.axis.set_target_headers(headers.target_headers);
                self.headers_changed()
            }
            Err(err) => {
                self.error(format!("Could not read the column lists: {}", err.user_message()));
                Vec::new()
            }
        }
    }

    fn apply_demo(&mut self, result: ApiResult<CalculationDemoResponse>) {
        match result {
            Ok(resp) => {
                let mut text = resp
                    .message
                    .unwrap_or_else(|| "Calculation finished.".to_string());
                if let Some(n) = resp.num_points {
                    text.push_str(&format!(" ({n} points)"));
                }
                self.info(text);
            }
            Err(err) => self.error(format!("Calculation failed: {}", err.user_message())),
        }
    }
}

/// `data: null` means the backend has not computed a grid yet.
fn overlap_grid(resp: OverlapResponse) -> ApiResult<Option<ContourGrid>> {
    match resp.data {
        None | Some(Value::Null) => Ok(None),
        Some(data) => ContourGrid::from_value(&data).map(Some),
    }
}

fn contour_grid(resp: ContourResponse) -> ApiResult<ContourGrid> {
    let trace: Value = serde_json::from_str(&resp.contour_json)?;
    ContourGrid::from_value(&trace)
}
