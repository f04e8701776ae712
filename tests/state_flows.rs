use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::json;

use fitscope::api::types::{
    AssetHeaders, AssetUploadResponse, FinetuneResponse, OverlapResponse, PlotResponse,
    SaveModelResponse,
};
use fitscope::api::{ApiRequest, ApiResponse};
use fitscope::data::assets::AssetFiles;
use fitscope::data::axis::FeatureRole;
use fitscope::data::chart::{OVERLAY_TRACE_ID, SELECT_COLUMNS_TITLE};
use fitscope::data::functions::FunctionField;
use fitscope::data::model::{FittingMethod, LoadedModel};
use fitscope::data::state::{AppState, NoticeKind, FINETUNE_DONE_TEXT, FINETUNE_RUNNING_TEXT};
use fitscope::error::ApiError;

fn asset_files() -> AssetFiles {
    AssetFiles {
        folder: PathBuf::from("/data/run_01"),
        feature: PathBuf::from("/data/run_01/Feature.csv"),
        target: PathBuf::from("/data/run_01/Target.csv"),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn plot_ok() -> ApiResponse {
    ApiResponse::PlotData(Ok(PlotResponse {
        graph_json: json!([{"x": [1, 2], "y": [3, 4], "marker": {"color": [0.5, 0.7]}}]).to_string(),
        layout_json: json!({"title": {"text": "yield"}}).to_string(),
    }))
}

fn overlap_ok() -> ApiResponse {
    ApiResponse::OverlapData(Ok(OverlapResponse {
        data: Some(json!({"X": [0.0, 1.0], "Y": [0.0, 1.0], "Z": [[1.0, 2.0], [3.0, 4.0]]})),
        message: None,
    }))
}

fn overlay_traces(state: &AppState) -> usize {
    state
        .chart()
        .traces()
        .iter()
        .filter(|t| t.uid.as_deref() == Some(OVERLAY_TRACE_ID))
        .count()
}

/// Asset folder uploaded, but no columns selected yet.
fn with_assets() -> AppState {
    let mut state = AppState::default();
    let requests = state.select_asset_folder(asset_files());
    assert_eq!(requests, vec![ApiRequest::UploadAssetFolder(asset_files())]);
    let follow_up = state.apply_response(ApiResponse::UploadAssetFolder {
        files: asset_files(),
        result: Ok(AssetUploadResponse {
            message: None,
            headers: AssetHeaders {
                feature: strings(&["main_id", "temp", "time", "pressure"]),
                target: strings(&["main_id", "yield"]),
            },
        }),
    });
    assert!(follow_up.is_empty());
    state
}

/// Columns selected and a plot shown.
fn with_plot() -> AppState {
    let mut state = with_assets();
    assert!(state.set_role("temp", FeatureRole::XAxis).is_empty());
    assert!(state.set_role("time", FeatureRole::YAxis).is_empty());
    let requests = state.set_target(Some("yield".to_string()));
    assert!(matches!(requests.as_slice(), [ApiRequest::PlotData(_)]));
    assert!(state.apply_response(plot_ok()).is_empty());
    state
}

/// Plot shown and a saved model loaded, so the overlay may be used.
fn with_model() -> AppState {
    let mut state = with_plot();
    let requests = state.load_model(" m1.json ");
    assert_eq!(
        requests,
        vec![ApiRequest::LoadModel {
            filename: "m1.json".to_string()
        }]
    );
    let model: LoadedModel = serde_json::from_value(json!({
        "model_name": "m1",
        "fittingMethod": "乗積",
        "functions": [{"name": "Linear", "equation": "m * x + b", "parameters": "m=1, b=0"}],
        "fittingConfig": {"temp": {"yield": "Linear"}, "time": {"yield": null}}
    }))
    .unwrap();
    let follow_up = state.apply_response(ApiResponse::LoadModel {
        filename: "m1.json".to_string(),
        result: Ok(model),
    });
    assert!(matches!(follow_up.as_slice(), [ApiRequest::PlotData(_)]));
    state
}

#[test]
fn asset_upload_fills_columns_and_prompts_for_selection() {
    let state = with_assets();
    assert_eq!(state.asset_folder(), Some("run_01"));
    assert_eq!(state.axis().features().len(), 3);
    assert!(state.save_enabled());
    assert!(state.model_actions_enabled());
    assert_eq!(state.chart().title, SELECT_COLUMNS_TITLE);
    assert_eq!(state.fitting().rows().count(), 3);
}

#[test]
fn failed_asset_upload_clears_everything() {
    let mut state = with_assets();
    state.apply_response(ApiResponse::UploadAssetFolder {
        files: asset_files(),
        result: Err(ApiError::Transport("connection refused".into())),
    });
    assert_eq!(state.asset_folder(), None);
    assert!(!state.axis().has_headers());
    assert_eq!(state.current_notice().map(|n| n.kind), Some(NoticeKind::Error));
}

#[test]
fn plot_request_carries_the_selection() {
    let mut state = with_assets();
    state.set_role("temp", FeatureRole::XAxis);
    state.set_role("time", FeatureRole::YAxis);
    state.set_constant("pressure", "2.5");
    let requests = state.set_target(Some("yield".to_string()));
    let [ApiRequest::PlotData(req)] = requests.as_slice() else {
        panic!("expected one plot request, got {requests:?}");
    };
    assert_eq!(req.target_param, "yield");
    assert_eq!(req.feature_params[2].value, "2.5");
}

#[test]
fn non_numeric_constant_holds_back_the_plot() {
    let mut state = with_plot();
    assert!(state.set_constant("pressure", "abc").is_empty());
    assert!(state.set_constant("pressure", "inf").is_empty());
    assert!(state.set_constant("pressure", "").is_empty());
    assert!(state.set_target(Some("yield".to_string())).is_empty());
    assert_eq!(state.axis().features()[2].constant, "");

    let requests = state.set_constant("pressure", "-1.5e2");
    let [ApiRequest::PlotData(req)] = requests.as_slice() else {
        panic!("expected one plot request, got {requests:?}");
    };
    assert_eq!(req.feature_params[2].value, "-1.5e2");
}

#[test]
fn failed_plot_shows_placeholder_without_traces() {
    let mut state = with_plot();
    assert!(!state.chart().is_placeholder());
    state.apply_response(ApiResponse::PlotData(Err(ApiError::Rejected {
        status: Some(500),
        message: "boom".into(),
    })));
    assert!(state.chart().is_placeholder());
    assert!(state.chart().traces().is_empty());
    assert!(state.chart().title.starts_with("Plot error"));
}

#[test]
fn plot_response_after_selection_broke_is_dropped() {
    let mut state = with_assets();
    state.set_role("temp", FeatureRole::XAxis);
    state.set_role("time", FeatureRole::YAxis);
    state.set_target(Some("yield".to_string()));
    state.set_target(None);
    state.apply_response(plot_ok());
    assert!(state.chart().is_placeholder());
    assert_eq!(state.chart().title, SELECT_COLUMNS_TITLE);
}

#[test]
fn overlay_without_model_stays_off() {
    let mut state = with_plot();
    assert!(state.toggle_overlay(true).is_empty());
    assert!(!state.overlay_checked());
    assert_eq!(overlay_traces(&state), 0);
}

#[test]
fn loaded_model_replaces_settings() {
    let state = with_model();
    assert!(state.session().is_loaded());
    assert_eq!(state.session().base_file(), Some("m1.json"));
    assert_eq!(state.model_name, "m1");
    assert_eq!(state.fitting_method(), FittingMethod::Product);
    assert_eq!(state.functions().names(), vec!["Linear"]);
    assert_eq!(state.fitting().get("temp", "yield"), Some("Linear"));
    assert_eq!(state.fitting().get("time", "yield"), None);
    assert!(state.actions().overlay_enabled);
}

#[test]
fn load_with_empty_function_list_keeps_it_empty() {
    let mut state = AppState::default();
    let model: LoadedModel = serde_json::from_value(json!({
        "model_name": "m1",
        "fittingMethod": "線形結合",
        "functions": [],
        "fittingConfig": {}
    }))
    .unwrap();
    state.apply_response(ApiResponse::LoadModel {
        filename: "m1.json".to_string(),
        result: Ok(model),
    });
    assert!(state.session().is_loaded());
    assert!(state.functions().is_empty());
    assert_eq!(state.fitting_method(), FittingMethod::LinearCombination);
}

#[test]
fn failed_load_resets_model_settings() {
    let mut state = with_model();
    state.apply_response(ApiResponse::LoadModel {
        filename: "gone.json".to_string(),
        result: Err(ApiError::Rejected {
            status: Some(404),
            message: "not found".into(),
        }),
    });
    assert!(!state.session().is_loaded());
    assert_eq!(state.functions().len(), 6);
    assert!(state.model_file_input.is_empty());
}

#[test]
fn overlay_on_then_off_leaves_no_trace() {
    let mut state = with_model();
    assert_eq!(state.toggle_overlay(true), vec![ApiRequest::OverlapData]);
    state.apply_response(overlap_ok());
    assert_eq!(overlay_traces(&state), 1);
    assert!(state.toggle_overlay(false).is_empty());
    assert_eq!(overlay_traces(&state), 0);
}

#[test]
fn overlay_on_twice_draws_one_trace() {
    let mut state = with_model();
    state.toggle_overlay(true);
    state.toggle_overlay(true);
    state.apply_response(overlap_ok());
    state.apply_response(overlap_ok());
    assert_eq!(overlay_traces(&state), 1);
}

#[test]
fn overlay_response_after_toggle_off_is_dropped() {
    let mut state = with_model();
    state.toggle_overlay(true);
    state.toggle_overlay(false);
    state.apply_response(overlap_ok());
    assert_eq!(overlay_traces(&state), 0);
}

#[test]
fn null_overlap_data_draws_nothing() {
    let mut state = with_model();
    state.toggle_overlay(true);
    state.apply_response(ApiResponse::OverlapData(Ok(OverlapResponse {
        data: None,
        message: Some("not calculated".into()),
    })));
    assert!(state.overlay_checked());
    assert_eq!(overlay_traces(&state), 0);
}

#[test]
fn breaking_the_selection_forces_overlay_off() {
    let mut state = with_model();
    state.toggle_overlay(true);
    state.apply_response(overlap_ok());
    assert!(state.set_target(None).is_empty());
    assert!(!state.overlay_checked());
    assert_eq!(overlay_traces(&state), 0);
    assert!(!state.actions().threshold_enabled);
}

#[test]
fn replot_refetches_the_overlay() {
    let mut state = with_model();
    state.toggle_overlay(true);
    state.apply_response(overlap_ok());
    assert_eq!(state.apply_response(plot_ok()), vec![ApiRequest::OverlapData]);
}

#[test]
fn threshold_hides_low_cells() {
    let mut state = with_model();
    state.toggle_overlay(true);
    state.apply_response(overlap_ok());
    assert_eq!(state.visible_overlay_cells().len(), 4);

    state.set_threshold_value("2.5");
    assert_eq!(state.visible_overlay_cells().len(), 4);
    state.toggle_threshold();
    assert!(state.threshold().active);
    let cells = state.visible_overlay_cells();
    assert_eq!(cells.len(), 2);
    assert!(cells.iter().all(|c| c.4 >= 2.5));

    state.set_threshold_value("abc");
    assert_eq!(state.visible_overlay_cells().len(), 4);
}

#[test]
fn threshold_is_ignored_while_disabled() {
    let mut state = with_plot();
    state.toggle_threshold();
    assert!(!state.threshold().active);
}

#[test]
fn save_rejects_invalid_function_name() {
    let mut state = with_assets();
    state.edit_function(0, FunctionField::Name, "1bad");
    assert!(state.save_model().is_empty());
    let notice = state.current_notice().expect("validation notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("1bad"));
}

#[test]
fn save_sends_the_model_settings() {
    let mut state = with_assets();
    state.edit_function(0, FunctionField::Name, "good_1");
    state.edit_function(0, FunctionField::Equation, "m*x+b");
    state.edit_function(0, FunctionField::Parameters, "m=0.1,b=0.0");
    state.assign_function("temp", "yield", "good_1");
    state.model_name = "  law model ".to_string();

    let requests = state.save_model();
    let [ApiRequest::SaveModel(config)] = requests.as_slice() else {
        panic!("expected one save request, got {requests:?}");
    };
    assert_eq!(config.model_name, "law model");
    assert_eq!(config.functions[0].name, "good_1");
    assert_eq!(config.fitting_config["temp"]["yield"], "good_1");

    let body = serde_json::to_value(config).unwrap();
    assert_eq!(body["fittingMethod"], "線形結合");
    assert!(body.get("fittingConfig").is_some());
}

#[test]
fn save_response_records_base_model() {
    let mut state = with_plot();
    state.save_model();
    let follow_up = state.apply_response(ApiResponse::SaveModel(Ok(SaveModelResponse {
        message: "saved".into(),
        filepath: Some("/srv/models/LAW_MODEL_1.json".into()),
    })));
    assert!(matches!(follow_up.as_slice(), [ApiRequest::PlotData(_)]));
    assert!(state.session().is_loaded());
    assert_eq!(state.session().base_file(), Some("LAW_MODEL_1.json"));
    assert_eq!(state.model_file_input, "LAW_MODEL_1.json");
}

#[test]
fn failed_save_marks_nothing_loaded() {
    let mut state = with_model();
    state.apply_response(ApiResponse::SaveModel(Err(ApiError::Status { status: 500 })));
    assert!(!state.session().is_loaded());
    assert!(!state.actions().overlay_enabled);
}

#[test]
fn finetune_without_base_model_sends_nothing() {
    let mut state = with_plot();
    assert!(state.finetune().is_empty());
    assert_eq!(
        state.current_notice().map(|n| n.text.as_str()),
        Some("No base model is loaded.")
    );
    assert!(state.progress().is_none());
}

#[test]
fn finetune_follows_the_overlay_toggle() {
    let mut state = with_model();
    assert!(!state.actions().finetune_enabled);
    assert!(state.finetune().is_empty());
    assert!(!state.finetune_running());
    assert!(state.progress().is_none());

    state.toggle_overlay(true);
    assert!(state.actions().finetune_enabled);
    assert_eq!(state.finetune().len(), 1);
}

#[test]
fn finetune_progress_runs_and_hides() {
    let mut state = with_model();
    state.toggle_overlay(true);
    let requests = state.finetune();
    let [ApiRequest::Finetune(req)] = requests.as_slice() else {
        panic!("expected one finetune request, got {requests:?}");
    };
    assert_eq!(req.base_model_filename, "m1.json");
    assert!(state.finetune_running());
    assert!(state.finetune().is_empty());

    let progress = state.progress().unwrap();
    assert_eq!(progress.fraction, 0.0);
    assert_eq!(progress.text, FINETUNE_RUNNING_TEXT);

    state.apply_response(ApiResponse::Finetune(Ok(FinetuneResponse {
        message: "done".into(),
        new_model_name: "m1_ft".into(),
    })));
    assert!(!state.finetune_running());
    let progress = state.progress().unwrap();
    assert_eq!(progress.fraction, 1.0);
    assert_eq!(progress.text, FINETUNE_DONE_TEXT);

    state.tick(Instant::now());
    assert!(state.progress().is_some());
    state.tick(Instant::now() + Duration::from_secs(3));
    assert!(state.progress().is_none());
}

#[test]
fn delete_needs_confirmation_and_resets() {
    let mut state = with_model();
    state.request_delete("m1.json");
    assert_eq!(state.pending_delete(), Some("m1.json"));
    state.cancel_delete();
    assert!(state.confirm_delete().is_empty());

    state.request_delete("m1.json");
    assert_eq!(
        state.confirm_delete(),
        vec![ApiRequest::DeleteModel {
            filename: "m1.json".to_string()
        }]
    );
    state.toggle_overlay(true);
    state.apply_response(ApiResponse::DeleteModel {
        filename: "m1.json".to_string(),
        result: Ok(Default::default()),
    });
    assert!(!state.session().is_loaded());
    assert!(!state.overlay_checked());
    assert_eq!(state.session().base_file(), None);
}

#[test]
fn empty_model_name_load_resets() {
    let mut state = with_model();
    assert!(matches!(
        state.load_model("   ").as_slice(),
        [ApiRequest::PlotData(_)]
    ));
    assert!(!state.session().is_loaded());
    assert_eq!(state.fitting_method(), FittingMethod::LinearCombination);
}

#[test]
fn notices_queue_in_order() {
    let mut state = with_plot();
    state.finetune();
    state.edit_function(0, FunctionField::Name, "");
    state.save_model();
    assert_eq!(state.notices().count(), 2);
    state.dismiss_notice();
    assert_eq!(state.notices().count(), 1);
    assert!(state.current_notice().unwrap().text.contains("Function name"));
}
