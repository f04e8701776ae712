use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fitscope::api::types::{
    AssetHeaders, AssetUploadResponse, CalculationDemoResponse, ContourRequest, ContourResponse,
    CsvUploadResponse, FinetuneRequest, FinetuneResponse, MessageResponse, ModelTableHeaders,
    OverlapResponse, PlotRequest, PlotResponse, SaveModelResponse,
};
use fitscope::api::{ApiRequest, ApiResponse, Backend, RequestWorker};
use fitscope::data::assets::{AssetFiles, CsvKind};
use fitscope::data::model::{LoadedModel, ModelConfig};
use fitscope::error::{ApiError, ApiResult};

const WAIT: Duration = Duration::from_secs(5);

/// Answers from fixed data; plot requests always fail.
#[derive(Default)]
struct ScriptedBackend {
    finetune_delay: Duration,
}

impl Backend for ScriptedBackend {
    fn upload_asset_folder(&self, _files: &AssetFiles) -> ApiResult<AssetUploadResponse> {
        Ok(AssetUploadResponse {
            message: Some("ok".into()),
            headers: AssetHeaders {
                feature: vec!["temp".into()],
                target: vec!["yield".into()],
            },
        })
    }

    fn upload_csv(&self, _kind: CsvKind, path: &Path) -> ApiResult<CsvUploadResponse> {
        Err(ApiError::Io {
            path: path.to_path_buf(),
            message: "missing".into(),
        })
    }

    fn get_plot_data(&self, _request: &PlotRequest) -> ApiResult<PlotResponse> {
        Err(ApiError::Status { status: 500 })
    }

    fn finetune(&self, request: &FinetuneRequest) -> ApiResult<FinetuneResponse> {
        std::thread::sleep(self.finetune_delay);
        Ok(FinetuneResponse {
            message: "done".into(),
            new_model_name: format!("{}_ft", request.base_model_filename),
        })
    }

    fn get_calculated_contour(&self, _request: &ContourRequest) -> ApiResult<ContourResponse> {
        Ok(ContourResponse {
            contour_json: r#"{"x": [0], "y": [0], "z": [[1]]}"#.into(),
        })
    }

    fn get_overlap_data(&self) -> ApiResult<OverlapResponse> {
        Ok(OverlapResponse::default())
    }

    fn get_model_table_headers(&self) -> ApiResult<ModelTableHeaders> {
        Ok(ModelTableHeaders::default())
    }

    fn save_model_config(&self, config: &ModelConfig) -> ApiResult<SaveModelResponse> {
        Ok(SaveModelResponse {
            message: "saved".into(),
            filepath: Some(format!("/models/{}.json", config.model_name)),
        })
    }

    fn load_model_config(&self, filename: &str) -> ApiResult<LoadedModel> {
        Ok(LoadedModel {
            model_name: Some(filename.trim_end_matches(".json").to_string()),
            ..Default::default()
        })
    }

    fn delete_model_config(&self, _filename: &str) -> ApiResult<MessageResponse> {
        Ok(MessageResponse::default())
    }

    fn run_calculation_demo(&self) -> ApiResult<CalculationDemoResponse> {
        Ok(CalculationDemoResponse {
            message: Some("demo".into()),
            num_points: Some(42),
        })
    }
}

#[test]
fn responses_come_back_in_submission_order() {
    let worker = RequestWorker::spawn(ScriptedBackend::default(), || {});
    assert!(worker.submit(ApiRequest::CalculationDemo));
    assert!(worker.submit(ApiRequest::LoadModel {
        filename: "m1.json".into()
    }));

    let first = worker.recv_timeout(WAIT).expect("first response");
    assert!(matches!(first, ApiResponse::CalculationDemo(Ok(_))));
    match worker.recv_timeout(WAIT).expect("second response") {
        ApiResponse::LoadModel { filename, result } => {
            assert_eq!(filename, "m1.json");
            assert_eq!(result.unwrap().model_name.as_deref(), Some("m1"));
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn failures_are_returned_not_dropped() {
    let worker = RequestWorker::spawn(ScriptedBackend::default(), || {});
    worker.submit(ApiRequest::UploadCsv {
        kind: CsvKind::Target,
        path: "/nowhere/target.csv".into(),
    });
    let response = worker.recv_timeout(WAIT).expect("response");
    assert!(matches!(response.error(), Some(ApiError::Io { .. })));
    match response {
        ApiResponse::UploadCsv { kind, .. } => assert_eq!(kind, CsvKind::Target),
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn wake_runs_once_per_response() {
    let wakes = Arc::new(AtomicUsize::new(0));
    let counter = wakes.clone();
    let worker = RequestWorker::spawn(ScriptedBackend::default(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    worker.submit_all([ApiRequest::OverlapData, ApiRequest::ModelTableHeaders]);
    assert!(worker.recv_timeout(WAIT).is_some());
    assert!(worker.recv_timeout(WAIT).is_some());

    // The wake call follows the send, so give the worker a moment to finish it.
    let deadline = Instant::now() + WAIT;
    while wakes.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(wakes.load(Ordering::SeqCst), 2);
    assert!(worker.drain().is_empty());
}

#[test]
fn slow_finetune_does_not_hold_up_other_calls() {
    let backend = ScriptedBackend {
        finetune_delay: Duration::from_secs(3),
    };
    let worker = RequestWorker::spawn(backend, || {});
    worker.submit(ApiRequest::Finetune(FinetuneRequest {
        base_model_filename: "m1.json".into(),
    }));
    worker.submit(ApiRequest::PlotData(PlotRequest {
        feature_params: Vec::new(),
        target_param: "yield".into(),
    }));

    let first = worker
        .recv_timeout(Duration::from_secs(1))
        .expect("plot response while finetune is running");
    assert!(matches!(first, ApiResponse::PlotData(Err(ApiError::Status { status: 500 }))));

    match worker.recv_timeout(WAIT).expect("finetune response") {
        ApiResponse::Finetune(Ok(resp)) => assert_eq!(resp.new_model_name, "m1.json_ft"),
        other => panic!("unexpected response {other:?}"),
    }
}
