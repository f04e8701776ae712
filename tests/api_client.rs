use fitscope::api::client::{decode_body, error_from_response};
use fitscope::api::types::{CsvUploadResponse, MessageResponse, ModelTableHeaders, PlotRequest};
use fitscope::data::axis::{FeatureParam, FeatureRole};
use fitscope::data::model::LoadedModel;
use fitscope::error::ApiError;

#[test]
fn success_body_decodes() {
    let headers: ModelTableHeaders = decode_body(
        200,
        r#"{"feature_headers": ["main_id", "temp"], "target_headers": ["yield"]}"#,
    )
    .unwrap();
    assert_eq!(headers.feature_headers, vec!["main_id", "temp"]);
    assert_eq!(headers.target_headers, vec!["yield"]);
}

#[test]
fn error_field_on_success_status_is_a_failure() {
    let err = decode_body::<MessageResponse>(200, r#"{"error": "Asset folder not uploaded yet."}"#)
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: None,
            message: "Asset folder not uploaded yet.".to_string()
        }
    );
    assert_eq!(err.user_message(), "Asset folder not uploaded yet.");
}

#[test]
fn json_error_status_keeps_the_backend_message() {
    let err = error_from_response(400, r#"{"error": "Invalid model name"}"#);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Invalid model name");
}

#[test]
fn json_error_status_without_message_names_the_status() {
    let err = error_from_response(422, "{}");
    assert!(err.user_message().contains("422"));
}

#[test]
fn non_json_error_status_carries_only_the_code() {
    let err = decode_body::<MessageResponse>(502, "<html>Bad Gateway</html>").unwrap_err();
    assert_eq!(err, ApiError::Status { status: 502 });
    assert!(err.user_message().contains("502"));
}

#[test]
fn malformed_success_body_is_a_decode_error() {
    let err = decode_body::<ModelTableHeaders>(200, "not json").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn csv_upload_without_headers_is_metadata_only() {
    let resp: CsvUploadResponse =
        decode_body(200, r#"{"filename": "notes.txt", "size": 12}"#).unwrap();
    assert!(resp.headers.is_none());
    assert_eq!(resp.raw["filename"], "notes.txt");

    let resp: CsvUploadResponse = decode_body(200, r#"{"headers": ["a", "b"]}"#).unwrap();
    assert_eq!(resp.headers, Some(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn plot_request_uses_backend_field_names() {
    let req = PlotRequest {
        feature_params: vec![FeatureParam {
            name: "temp".into(),
            role: FeatureRole::Constant,
            value: "1.5".into(),
        }],
        target_param: "yield".into(),
    };
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body["targetParam"], "yield");
    assert_eq!(body["featureParams"][0]["type"], "Constant");
    assert_eq!(body["featureParams"][0]["value"], "1.5");
}

#[test]
fn loaded_model_accepts_snake_case_fields() {
    let model: LoadedModel = decode_body(
        200,
        r#"{"model_name": "m2", "fitting_method": "乗積", "fitting_config": {"a": {"t": "f"}}}"#,
    )
    .unwrap();
    assert!(model.functions.is_none());
    assert_eq!(model.assignment()["a"]["t"], "f");
}
