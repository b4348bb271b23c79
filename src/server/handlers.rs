//! Route handlers of the HTTP service.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::types::*;
use super::AppState;
use crate::converter::params::{
    optional_text, required_array, required_object, resolve_raw_data,
};
use crate::converter::{generate_preset_data, InputFormat};
use crate::error::ConvertError;
use crate::tools::TOOLS;

/// Every route the service answers, for the 404 body.
pub const AVAILABLE_ENDPOINTS: [&str; 6] = [
    "GET /health",
    "GET /api/tools",
    "POST /api/convert/sse-data",
    "POST /api/convert/sse-object",
    "POST /api/generate/preset-data",
    "POST /api/convert/batch",
];

/// Error returned by handlers, rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub enum ApiError {
    /// Body was not valid JSON or had the wrong content type
    Body(JsonRejection),
    Convert(ConvertError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl From<ConvertError> for ApiError {
    fn from(err: ConvertError) -> Self {
        ApiError::Convert(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Body(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                let body = ErrorResponse::new(rejection.body_text());
                (rejection.status(), Json(body)).into_response()
            }
            ApiError::Convert(err) => {
                let category = err.category();
                let status = StatusCode::from_u16(category.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(code = err.error_code(), "Request failed: {}", err);
                } else {
                    tracing::debug!(code = err.error_code(), "Request rejected: {}", err);
                }

                let mut body = ErrorResponse::new(err.to_string());
                if let ConvertError::UnresolvedTemplate { raw } = &err {
                    body.raw_data_received = Some(raw.clone());
                }
                (status, Json(body)).into_response()
            }
        }
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "sse-converter",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/tools`
pub async fn tools_handler() -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: TOOLS.iter().map(|tool| tool.http_descriptor()).collect(),
    })
}

/// `POST /api/convert/sse-data`
pub async fn convert_sse_data_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConvertSseDataRequest>, JsonRejection>,
) -> ApiResult<ConvertSseDataResponse> {
    let Json(request) = payload?;
    let raw = resolve_raw_data(request.raw_data.as_ref())?;
    let base_timestamp = optional_text(request.base_timestamp.as_ref());
    let format = InputFormat::from_name(request.format.as_ref().and_then(|f| f.as_str()));

    tracing::info!(
        format = format.as_str(),
        length = raw.len(),
        "Converting SSE data"
    );

    let records = state
        .converter
        .convert_raw(&raw, format, base_timestamp.as_deref())?;

    Ok(Json(ConvertSseDataResponse {
        success: true,
        count: records.len(),
        message: format!("Successfully converted {} SSE events", records.len()),
        data: records,
        format,
    }))
}

/// `POST /api/convert/sse-object`
pub async fn convert_sse_object_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConvertSseObjectRequest>, JsonRejection>,
) -> ApiResult<ConvertSseObjectResponse> {
    let Json(request) = payload?;
    let object = required_object(request.sse_object.as_ref(), "sseObject")?;
    let timestamp = optional_text(request.timestamp.as_ref());

    let record = state
        .converter
        .convert_object_value(object, timestamp.as_deref())?;

    Ok(Json(ConvertSseObjectResponse {
        success: true,
        data: record,
        message: "Successfully converted SSE object".to_string(),
    }))
}

/// `POST /api/generate/preset-data`
pub async fn generate_preset_handler(
    payload: Result<Json<GeneratePresetRequest>, JsonRejection>,
) -> ApiResult<GeneratePresetResponse> {
    let Json(request) = payload?;
    let items = required_array(request.sse_data_array.as_ref(), "sseDataArray")?;
    let filename = request.filename.as_ref().and_then(|f| f.as_str());

    let preset = generate_preset_data(items, filename)?;

    Ok(Json(GeneratePresetResponse {
        success: true,
        message: format!(
            "Successfully generated preset data file with {} items",
            preset.item_count
        ),
        data: preset,
    }))
}

/// `POST /api/convert/batch`
pub async fn batch_convert_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchConvertRequest>, JsonRejection>,
) -> ApiResult<BatchConvertResponse> {
    let Json(request) = payload?;
    let items = required_array(request.items.as_ref(), "items")?;
    let base_timestamp = optional_text(request.base_timestamp.as_ref());
    let format = InputFormat::from_name(request.format.as_ref().and_then(|f| f.as_str()));

    let outcome = state
        .converter
        .convert_batch(items, format, base_timestamp.as_deref());

    tracing::info!(
        total = outcome.total_items,
        failed = outcome.error_count(),
        "Batch conversion finished"
    );

    let error_count = outcome.error_count();
    Ok(Json(BatchConvertResponse {
        success: outcome.is_success(),
        total_items: outcome.total_items,
        success_count: outcome.success_count,
        error_count,
        record_count: outcome.records.len(),
        message: format!(
            "Processed {} items, {} successful conversions",
            outcome.total_items, outcome.success_count
        ),
        errors: (error_count > 0).then_some(outcome.errors),
        data: outcome.records,
    }))
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> impl IntoResponse {
    let mut body = ErrorResponse::new("Endpoint not found");
    body.available_endpoints = Some(AVAILABLE_ENDPOINTS.to_vec());
    (StatusCode::NOT_FOUND, Json(body))
}
