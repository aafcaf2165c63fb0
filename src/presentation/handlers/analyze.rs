use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AnalysisError;
use crate::presentation::state::AppState;

const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Default, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    if let Err(e) = state.analysis_service.ensure_configured() {
        return error_response(e);
    }

    let audio = match read_audio_field(&mut multipart).await {
        Ok(Some(audio)) => audio,
        Ok(None) => {
            tracing::warn!("Analyze request without audio field");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("No audio file")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            // 413 when the upload exceeds the body limit, 400 otherwise.
            return (
                e.status(),
                Json(ErrorResponse::new(format!("Failed to read multipart: {}", e))),
            )
                .into_response();
        }
    };

    tracing::debug!(bytes = audio.len(), "Audio received");

    match state.analysis_service.analyze(audio).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn read_audio_field(
    multipart: &mut Multipart,
) -> Result<Option<Bytes>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(AUDIO_FIELD) {
            return field.bytes().await.map(Some);
        }
    }
    Ok(None)
}

fn error_response(error: AnalysisError) -> Response {
    let request_id = error.correlation_id().map(|id| id.to_string());

    let (status, body) = match error {
        AnalysisError::Config(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                error: message,
                hint: Some("Set GITHUB_TOKEN environment variable".to_string()),
                ..Default::default()
            },
        ),
        AnalysisError::Validation(message) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
        AnalysisError::Stage { source, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                error: "Failed to stage audio".to_string(),
                details: Some(source.to_string()),
                request_id,
                ..Default::default()
            },
        ),
        AnalysisError::Dispatch { details, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                error: "Failed to trigger analysis".to_string(),
                details: Some(details),
                request_id,
                ..Default::default()
            },
        ),
        AnalysisError::TimedOut { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            ErrorResponse {
                error: "Analysis timeout".to_string(),
                hint: Some("Check GitHub Actions for status".to_string()),
                request_id,
                ..Default::default()
            },
        ),
        AnalysisError::Malformed { details, .. } => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse {
                error: "Malformed analysis result".to_string(),
                details: Some(details),
                request_id,
                ..Default::default()
            },
        ),
    };

    (status, Json(body)).into_response()
}
