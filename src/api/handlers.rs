use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        GeneratePlaylistResponse, GenerateQueryParams, GenerateRequestBody, GenerationRequest,
        RequestSource, WorkContext, GENERATION_METHOD,
    },
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generate a playlist from a JSON body
pub async fn generate_from_body(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<GenerateRequestBody>, JsonRejection>,
) -> AppResult<Json<GeneratePlaylistResponse>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(request_id = %request_id, error = %rejection, "Rejected request body");
        AppError::InvalidInput(format!("Invalid JSON: {}", rejection.body_text()))
    })?;

    generate(&state, &request_id, body, RequestSource::PostBody).await
}

/// Generate a playlist from query-string presets
pub async fn generate_from_query(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<GenerateQueryParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) =
        params.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    if params.is_empty() {
        let body = Json(json!({
            "success": false,
            "error": "Insufficient parameters",
            "message": "For GET requests, provide parameters: ?context=dancing&genres=electronic,dance",
            "available_contexts": WorkContext::names(),
            "timestamp": Utc::now().to_rfc3339(),
        }));
        return Ok((StatusCode::BAD_REQUEST, body).into_response());
    }

    let response = generate(
        &state,
        &request_id,
        params.into_body(),
        RequestSource::QueryParameters,
    )
    .await?;

    Ok(response.into_response())
}

async fn generate(
    state: &AppState,
    request_id: &RequestId,
    body: GenerateRequestBody,
    source: RequestSource,
) -> AppResult<Json<GeneratePlaylistResponse>> {
    let request = GenerationRequest::try_from(body)?;

    tracing::info!(
        request_id = %request_id,
        path = %request.path(),
        source = ?source,
        "Processing playlist request"
    );

    let playlist = state.generator.generate(&request).await?;

    tracing::info!(
        request_id = %request_id,
        tracks = playlist.tracks.len(),
        "Playlist request completed"
    );

    Ok(Json(GeneratePlaylistResponse {
        success: true,
        message: "Playlist generated successfully".to_string(),
        path: request.path(),
        method: GENERATION_METHOD.to_string(),
        source,
        playlist: playlist.tracks,
        metadata: playlist.metadata,
        available_contexts: WorkContext::names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
