use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::AppState;
use crate::models::*;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

fn session_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Session not found".to_string())
}

/// Validation errors go back to the form as-is so they can be shown inline.
fn validation_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Species
// ============================================================

pub async fn list_species() -> Json<SpeciesVocabulary> {
    Json(SpeciesVocabulary::default())
}

// ============================================================
// Sessions
// ============================================================

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let id = state.sessions.create();
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    state
        .sessions
        .with_store(id, |store| SessionView {
            id,
            records: store.list().to_vec(),
            summary: store.summary(),
            can_export: !store.is_empty(),
        })
        .map(Json)
        .ok_or_else(session_not_found)
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.end(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found())
    }
}

// ============================================================
// Records
// ============================================================

pub async fn add_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<NewRecordInput>,
) -> ApiResult<(StatusCode, Json<RecordAdded>)> {
    let record = state
        .sessions
        .with_store(id, |store| store.append(input).cloned())
        .ok_or_else(session_not_found)?
        .map_err(validation_error)?;

    tracing::debug!(session = %id, species = %record.species, volume_m3 = record.volume_m3, "Record added");

    let notice = format!("{} added", record.species);
    Ok((StatusCode::CREATED, Json(RecordAdded { record, notice })))
}

pub async fn clear_records(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ListCleared>> {
    let removed = state
        .sessions
        .with_store(id, |store| {
            let removed = store.len();
            store.clear();
            removed
        })
        .ok_or_else(session_not_found)?;

    tracing::debug!(session = %id, removed, "Records cleared");

    Ok(Json(ListCleared {
        removed,
        notice: "List cleared".to_string(),
    }))
}

// ============================================================
// Export
// ============================================================

/// Download the session's report as a PDF.
///
/// Export is only offered for a non-empty list, so an empty one is a conflict.
pub async fn export_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let records = state
        .sessions
        .with_store(id, |store| store.list().to_vec())
        .ok_or_else(session_not_found)?;

    if records.is_empty() {
        return Err((
            StatusCode::CONFLICT,
            "No records to export".to_string(),
        ));
    }

    let today = chrono::Local::now().date_naive();
    let report = state
        .reports
        .export(&records, today)
        .await
        .map_err(internal_error)?;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, crate::report::PDF_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    ))
}
