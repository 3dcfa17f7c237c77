//! Map CRUD and CSV transfer routes.

#[cfg(test)]
#[path = "maps_test.rs"]
mod maps_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use mapview::csv::{ExportError, export_filename};
use mapview::map::{MapId, MapRecord, MapSummary, SaveMapRequest, SavedMap};
use tracing::warn;

use crate::services::maps::{self, MapError};
use crate::state::AppState;

pub(crate) fn map_error_to_status(err: &MapError) -> StatusCode {
    match err {
        MapError::NotFound(_) | MapError::Export(ExportError::NothingToExport) => StatusCode::NOT_FOUND,
        MapError::MissingField(_) | MapError::InvalidHotspots(_) => StatusCode::BAD_REQUEST,
        MapError::TooManyHotspots { .. } | MapError::Import(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for MapError {
    fn into_response(self) -> Response {
        let status = map_error_to_status(&self);
        warn!(status = status.as_u16(), error = %self, "map request failed");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// `GET /api/maps`: list maps, newest first.
pub async fn list_maps(State(state): State<AppState>) -> Json<Vec<MapSummary>> {
    Json(maps::list_maps(state.store.as_ref()).await)
}

/// `POST /api/maps`: create (no `id`) or update a map.
pub async fn save_map(
    State(state): State<AppState>,
    Json(body): Json<SaveMapRequest>,
) -> Result<(StatusCode, Json<SavedMap>), MapError> {
    let outcome = maps::save_map(state.store.as_ref(), body, state.max_hotspots).await?;
    let status = if outcome.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(outcome.saved)))
}

/// `GET /api/maps/{id}`: fetch one map.
pub async fn get_map(State(state): State<AppState>, Path(id): Path<MapId>) -> Result<Json<MapRecord>, MapError> {
    Ok(Json(maps::get_map(state.store.as_ref(), id).await?))
}

/// `DELETE /api/maps/{id}`: delete one map.
pub async fn delete_map(
    State(state): State<AppState>,
    Path(id): Path<MapId>,
) -> Result<Json<serde_json::Value>, MapError> {
    maps::delete_map(state.store.as_ref(), id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/maps/{id}/export.csv`: download active hotspots as CSV.
pub async fn export_csv(State(state): State<AppState>, Path(id): Path<MapId>) -> Result<Response, MapError> {
    let csv = maps::export_csv(state.store.as_ref(), id).await?;

    let exported_at_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis());
    let filename = export_filename(exported_at_ms);

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        csv,
    )
        .into_response())
}

/// `POST /api/maps/{id}/import.csv`: replace hotspots from a CSV body.
pub async fn import_csv(
    State(state): State<AppState>,
    Path(id): Path<MapId>,
    body: String,
) -> Result<Json<MapSummary>, MapError> {
    let summary = maps::import_csv(state.store.as_ref(), id, &body, state.max_hotspots).await?;
    Ok(Json(summary))
}
