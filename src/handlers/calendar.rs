use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::calendar::generate_ics;
use crate::state::AppState;

pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    // Strip .ics suffix if present
    let reservation_id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id);

    let reservation = {
        let db = state.db()?;
        queries::get_reservation_by_id(&db, reservation_id)?
    }
    .ok_or_else(|| AppError::NotFound(format!("reservation {reservation_id}")))?;

    let ics = generate_ics(&reservation, &state.config.clinic.name).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "reservation {reservation_id} has an unreadable date or time"
        ))
    })?;
    let filename = format!("reservation-{reservation_id}.ics");

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response())
}
