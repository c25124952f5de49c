//! Typing-test submission handlers

use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::models::TypeTestRequest;
use crate::auth::MaybeUser;
use crate::common::{ApiError, AppState};

/// POST /api/submit
/// Records a typing-test result for the authenticated caller.
///
/// Anonymous submissions are accepted and dropped with a 200: the frontend
/// posts every finished test regardless of login state. Storage failures
/// also answer 200; losing a result is preferred over surfacing an error
/// here.
pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    payload: Option<Json<TypeTestRequest>>,
) -> Result<StatusCode, ApiError> {
    let Some(login) = user else {
        debug!("Anonymous submission ignored");
        return Ok(StatusCode::OK);
    };

    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Malformed submission body".to_string()));
    };

    if request.wpm < 0 || request.accuracy < 0 {
        return Err(ApiError::BadRequest(
            "wpm and accuracy must be non-negative".to_string(),
        ));
    }

    let user_row = match state.store.user_by_login(&login).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            warn!(login = %login, "No user row for authenticated login, dropping result");
            return Ok(StatusCode::OK);
        }
        Err(e) => {
            error!(error = %e, login = %login, "User lookup failed, dropping result");
            return Ok(StatusCode::OK);
        }
    };

    match state
        .store
        .insert_result(user_row.id, request.wpm, request.accuracy)
        .await
    {
        Ok(()) => info!(
            user_id = user_row.id,
            wpm = request.wpm,
            accuracy = request.accuracy,
            "Type test recorded"
        ),
        Err(e) => error!(
            error = %e,
            user_id = user_row.id,
            "Failed to record type test result"
        ),
    }

    Ok(StatusCode::OK)
}
