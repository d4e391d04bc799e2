use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{api::AppState, error::AppError};

/// Rejects requests unless a user is logged in
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.auth.is_authenticated().await {
        tracing::debug!(uri = %request.uri(), "Rejected request without session");
        return Err(AppError::Unauthorized("Login required".to_string()));
    }

    Ok(next.run(request).await)
}
