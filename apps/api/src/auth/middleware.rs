use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::state::AppState;

/// Middleware that validates the bearer token and stores the `AuthUser`.
///
/// If valid, inserts the user into request extensions for handlers to use.
/// If missing or invalid, responds 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let user = state.verifier.verify(token).await?;
    debug!(uid = %user.uid, "Authenticated request");

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
