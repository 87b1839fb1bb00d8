use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::AuthGate;
use crate::error::ApiError;

/// State for one permission-gated route: the shared gate plus the
/// permission that route requires.
#[derive(Clone)]
pub struct PermissionGuard {
    gate: Arc<AuthGate>,
    permission: &'static str,
}

impl PermissionGuard {
    pub fn new(gate: Arc<AuthGate>, permission: &'static str) -> Self {
        Self { gate, permission }
    }
}

/// Route layer: verifies the bearer token and the route's permission before
/// the handler runs, and hands the verified `Claims` to it via extensions.
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let result = guard.gate.authorize(request.headers(), guard.permission).await;
    let claims = result.map_err(|err| {
        warn!(
            code = err.code(),
            permission = guard.permission,
            path = %request.uri().path(),
            "Rejected request: {}",
            err
        );
        ApiError::from(err)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
