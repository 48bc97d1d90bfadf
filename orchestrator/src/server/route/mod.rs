use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;

use applications::application_router;

use super::GatewayContext;

pub(super) mod applications;

/// Fallback for routes that do not exist
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}

pub(crate) fn server_router(context: GatewayContext) -> Router {
    Router::new().nest("/api", application_router(context)).fallback(handler_404)
}
