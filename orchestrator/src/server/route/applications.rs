use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::super::error::{ApiError, ApiServiceResult};
use super::super::types::{
    ApplicationIdQuery, ApplicationStatusQuery, ApplicationView, ApplicationsWithStatusResponse,
    CreateApplicationRequest,
};
use super::super::GatewayContext;
use crate::core::client::database::DatabaseError;
use crate::core::client::queue::send_json;
use crate::types::application::ApplicationStatus;
use crate::types::message::CreateApplicationMessage;
use crate::types::queue::QueueType;

/// Only a JSON object is a valid create body, serde would also accept the fields as an array
fn parse_create_request(body: Value) -> ApiServiceResult<CreateApplicationRequest> {
    if !body.is_object() {
        return Err(ApiError::BadRequest("Request body must be a JSON object".to_string()));
    }
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(format!("Invalid application request: {}", e)))
}

fn database_error_to_api(error: DatabaseError) -> ApiError {
    if error.is_not_found() {
        ApiError::NotFound(error.to_string())
    } else {
        error!(error = %error, "Database operation failed");
        ApiError::Internal(error.to_string())
    }
}

/// Creates a pending application and enqueues it for submission.
///
/// When the create request cannot be published the new record is removed
/// again so that no pending record is left without a message to drive it.
#[instrument(skip_all, fields(application_id = tracing::field::Empty))]
async fn handle_create_application(
    State(context): State<GatewayContext>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiServiceResult<(StatusCode, Json<ApplicationView>)> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = parse_create_request(body)?;
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(ApiError::BadRequest("first_name and last_name are required".to_string()));
    }

    let entry = context.repository.create(&request.first_name, &request.last_name).await.map_err(|e| {
        error!(error = %e, "Failed to store application");
        ApiError::Internal(e.to_string())
    })?;
    tracing::Span::current().record("application_id", entry.id.as_str());

    let message = CreateApplicationMessage {
        application_id: entry.id.clone(),
        first_name: entry.first_name.clone(),
        last_name: entry.last_name.clone(),
    };
    if let Err(e) = send_json(context.queue.as_ref(), QueueType::CreateApplication, &message).await {
        error!(error = %e, "Failed to enqueue application, removing it");
        if let Err(remove_error) = context.repository.remove(&entry.id).await {
            warn!(error = %remove_error, "Failed to remove application after enqueue failure");
        }
        return Err(ApiError::Internal(e.to_string()));
    }

    info!("Application created and enqueued");
    Ok((StatusCode::CREATED, Json(ApplicationView::from(entry))))
}

#[instrument(skip(context))]
async fn handle_get_application(
    State(context): State<GatewayContext>,
    Query(query): Query<ApplicationIdQuery>,
) -> ApiServiceResult<Json<ApplicationView>> {
    let application_id = query
        .application_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("The application_id parameter is required".to_string()))?;

    let entry = context.repository.get(&application_id).await.map_err(database_error_to_api)?;
    Ok(Json(ApplicationView::from(entry)))
}

#[instrument(skip(context))]
async fn handle_get_applications_with_status(
    State(context): State<GatewayContext>,
    Query(query): Query<ApplicationStatusQuery>,
) -> ApiServiceResult<Json<ApplicationsWithStatusResponse>> {
    let status = query.status.as_deref().and_then(|s| ApplicationStatus::from_str(s).ok()).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "The status parameter is required and must be one of [{} {} {}]",
            ApplicationStatus::Pending,
            ApplicationStatus::Completed,
            ApplicationStatus::Rejected
        ))
    })?;

    let entries = context.repository.list_by_status(status).await.map_err(database_error_to_api)?;
    Ok(Json(ApplicationsWithStatusResponse { applications: entries.into_iter().map(ApplicationView::from).collect() }))
}

pub(super) fn application_router(context: GatewayContext) -> Router {
    Router::new()
        .route("/application", get(handle_get_application).post(handle_create_application))
        .route("/applications-with-status", get(handle_get_applications_with_status))
        .with_state(context)
}
