//! One application driven through the gateway, the create worker and the poll worker

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use rstest::*;
use serde_json::json;
use url::Url;

use crate::core::client::adjudicator::HttpAdjudicatorClient;
use crate::core::client::database::ApplicationRepositoryClient;
use crate::server::route::server_router;
use crate::server::types::{ApplicationView, CreateApplicationRequest};
use crate::server::GatewayContext;
use crate::tests::common::doubles::{InMemoryCollection, InMemoryQueueClient, Settlement, SettlementLog};
use crate::tests::common::{call_router, from_body, get_request, json_request};
use crate::types::application::ApplicationStatus;
use crate::types::message::{CreateApplicationMessage, PollApplicationMessage};
use crate::types::params::AdjudicatorArgs;
use crate::types::queue::QueueType;
use crate::worker::controller::post_processing;
use crate::worker::handlers::{CreateApplicationHandler, PollApplicationHandler};
use crate::worker::traits::message::MessageHandler;

/// Hand the payload to `handler` as delivery `tag` and settle it like a worker would
async fn deliver(handler: &dyn MessageHandler, log: &SettlementLog, tag: usize, payload: &str) {
    let delivery = log.delivery(tag, payload.as_bytes().to_vec());
    let result = handler.handle(delivery.payload()).await;
    post_processing(result, delivery).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn application_reaches_completed() {
    let collection = Arc::new(InMemoryCollection::new());
    let repository = Arc::new(ApplicationRepositoryClient::new(collection.clone()));
    let queue = Arc::new(InMemoryQueueClient::new());
    let router = server_router(GatewayContext::new(repository.clone(), queue.clone()));

    let adjudicator_server = MockServer::start_async().await;
    let base = Url::parse(&adjudicator_server.base_url()).unwrap();
    let adjudicator = Arc::new(
        HttpAdjudicatorClient::new(&AdjudicatorArgs {
            create_url: base.join("/api/applications").unwrap(),
            status_url: base.join("/api/jobs").unwrap(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap(),
    );
    let log = SettlementLog::new();

    // Gateway
    let request = CreateApplicationRequest { first_name: "Ada".to_string(), last_name: "Lovelace".to_string() };
    let (status, body) = call_router(&router, json_request("/api/application", &request)).await;
    assert_eq!(status.as_u16(), 201);
    let created: ApplicationView = from_body(&body);
    assert_eq!(created.status, ApplicationStatus::Pending);
    assert_eq!(collection.entry(&created.application_id).unwrap().status, ApplicationStatus::Pending);

    let create_requests = queue.published(QueueType::CreateApplication);
    assert_eq!(create_requests.len(), 1);
    let create_request: CreateApplicationMessage = serde_json::from_str(&create_requests[0]).unwrap();
    assert_eq!(create_request.application_id, created.application_id);

    // Create worker
    let submit = adjudicator_server
        .mock_async(|when, then| {
            when.method(POST).path("/api/applications");
            then.status(201);
        })
        .await;
    let create_handler = CreateApplicationHandler::new(adjudicator.clone(), queue.clone());
    deliver(&create_handler, &log, 0, &create_requests[0]).await;
    submit.assert_async().await;
    assert_eq!(log.settlements_of(0), vec![Settlement::Ack]);

    let poll_requests = queue.published(QueueType::PollApplication);
    assert_eq!(poll_requests.len(), 1);
    let poll_request: PollApplicationMessage = serde_json::from_str(&poll_requests[0]).unwrap();
    assert_eq!(poll_request.our_application_id, created.application_id);
    assert_ne!(poll_request.external_application_id, created.application_id);

    // Poll worker, first while the adjudicator is still deciding
    let poll_handler = PollApplicationHandler::new(adjudicator.clone(), repository.clone());
    let mut still_pending = adjudicator_server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/jobs")
                .query_param("application_id", poll_request.external_application_id.as_str());
            then.status(200).json_body(json!({ "status": "pending" }));
        })
        .await;
    deliver(&poll_handler, &log, 1, &poll_requests[0]).await;
    assert_eq!(log.settlements_of(1), vec![Settlement::Nack { requeue: true }]);
    assert_eq!(collection.entry(&created.application_id).unwrap().status, ApplicationStatus::Pending);

    still_pending.delete_async().await;
    adjudicator_server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/jobs")
                .query_param("application_id", poll_request.external_application_id.as_str());
            then.status(200).json_body(json!({
                "application_id": poll_request.external_application_id,
                "status": "completed",
            }));
        })
        .await;
    deliver(&poll_handler, &log, 2, &poll_requests[0]).await;
    assert_eq!(log.settlements_of(2), vec![Settlement::Ack]);

    // Gateway reflects the outcome
    let (status, body) =
        call_router(&router, get_request(&format!("/api/application?application_id={}", created.application_id)))
            .await;
    assert_eq!(status.as_u16(), 200);
    let fetched: ApplicationView = from_body(&body);
    assert_eq!(fetched.status, ApplicationStatus::Completed);
    assert_eq!(fetched.first_name, "Ada");
    assert_eq!(fetched.last_name, "Lovelace");
}
