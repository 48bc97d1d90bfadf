pub mod pipeline;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use rstest::*;

use crate::core::client::adjudicator::{
    AdjudicatorError, ApplicationStatusResponse, MockAdjudicatorClient, SubmissionOutcome,
};
use crate::core::client::database::{
    ApplicationCollection, ApplicationRepositoryClient, DatabaseError, MockApplicationRepository,
};
use crate::core::client::queue::{MockQueueClient, QueueClient, QueueError};
use crate::error::ConsumptionError;
use crate::tests::common::doubles::{InMemoryCollection, InMemoryQueueClient, Settlement, SettlementLog};
use crate::tests::common::{create_message, internal_database_error, pending_entry, poll_message, to_payload};
use crate::types::application::{ApplicationEntry, ApplicationStatus};
use crate::types::message::{CreateApplicationMessage, PollApplicationMessage};
use crate::types::queue::QueueType;
use crate::worker::controller::{post_processing, WorkerController};
use crate::worker::handlers::{CreateApplicationHandler, PollApplicationHandler};
use crate::worker::traits::message::{MessageDisposition, MessageHandler, MockMessageHandler};
use crate::OrchestratorError;

fn status_report(status: &str) -> ApplicationStatusResponse {
    ApplicationStatusResponse { status: status.to_string() }
}

fn create_handler(adjudicator: MockAdjudicatorClient, queue: Arc<dyn QueueClient>) -> CreateApplicationHandler {
    CreateApplicationHandler::new(Arc::new(adjudicator), queue)
}

/// Wait until `log` holds `count` settlements
async fn settled(log: &SettlementLog, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while log.len() < count {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("deliveries were not settled in time");
}

#[rstest]
#[tokio::test]
async fn create_handler_submits_under_a_new_id_and_enqueues_a_poll(create_message: CreateApplicationMessage) {
    let submitted_ids = Arc::new(Mutex::new(Vec::new()));
    let recorded = submitted_ids.clone();
    let our_id = create_message.application_id.clone();

    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator
        .expect_submit_application()
        .withf(move |request| request.id != our_id && request.first_name == "Ada" && request.last_name == "Lovelace")
        .times(1)
        .returning(move |request| {
            recorded.lock().unwrap().push(request.id.clone());
            Ok(SubmissionOutcome::Accepted)
        });
    let queue = Arc::new(InMemoryQueueClient::new());

    let disposition =
        create_handler(adjudicator, queue.clone()).handle(&to_payload(&create_message)).await.unwrap();

    assert_eq!(disposition, MessageDisposition::Acknowledge);
    let published = queue.published(QueueType::PollApplication);
    assert_eq!(published.len(), 1);
    let poll: PollApplicationMessage = serde_json::from_str(&published[0]).unwrap();
    assert_eq!(poll.our_application_id, create_message.application_id);
    assert_eq!(vec![poll.external_application_id], *submitted_ids.lock().unwrap());
    assert!(queue.published(QueueType::CreateApplication).is_empty());
}

#[rstest]
#[tokio::test]
async fn create_handler_requeues_on_id_collision(create_message: CreateApplicationMessage) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_submit_application().times(1).returning(|_| Ok(SubmissionOutcome::DuplicateId));
    let queue = Arc::new(InMemoryQueueClient::new());

    let disposition =
        create_handler(adjudicator, queue.clone()).handle(&to_payload(&create_message)).await.unwrap();

    assert_eq!(disposition, MessageDisposition::Requeue);
    assert!(queue.published(QueueType::PollApplication).is_empty());
}

#[rstest]
#[tokio::test]
async fn create_handler_fails_on_unexpected_adjudicator_answer(create_message: CreateApplicationMessage) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator
        .expect_submit_application()
        .times(1)
        .returning(|_| Err(AdjudicatorError::UnexpectedStatus { status: 500, body: String::new() }));
    let queue = Arc::new(InMemoryQueueClient::new());

    let result = create_handler(adjudicator, queue.clone()).handle(&to_payload(&create_message)).await;

    assert!(matches!(result, Err(ConsumptionError::Adjudicator(AdjudicatorError::UnexpectedStatus { .. }))));
    assert!(queue.published(QueueType::PollApplication).is_empty());
}

#[rstest]
#[tokio::test]
async fn create_handler_reports_publish_failures(create_message: CreateApplicationMessage) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_submit_application().times(1).returning(|_| Ok(SubmissionOutcome::Accepted));
    let mut queue = MockQueueClient::new();
    queue
        .expect_send_message()
        .withf(|queue, _| *queue == QueueType::PollApplication)
        .times(1)
        .returning(|_, _| Err(QueueError::PublishNotConfirmed("poll_applications".to_string())));

    let result = create_handler(adjudicator, Arc::new(queue)).handle(&to_payload(&create_message)).await;

    assert!(matches!(result, Err(ConsumptionError::Publish { queue: QueueType::PollApplication, .. })));
}

#[rstest]
#[case(b"not json".to_vec())]
#[case(br#"{"application_id": "a1"}"#.to_vec())]
#[tokio::test]
async fn create_handler_rejects_malformed_payloads(#[case] payload: Vec<u8>) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_submit_application().never();

    let result = create_handler(adjudicator, Arc::new(InMemoryQueueClient::new())).handle(&payload).await;

    assert!(matches!(result, Err(ConsumptionError::MalformedPayload { message_type: "create application", .. })));
}

#[rstest]
#[tokio::test]
async fn redelivery_after_collision_uses_a_different_external_id(create_message: CreateApplicationMessage) {
    let submitted_ids = Arc::new(Mutex::new(Vec::new()));
    let recorded = submitted_ids.clone();
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_submit_application().times(2).returning(move |request| {
        let mut ids = recorded.lock().unwrap();
        ids.push(request.id.clone());
        Ok(if ids.len() == 1 { SubmissionOutcome::DuplicateId } else { SubmissionOutcome::Accepted })
    });
    let handler = create_handler(adjudicator, Arc::new(InMemoryQueueClient::new()));
    let log = SettlementLog::new();
    let payload = to_payload(&create_message);

    for tag in 0..2 {
        let delivery = log.delivery(tag, payload.clone());
        let result = handler.handle(delivery.payload()).await;
        post_processing(result, delivery).await.unwrap();
    }

    assert_eq!(log.settlements_of(0), vec![Settlement::Nack { requeue: true }]);
    assert_eq!(log.settlements_of(1), vec![Settlement::Ack]);
    let ids = submitted_ids.lock().unwrap();
    assert_ne!(ids[0], ids[1]);
    assert!(!ids.contains(&create_message.application_id));
}

#[rstest]
#[case("completed", ApplicationStatus::Completed)]
#[case("rejected", ApplicationStatus::Rejected)]
#[tokio::test]
async fn poll_handler_records_terminal_status(
    poll_message: PollApplicationMessage,
    #[case] reported: &'static str,
    #[case] expected: ApplicationStatus,
) {
    let external_id = poll_message.external_application_id.clone();
    let our_id = poll_message.our_application_id.clone();

    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator
        .expect_application_status()
        .withf(move |id| id == external_id)
        .times(1)
        .returning(move |_| Ok(status_report(reported)));
    let mut repository = MockApplicationRepository::new();
    repository
        .expect_update_status()
        .withf(move |id, status| id == our_id && *status == expected)
        .times(1)
        .returning(|_, _| Ok(()));

    let handler = PollApplicationHandler::new(Arc::new(adjudicator), Arc::new(repository));
    let disposition = handler.handle(&to_payload(&poll_message)).await.unwrap();

    assert_eq!(disposition, MessageDisposition::Acknowledge);
}

#[rstest]
#[case("pending")]
#[case("processing")]
#[case("COMPLETED")]
#[tokio::test]
async fn poll_handler_requeues_until_terminal(poll_message: PollApplicationMessage, #[case] reported: &'static str) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_application_status().times(1).returning(move |_| Ok(status_report(reported)));
    let mut repository = MockApplicationRepository::new();
    repository.expect_update_status().never();

    let handler = PollApplicationHandler::new(Arc::new(adjudicator), Arc::new(repository));
    let disposition = handler.handle(&to_payload(&poll_message)).await.unwrap();

    assert_eq!(disposition, MessageDisposition::Requeue);
}

#[rstest]
#[tokio::test]
async fn poll_handler_fails_when_the_adjudicator_is_unreachable(poll_message: PollApplicationMessage) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator
        .expect_application_status()
        .times(1)
        .returning(|_| Err(AdjudicatorError::UnexpectedStatus { status: 503, body: String::new() }));
    let mut repository = MockApplicationRepository::new();
    repository.expect_update_status().never();

    let handler = PollApplicationHandler::new(Arc::new(adjudicator), Arc::new(repository));

    assert!(matches!(handler.handle(&to_payload(&poll_message)).await, Err(ConsumptionError::Adjudicator(_))));
}

#[rstest]
#[tokio::test]
async fn poll_handler_reports_persistence_failures(poll_message: PollApplicationMessage) {
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_application_status().times(1).returning(|_| Ok(status_report("completed")));
    let mut repository = MockApplicationRepository::new();
    repository.expect_update_status().times(1).returning(|_, _| Err(internal_database_error()));

    let handler = PollApplicationHandler::new(Arc::new(adjudicator), Arc::new(repository));
    let result = handler.handle(&to_payload(&poll_message)).await;

    assert!(matches!(
        result,
        Err(ConsumptionError::Persistence { ref application_id, error: DatabaseError::MongoError(_) })
            if *application_id == poll_message.our_application_id
    ));
}

#[rstest]
#[tokio::test]
async fn poll_handler_tolerates_repeated_delivery(pending_entry: ApplicationEntry) {
    let collection = Arc::new(InMemoryCollection::new());
    collection.insert_one(pending_entry.clone()).await.unwrap();
    let repository = Arc::new(ApplicationRepositoryClient::new(collection.clone()));
    let mut adjudicator = MockAdjudicatorClient::new();
    adjudicator.expect_application_status().times(2).returning(|_| Ok(status_report("completed")));
    let handler = PollApplicationHandler::new(Arc::new(adjudicator), repository);

    let payload = to_payload(&PollApplicationMessage {
        our_application_id: pending_entry.id.clone(),
        external_application_id: "ext-1".to_string(),
    });
    for _ in 0..2 {
        assert_eq!(handler.handle(&payload).await.unwrap(), MessageDisposition::Acknowledge);
    }

    assert_eq!(collection.entry(&pending_entry.id).unwrap().status, ApplicationStatus::Completed);
}

#[rstest]
#[case(Ok(MessageDisposition::Acknowledge), Settlement::Ack)]
#[case(Ok(MessageDisposition::Requeue), Settlement::Nack { requeue: true })]
#[case(
    Err(ConsumptionError::Adjudicator(AdjudicatorError::UnexpectedStatus { status: 500, body: String::new() })),
    Settlement::Nack { requeue: false }
)]
#[tokio::test]
async fn post_processing_settles_exactly_once(
    #[case] result: Result<MessageDisposition, ConsumptionError>,
    #[case] expected: Settlement,
) {
    let log = SettlementLog::new();

    post_processing(result, log.delivery(7, Vec::new())).await.unwrap();

    assert_eq!(log.entries(), vec![(7, expected)]);
}

fn acknowledging_handler(queue: QueueType) -> MockMessageHandler {
    let mut handler = MockMessageHandler::new();
    handler.expect_queue().return_const(queue);
    handler.expect_handle().returning(|payload| {
        if payload == b"requeue" {
            Ok(MessageDisposition::Requeue)
        } else {
            Ok(MessageDisposition::Acknowledge)
        }
    });
    handler
}

#[rstest]
#[tokio::test]
async fn worker_pool_settles_every_delivery_and_prefetches_its_size() {
    let log = SettlementLog::new();
    let queue = Arc::new(InMemoryQueueClient::new());
    queue.script(QueueType::CreateApplication, log.delivery(0, b"a".to_vec()));
    queue.script(QueueType::CreateApplication, log.delivery(1, b"requeue".to_vec()));
    queue.script(QueueType::CreateApplication, log.delivery(2, b"b".to_vec()));

    let controller =
        WorkerController::new(queue.clone(), Arc::new(acknowledging_handler(QueueType::CreateApplication)), 3);
    assert_eq!(controller.queue_type(), QueueType::CreateApplication);
    let pool = tokio::spawn(async move { controller.run().await });

    settled(&log, 3).await;
    pool.abort();

    assert_eq!(queue.consumed_prefetch(), vec![(QueueType::CreateApplication, 3)]);
    assert_eq!(log.settlements_of(0), vec![Settlement::Ack]);
    assert_eq!(log.settlements_of(1), vec![Settlement::Nack { requeue: true }]);
    assert_eq!(log.settlements_of(2), vec![Settlement::Ack]);
}

#[rstest]
#[tokio::test]
async fn worker_pool_stops_when_the_consumer_closes() {
    let mut queue = MockQueueClient::new();
    queue
        .expect_consume()
        .withf(|queue, prefetch| *queue == QueueType::PollApplication && *prefetch == 2)
        .times(1)
        .returning(|_, _| Ok(stream::empty().boxed()));

    let controller =
        WorkerController::new(Arc::new(queue), Arc::new(acknowledging_handler(QueueType::PollApplication)), 2);
    let result = tokio::time::timeout(Duration::from_secs(5), controller.run()).await.unwrap();

    assert!(matches!(result, Err(OrchestratorError::QueueError(QueueError::ConsumerClosed(_)))));
}

#[rstest]
#[tokio::test]
async fn worker_pool_fails_when_it_cannot_subscribe() {
    let mut queue = MockQueueClient::new();
    queue
        .expect_consume()
        .times(1)
        .returning(|_, _| Err(QueueError::ConsumerClosed("poll_applications".to_string())));

    let controller =
        WorkerController::new(Arc::new(queue), Arc::new(acknowledging_handler(QueueType::PollApplication)), 1);

    assert!(matches!(controller.run().await, Err(OrchestratorError::QueueError(_))));
}

#[rstest]
#[tokio::test]
async fn worker_pool_needs_workers() {
    let mut queue = MockQueueClient::new();
    queue.expect_consume().never();

    let controller =
        WorkerController::new(Arc::new(queue), Arc::new(acknowledging_handler(QueueType::CreateApplication)), 0);

    assert!(matches!(controller.run().await, Err(OrchestratorError::WorkerError(_))));
}
