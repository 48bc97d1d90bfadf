use async_trait::async_trait;
use futures::StreamExt;
use lapin::options::{BasicConsumeOptions, BasicPublishOptions, BasicQosOptions, ConfirmSelectOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use strum::IntoEnumIterator;
use tracing::{debug, info};
use uuid::Uuid;

use super::delivery::Delivery;
use super::error::QueueError;
use super::{DeliveryStream, QueueClient};
use crate::types::constant::{JSON_CONTENT_TYPE, PERSISTENT_DELIVERY_MODE};
use crate::types::params::QueueArgs;
use crate::types::queue::QueueType;

/// RabbitMQ client.
///
/// Publishes go through one shared confirm-mode channel. Each consumer gets a
/// channel of its own so its prefetch limit does not affect anyone else.
pub struct RabbitMQ {
    connection: Connection,
    publish_channel: Channel,
    queue_args: QueueArgs,
}

impl RabbitMQ {
    pub async fn new(args: &QueueArgs) -> Result<Self, QueueError> {
        let connection = Connection::connect(&args.uri, ConnectionProperties::default()).await?;
        let publish_channel = connection.create_channel().await?;
        publish_channel.confirm_select(ConfirmSelectOptions::default()).await?;

        let client = Self { connection, publish_channel, queue_args: args.clone() };
        for queue in QueueType::iter() {
            client.declare_queue(queue).await?;
        }
        info!("Connected to RabbitMQ");
        Ok(client)
    }

    pub fn get_queue_name(&self, queue: QueueType) -> &str {
        self.queue_args.queue_name(queue)
    }

    async fn declare_on(channel: &Channel, queue_name: &str) -> Result<(), QueueError> {
        channel
            .queue_declare(
                queue_name,
                QueueDeclareOptions { durable: true, exclusive: false, auto_delete: false, ..Default::default() },
                FieldTable::default(),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl QueueClient for RabbitMQ {
    async fn send_message(&self, queue: QueueType, payload: String) -> Result<(), QueueError> {
        let queue_name = self.get_queue_name(queue);
        let properties = BasicProperties::default()
            .with_delivery_mode(PERSISTENT_DELIVERY_MODE)
            .with_content_type(JSON_CONTENT_TYPE.into());

        let confirmation = self
            .publish_channel
            .basic_publish("", queue_name, BasicPublishOptions::default(), payload.as_bytes(), properties)
            .await?
            .await?;
        if confirmation.is_nack() {
            return Err(QueueError::PublishNotConfirmed(queue_name.to_string()));
        }

        debug!(queue = %queue_name, "Published message");
        Ok(())
    }

    async fn consume(&self, queue: QueueType, prefetch: usize) -> Result<DeliveryStream, QueueError> {
        let queue_name = self.get_queue_name(queue).to_string();
        let prefetch_count = u16::try_from(prefetch).map_err(|_| QueueError::InvalidPrefetch(prefetch))?;

        let channel = self.connection.create_channel().await?;
        Self::declare_on(&channel, &queue_name).await?;
        channel.basic_qos(prefetch_count, BasicQosOptions::default()).await?;
        let consumer_tag = format!("{}-{}", queue_name, Uuid::new_v4());
        let consumer =
            channel.basic_consume(&queue_name, &consumer_tag, BasicConsumeOptions::default(), FieldTable::default()).await?;
        info!(queue = %queue_name, prefetch = prefetch_count, consumer_tag = %consumer_tag, "Subscribed to queue");

        // The stream owns the channel so it stays open for as long as deliveries are read.
        let stream = consumer.map(move |delivery| {
            let _channel = &channel;
            delivery.map(Delivery::from).map_err(QueueError::from)
        });
        Ok(stream.boxed())
    }

    async fn declare_queue(&self, queue: QueueType) -> Result<(), QueueError> {
        let queue_name = self.get_queue_name(queue);
        Self::declare_on(&self.publish_channel, queue_name).await?;
        debug!(queue = %queue_name, "Declared queue");
        Ok(())
    }
}
