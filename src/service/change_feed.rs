// service/change_feed.rs
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Redis pub/sub channel mirrored with every local change event.
pub const REDIS_CHANNEL: &str = "play888:changes";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Users,
    Agents,
    Players,
    Transactions,
    Referrals,
    GameplayReports,
    Repairs,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Insert,
    Patch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub collection: Collection,
    pub id: Uuid,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn insert(collection: Collection, id: Uuid) -> Self {
        ChangeEvent { collection, id, kind: ChangeKind::Insert }
    }

    pub fn patch(collection: Collection, id: Uuid) -> Self {
        ChangeEvent { collection, id, kind: ChangeKind::Patch }
    }
}

/// Fan-out of mutation notifications. Subscribers re-run their queries when
/// an event for a collection they watch arrives.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
    redis: Option<ConnectionManager>,
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("subscribers", &self.sender.receiver_count())
            .field("redis", &self.redis.is_some())
            .finish()
    }
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        ChangeFeed { sender, redis: None }
    }

    /// Mirrors events to Redis when the connection succeeds, otherwise stays local.
    pub async fn with_redis(capacity: usize, redis_url: &str) -> Self {
        let mut feed = ChangeFeed::new(capacity);

        match redis::Client::open(redis_url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(conn) => {
                    tracing::info!("✅ Redis connection established, publishing changes to {}", REDIS_CHANNEL);
                    feed.redis = Some(conn);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Failed to connect to Redis: {}. Change feed stays in-process.", e);
                }
            },
            Err(e) => {
                tracing::warn!("⚠️ Failed to create Redis client: {}. Change feed stays in-process.", e);
            }
        }

        feed
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn is_redis_available(&self) -> bool {
        self.redis.is_some()
    }

    pub async fn publish(&self, event: ChangeEvent) {
        // No receivers is not an error, there is simply nobody listening
        let _ = self.sender.send(event.clone());

        if let Some(redis) = &self.redis {
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!("Failed to encode change event: {}", e);
                    return;
                }
            };

            let mut conn = redis.clone();
            let published: Result<i64, redis::RedisError> = redis::cmd("PUBLISH")
                .arg(REDIS_CHANNEL)
                .arg(payload)
                .query_async(&mut conn)
                .await;

            if let Err(e) = published {
                tracing::warn!("Failed to publish change event to Redis: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let feed = ChangeFeed::new(8);
        let mut receiver = feed.subscribe();

        let id = Uuid::new_v4();
        feed.publish(ChangeEvent::patch(Collection::Agents, id)).await;

        let event = receiver.recv().await.unwrap();
        assert_eq!(event, ChangeEvent { collection: Collection::Agents, id, kind: ChangeKind::Patch });
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_silent() {
        let feed = ChangeFeed::new(8);
        feed.publish(ChangeEvent::insert(Collection::Players, Uuid::new_v4())).await;
        assert!(!feed.is_redis_available());
    }

    #[test]
    fn events_serialize_with_camel_case_collections() {
        let event = ChangeEvent::insert(Collection::GameplayReports, Uuid::nil());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["collection"], "gameplayReports");
        assert_eq!(json["kind"], "insert");
    }
}
