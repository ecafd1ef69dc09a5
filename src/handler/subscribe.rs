use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::Query,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::get,
    Extension, Router,
};
use futures::{stream, Stream};
use serde::Deserialize;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
    service::change_feed::{ChangeEvent, Collection},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct SubscribeQuery {
    pub collection: Option<Collection>,
}

pub fn subscribe_handler() -> Router {
    Router::new().route("/", get(subscribe))
}

pub async fn subscribe(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<SubscribeQuery>,
) -> impl IntoResponse {
    let receiver = app_state.change_feed.subscribe();

    tracing::debug!(collection = ?query.collection, "change feed subscriber connected");

    Sse::new(change_stream(receiver, query.collection))
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

/// Turns broadcast events into SSE frames, dropping events for other
/// collections. A lagging receiver skips what it missed and carries on.
fn change_stream(
    receiver: broadcast::Receiver<ChangeEvent>,
    filter: Option<Collection>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(receiver, move |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if filter.is_some_and(|collection| collection != event.collection) {
                        continue;
                    }

                    let frame = match Event::default().event("change").json_data(&event) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!("Failed to encode change event: {}", e);
                            continue;
                        }
                    };

                    return Some((Ok(frame), receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("change feed subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::change_feed::ChangeFeed;
    use futures::StreamExt;
    use uuid::Uuid;

    #[tokio::test]
    async fn filtered_stream_only_yields_matching_collection() {
        let feed = ChangeFeed::new(16);
        let stream = change_stream(feed.subscribe(), Some(Collection::Players));
        futures::pin_mut!(stream);

        feed.publish(ChangeEvent::insert(Collection::Agents, Uuid::new_v4())).await;
        feed.publish(ChangeEvent::patch(Collection::Players, Uuid::new_v4())).await;
        drop(feed);

        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn lagging_subscriber_keeps_receiving() {
        let feed = ChangeFeed::new(2);
        let stream = change_stream(feed.subscribe(), None);
        futures::pin_mut!(stream);

        for _ in 0..5 {
            feed.publish(ChangeEvent::insert(Collection::Transactions, Uuid::new_v4())).await;
        }
        drop(feed);

        let received = stream.collect::<Vec<_>>().await;
        assert_eq!(received.len(), 2);
    }
}
