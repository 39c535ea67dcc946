use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::{PortalError, Result};
use crate::realtime::types::{ChangeEvent, ChannelFilter, ClientFrame, ServerFrame};
use crate::realtime::{ChangeFeed, Subscription};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

struct Route {
    topic: String,
    events: mpsc::UnboundedSender<ChangeEvent>,
}

/// WebSocket client for the hosted service's change feed. One socket is
/// shared by all subscriptions; a reader task fans frames out to the
/// matching routes and a writer task owns the outbound half.
pub struct RealtimeClient {
    routes: Arc<DashMap<u64, Route>>,
    outbound: mpsc::UnboundedSender<Message>,
    next_route_id: AtomicU64,
}

impl RealtimeClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let (socket, _) = connect_async(url).await?;
        let (mut writer, mut reader) = socket.split();

        let routes: Arc<DashMap<u64, Route>> = Arc::new(DashMap::new());
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

        tokio::spawn(async move {
            let mut heartbeat =
                interval_at(Instant::now() + HEARTBEAT_INTERVAL, HEARTBEAT_INTERVAL);
            loop {
                tokio::select! {
                    frame = outbound_rx.recv() => {
                        let Some(frame) = frame else { break };
                        if let Err(err) = writer.send(frame).await {
                            tracing::error!("Realtime send failed: {}", err);
                            break;
                        }
                    }
                    _ = heartbeat.tick() => {
                        let text = match serde_json::to_string(&ClientFrame::Heartbeat) {
                            Ok(text) => text,
                            Err(err) => {
                                tracing::error!("Heartbeat encode failed: {}", err);
                                continue;
                            }
                        };
                        if let Err(err) = writer.send(Message::Text(text)).await {
                            tracing::error!("Realtime heartbeat failed: {}", err);
                            break;
                        }
                    }
                }
            }
        });

        let reader_routes = routes.clone();
        tokio::spawn(async move {
            while let Some(frame) = reader.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        if let Err(err) = route_frame(&reader_routes, &text) {
                            tracing::debug!("Ignoring unroutable frame: {}", err);
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::warn!("Realtime connection closed by the service");
                        break;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::error!("Realtime connection failed: {}", err);
                        break;
                    }
                }
            }
        });

        Ok(RealtimeClient {
            routes,
            outbound,
            next_route_id: AtomicU64::new(0),
        })
    }

    fn send_frame(&self, frame: &ClientFrame) -> Result<()> {
        let text = serde_json::to_string(frame)?;
        self.outbound
            .send(Message::Text(text))
            .map_err(|_| PortalError::Realtime("Connection is closed".to_string()))
    }
}

#[async_trait]
impl ChangeFeed for RealtimeClient {
    async fn subscribe(&self, filter: ChannelFilter) -> Result<Subscription> {
        let topic = filter.topic();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let route_id = self.next_route_id.fetch_add(1, Ordering::Relaxed);
        self.routes.insert(
            route_id,
            Route {
                topic: topic.clone(),
                events: events_tx,
            },
        );

        if let Err(err) = self.send_frame(&ClientFrame::Subscribe {
            topic: topic.clone(),
        }) {
            self.routes.remove(&route_id);
            return Err(err);
        }

        let routes = self.routes.clone();
        let outbound = self.outbound.clone();
        Ok(Subscription::new(events_rx, move || {
            routes.remove(&route_id);
            if let Ok(text) = serde_json::to_string(&ClientFrame::Unsubscribe { topic }) {
                let _ = outbound.send(Message::Text(text));
            }
        }))
    }
}

fn route_frame(routes: &DashMap<u64, Route>, text: &str) -> Result<()> {
    let frame: ServerFrame = serde_json::from_str(text)?;
    let Some(change) = frame.change() else {
        tracing::debug!("Skipping non-change frame for {}", frame.topic);
        return Ok(());
    };
    for entry in routes.iter() {
        let route = entry.value();
        if route.topic == frame.topic {
            // Receiver may already be gone; a dead route is removed by
            // the subscription guard, not here.
            let _ = route.events.send(change.clone());
        }
    }
    Ok(())
}
