// WebSocket handler: subscribe to the registry, forward update envelopes.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::DashboardUpdate;
use crate::registry::{SubscriberId, SubscriberRegistry};

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Unregisters the subscriber on drop, whichever way the stream loop exits.
struct SubscriberGuard {
    registry: Arc<SubscriberRegistry>,
    id: SubscriberId,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.registry.disconnect(self.id);
    }
}

pub(super) async fn ws_dashboard(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let registry = state.registry.clone();
    ws.on_upgrade(move |socket| async move {
        let (id, rx) = registry.connect();
        let _guard = SubscriberGuard {
            registry: registry.clone(),
            id,
        };
        if let Err(e) = stream_updates(socket, rx).await {
            tracing::info!(subscriber_id = id, "dashboard stream error: {}", e);
        }
    })
}

async fn stream_updates(
    socket: WebSocket,
    mut rx: mpsc::Receiver<Arc<DashboardUpdate>>,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to dashboard stream");
    let (mut sink, mut stream) = socket.split();
    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            update = rx.recv() => {
                match update {
                    Some(update) => {
                        let json = serde_json::to_string(update.as_ref())?;
                        let r = timeout(WS_SEND_TIMEOUT, sink.send(Message::Text(json.into()))).await;
                        if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                            break;
                        }
                    }
                    // Registry pruned this subscriber; close the socket
                    None => break,
                }
            }
            // Drain client frames so a close is noticed right away
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, sink.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
