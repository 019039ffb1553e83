//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::TrackerEvent;
use crate::service::RewardsService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards subscribed events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<TrackerEvent>,
    service: Arc<RewardsService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&text, &mut subs, &service).await;
                        if let Some(reply_json) = reply
                            && ws_tx.send(Message::text(reply_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(tracker_event) => {
                        if subs.matches(&tracker_event) {
                            let msg = WsMessage::server(
                                WsMessageType::Event,
                                serde_json::to_value(&tracker_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON reply.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    service: &RewardsService,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let reply = match command {
        WsCommand::Subscribe { events } => {
            let unknown = subs.subscribe(&events);
            WsMessage::reply(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({ "subscribed": subs.event_types(), "unknown": unknown }),
            )
        }
        WsCommand::Unsubscribe { events } => {
            let unknown = subs.unsubscribe(&events);
            WsMessage::reply(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({ "subscribed": subs.event_types(), "unknown": unknown }),
            )
        }
        WsCommand::Refresh => match service.collect().await {
            Ok(summary) => WsMessage::reply(
                msg.id,
                WsMessageType::Response,
                serde_json::to_value(&summary).unwrap_or_default(),
            ),
            Err(err) => WsMessage::reply(
                msg.id,
                WsMessageType::Error,
                serde_json::json!({ "code": err.error_code(), "message": err.to_string() }),
            ),
        },
        WsCommand::GetStatus => {
            match service
                .store()
                .latest_node_status(&service.config().address)
                .await
            {
                Ok(status) => WsMessage::reply(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::to_value(&status).unwrap_or_default(),
                ),
                Err(err) => WsMessage::reply(
                    msg.id,
                    WsMessageType::Error,
                    serde_json::json!({ "code": err.error_code(), "message": err.to_string() }),
                ),
            }
        }
    };
    serde_json::to_string(&reply).ok()
}
