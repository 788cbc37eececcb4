//! `WebSocket` handler for the realtime status channel.
//!
//! Clients connect to `GET /ws/status` and declare their audience in the
//! first text frame, e.g. `{"audience":"viewer"}`. A viewer then receives
//! one `initial_status` message holding the full current mapping,
//! followed by a `status_update` message per committed mutation, in
//! commit order. Operators receive no automatic pushes.
//!
//! A connection that never declares a valid audience is closed without
//! being registered.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};
use wardmap_types::{Audience, JoinRequest};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and run the
/// status channel protocol.
///
/// # Route
///
/// `GET /ws/status`
pub async fn ws_status(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the `WebSocket` lifecycle: read the audience declaration,
/// subscribe, then forward channel messages until either side hangs up.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let Some(audience) = read_join(&mut socket).await else {
        debug!("WebSocket client closed before declaring an audience");
        return;
    };

    let (id, mut rx) = state.subscribe(audience).await;
    debug!(subscriber = %id, audience = %audience, "subscriber joined");

    loop {
        tokio::select! {
            // A channel message to forward to this subscriber.
            outbound = rx.recv() => {
                match outbound {
                    Some(message) => {
                        let json = match serde_json::to_string(&message) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("Failed to serialize channel message: {e}");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!(subscriber = %id, "WebSocket client disconnected (send failed)");
                            break;
                        }
                    }
                    // The hub evicted this subscriber.
                    None => break,
                }
            }
            // Check if the client sent a close frame or disconnected.
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(subscriber = %id, "WebSocket client disconnected");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(subscriber = %id, "WebSocket client disconnected (pong failed)");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(subscriber = %id, "WebSocket error: {e}");
                        break;
                    }
                    _ => {
                        // Ignore other client frames; the channel is one-way.
                    }
                }
            }
        }
    }

    state.unsubscribe(id).await;
    debug!(subscriber = %id, "subscriber left");
}

/// Read frames until the client declares its audience.
///
/// Returns `None` if the connection closes, errors, or sends a frame
/// that is not a valid [`JoinRequest`].
async fn read_join(socket: &mut WebSocket) -> Option<Audience> {
    loop {
        match socket.recv().await {
            Some(Ok(Message::Text(text))) => {
                return match serde_json::from_str::<JoinRequest>(&text) {
                    Ok(join) => Some(join.audience),
                    Err(e) => {
                        debug!("invalid join message: {e}");
                        None
                    }
                };
            }
            Some(Ok(Message::Ping(data))) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    return None;
                }
            }
            Some(Ok(Message::Close(_))) | None => return None,
            Some(Err(e)) => {
                debug!("WebSocket error before join: {e}");
                return None;
            }
            _ => {
                // Ignore binary and pong frames while waiting for the join.
            }
        }
    }
}
