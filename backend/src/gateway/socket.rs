//! Per-connection event loop. A connection only reaches this module
//! after its session cookie was validated at the handshake.

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::gateway::policy;
use crate::gateway::protocol::{ClientEvent, HistoryMessage, ServerEvent};
use crate::gateway::rooms::{ConnId, Outbound};
use crate::repositories::{messages, sessions};
use crate::state::AppState;
use crate::types::UserId;
use crate::validation::rules;

/// Backfill window delivered on join.
pub const HISTORY_LIMIT: i64 = 50;

pub async fn run(socket: WebSocket, state: AppState, user_id: UserId) {
    let conn_id: ConnId = Uuid::new_v4();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Writer task: drains the outbound channel into the socket. Room
    // broadcasts only ever touch the channel, never the socket itself.
    let writer = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_tx.send(WsMessage::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    tracing::debug!(%conn_id, user_id, "realtime connection established");

    while let Some(Ok(frame)) = ws_rx.next().await {
        match frame {
            WsMessage::Text(text) => {
                let event: ClientEvent = match serde_json::from_str(&text) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!(%conn_id, user_id, error = %e, "drop: unparseable frame");
                        continue;
                    }
                };
                handle_event(&state, user_id, conn_id, &tx, event).await;
            }
            WsMessage::Close(_) => break,
            // Ping/pong handled by the protocol layer; binary ignored.
            _ => {}
        }
    }

    // Unconditional cleanup, covering abrupt network loss.
    state.rooms.leave_all(conn_id).await;
    writer.abort();
    tracing::debug!(%conn_id, user_id, "realtime connection closed");
}

/// Applies one decoded client event for `user_id`'s connection. Split
/// from the socket loop so the event semantics can be driven directly
/// against fixture channels.
pub async fn handle_event(
    state: &AppState,
    user_id: UserId,
    conn_id: ConnId,
    tx: &Outbound,
    event: ClientEvent,
) {
    match event {
        ClientEvent::Join { friend_id } => {
            let Some(room) = policy::authorize_dm(&state.pool, user_id, friend_id).await else {
                return;
            };
            state.rooms.join(room, conn_id, tx.clone()).await;

            let history =
                match messages::recent_messages(&state.pool, user_id, friend_id, HISTORY_LIMIT)
                    .await
                {
                    Ok(rows) => rows,
                    Err(e) => {
                        tracing::error!(user_id, friend_id, error = %e, "history fetch failed");
                        return;
                    }
                };
            // History goes to the requesting connection only.
            send_to(
                tx,
                &ServerEvent::History {
                    messages: history.into_iter().map(HistoryMessage::from).collect(),
                },
            );
        }

        ClientEvent::TypeMessage { friend_id } => {
            let Some(room) = policy::authorize_dm(&state.pool, user_id, friend_id).await else {
                return;
            };
            // Typing implicitly joins the room; join is idempotent.
            state.rooms.join(room, conn_id, tx.clone()).await;

            if let Some(payload) = encode(&ServerEvent::TypeMessage { sender_id: user_id }) {
                state.rooms.broadcast_except(room, conn_id, &payload).await;
            }
        }

        ClientEvent::SendMessage { friend_id, body } => {
            let Some(body) = rules::normalize_body(&body, state.config.max_message_len) else {
                tracing::debug!(user_id, "drop: empty or oversized body");
                return;
            };
            let Some(room) = policy::authorize_dm(&state.pool, user_id, friend_id).await else {
                return;
            };
            state.rooms.join(room, conn_id, tx.clone()).await;

            // A valid send counts as activity: renew the session first.
            match sessions::bump_session(&state.pool, user_id, state.config.session_ttl_seconds)
                .await
            {
                Ok(_) => {}
                Err(e) => tracing::warn!(user_id, error = %e, "session bump failed"),
            }

            let (id, created_at) =
                match messages::append_message(&state.pool, user_id, friend_id, &body).await {
                    Ok(row) => row,
                    Err(e) => {
                        // No partial broadcast: nothing is emitted unless persisted.
                        tracing::error!(user_id, friend_id, error = %e, "message persist failed");
                        return;
                    }
                };

            // Sender included, so every open tab of theirs stays consistent.
            if let Some(payload) = encode(&ServerEvent::Message {
                id,
                body,
                created_at: created_at.to_rfc3339(),
                sender_id: user_id,
            }) {
                state.rooms.broadcast(room, &payload).await;
            }
        }
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode server event");
            None
        }
    }
}

fn send_to(tx: &Outbound, event: &ServerEvent) {
    if let Some(payload) = encode(event) {
        let _ = tx.send(payload);
    }
}
