//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ServerEvent},
    infrastructure::dto::websocket::{ServerMessage, encode_server_message},
    ui::state::AppState,
};

use super::session::{ConnectionSession, Phase};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// Events are encoded to the wire format right before sending.
/// The task ends when the socket write fails or every sender of the channel is dropped.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
    mut sender: SplitSink<WebSocket, Message>,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let kind = event.kind();
            let text = match encode_server_message(&ServerMessage::from(event)) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to encode '{}' for '{}': {}", kind, connection_id, e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(text.into())).await {
                tracing::debug!("Failed to push '{}' to '{}': {}", kind, connection_id, e);
                break;
            }
        }
    })
}

/// Reads frames until the client closes, the transport fails, or the session ends the connection.
async fn receive_loop(session: &mut ConnectionSession, receiver: &mut SplitStream<WebSocket>) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", session.connection_id(), e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                if let Err(e) = session.handle_text(text.as_str()).await {
                    tracing::warn!("Closing connection '{}': {}", session.connection_id(), e);
                    break;
                }
            }
            Message::Binary(_) => {
                tracing::warn!(
                    "Closing connection '{}': binary frames are not supported",
                    session.connection_id()
                );
                break;
            }
            Message::Ping(_) | Message::Pong(_) => {
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", session.connection_id());
                break;
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection '{}' opened", connection_id);

    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = ConnectionSession::new(state, connection_id.clone(), tx);

    let mut send_task = pusher_loop(rx, sender, connection_id.clone());

    // If either side completes, stop the other
    tokio::select! {
        _ = receive_loop(&mut session, &mut receiver) => {}
        _ = &mut send_task => {}
    }
    send_task.abort();

    let was_joined = matches!(session.phase(), Phase::Joined(_));
    session.disconnect().await;
    tracing::info!(
        "Connection '{}' closed{}",
        connection_id,
        if was_joined { " and left its space" } else { "" }
    );
}
