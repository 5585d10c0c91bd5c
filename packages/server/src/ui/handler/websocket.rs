//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, CourseId, PlayerName, RoomId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards queued frames from the rx channel to the WebSocket sender.
///
/// Ends when the channel closes or the socket rejects a frame.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_participant_usecase.execute(tx).await;

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch(&state_clone, &connection_id_clone, event).await,
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring malformed event from '{}': {}",
                            connection_id_clone,
                            e
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push events to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await;
}

/// Route one inbound event to its use case.
///
/// Errors are logged and never reported back over the socket.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::CreateRoom { player_name } => {
            if let Err(e) = state
                .create_room_usecase
                .execute(connection_id.clone(), PlayerName::new(player_name))
                .await
            {
                tracing::error!("Failed to create room for '{}': {}", connection_id, e);
            }
        }
        ClientEvent::JoinRoom {
            room_id,
            player_name,
        } => {
            let room_id = match RoomId::new(room_id) {
                Ok(room_id) => room_id,
                Err(e) => {
                    tracing::warn!("Invalid joinRoom from '{}': {}", connection_id, e);
                    return;
                }
            };
            if let Err(e) = state
                .join_room_usecase
                .execute(connection_id.clone(), room_id, PlayerName::new(player_name))
                .await
            {
                tracing::warn!("joinRoom from '{}' ignored: {}", connection_id, e);
            }
        }
        ClientEvent::LeaveRoom => {
            if let Err(e) = state.leave_room_usecase.execute(connection_id).await {
                tracing::debug!("leaveRoom from '{}' ignored: {}", connection_id, e);
            }
        }
        ClientEvent::PlayerReady { room_id, course_id } => {
            let room_id = match RoomId::new(room_id) {
                Ok(room_id) => room_id,
                Err(e) => {
                    tracing::warn!("Invalid playerReady from '{}': {}", connection_id, e);
                    return;
                }
            };
            if let Err(e) = state
                .player_ready_usecase
                .execute(connection_id, &room_id, CourseId::from_optional(course_id))
                .await
            {
                tracing::warn!("playerReady from '{}' ignored: {}", connection_id, e);
            }
        }
        ClientEvent::Answer { correct } => {
            if let Err(e) = state
                .submit_answer_usecase
                .execute(connection_id, correct)
                .await
            {
                tracing::debug!("answer from '{}' ignored: {}", connection_id, e);
            }
        }
    }
}
