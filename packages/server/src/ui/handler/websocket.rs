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

use crate::{
    domain::{ConnectionId, frame_channel},
    infrastructure::dto::websocket::{
        ClientEvent, ConnectedMessage, NewMessage, UserTypingMessage,
    },
    ui::state::AppState,
    usecase::{
        ConnectConnectionUseCase, DisconnectConnectionUseCase, JoinRoomUseCase,
        RelayBroadcastUseCase, RelayTypingUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Frames for this connection (relayed events and its own echoes)
    let (tx, mut rx) = frame_channel();

    let connect_usecase = ConnectConnectionUseCase::new(state.repository.clone());
    let connection = match connect_usecase.execute(tx).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };
    let connection_id = connection.id;
    tracing::info!("Connection '{}' opened", connection_id);

    match serde_json::to_string(&ConnectedMessage::new(connection_id.as_str())) {
        Ok(greeting) => {
            if let Err(e) = sender.send(Message::Text(greeting.into())).await {
                tracing::warn!("Failed to greet '{}': {}", connection_id, e);
            }
        }
        Err(e) => tracing::error!("Failed to encode greeting: {}", e),
    }

    let recv_state = state.clone();
    let recv_id = connection_id.clone();

    // Frames from the client are handled one at a time, in arrival order.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handle_text_frame(&recv_state, &recv_id, text.as_str()).await,
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", recv_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket layer
                _ => {}
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase = DisconnectConnectionUseCase::new(state.repository.clone());
    match disconnect_usecase.execute(&connection_id).await {
        Ok(rooms) => tracing::info!(
            "Connection '{}' closed, left {} room(s)",
            connection_id,
            rooms.len()
        ),
        Err(e) => tracing::warn!("Failed to clean up '{}': {}", connection_id, e),
    }
}

/// Decode and dispatch one client text frame.
///
/// Frames that cannot be decoded are logged and dropped; the connection stays open.
async fn handle_text_frame(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::Join { room } => {
            let usecase = JoinRoomUseCase::new(state.repository.clone());
            match usecase.execute(connection_id, room.clone()).await {
                Ok(true) => tracing::info!("'{}' joined room '{}'", connection_id, room),
                Ok(false) => tracing::debug!("'{}' already in room '{}'", connection_id, room),
                Err(e) => tracing::warn!("Join failed for '{}': {}", connection_id, e),
            }
        }
        ClientEvent::RelayBroadcast { room, payload } => {
            let frame = match serde_json::to_string(&NewMessage::new(&room, payload)) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Failed to encode new-message: {}", e);
                    return;
                }
            };
            let usecase = RelayBroadcastUseCase::new(state.repository.clone());
            let delivered = usecase.execute(&room, frame).await;
            tracing::debug!(
                "Relayed message from '{}' to {} connection(s) in '{}'",
                connection_id,
                delivered,
                room
            );
        }
        ClientEvent::RelayTyping { room, user } => {
            let frame = match serde_json::to_string(&UserTypingMessage::new(&room, user)) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Failed to encode user-typing: {}", e);
                    return;
                }
            };
            let usecase = RelayTypingUseCase::new(state.repository.clone());
            let delivered = usecase.execute(connection_id, &room, frame).await;
            tracing::trace!(
                "Relayed typing from '{}' to {} connection(s) in '{}'",
                connection_id,
                delivered,
                room
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, ConnectionIdFactory, RoomKey, Timestamp},
        infrastructure::dto::websocket::{ServerEventEnvelope, ServerEventType},
    };
    use crate::domain::FrameReceiver;

    async fn registered(state: &AppState) -> (ConnectionId, FrameReceiver) {
        let (tx, rx) = frame_channel();
        let connection = Connection::new(ConnectionIdFactory::generate(), Timestamp::new(0));
        state
            .repository
            .register(connection.clone(), tx)
            .await
            .unwrap();
        (connection.id, rx)
    }

    fn event_type(frame: &str) -> ServerEventType {
        serde_json::from_str::<ServerEventEnvelope>(frame)
            .unwrap()
            .r#type
    }

    #[tokio::test]
    async fn test_join_frame_adds_membership() {
        // テスト項目: join フレームで room のメンバーになる
        let state = AppState::new();
        let (id, _rx) = registered(&state).await;

        handle_text_frame(&state, &id, r#"{"type":"join","room":"family-42"}"#).await;

        assert_eq!(
            state.repository.members(&RoomKey::from("family-42")).await,
            vec![id]
        );
    }

    #[tokio::test]
    async fn test_broadcast_frame_echoes_to_sender() {
        // テスト項目: relay-broadcast は送信者にもエコーされる
        // given (前提条件):
        let state = AppState::new();
        let (id, mut rx) = registered(&state).await;
        handle_text_frame(&state, &id, r#"{"type":"join","room":"family-42"}"#).await;

        // when (操作):
        handle_text_frame(
            &state,
            &id,
            r#"{"type":"relay-broadcast","room":"family-42","payload":{"id":"m1"}}"#,
        )
        .await;

        // then (期待する結果):
        let frame = rx.try_recv().unwrap();
        assert_eq!(event_type(&frame), ServerEventType::NewMessage);
        assert_eq!(
            frame,
            r#"{"type":"new-message","room":"family-42","payload":{"id":"m1"}}"#
        );
    }

    #[tokio::test]
    async fn test_typing_frame_skips_sender() {
        // テスト項目: relay-typing は送信者には届かず、他のメンバーに届く
        let state = AppState::new();
        let (alice, mut alice_rx) = registered(&state).await;
        let (bob, mut bob_rx) = registered(&state).await;
        for id in [&alice, &bob] {
            handle_text_frame(&state, id, r#"{"type":"join","room":"family-42"}"#).await;
        }

        handle_text_frame(
            &state,
            &alice,
            r#"{"type":"relay-typing","room":"family-42","user":"Alice"}"#,
        )
        .await;

        assert!(alice_rx.try_recv().is_err());
        assert_eq!(
            bob_rx.try_recv().unwrap(),
            r#"{"type":"user-typing","room":"family-42","user":"Alice"}"#
        );
    }

    #[tokio::test]
    async fn test_malformed_frame_is_ignored() {
        // テスト項目: 解釈できないフレームは無視され、状態は変わらない
        let state = AppState::new();
        let (id, mut rx) = registered(&state).await;

        for text in ["not json", r#"{"type":"leave"}"#, r#"{"type":"join"}"#] {
            handle_text_frame(&state, &id, text).await;
        }

        assert!(state.repository.list_rooms().await.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
