//! Test fixtures: an in-process relay server and a WebSocket test client.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use famchat_server::{
    infrastructure::dto::websocket::{ConnectedMessage, ServerEventEnvelope, ServerEventType},
    ui::{AppState, serve},
};
use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::oneshot,
    task::JoinHandle,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long a client waits before concluding that nothing is coming
pub const SILENCE: Duration = Duration::from_millis(300);

/// Relay server bound to an ephemeral port, stopped on drop
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let state = Arc::new(AppState::new());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            serve(listener, state, shutdown)
                .await
                .expect("Test server failed");
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/api/socket", self.addr)
    }

    /// Detail URL of `room`, with the key percent-encoded as one path segment.
    pub fn room_url(&self, room: &str) -> reqwest::Url {
        let mut url = reqwest::Url::parse(&self.base_url()).expect("Invalid base URL");
        url.path_segments_mut()
            .expect("Base URL cannot have path segments")
            .pop_if_empty()
            .extend(["api", "rooms", room]);
        url
    }

    /// Wait until `room` has exactly `count` members.
    ///
    /// Joins carry no acknowledgement, so tests sync on the introspection API.
    /// The room list is polled rather than the detail route so that every key,
    /// including the empty one, can be waited on.
    pub async fn wait_for_members(&self, room: &str, count: usize) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/rooms", self.base_url());

        for _ in 0..200 {
            let rooms: serde_json::Value = client
                .get(&url)
                .send()
                .await
                .expect("Failed to query rooms")
                .json()
                .await
                .expect("Invalid JSON");
            let current = rooms
                .as_array()
                .and_then(|rooms| rooms.iter().find(|entry| entry["room"] == room))
                .and_then(|entry| entry["member_count"].as_u64())
                .unwrap_or(0);
            if current == count as u64 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room '{room}' never reached {count} member(s)");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.handle.abort();
    }
}

/// One WebSocket connection to the relay
pub struct TestClient {
    pub connection_id: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `connected` greeting.
    pub async fn connect(server: &TestServer) -> Self {
        let (mut stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");

        let greeting = next_text(&mut stream, Duration::from_secs(5))
            .await
            .expect("No greeting received");
        let connected: ConnectedMessage =
            serde_json::from_str(&greeting).expect("Greeting is not a connected message");
        assert_eq!(connected.r#type, ServerEventType::Connected);

        Self {
            connection_id: connected.connection_id,
            stream,
        }
    }

    pub async fn send_text(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        self.stream
            .send(Message::Text(text.into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, room: &str) {
        let frame = serde_json::json!({"type": "join", "room": room});
        self.send_text(frame.to_string()).await;
    }

    /// Send `relay-broadcast` with `raw_payload` spliced in verbatim.
    pub async fn broadcast(&mut self, room: &str, raw_payload: &str) {
        let room = serde_json::to_string(room).expect("Failed to encode room");
        self.send_text(format!(
            r#"{{"type":"relay-broadcast","room":{room},"payload":{raw_payload}}}"#
        ))
        .await;
    }

    pub async fn typing(&mut self, room: &str, user: &str) {
        let frame = serde_json::json!({"type": "relay-typing", "room": room, "user": user});
        self.send_text(frame.to_string()).await;
    }

    /// Next text frame, or `None` if nothing arrives within `wait`.
    pub async fn next_frame(&mut self, wait: Duration) -> Option<String> {
        next_text(&mut self.stream, wait).await
    }

    /// Next text frame, failing the test if none arrives.
    pub async fn expect_frame(&mut self) -> String {
        self.next_frame(Duration::from_secs(5))
            .await
            .expect("Expected a frame but none arrived")
    }

    /// Fail the test if any frame arrives within [`SILENCE`].
    pub async fn expect_silence(&mut self) {
        if let Some(frame) = self.next_frame(SILENCE).await {
            panic!("Expected no frame, got {frame}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

/// Type of a relay frame
pub fn frame_type(frame: &str) -> ServerEventType {
    serde_json::from_str::<ServerEventEnvelope>(frame)
        .expect("Frame has no type")
        .r#type
}

async fn next_text(
    stream: &mut WebSocketStream<MaybeTlsStream<TcpStream>>,
    wait: Duration,
) -> Option<String> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        let msg = tokio::time::timeout_at(deadline, stream.next()).await.ok()??;
        match msg.expect("WebSocket error") {
            Message::Text(text) => return Some(text.as_str().to_string()),
            Message::Close(_) => return None,
            _ => continue,
        }
    }
}
