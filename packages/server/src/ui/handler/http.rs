//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use famchat_shared::time::millis_to_rfc3339;
use serde_json::value::RawValue;

use crate::{
    domain::RoomKey,
    infrastructure::dto::{
        http::{MemberDetailDto, PublishResponseDto, RoomDetailDto, RoomSummaryDto},
        websocket::NewMessage,
    },
    ui::state::AppState,
    usecase::RelayBroadcastUseCase,
};

/// Health check endpoint. Also reports how many connections are open.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let connections = state.repository.count_connections().await;
    Json(serde_json::json!({"status": "ok", "connections": connections}))
}

/// List every room that currently has members
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.repository.list_rooms().await;

    Json(
        rooms
            .into_iter()
            .map(|(room, members)| RoomSummaryDto {
                room: room.into_string(),
                member_count: members.len(),
                members: members.into_iter().map(|id| id.into_string()).collect(),
            })
            .collect(),
    )
}

/// Members of one room. 404 when nobody is joined.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room = RoomKey::from(room);
    let member_ids = state.repository.members(&room).await;
    if member_ids.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }

    let mut members = Vec::with_capacity(member_ids.len());
    for id in member_ids {
        // A member may disconnect between the two reads
        if let Ok(connection) = state.repository.get_connection(&id).await {
            members.push(MemberDetailDto {
                connection_id: connection.id.into_string(),
                connected_at: millis_to_rfc3339(connection.connected_at.value()),
            });
        }
    }

    Ok(Json(RoomDetailDto {
        room: room.into_string(),
        members,
    }))
}

/// Server-side publish hook.
///
/// Fans the request body out to the room as a `new-message` event, the same
/// frame `relay-broadcast` produces. The body must be JSON (400 otherwise) and
/// is forwarded byte for byte. Zero listeners is not an error.
pub async fn publish_message(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    body: String,
) -> Result<(StatusCode, Json<PublishResponseDto>), StatusCode> {
    let room = RoomKey::from(room);
    let payload = RawValue::from_string(body).map_err(|e| {
        tracing::warn!("Rejected publish to '{}': {}", room, e);
        StatusCode::BAD_REQUEST
    })?;
    let frame = serde_json::to_string(&NewMessage::new(&room, payload)).map_err(|e| {
        tracing::error!("Failed to encode new-message: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let usecase = RelayBroadcastUseCase::new(state.repository.clone());
    let delivered = usecase.execute(&room, frame).await;
    tracing::info!(
        "Published message to room '{}' ({} connection(s))",
        room,
        delivered
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(PublishResponseDto {
            room: room.into_string(),
            delivered,
        }),
    ))
}
