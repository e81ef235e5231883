//! HTTP API response DTOs for the relay.

use serde::{Deserialize, Serialize};

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub members: Vec<String>,
    pub member_count: usize,
}

/// Room detail for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub room: String,
    pub members: Vec<MemberDetailDto>,
}

/// One joined connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub connection_id: String,
    pub connected_at: String, // RFC 3339
}

/// Result of the server-side publish hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponseDto {
    pub room: String,
    pub delivered: usize,
}
