//! UseCase 層
//!
//! リレーの各操作（接続・join・ブロードキャスト・typing・切断）を実装するレイヤー。
//! UI 層から呼び出され、Domain 層の RelayRepository を操作します。

pub mod connect_connection;
pub mod disconnect_connection;
pub mod error;
pub mod join_room;
pub mod relay_broadcast;
pub mod relay_typing;

pub use connect_connection::ConnectConnectionUseCase;
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::{ConnectError, DisconnectError, JoinRoomError};
pub use join_room::JoinRoomUseCase;
pub use relay_broadcast::RelayBroadcastUseCase;
pub use relay_typing::RelayTypingUseCase;
