//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 生成した ID が既に使われていた（UUID v4 の衝突）
    #[error("connection id '{0}' is already registered")]
    DuplicateConnectionId(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// join のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ConnectError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateConnection(id) => Self::DuplicateConnectionId(id),
            other => Self::Repository(other),
        }
    }
}

impl From<RepositoryError> for JoinRoomError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionNotFound(id) => Self::UnknownConnection(id),
            other => Self::Repository(other),
        }
    }
}

impl From<RepositoryError> for DisconnectError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConnectionNotFound(id) => Self::UnknownConnection(id),
            other => Self::Repository(other),
        }
    }
}
