//! Infrastructure layer: wire DTOs and the in-memory relay state.

pub mod dto;
pub mod repository;
