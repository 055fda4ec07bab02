//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod map;
pub mod overview;
pub mod session;
pub mod state;
pub mod suppliers;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;
