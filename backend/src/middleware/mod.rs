//! HTTP middleware for the Market Connect API

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
