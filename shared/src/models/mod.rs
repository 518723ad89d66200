//! Domain models for the Market Connect platform

mod analytics;
mod business;
mod offer;
mod user;

pub use analytics::*;
pub use business::*;
pub use offer::*;
pub use user::*;
