//! Shared types and models for the Coffee Tasting API
//!
//! This crate contains the domain models, request/response schemas and pure
//! validation helpers shared between the backend and its clients.

pub mod models;
pub mod schemas;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
