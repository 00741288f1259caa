//! Request middleware: authentication and rate limiting

pub mod auth;
pub mod rate_limit;

pub use auth::{auth_middleware, require_user_access, AuthUser, CurrentUser};
pub use rate_limit::rate_limited;
