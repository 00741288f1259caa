//! Request/response contracts for the HTTP API
//!
//! Create payloads carry every required field; update payloads are partial
//! and leave absent fields unchanged.

mod coffee;
mod flavor_tag;
mod roaster;
mod tasting;

pub use coffee::*;
pub use flavor_tag::*;
pub use roaster::*;
pub use tasting::*;
