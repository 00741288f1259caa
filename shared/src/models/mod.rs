//! Domain models for the Coffee Tasting API

mod coffee;
mod flavor_tag;
mod roaster;
mod tasting;

pub use coffee::*;
pub use flavor_tag::*;
pub use roaster::*;
pub use tasting::*;
