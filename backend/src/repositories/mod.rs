//! Data access layer
//!
//! `Repository<E>` carries the audited CRUD shared by every table; each
//! entity adds its own queries in an inherent impl on its instantiation.

mod base;
mod coffee;
mod flavor_tag;
mod roaster;
mod tasting;

pub use base::{contains_pattern, escape_like, Repository};
pub use coffee::{CoffeeFilter, CoffeeRepository};
pub use flavor_tag::{normalize_tag_names, FlavorTagRepository};
pub use roaster::{RoasterFilter, RoasterRepository};
pub use tasting::{TastingRepository, USER_HISTORY_LIMIT};
