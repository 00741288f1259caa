//! Database row types
//!
//! Rows mirror table columns (audit columns included) and convert into the
//! shared API models. Enum columns are `TEXT` decoded straight into the
//! shared enums.

use sqlx::{postgres::PgRow, FromRow};

mod coffee;
mod flavor_tag;
mod roaster;
mod tasting;

pub use coffee::CoffeeRow;
pub use flavor_tag::{CoffeeFlavorRow, FlavorTagRow};
pub use roaster::RoasterRow;
pub use tasting::{TastingNoteRow, TastingSessionRow};

pub use shared::models::*;

/// A soft-deletable table with audit columns
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Table name
    const TABLE: &'static str;
    /// Column list selected into the row type
    const COLUMNS: &'static str;
    /// Human-readable name used in error messages
    const NAME: &'static str;
}
