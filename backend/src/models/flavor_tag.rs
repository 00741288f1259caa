use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Entity, FlavorTag};

#[derive(Debug, Clone, FromRow)]
pub struct FlavorTagRow {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for FlavorTagRow {
    const TABLE: &'static str = "flavortag";
    const COLUMNS: &'static str = "id, name, category, description, \
        created_by, updated_by, deleted_by, deleted_at, created_at, updated_at";
    const NAME: &'static str = "Flavor tag";
}

impl From<FlavorTagRow> for FlavorTag {
    fn from(row: FlavorTagRow) -> Self {
        FlavorTag {
            id: row.id,
            name: row.name,
            category: row.category,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A flavor tag joined through `coffee_flavors`
#[derive(Debug, Clone, FromRow)]
pub struct CoffeeFlavorRow {
    pub coffee_id: Uuid,
    #[sqlx(flatten)]
    pub tag: FlavorTagRow,
}
