use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Entity, Roaster};

#[derive(Debug, Clone, FromRow)]
pub struct RoasterRow {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for RoasterRow {
    const TABLE: &'static str = "roaster";
    const COLUMNS: &'static str = "id, name, location, website, description, \
        created_by, updated_by, deleted_by, deleted_at, created_at, updated_at";
    const NAME: &'static str = "Roaster";
}

impl From<RoasterRow> for Roaster {
    fn from(row: RoasterRow) -> Self {
        Roaster {
            id: row.id,
            name: row.name,
            location: row.location,
            website: row.website,
            description: row.description,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
