use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::{BrewMethod, Entity, FlavorTag, GrindSize, TastingNote, TastingSession};

#[derive(Debug, Clone, FromRow)]
pub struct TastingSessionRow {
    pub id: Uuid,
    pub coffee_id: Uuid,
    pub user_id: String,
    pub brew_method: BrewMethod,
    pub grind_size: Option<GrindSize>,
    pub coffee_dose: Option<Decimal>,
    pub water_amount: Option<Decimal>,
    pub water_temperature: Option<i32>,
    pub brew_time: Option<String>,
    pub grinder: Option<String>,
    pub brewing_device: Option<String>,
    pub filter_type: Option<String>,
    pub session_notes: Option<String>,
    pub overall_rating: Option<i32>,
    pub would_buy_again: Option<bool>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Present when selected with the coffee/roaster join
    #[sqlx(default)]
    pub coffee_name: Option<String>,
    #[sqlx(default)]
    pub roaster_name: Option<String>,
}

impl Entity for TastingSessionRow {
    const TABLE: &'static str = "tasting_session";
    const COLUMNS: &'static str = "id, coffee_id, user_id, brew_method, grind_size, \
        coffee_dose, water_amount, water_temperature, brew_time, grinder, brewing_device, \
        filter_type, session_notes, overall_rating, would_buy_again, \
        created_by, updated_by, deleted_by, deleted_at, created_at, updated_at";
    const NAME: &'static str = "Tasting session";
}

impl TastingSessionRow {
    pub fn into_model(self, tasting_notes: Vec<TastingNote>) -> TastingSession {
        TastingSession {
            id: self.id,
            coffee_id: self.coffee_id,
            user_id: self.user_id,
            coffee_name: self.coffee_name,
            roaster_name: self.roaster_name,
            brew_method: self.brew_method,
            grind_size: self.grind_size,
            coffee_dose: self.coffee_dose,
            water_amount: self.water_amount,
            water_temperature: self.water_temperature,
            brew_time: self.brew_time,
            grinder: self.grinder,
            brewing_device: self.brewing_device,
            filter_type: self.filter_type,
            session_notes: self.session_notes,
            overall_rating: self.overall_rating,
            would_buy_again: self.would_buy_again,
            tasting_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A tasting note joined with its flavor tag
#[derive(Debug, Clone, FromRow)]
pub struct TastingNoteRow {
    pub id: Uuid,
    pub tasting_session_id: Uuid,
    pub intensity: Option<i32>,
    pub notes: Option<String>,
    pub aroma: bool,
    pub flavor: bool,
    pub aftertaste: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub tag_id: Uuid,
    pub tag_name: String,
    pub tag_category: Option<String>,
    pub tag_description: Option<String>,
    pub tag_created_at: DateTime<Utc>,
    pub tag_updated_at: DateTime<Utc>,
}

impl From<TastingNoteRow> for TastingNote {
    fn from(row: TastingNoteRow) -> Self {
        TastingNote {
            id: row.id,
            tasting_session_id: row.tasting_session_id,
            flavor_tag: FlavorTag {
                id: row.tag_id,
                name: row.tag_name,
                category: row.tag_category,
                description: row.tag_description,
                created_at: row.tag_created_at,
                updated_at: row.tag_updated_at,
            },
            intensity: row.intensity,
            notes: row.notes,
            aroma: row.aroma,
            flavor: row.flavor,
            aftertaste: row.aftertaste,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
