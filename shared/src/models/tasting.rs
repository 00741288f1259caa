//! Tasting session and tasting note models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FlavorTag;

/// Brewing method used in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "text", rename_all = "snake_case"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BrewMethod {
    PourOver,
    FrenchPress,
    Espresso,
    Aeropress,
    Chemex,
    V60,
    Kalita,
    Siphon,
    ColdBrew,
    MokaPot,
    Drip,
    Other,
}

impl BrewMethod {
    pub const ALL: [BrewMethod; 12] = [
        BrewMethod::PourOver,
        BrewMethod::FrenchPress,
        BrewMethod::Espresso,
        BrewMethod::Aeropress,
        BrewMethod::Chemex,
        BrewMethod::V60,
        BrewMethod::Kalita,
        BrewMethod::Siphon,
        BrewMethod::ColdBrew,
        BrewMethod::MokaPot,
        BrewMethod::Drip,
        BrewMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrewMethod::PourOver => "pour_over",
            BrewMethod::FrenchPress => "french_press",
            BrewMethod::Espresso => "espresso",
            BrewMethod::Aeropress => "aeropress",
            BrewMethod::Chemex => "chemex",
            BrewMethod::V60 => "v60",
            BrewMethod::Kalita => "kalita",
            BrewMethod::Siphon => "siphon",
            BrewMethod::ColdBrew => "cold_brew",
            BrewMethod::MokaPot => "moka_pot",
            BrewMethod::Drip => "drip",
            BrewMethod::Other => "other",
        }
    }
}

/// Grind setting used in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "text", rename_all = "snake_case"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum GrindSize {
    ExtraFine,
    Fine,
    MediumFine,
    Medium,
    MediumCoarse,
    Coarse,
    ExtraCoarse,
}

impl GrindSize {
    pub const ALL: [GrindSize; 7] = [
        GrindSize::ExtraFine,
        GrindSize::Fine,
        GrindSize::MediumFine,
        GrindSize::Medium,
        GrindSize::MediumCoarse,
        GrindSize::Coarse,
        GrindSize::ExtraCoarse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrindSize::ExtraFine => "extra_fine",
            GrindSize::Fine => "fine",
            GrindSize::MediumFine => "medium_fine",
            GrindSize::Medium => "medium",
            GrindSize::MediumCoarse => "medium_coarse",
            GrindSize::Coarse => "coarse",
            GrindSize::ExtraCoarse => "extra_coarse",
        }
    }
}

/// A recorded brewing/tasting event for a coffee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TastingSession {
    pub id: Uuid,
    pub coffee_id: Uuid,
    /// Subject of the access token that recorded the session
    pub user_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coffee_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roaster_name: Option<String>,

    // Brewing parameters
    pub brew_method: BrewMethod,
    pub grind_size: Option<GrindSize>,

    // Measurements
    /// grams
    pub coffee_dose: Option<Decimal>,
    /// grams or ml
    pub water_amount: Option<Decimal>,
    /// celsius
    pub water_temperature: Option<i32>,
    /// e.g. "4:30", "2m 30s"
    pub brew_time: Option<String>,

    // Equipment
    pub grinder: Option<String>,
    pub brewing_device: Option<String>,
    pub filter_type: Option<String>,

    pub session_notes: Option<String>,
    /// 1-10
    pub overall_rating: Option<i32>,
    pub would_buy_again: Option<bool>,

    pub tasting_notes: Vec<TastingNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An individual flavor observation within a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TastingNote {
    pub id: Uuid,
    pub tasting_session_id: Uuid,
    pub flavor_tag: FlavorTag,
    /// 1-10
    pub intensity: Option<i32>,
    pub notes: Option<String>,
    /// Detected in aroma
    pub aroma: bool,
    /// Detected in flavor
    pub flavor: bool,
    /// Detected in aftertaste
    pub aftertaste: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
