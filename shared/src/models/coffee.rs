//! Coffee offering models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FlavorTag;

/// How the cherry was processed at origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "text", rename_all = "snake_case"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMethod {
    Washed,
    Natural,
    Honey,
    SemiWashed,
    WetHulled,
    CarbonicMaceration,
    Other,
}

impl ProcessingMethod {
    pub const ALL: [ProcessingMethod; 7] = [
        ProcessingMethod::Washed,
        ProcessingMethod::Natural,
        ProcessingMethod::Honey,
        ProcessingMethod::SemiWashed,
        ProcessingMethod::WetHulled,
        ProcessingMethod::CarbonicMaceration,
        ProcessingMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMethod::Washed => "washed",
            ProcessingMethod::Natural => "natural",
            ProcessingMethod::Honey => "honey",
            ProcessingMethod::SemiWashed => "semi_washed",
            ProcessingMethod::WetHulled => "wet_hulled",
            ProcessingMethod::CarbonicMaceration => "carbonic_maceration",
            ProcessingMethod::Other => "other",
        }
    }
}

/// Roast degree declared by the roaster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "text", rename_all = "snake_case"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl RoastLevel {
    pub const ALL: [RoastLevel; 5] = [
        RoastLevel::Light,
        RoastLevel::MediumLight,
        RoastLevel::Medium,
        RoastLevel::MediumDark,
        RoastLevel::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::MediumLight => "medium_light",
            RoastLevel::Medium => "medium",
            RoastLevel::MediumDark => "medium_dark",
            RoastLevel::Dark => "dark",
        }
    }
}

/// A specific coffee offering from a roaster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Coffee {
    pub id: Uuid,
    pub name: String,
    pub roaster_id: Uuid,

    // Origin
    pub origin_country: Option<String>,
    pub origin_region: Option<String>,
    pub farm_name: Option<String>,
    pub producer: Option<String>,
    /// Free text, e.g. "1200-1400m"
    pub altitude: Option<String>,

    pub processing_method: Option<ProcessingMethod>,
    pub variety: Option<String>,

    pub roast_level: Option<RoastLevel>,
    /// Free text, roasters print dates in many formats
    pub roast_date: Option<String>,

    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// e.g. "12oz", "340g"
    pub bag_size: Option<String>,

    pub flavor_tags: Vec<FlavorTag>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
