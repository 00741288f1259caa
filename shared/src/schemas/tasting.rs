//! Tasting session and note schemas

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{BrewMethod, GrindSize, TastingSession};
use crate::types::{default_limit, Pagination};
use crate::validation::{validate_measurement_field, validate_not_blank_field};

/// A flavor observation submitted with a session or on its own
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TastingNoteCreate {
    /// Resolved to a flavor tag, created when unknown
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank_field")]
    pub flavor_name: String,
    #[validate(range(min = 1, max = 10))]
    pub intensity: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub aroma: bool,
    #[serde(default)]
    pub flavor: bool,
    #[serde(default)]
    pub aftertaste: bool,
}

/// Payload for recording a tasting session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TastingSessionCreate {
    pub coffee_id: Uuid,

    pub brew_method: BrewMethod,
    pub grind_size: Option<GrindSize>,

    #[validate(custom = "validate_measurement_field")]
    pub coffee_dose: Option<Decimal>,
    #[validate(custom = "validate_measurement_field")]
    pub water_amount: Option<Decimal>,
    #[validate(range(min = 0, max = 100))]
    pub water_temperature: Option<i32>,
    #[validate(length(max = 20))]
    pub brew_time: Option<String>,

    #[validate(length(max = 255))]
    pub grinder: Option<String>,
    #[validate(length(max = 255))]
    pub brewing_device: Option<String>,
    #[validate(length(max = 100))]
    pub filter_type: Option<String>,

    pub session_notes: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub overall_rating: Option<i32>,
    pub would_buy_again: Option<bool>,

    #[serde(default)]
    #[validate]
    pub tasting_notes: Vec<TastingNoteCreate>,
}

/// Partial session update; notes are managed separately
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TastingSessionUpdate {
    pub coffee_id: Option<Uuid>,

    pub brew_method: Option<BrewMethod>,
    pub grind_size: Option<GrindSize>,

    #[validate(custom = "validate_measurement_field")]
    pub coffee_dose: Option<Decimal>,
    #[validate(custom = "validate_measurement_field")]
    pub water_amount: Option<Decimal>,
    #[validate(range(min = 0, max = 100))]
    pub water_temperature: Option<i32>,
    #[validate(length(max = 20))]
    pub brew_time: Option<String>,

    #[validate(length(max = 255))]
    pub grinder: Option<String>,
    #[validate(length(max = 255))]
    pub brewing_device: Option<String>,
    #[validate(length(max = 100))]
    pub filter_type: Option<String>,

    pub session_notes: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub overall_rating: Option<i32>,
    pub would_buy_again: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct TastingListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
}

impl TastingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TastingSessionListResponse {
    pub tastings: Vec<TastingSession>,
    pub total: i64,
    pub page: i64,
    pub size: usize,
}

impl TastingSessionListResponse {
    pub fn new(tastings: Vec<TastingSession>, total: i64, pagination: Pagination) -> Self {
        Self {
            size: tastings.len(),
            tastings,
            total,
            page: pagination.page(),
        }
    }
}
