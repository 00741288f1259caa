//! Coffee schemas

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Coffee, ProcessingMethod, RoastLevel};
use crate::types::{default_limit, Pagination};
use crate::validation::{validate_not_blank_field, validate_price_field};

/// Payload for creating a coffee
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CoffeeCreate {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank_field")]
    pub name: String,
    pub roaster_id: Uuid,

    #[validate(length(max = 100))]
    pub origin_country: Option<String>,
    #[validate(length(max = 255))]
    pub origin_region: Option<String>,
    #[validate(length(max = 255))]
    pub farm_name: Option<String>,
    #[validate(length(max = 255))]
    pub producer: Option<String>,
    #[validate(length(max = 100))]
    pub altitude: Option<String>,

    pub processing_method: Option<ProcessingMethod>,
    #[validate(length(max = 255))]
    pub variety: Option<String>,

    pub roast_level: Option<RoastLevel>,
    #[validate(length(max = 50))]
    pub roast_date: Option<String>,

    pub description: Option<String>,
    #[validate(custom = "validate_price_field")]
    pub price: Option<Decimal>,
    #[validate(length(max = 50))]
    pub bag_size: Option<String>,

    /// Flavor tag names; unknown names are created
    #[serde(default)]
    pub flavor_tags: Vec<String>,
}

/// Partial coffee update. `flavor_tags`, when present, replaces the set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CoffeeUpdate {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank_field")]
    pub name: Option<String>,
    pub roaster_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub origin_country: Option<String>,
    #[validate(length(max = 255))]
    pub origin_region: Option<String>,
    #[validate(length(max = 255))]
    pub farm_name: Option<String>,
    #[validate(length(max = 255))]
    pub producer: Option<String>,
    #[validate(length(max = 100))]
    pub altitude: Option<String>,

    pub processing_method: Option<ProcessingMethod>,
    #[validate(length(max = 255))]
    pub variety: Option<String>,

    pub roast_level: Option<RoastLevel>,
    #[validate(length(max = 50))]
    pub roast_date: Option<String>,

    pub description: Option<String>,
    #[validate(custom = "validate_price_field")]
    pub price: Option<Decimal>,
    #[validate(length(max = 50))]
    pub bag_size: Option<String>,

    pub flavor_tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CoffeeListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
    pub roaster_id: Option<Uuid>,
    /// Case-insensitive name search
    pub search: Option<String>,
    pub origin_country: Option<String>,
}

impl CoffeeListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CoffeeListResponse {
    pub coffees: Vec<Coffee>,
    pub total: i64,
    pub page: i64,
    pub size: usize,
}

impl CoffeeListResponse {
    pub fn new(coffees: Vec<Coffee>, total: i64, pagination: Pagination) -> Self {
        Self {
            size: coffees.len(),
            coffees,
            total,
            page: pagination.page(),
        }
    }
}
