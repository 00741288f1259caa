//! Roaster schemas

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Roaster;
use crate::types::{default_limit, Pagination};
use crate::validation::{normalize_website, validate_not_blank_field};

/// Payload for creating a roaster
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoasterCreate {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank_field")]
    pub name: String,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    pub description: Option<String>,
}

impl RoasterCreate {
    /// Apply input normalization (website scheme)
    pub fn normalized(mut self) -> Self {
        self.website = normalize_website(self.website);
        self
    }
}

/// Partial roaster update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoasterUpdate {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank_field")]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    pub description: Option<String>,
}

impl RoasterUpdate {
    pub fn normalized(mut self) -> Self {
        self.website = normalize_website(self.website);
        self
    }
}

/// Query string for listing roasters
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct RoasterListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
    /// Case-insensitive name search
    pub search: Option<String>,
    /// Case-insensitive location filter
    pub location: Option<String>,
}

impl RoasterListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoasterListResponse {
    pub roasters: Vec<Roaster>,
    pub total: i64,
    pub page: i64,
    pub size: usize,
}

impl RoasterListResponse {
    pub fn new(roasters: Vec<Roaster>, total: i64, pagination: Pagination) -> Self {
        Self {
            size: roasters.len(),
            roasters,
            total,
            page: pagination.page(),
        }
    }
}
