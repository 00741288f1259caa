//! Flavor tag schemas

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::FlavorTag;
use crate::types::{default_limit, Pagination};
use crate::validation::validate_not_blank_field;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FlavorTagCreate {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank_field")]
    pub name: String,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FlavorTagUpdate {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank_field")]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct FlavorTagListQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: i64,
    /// Matches name or category
    pub search: Option<String>,
}

impl FlavorTagListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.skip, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FlavorTagListResponse {
    pub flavor_tags: Vec<FlavorTag>,
    pub total: i64,
    pub page: i64,
    pub size: usize,
}

impl FlavorTagListResponse {
    pub fn new(flavor_tags: Vec<FlavorTag>, total: i64, pagination: Pagination) -> Self {
        Self {
            size: flavor_tags.len(),
            flavor_tags,
            total,
            page: pagination.page(),
        }
    }
}
