//! Roaster management service

use sqlx::PgPool;
use uuid::Uuid;

use shared::schemas::{RoasterCreate, RoasterListQuery, RoasterListResponse, RoasterUpdate};

use crate::error::{AppError, AppResult};
use crate::models::Roaster;
use crate::repositories::{RoasterFilter, RoasterRepository};

/// Roaster service enforcing name uniqueness among live roasters
#[derive(Clone)]
pub struct RoasterService {
    roasters: RoasterRepository,
}

impl RoasterService {
    /// Create a new RoasterService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            roasters: RoasterRepository::new(db),
        }
    }

    pub async fn create(&self, input: RoasterCreate, user_id: &str) -> AppResult<Roaster> {
        let input = input.normalized();
        self.ensure_name_available(&input.name, None).await?;

        let row = self.roasters.create(&input, user_id).await?;
        Ok(row.into())
    }

    pub async fn list(&self, query: &RoasterListQuery) -> AppResult<RoasterListResponse> {
        let filter = RoasterFilter {
            search: non_blank(query.search.as_deref()),
            location: non_blank(query.location.as_deref()),
        };
        let pagination = query.pagination();

        let rows = self
            .roasters
            .list(&filter, pagination.skip, pagination.limit)
            .await?;
        let total = self.roasters.count_filtered(&filter).await?;

        let roasters = rows.into_iter().map(Roaster::from).collect();
        Ok(RoasterListResponse::new(roasters, total, pagination))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Roaster> {
        let row = self.roasters.get_or_not_found(id).await?;
        Ok(row.into())
    }

    pub async fn update(&self, id: Uuid, input: RoasterUpdate, user_id: &str) -> AppResult<Roaster> {
        let input = input.normalized();
        if let Some(name) = &input.name {
            self.ensure_name_available(name, Some(id)).await?;
        }

        self.roasters
            .update(id, &input, user_id)
            .await?
            .map(Roaster::from)
            .ok_or_else(|| AppError::NotFound("Roaster".to_string()))
    }

    /// Soft delete
    pub async fn delete(&self, id: Uuid, user_id: &str) -> AppResult<()> {
        self.roasters.soft_delete(id, user_id).await?;
        Ok(())
    }

    pub async fn restore(&self, id: Uuid, user_id: &str) -> AppResult<Roaster> {
        let row = self.roasters.restore(id, user_id).await?;
        Ok(row.into())
    }

    async fn ensure_name_available(&self, name: &str, current: Option<Uuid>) -> AppResult<()> {
        match self.roasters.get_by_name(name).await? {
            Some(existing) if Some(existing.id) != current => Err(AppError::Conflict(format!(
                "Roaster with name '{}' already exists",
                name.trim()
            ))),
            _ => Ok(()),
        }
    }
}

/// Treat an empty query parameter as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
