//! Flavor tag management service

use sqlx::PgPool;
use uuid::Uuid;

use shared::schemas::{FlavorTagCreate, FlavorTagListQuery, FlavorTagListResponse, FlavorTagUpdate};

use super::roaster::non_blank;
use crate::error::{AppError, AppResult};
use crate::models::FlavorTag;
use crate::repositories::FlavorTagRepository;

#[derive(Clone)]
pub struct FlavorTagService {
    tags: FlavorTagRepository,
}

impl FlavorTagService {
    pub fn new(db: PgPool) -> Self {
        Self {
            tags: FlavorTagRepository::new(db),
        }
    }

    /// Creating the name of a soft-deleted tag restores that tag with the new details
    pub async fn create(&self, input: FlavorTagCreate, user_id: &str) -> AppResult<FlavorTag> {
        self.ensure_name_available(&input.name, None).await?;
        self.tags
            .create(&input, user_id)
            .await?
            .map(FlavorTag::from)
            .ok_or_else(|| name_taken(&input.name))
    }

    pub async fn list(&self, query: &FlavorTagListQuery) -> AppResult<FlavorTagListResponse> {
        let search = non_blank(query.search.as_deref());
        let pagination = query.pagination();

        let rows = self
            .tags
            .search(search.as_deref(), pagination.skip, pagination.limit)
            .await?;
        let total = self.tags.count_search(search.as_deref()).await?;

        let tags = rows.into_iter().map(FlavorTag::from).collect();
        Ok(FlavorTagListResponse::new(tags, total, pagination))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<FlavorTag> {
        let row = self.tags.get_or_not_found(id).await?;
        Ok(row.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: FlavorTagUpdate,
        user_id: &str,
    ) -> AppResult<FlavorTag> {
        if let Some(name) = &input.name {
            self.ensure_name_available(name, Some(id)).await?;
            self.ensure_name_not_reserved(name, id).await?;
        }

        self.tags
            .update(id, &input, user_id)
            .await?
            .map(FlavorTag::from)
            .ok_or_else(|| AppError::NotFound("Flavor tag".to_string()))
    }

    /// Soft delete
    pub async fn delete(&self, id: Uuid, user_id: &str) -> AppResult<()> {
        self.tags.soft_delete(id, user_id).await?;
        Ok(())
    }

    async fn ensure_name_available(&self, name: &str, current: Option<Uuid>) -> AppResult<()> {
        match self.tags.get_by_name(name).await? {
            Some(existing) if Some(existing.id) != current => Err(name_taken(&existing.name)),
            _ => Ok(()),
        }
    }

    /// A deleted tag keeps its name so historical notes still resolve to it
    async fn ensure_name_not_reserved(&self, name: &str, current: Uuid) -> AppResult<()> {
        match self.tags.get_by_name_including_deleted(name).await? {
            Some(existing) if existing.id != current && existing.deleted_at.is_some() => {
                Err(AppError::Conflict(format!(
                    "Flavor tag '{}' was deleted; create it again to restore it",
                    existing.name
                )))
            }
            _ => Ok(()),
        }
    }
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("Flavor tag '{}' already exists", name.trim()))
}
