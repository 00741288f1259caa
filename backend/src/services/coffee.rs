//! Coffee catalogue service

use sqlx::PgPool;
use uuid::Uuid;

use shared::schemas::{CoffeeCreate, CoffeeListQuery, CoffeeListResponse, CoffeeUpdate};

use super::roaster::non_blank;
use crate::error::{AppError, AppResult};
use crate::models::{Coffee, CoffeeRow, FlavorTag};
use crate::repositories::{CoffeeFilter, CoffeeRepository, RoasterRepository};

#[derive(Clone)]
pub struct CoffeeService {
    coffees: CoffeeRepository,
    roasters: RoasterRepository,
}

impl CoffeeService {
    pub fn new(db: PgPool) -> Self {
        Self {
            coffees: CoffeeRepository::new(db.clone()),
            roasters: RoasterRepository::new(db),
        }
    }

    pub async fn create(&self, input: CoffeeCreate, user_id: &str) -> AppResult<Coffee> {
        self.ensure_roaster_exists(input.roaster_id).await?;
        self.ensure_unique(&input.name, input.roaster_id, None).await?;

        let (row, tags) = self.coffees.create(&input, user_id).await?;
        Ok(row.into_model(tags.into_iter().map(FlavorTag::from).collect()))
    }

    pub async fn list(&self, query: &CoffeeListQuery) -> AppResult<CoffeeListResponse> {
        let filter = CoffeeFilter {
            roaster_id: query.roaster_id,
            search: non_blank(query.search.as_deref()),
            origin_country: non_blank(query.origin_country.as_deref()),
        };
        let pagination = query.pagination();

        let rows = self
            .coffees
            .list(&filter, pagination.skip, pagination.limit)
            .await?;
        let total = self.coffees.count_filtered(&filter).await?;

        let coffees = self.with_flavor_tags(rows).await?;
        Ok(CoffeeListResponse::new(coffees, total, pagination))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Coffee> {
        let row = self.coffees.get_or_not_found(id).await?;
        self.with_flavor_tags(vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Coffee".to_string()))
    }

    pub async fn update(&self, id: Uuid, input: CoffeeUpdate, user_id: &str) -> AppResult<Coffee> {
        let existing = self.coffees.get_or_not_found(id).await?;

        if let Some(roaster_id) = input.roaster_id {
            self.ensure_roaster_exists(roaster_id).await?;
        }
        if input.name.is_some() || input.roaster_id.is_some() {
            let name = input.name.as_deref().unwrap_or(&existing.name);
            let roaster_id = input.roaster_id.unwrap_or(existing.roaster_id);
            self.ensure_unique(name, roaster_id, Some(id)).await?;
        }

        self.coffees
            .update(id, &input, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coffee".to_string()))?;

        self.get(id).await
    }

    /// Soft delete
    pub async fn delete(&self, id: Uuid, user_id: &str) -> AppResult<()> {
        self.coffees.soft_delete(id, user_id).await?;
        Ok(())
    }

    async fn with_flavor_tags(&self, rows: Vec<CoffeeRow>) -> AppResult<Vec<Coffee>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.coffees.flavor_tags_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let coffee_tags = tags
                    .remove(&row.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(FlavorTag::from)
                    .collect();
                row.into_model(coffee_tags)
            })
            .collect())
    }

    async fn ensure_roaster_exists(&self, roaster_id: Uuid) -> AppResult<()> {
        if !self.roasters.exists(roaster_id, false).await? {
            return Err(AppError::NotFound("Roaster".to_string()));
        }
        Ok(())
    }

    async fn ensure_unique(&self, name: &str, roaster_id: Uuid, current: Option<Uuid>) -> AppResult<()> {
        match self.coffees.get_by_name_and_roaster(name, roaster_id).await? {
            Some(existing) if Some(existing.id) != current => Err(AppError::Conflict(format!(
                "Coffee '{}' already exists for this roaster",
                name.trim()
            ))),
            _ => Ok(()),
        }
    }
}
