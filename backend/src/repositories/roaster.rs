use uuid::Uuid;

use shared::schemas::{RoasterCreate, RoasterUpdate};

use super::base::{contains_pattern, Repository};
use crate::error::AppResult;
use crate::models::{Entity, RoasterRow};

pub type RoasterRepository = Repository<RoasterRow>;

/// Optional list filters; both are case-insensitive substring matches
#[derive(Debug, Clone, Default)]
pub struct RoasterFilter {
    pub search: Option<String>,
    pub location: Option<String>,
}

impl RoasterFilter {
    fn patterns(&self) -> (Option<String>, Option<String>) {
        (
            self.search.as_deref().map(contains_pattern),
            self.location.as_deref().map(contains_pattern),
        )
    }
}

impl Repository<RoasterRow> {
    pub async fn create(&self, input: &RoasterCreate, user_id: &str) -> AppResult<RoasterRow> {
        let sql = format!(
            r#"
            INSERT INTO roaster (name, location, website, description, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            RoasterRow::COLUMNS
        );

        let row = sqlx::query_as::<_, RoasterRow>(&sql)
            .bind(input.name.trim())
            .bind(&input.location)
            .bind(&input.website)
            .bind(&input.description)
            .bind(user_id)
            .fetch_one(&self.db)
            .await?;

        tracing::info!(id = %row.id, user_id, name = %row.name, "Created roaster");
        Ok(row)
    }

    /// Apply the provided fields to a live roaster
    pub async fn update(
        &self,
        id: Uuid,
        input: &RoasterUpdate,
        user_id: &str,
    ) -> AppResult<Option<RoasterRow>> {
        let sql = format!(
            r#"
            UPDATE roaster
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                website = COALESCE($4, website),
                description = COALESCE($5, description),
                updated_by = $6,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            RoasterRow::COLUMNS
        );

        let row = sqlx::query_as::<_, RoasterRow>(&sql)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.location)
            .bind(&input.website)
            .bind(&input.description)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        if row.is_some() {
            tracing::info!(%id, user_id, "Updated roaster");
        }
        Ok(row)
    }

    /// Exact name match among live roasters
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<RoasterRow>> {
        let sql = format!(
            "SELECT {} FROM roaster WHERE name = $1 AND deleted_at IS NULL LIMIT 1",
            RoasterRow::COLUMNS
        );

        let row = sqlx::query_as::<_, RoasterRow>(&sql)
            .bind(name.trim())
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Live roasters matching the filter, ordered by name
    pub async fn list(&self, filter: &RoasterFilter, skip: i64, limit: i64) -> AppResult<Vec<RoasterRow>> {
        let (search, location) = filter.patterns();
        let sql = format!(
            r#"
            SELECT {}
            FROM roaster
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1)
              AND ($2::text IS NULL OR location ILIKE $2)
            ORDER BY name, id
            OFFSET $3 LIMIT $4
            "#,
            RoasterRow::COLUMNS
        );

        let rows = sqlx::query_as::<_, RoasterRow>(&sql)
            .bind(search)
            .bind(location)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn count_filtered(&self, filter: &RoasterFilter) -> AppResult<i64> {
        let (search, location) = filter.patterns();

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM roaster
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1)
              AND ($2::text IS NULL OR location ILIKE $2)
            "#,
        )
        .bind(search)
        .bind(location)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }
}
