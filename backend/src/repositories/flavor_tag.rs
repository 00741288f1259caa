use std::collections::HashSet;

use sqlx::PgConnection;
use uuid::Uuid;

use shared::schemas::{FlavorTagCreate, FlavorTagUpdate};

use super::base::{contains_pattern, Repository};
use crate::error::AppResult;
use crate::models::{Entity, FlavorTagRow};

pub type FlavorTagRepository = Repository<FlavorTagRow>;

/// Trim names, drop blanks and case-insensitive duplicates; keeps first-seen order
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_lowercase()))
        .map(str::to_string)
        .collect()
}

impl Repository<FlavorTagRow> {
    /// Insert a tag, or revive a soft-deleted tag holding the same name.
    ///
    /// Returns `None` when a live tag already has the name.
    pub async fn create(&self, input: &FlavorTagCreate, user_id: &str) -> AppResult<Option<FlavorTagRow>> {
        let sql = format!(
            r#"
            INSERT INTO flavortag (name, category, description, created_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ((LOWER(name))) DO UPDATE
                SET name = EXCLUDED.name,
                    category = EXCLUDED.category,
                    description = EXCLUDED.description,
                    deleted_at = NULL,
                    deleted_by = NULL,
                    updated_by = EXCLUDED.created_by,
                    updated_at = NOW()
                WHERE flavortag.deleted_at IS NOT NULL
            RETURNING {}
            "#,
            FlavorTagRow::COLUMNS
        );

        let row = sqlx::query_as::<_, FlavorTagRow>(&sql)
            .bind(input.name.trim())
            .bind(&input.category)
            .bind(&input.description)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        if let Some(row) = &row {
            if row.updated_by.is_some() {
                tracing::info!(id = %row.id, user_id, name = %row.name, "Restored flavor tag");
            } else {
                tracing::info!(id = %row.id, user_id, name = %row.name, "Created flavor tag");
            }
        }
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &FlavorTagUpdate,
        user_id: &str,
    ) -> AppResult<Option<FlavorTagRow>> {
        let sql = format!(
            r#"
            UPDATE flavortag
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                updated_by = $5,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            FlavorTagRow::COLUMNS
        );

        let row = sqlx::query_as::<_, FlavorTagRow>(&sql)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.category)
            .bind(&input.description)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        if row.is_some() {
            tracing::info!(%id, user_id, "Updated flavor tag");
        }
        Ok(row)
    }

    /// Case-insensitive lookup among live tags
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<FlavorTagRow>> {
        let sql = format!(
            "SELECT {} FROM flavortag WHERE LOWER(name) = LOWER($1) AND deleted_at IS NULL",
            FlavorTagRow::COLUMNS
        );

        let row = sqlx::query_as::<_, FlavorTagRow>(&sql)
            .bind(name.trim())
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Case-insensitive lookup that also sees soft-deleted tags
    pub async fn get_by_name_including_deleted(&self, name: &str) -> AppResult<Option<FlavorTagRow>> {
        let sql = format!(
            "SELECT {} FROM flavortag WHERE LOWER(name) = LOWER($1)",
            FlavorTagRow::COLUMNS
        );

        let row = sqlx::query_as::<_, FlavorTagRow>(&sql)
            .bind(name.trim())
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Name or category substring match, ordered by name
    pub async fn search(&self, term: Option<&str>, skip: i64, limit: i64) -> AppResult<Vec<FlavorTagRow>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM flavortag
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1 OR category ILIKE $1)
            ORDER BY name, id
            OFFSET $2 LIMIT $3
            "#,
            FlavorTagRow::COLUMNS
        );

        let rows = sqlx::query_as::<_, FlavorTagRow>(&sql)
            .bind(term.map(contains_pattern))
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn count_search(&self, term: Option<&str>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM flavortag
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR name ILIKE $1 OR category ILIKE $1)
            "#,
        )
        .bind(term.map(contains_pattern))
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Fetch the tag with this name (any case) or create it.
    ///
    /// A soft-deleted tag with the same name is revived.
    pub async fn find_or_create_by_name(
        conn: &mut PgConnection,
        name: &str,
        user_id: &str,
    ) -> AppResult<FlavorTagRow> {
        let sql = format!(
            r#"
            INSERT INTO flavortag (name, created_by)
            VALUES ($1, $2)
            ON CONFLICT ((LOWER(name))) DO UPDATE
                SET deleted_at = NULL,
                    deleted_by = NULL,
                    updated_by = CASE WHEN flavortag.deleted_at IS NULL
                                      THEN flavortag.updated_by ELSE EXCLUDED.created_by END,
                    updated_at = CASE WHEN flavortag.deleted_at IS NULL
                                      THEN flavortag.updated_at ELSE NOW() END
            RETURNING {}
            "#,
            FlavorTagRow::COLUMNS
        );

        let row = sqlx::query_as::<_, FlavorTagRow>(&sql)
            .bind(name.trim())
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(row)
    }

    /// Resolve a list of names to tags, one row per distinct name
    pub async fn find_or_create_multiple<S: AsRef<str>>(
        conn: &mut PgConnection,
        names: &[S],
        user_id: &str,
    ) -> AppResult<Vec<FlavorTagRow>> {
        let mut tags = Vec::new();
        for name in normalize_tag_names(names) {
            tags.push(Self::find_or_create_by_name(conn, &name, user_id).await?);
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_names_trims_and_skips_blank() {
        assert_eq!(
            normalize_tag_names(&["  Chocolate ", "", "   ", "Cherry"]),
            vec!["Chocolate".to_string(), "Cherry".to_string()]
        );
    }

    #[test]
    fn test_normalize_tag_names_dedupes_case_insensitively() {
        assert_eq!(
            normalize_tag_names(&["Jasmine", "jasmine", "JASMINE", "Bergamot"]),
            vec!["Jasmine".to_string(), "Bergamot".to_string()]
        );
    }

    #[test]
    fn test_normalize_tag_names_empty() {
        let names: Vec<String> = Vec::new();
        assert!(normalize_tag_names(&names).is_empty());
    }
}
