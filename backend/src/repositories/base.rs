use std::marker::PhantomData;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Entity;

/// Audited data access over one table
pub struct Repository<E> {
    pub(crate) db: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<E> Repository<E> {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

fn live_filter(include_deleted: bool) -> &'static str {
    if include_deleted {
        ""
    } else {
        " AND deleted_at IS NULL"
    }
}

impl<E: Entity> Repository<E> {
    /// Fetch a row by id
    pub async fn get(&self, id: Uuid, include_deleted: bool) -> AppResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1{}",
            E::COLUMNS,
            E::TABLE,
            live_filter(include_deleted)
        );

        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Fetch a live row or fail with NotFound
    pub async fn get_or_not_found(&self, id: Uuid) -> AppResult<E> {
        self.get(id, false)
            .await?
            .ok_or_else(|| AppError::NotFound(E::NAME.to_string()))
    }

    pub async fn exists(&self, id: Uuid, include_deleted: bool) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1{})",
            E::TABLE,
            live_filter(include_deleted)
        );

        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(exists)
    }

    /// Mark a live row deleted
    pub async fn soft_delete(&self, id: Uuid, user_id: &str) -> AppResult<E> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NOW(), deleted_by = $2, updated_by = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            E::TABLE,
            E::COLUMNS
        );

        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(E::NAME.to_string()))?;

        tracing::info!(table = E::TABLE, %id, user_id, "Soft deleted row");
        Ok(row)
    }

    /// Bring back a soft-deleted row
    pub async fn restore(&self, id: Uuid, user_id: &str) -> AppResult<E> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NULL, deleted_by = NULL, updated_by = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NOT NULL RETURNING {}",
            E::TABLE,
            E::COLUMNS
        );

        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Deleted {}", E::NAME.to_lowercase())))?;

        tracing::info!(table = E::TABLE, %id, user_id, "Restored row");
        Ok(row)
    }
}

/// Escape LIKE metacharacters in user input
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%input%` with metacharacters escaped
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain_text_unchanged() {
        assert_eq!(escape_like("Ethiopia"), "Ethiopia");
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\d"), "c:\\\\d");
    }

    #[test]
    fn test_contains_pattern_trims_and_wraps() {
        assert_eq!(contains_pattern("  kenya "), "%kenya%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
    }
}
