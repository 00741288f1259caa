use std::collections::HashMap;

use sqlx::PgConnection;
use uuid::Uuid;

use shared::schemas::{TastingNoteCreate, TastingSessionCreate, TastingSessionUpdate};

use super::base::Repository;
use super::flavor_tag::FlavorTagRepository;
use crate::error::AppResult;
use crate::models::{TastingNoteRow, TastingSessionRow};

pub type TastingRepository = Repository<TastingSessionRow>;

/// Upper bound on the history loaded for taste profiles and analysis
pub const USER_HISTORY_LIMIT: i64 = 1000;

/// Session columns joined with coffee and roaster names
const SESSION_SELECT: &str = r#"
    SELECT ts.id, ts.coffee_id, ts.user_id, ts.brew_method, ts.grind_size,
           ts.coffee_dose, ts.water_amount, ts.water_temperature, ts.brew_time,
           ts.grinder, ts.brewing_device, ts.filter_type, ts.session_notes,
           ts.overall_rating, ts.would_buy_again,
           ts.created_by, ts.updated_by, ts.deleted_by, ts.deleted_at,
           ts.created_at, ts.updated_at,
           c.name AS coffee_name, r.name AS roaster_name
    FROM tasting_session ts
    JOIN coffee c ON c.id = ts.coffee_id
    JOIN roaster r ON r.id = c.roaster_id
"#;

/// Note columns joined with the flavor tag; expects the note aliased as `tn`
const NOTE_COLUMNS: &str = r#"
    tn.id, tn.tasting_session_id, tn.intensity, tn.notes,
    tn.aroma, tn.flavor, tn.aftertaste, tn.created_at, tn.updated_at,
    ft.id AS tag_id, ft.name AS tag_name, ft.category AS tag_category,
    ft.description AS tag_description, ft.created_at AS tag_created_at,
    ft.updated_at AS tag_updated_at
"#;

impl Repository<TastingSessionRow> {
    /// The user's sessions, newest first
    pub async fn get_by_user_id(
        &self,
        user_id: &str,
        skip: i64,
        limit: i64,
    ) -> AppResult<Vec<TastingSessionRow>> {
        let sql = format!(
            "{} WHERE ts.user_id = $1 AND ts.deleted_at IS NULL \
             ORDER BY ts.created_at DESC, ts.id OFFSET $2 LIMIT $3",
            SESSION_SELECT
        );

        let rows = sqlx::query_as::<_, TastingSessionRow>(&sql)
            .bind(user_id)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    /// The user's most recent sessions, newest first, capped at `USER_HISTORY_LIMIT`
    pub async fn get_all_by_user_id(&self, user_id: &str) -> AppResult<Vec<TastingSessionRow>> {
        let sql = format!(
            "{} WHERE ts.user_id = $1 AND ts.deleted_at IS NULL \
             ORDER BY ts.created_at DESC, ts.id LIMIT $2",
            SESSION_SELECT
        );

        let rows = sqlx::query_as::<_, TastingSessionRow>(&sql)
            .bind(user_id)
            .bind(USER_HISTORY_LIMIT)
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tasting_session WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Session with coffee/roaster names
    pub async fn get_joined(&self, id: Uuid) -> AppResult<Option<TastingSessionRow>> {
        let sql = format!("{} WHERE ts.id = $1 AND ts.deleted_at IS NULL", SESSION_SELECT);

        let row = sqlx::query_as::<_, TastingSessionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row)
    }

    /// Session with its notes
    pub async fn get_with_notes(
        &self,
        id: Uuid,
    ) -> AppResult<Option<(TastingSessionRow, Vec<TastingNoteRow>)>> {
        let Some(session) = self.get_joined(id).await? else {
            return Ok(None);
        };

        let mut notes = self.notes_for(&[id]).await?;
        let notes = notes.remove(&id).unwrap_or_default();
        Ok(Some((session, notes)))
    }

    /// Notes for each session, keyed by session id, in one query
    pub async fn notes_for(
        &self,
        session_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Vec<TastingNoteRow>>> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            r#"
            SELECT {}
            FROM tasting_note tn
            JOIN flavortag ft ON ft.id = tn.flavor_tag_id
            WHERE tn.tasting_session_id = ANY($1) AND tn.deleted_at IS NULL
            ORDER BY tn.created_at, tn.id
            "#,
            NOTE_COLUMNS
        );

        let rows = sqlx::query_as::<_, TastingNoteRow>(&sql)
            .bind(session_ids)
            .fetch_all(&self.db)
            .await?;

        let mut grouped: HashMap<Uuid, Vec<TastingNoteRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.tasting_session_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Insert a session and its notes in one transaction; returns the new id
    pub async fn create_with_notes(
        &self,
        input: &TastingSessionCreate,
        user_id: &str,
    ) -> AppResult<Uuid> {
        let mut tx = self.db.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO tasting_session (
                coffee_id, user_id, brew_method, grind_size, coffee_dose, water_amount,
                water_temperature, brew_time, grinder, brewing_device, filter_type,
                session_notes, overall_rating, would_buy_again, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $2)
            RETURNING id
            "#,
        )
        .bind(input.coffee_id)
        .bind(user_id)
        .bind(input.brew_method)
        .bind(input.grind_size)
        .bind(input.coffee_dose)
        .bind(input.water_amount)
        .bind(input.water_temperature)
        .bind(&input.brew_time)
        .bind(&input.grinder)
        .bind(&input.brewing_device)
        .bind(&input.filter_type)
        .bind(&input.session_notes)
        .bind(input.overall_rating)
        .bind(input.would_buy_again)
        .fetch_one(&mut *tx)
        .await?;

        for note in &input.tasting_notes {
            Self::insert_note(&mut *tx, id, note, user_id).await?;
        }

        tx.commit().await?;

        tracing::info!(%id, user_id, notes = input.tasting_notes.len(), "Created tasting session");
        Ok(id)
    }

    /// Apply the provided fields to a session
    pub async fn update(
        &self,
        id: Uuid,
        input: &TastingSessionUpdate,
        user_id: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasting_session
            SET coffee_id = COALESCE($2, coffee_id),
                brew_method = COALESCE($3, brew_method),
                grind_size = COALESCE($4, grind_size),
                coffee_dose = COALESCE($5, coffee_dose),
                water_amount = COALESCE($6, water_amount),
                water_temperature = COALESCE($7, water_temperature),
                brew_time = COALESCE($8, brew_time),
                grinder = COALESCE($9, grinder),
                brewing_device = COALESCE($10, brewing_device),
                filter_type = COALESCE($11, filter_type),
                session_notes = COALESCE($12, session_notes),
                overall_rating = COALESCE($13, overall_rating),
                would_buy_again = COALESCE($14, would_buy_again),
                updated_by = $15,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(input.coffee_id)
        .bind(input.brew_method)
        .bind(input.grind_size)
        .bind(input.coffee_dose)
        .bind(input.water_amount)
        .bind(input.water_temperature)
        .bind(&input.brew_time)
        .bind(&input.grinder)
        .bind(&input.brewing_device)
        .bind(&input.filter_type)
        .bind(&input.session_notes)
        .bind(input.overall_rating)
        .bind(input.would_buy_again)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(%id, user_id, "Updated tasting session");
        }
        Ok(updated)
    }

    /// Attach one note to an existing session
    pub async fn add_note(
        &self,
        session_id: Uuid,
        note: &TastingNoteCreate,
        user_id: &str,
    ) -> AppResult<TastingNoteRow> {
        let mut tx = self.db.begin().await?;
        let row = Self::insert_note(&mut *tx, session_id, note, user_id).await?;
        tx.commit().await?;

        tracing::info!(id = %row.id, %session_id, user_id, "Added tasting note");
        Ok(row)
    }

    async fn insert_note(
        conn: &mut PgConnection,
        session_id: Uuid,
        note: &TastingNoteCreate,
        user_id: &str,
    ) -> AppResult<TastingNoteRow> {
        let tag =
            FlavorTagRepository::find_or_create_by_name(&mut *conn, &note.flavor_name, user_id)
                .await?;

        let sql = format!(
            r#"
            WITH tn AS (
                INSERT INTO tasting_note (
                    tasting_session_id, flavor_tag_id, intensity, notes,
                    aroma, flavor, aftertaste, created_by
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT {}
            FROM tn
            JOIN flavortag ft ON ft.id = tn.flavor_tag_id
            "#,
            NOTE_COLUMNS
        );

        let row = sqlx::query_as::<_, TastingNoteRow>(&sql)
            .bind(session_id)
            .bind(tag.id)
            .bind(note.intensity)
            .bind(&note.notes)
            .bind(note.aroma)
            .bind(note.flavor)
            .bind(note.aftertaste)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(row)
    }

    /// Hard delete a session owned by the user; notes cascade.
    ///
    /// Returns false when no such session belongs to the user.
    pub async fn delete_by_id(&self, id: Uuid, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasting_session WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(%id, user_id, "Deleted tasting session");
        }
        Ok(deleted)
    }
}
