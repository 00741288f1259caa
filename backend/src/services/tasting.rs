//! Tasting session service
//!
//! Sessions belong to the user who recorded them; other users get 403 on
//! read/update/note and 404 on delete.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use shared::schemas::{
    TastingListQuery, TastingNoteCreate, TastingSessionCreate, TastingSessionListResponse,
    TastingSessionUpdate,
};

use crate::error::{AppError, AppResult};
use crate::middleware::require_user_access;
use crate::models::{TastingNote, TastingNoteRow, TastingSession, TastingSessionRow};
use crate::repositories::{CoffeeRepository, TastingRepository};

#[derive(Clone)]
pub struct TastingService {
    tastings: TastingRepository,
    coffees: CoffeeRepository,
}

impl TastingService {
    pub fn new(db: PgPool) -> Self {
        Self {
            tastings: TastingRepository::new(db.clone()),
            coffees: CoffeeRepository::new(db),
        }
    }

    pub async fn create(&self, input: TastingSessionCreate, user_id: &str) -> AppResult<TastingSession> {
        self.ensure_coffee_exists(input.coffee_id).await?;

        let id = self.tastings.create_with_notes(&input, user_id).await?;
        self.load(id).await
    }

    /// The caller's sessions, newest first
    pub async fn list(&self, query: &TastingListQuery, user_id: &str) -> AppResult<TastingSessionListResponse> {
        let pagination = query.pagination();

        let rows = self
            .tastings
            .get_by_user_id(user_id, pagination.skip, pagination.limit)
            .await?;
        let total = self.tastings.count_by_user(user_id).await?;

        let sessions = self.with_notes(rows).await?;
        Ok(TastingSessionListResponse::new(sessions, total, pagination))
    }

    /// The user's most recent sessions with notes, up to `USER_HISTORY_LIMIT`
    pub async fn all_for_user(&self, user_id: &str) -> AppResult<Vec<TastingSession>> {
        let rows = self.tastings.get_all_by_user_id(user_id).await?;
        self.with_notes(rows).await
    }

    pub async fn get(&self, id: Uuid, user_id: &str) -> AppResult<TastingSession> {
        let session = self.load(id).await?;
        require_user_access(user_id, &session.user_id)?;
        Ok(session)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: TastingSessionUpdate,
        user_id: &str,
    ) -> AppResult<TastingSession> {
        self.ensure_owner(id, user_id).await?;
        if let Some(coffee_id) = input.coffee_id {
            self.ensure_coffee_exists(coffee_id).await?;
        }

        if !self.tastings.update(id, &input, user_id).await? {
            return Err(AppError::NotFound("Tasting session".to_string()));
        }
        self.load(id).await
    }

    pub async fn add_note(
        &self,
        session_id: Uuid,
        note: TastingNoteCreate,
        user_id: &str,
    ) -> AppResult<TastingNote> {
        self.ensure_owner(session_id, user_id).await?;

        let row = self.tastings.add_note(session_id, &note, user_id).await?;
        Ok(row.into())
    }

    /// Hard delete; notes cascade
    pub async fn delete(&self, id: Uuid, user_id: &str) -> AppResult<()> {
        if !self.tastings.delete_by_id(id, user_id).await? {
            return Err(AppError::NotFound("Tasting session".to_string()));
        }
        Ok(())
    }

    async fn load(&self, id: Uuid) -> AppResult<TastingSession> {
        let (session, notes) = self
            .tastings
            .get_with_notes(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tasting session".to_string()))?;

        Ok(session.into_model(notes.into_iter().map(TastingNote::from).collect()))
    }

    async fn ensure_owner(&self, id: Uuid, user_id: &str) -> AppResult<()> {
        let session = self.tastings.get_or_not_found(id).await?;
        require_user_access(user_id, &session.user_id)
    }

    async fn ensure_coffee_exists(&self, coffee_id: Uuid) -> AppResult<()> {
        if !self.coffees.exists(coffee_id, false).await? {
            return Err(AppError::NotFound("Coffee".to_string()));
        }
        Ok(())
    }

    async fn with_notes(&self, rows: Vec<TastingSessionRow>) -> AppResult<Vec<TastingSession>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut notes: HashMap<Uuid, Vec<TastingNoteRow>> = self.tastings.notes_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let session_notes = notes
                    .remove(&row.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(TastingNote::from)
                    .collect();
                row.into_model(session_notes)
            })
            .collect())
    }
}
