use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::Mutation;
use crate::domain::{Destination, Note};
use crate::error::{DomainError, RepoError};
use crate::ownership::{Action, Actor, authorize};
use crate::ports::NoteRepository;
use crate::validation::slug::derive_slug;
use crate::validation::{FieldErrors, NoteCandidate, slug_taken_message};

/// Submitted note form. An empty `slug` is derived from `title`.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl NoteInput {
    fn resolved_slug(&self) -> String {
        let slug = self.slug.trim();
        if slug.is_empty() {
            derive_slug(&self.title)
        } else {
            slug.to_string()
        }
    }
}

/// Private notes: every operation is limited to the note's author.
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// The actor's own notes.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<Note>, DomainError> {
        let author_id = actor.require_user()?;
        Ok(self.notes.find_by_author_id(author_id).await?)
    }

    /// Load a note the actor wants to view, edit or delete.
    ///
    /// Anonymous actors are turned away before the lookup so that the
    /// answer never depends on whether the slug exists.
    pub async fn get(&self, actor: &Actor, slug: &str, action: Action) -> Result<Note, DomainError> {
        actor.require_user()?;
        let note = self
            .notes
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("note", slug))?;

        authorize(actor, &note, action).into_result()?;
        Ok(note)
    }

    pub async fn create(&self, actor: &Actor, input: NoteInput) -> Result<Mutation<Note>, DomainError> {
        let author_id = actor.require_user()?;

        let slug = input.resolved_slug();
        self.check(&input, &slug, None).await?;

        let note = Note::new(
            author_id,
            input.title.trim().to_string(),
            input.text.trim().to_string(),
            slug,
        );
        let note = self
            .notes
            .create(note)
            .await
            .map_err(|e| constraint_to_slug_error(e, &input, None))?;

        tracing::info!(note_id = %note.id, slug = %note.slug, "Note created");
        Ok(Mutation {
            value: note,
            redirect: Destination::NotesDone,
        })
    }

    /// Rewrite title, text and slug of the note at `slug`.
    pub async fn update(
        &self,
        actor: &Actor,
        slug: &str,
        input: NoteInput,
    ) -> Result<Mutation<Note>, DomainError> {
        let mut note = self.get(actor, slug, Action::Edit).await?;

        let new_slug = input.resolved_slug();
        self.check(&input, &new_slug, Some(note.id)).await?;

        note.title = input.title.trim().to_string();
        note.text = input.text.trim().to_string();
        note.slug = new_slug;
        note.updated_at = Utc::now();
        let note_id = note.id;
        let note = self
            .notes
            .update(note)
            .await
            .map_err(|e| constraint_to_slug_error(e, &input, Some(note_id)))?;

        tracing::info!(note_id = %note.id, slug = %note.slug, "Note updated");
        Ok(Mutation {
            value: note,
            redirect: Destination::NotesDone,
        })
    }

    pub async fn delete(&self, actor: &Actor, slug: &str) -> Result<Mutation<Note>, DomainError> {
        let note = self.get(actor, slug, Action::Delete).await?;
        self.notes.delete(note.id).await?;

        tracing::info!(note_id = %note.id, slug = %note.slug, "Note deleted");
        Ok(Mutation {
            value: note,
            redirect: Destination::NotesDone,
        })
    }

    /// Run the note validators. `current` is the note being edited, which
    /// may keep its own slug.
    async fn check(
        &self,
        input: &NoteInput,
        slug: &str,
        current: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let slug_taken = if slug.is_empty() {
            false
        } else {
            self.notes
                .find_by_slug(slug)
                .await?
                .is_some_and(|holder| Some(holder.id) != current)
        };

        NoteCandidate {
            title: input.title.trim(),
            text: input.text.trim(),
            slug,
            slug_taken,
        }
        .validate()
        .map_err(|errors| {
            tracing::debug!(%errors, "Note rejected");
            DomainError::Validation(errors)
        })
    }
}

/// A unique-constraint hit at commit time means another request took the
/// slug between the check and the write.
fn constraint_to_slug_error(err: RepoError, input: &NoteInput, current: Option<Uuid>) -> DomainError {
    match err {
        RepoError::Unique(detail) => {
            tracing::warn!(?current, %detail, "Slug taken at commit time");
            DomainError::Validation(FieldErrors::single(
                "slug",
                slug_taken_message(&input.resolved_slug()),
            ))
        }
        other => DomainError::Repo(other),
    }
}
