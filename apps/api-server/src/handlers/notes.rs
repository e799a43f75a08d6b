//! Private notes handlers. Every page except the landing page needs a
//! logged-in user, and a note is only ever shown to its author.

use actix_web::{HttpRequest, HttpResponse, web};

use ya_core::Action;
use ya_core::domain::Note;
use ya_core::services::NoteInput;
use ya_shared::FormView;
use ya_shared::dto::{DeleteConfirmation, NoteForm, NoteResponse, PageMessage};

use super::{Submitted, redirect, submitted};
use crate::middleware::auth::Viewer;
use crate::middleware::error::{AppResult, ForRequest};
use crate::routes;
use crate::state::AppState;

fn note_response(note: Note) -> NoteResponse {
    NoteResponse {
        id: note.id,
        title: note.title,
        text: note.text,
        slug: note.slug,
        author_id: note.author_id,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

fn note_input(form: &NoteForm) -> NoteInput {
    NoteInput {
        title: form.title.clone(),
        text: form.text.clone(),
        slug: form.slug.clone(),
    }
}

/// GET /notes/
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(PageMessage::new("Private notes. Log in to see yours."))
}

/// GET /notes/list/
pub async fn list(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
) -> AppResult<HttpResponse> {
    let notes = state.notes.list(&viewer.actor()).await.for_request(&req)?;

    Ok(HttpResponse::Ok().json(notes.into_iter().map(note_response).collect::<Vec<_>>()))
}

/// GET /notes/add/
pub async fn add_form(req: HttpRequest, viewer: Viewer) -> AppResult<HttpResponse> {
    viewer.actor().require_user().for_request(&req)?;

    Ok(HttpResponse::Ok().json(FormView::blank(NoteForm::default())))
}

/// POST /notes/add/
pub async fn add(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    body: Submitted<NoteForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let result = state.notes.create(&viewer.actor(), note_input(&form)).await;

    submitted(result, form, &req)
}

/// GET /notes/done/
pub async fn done(req: HttpRequest, viewer: Viewer) -> AppResult<HttpResponse> {
    viewer.actor().require_user().for_request(&req)?;

    Ok(HttpResponse::Ok().json(PageMessage::new("Done!")))
}

/// GET /notes/note/{slug}/
pub async fn detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let note = state
        .notes
        .get(&viewer.actor(), &slug, Action::View)
        .await
        .for_request(&req)?;

    Ok(HttpResponse::Ok().json(note_response(note)))
}

/// GET /notes/edit/{slug}/
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let note = state
        .notes
        .get(&viewer.actor(), &slug, Action::Edit)
        .await
        .for_request(&req)?;

    Ok(HttpResponse::Ok().json(FormView::blank(NoteForm {
        title: note.title,
        text: note.text,
        slug: note.slug,
    })))
}

/// POST /notes/edit/{slug}/
pub async fn edit(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    slug: web::Path<String>,
    body: Submitted<NoteForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let result = state
        .notes
        .update(&viewer.actor(), &slug, note_input(&form))
        .await;

    submitted(result, form, &req)
}

/// GET /notes/delete/{slug}/
pub async fn delete_confirm(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let note = state
        .notes
        .get(&viewer.actor(), &slug, Action::Delete)
        .await
        .for_request(&req)?;

    Ok(HttpResponse::Ok().json(DeleteConfirmation {
        object: note_response(note),
    }))
}

/// POST or DELETE /notes/delete/{slug}/
pub async fn delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let deleted = state
        .notes
        .delete(&viewer.actor(), &slug)
        .await
        .for_request(&req)?;

    Ok(redirect(&routes::destination(deleted.redirect)))
}
