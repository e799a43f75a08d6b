//! News feed and comment handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use ya_core::Action;
use ya_core::domain::{Comment, News};
use ya_core::services::CommentInput;
use ya_shared::FormView;
use ya_shared::dto::{
    CommentForm, CommentResponse, DeleteConfirmation, NewsDetailResponse, NewsPageResponse,
    NewsResponse,
};

use super::{Submitted, redirect, submitted};
use crate::middleware::auth::Viewer;
use crate::middleware::error::{AppResult, ForRequest};
use crate::routes;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u64>,
}

fn news_response(news: News) -> NewsResponse {
    NewsResponse {
        id: news.id,
        title: news.title,
        text: news.text,
        date: news.date,
    }
}

fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        news_id: comment.news_id,
        author_id: comment.author_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

/// GET / - newest news first.
pub async fn home(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .news
        .home(query.page.unwrap_or(1))
        .await
        .for_request(&req)?;

    Ok(HttpResponse::Ok().json(NewsPageResponse {
        items: page.items.into_iter().map(news_response).collect(),
        page: page.page,
        page_size: page.page_size,
        total: page.total,
    }))
}

/// GET /news/{id}/ - the comment form is only offered to logged-in readers.
pub async fn detail(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.news.detail(*path).await.for_request(&req)?;

    Ok(HttpResponse::Ok().json(NewsDetailResponse {
        news: news_response(detail.news),
        comments: detail.comments.into_iter().map(comment_response).collect(),
        form: viewer.is_authenticated().then(CommentForm::default),
    }))
}

/// POST /news/{id}/
pub async fn add_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<Uuid>,
    body: Submitted<CommentForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let result = state
        .comments
        .create(
            &viewer.actor(),
            *path,
            CommentInput {
                text: form.text.clone(),
            },
        )
        .await;

    submitted(result, form, &req)
}

/// GET /edit_comment/{id}/
pub async fn edit_comment_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .get(&viewer.actor(), *path, Action::Edit)
        .await
        .for_request(&req)?;

    Ok(HttpResponse::Ok().json(FormView::blank(CommentForm { text: comment.text })))
}

/// POST /edit_comment/{id}/
pub async fn edit_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<Uuid>,
    body: Submitted<CommentForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let result = state
        .comments
        .update(
            &viewer.actor(),
            *path,
            CommentInput {
                text: form.text.clone(),
            },
        )
        .await;

    submitted(result, form, &req)
}

/// GET /delete_comment/{id}/
pub async fn delete_comment_confirm(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .get(&viewer.actor(), *path, Action::Delete)
        .await
        .for_request(&req)?;

    Ok(HttpResponse::Ok().json(DeleteConfirmation {
        object: comment_response(comment),
    }))
}

/// POST or DELETE /delete_comment/{id}/
pub async fn delete_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let deleted = state
        .comments
        .delete(&viewer.actor(), *path)
        .await
        .for_request(&req)?;

    Ok(redirect(&routes::destination(deleted.redirect)))
}
