//! Shared fixture for handler tests: an in-memory store with one news item
//! commented by "author", one note owned by "author", and a second user
//! "reader".

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use chrono::{Days, Utc};
use uuid::Uuid;

use ya_core::domain::{Comment, News, Note};
use ya_core::ports::BaseRepository;
use ya_infra::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};

use crate::config::AppConfig;
use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::state::{AppState, Repositories};

pub struct Fixture {
    pub state: AppState,
    pub news_repo: Arc<InMemoryNewsRepository>,
    pub comments_repo: Arc<InMemoryCommentRepository>,
    pub notes_repo: Arc<InMemoryNoteRepository>,
    pub author_id: Uuid,
    pub reader_id: Uuid,
    pub news: News,
    pub comment: Comment,
    pub note: Note,
}

impl Fixture {
    pub async fn new() -> Self {
        let news_repo = Arc::new(InMemoryNewsRepository::new());
        let comments_repo = Arc::new(InMemoryCommentRepository::new());
        let notes_repo = Arc::new(InMemoryNoteRepository::new());
        let author_id = Uuid::new_v4();

        let news = news_repo
            .create(News::new("Заголовок".into(), "Текст".into()))
            .await
            .unwrap();
        let comment = comments_repo
            .create(Comment::new(news.id, author_id, "Текст комментария".into()))
            .await
            .unwrap();
        let note = notes_repo
            .create(Note::new(
                author_id,
                "Заголовок".into(),
                "Текст заметки".into(),
                "note-slug".into(),
            ))
            .await
            .unwrap();

        let repos = Repositories {
            users: Arc::new(InMemoryUserRepository::new()),
            news: news_repo.clone(),
            comments: comments_repo.clone(),
            notes: notes_repo.clone(),
        };

        Self {
            state: AppState::with_repositories(repos, &AppConfig::default()),
            news_repo,
            comments_repo,
            notes_repo,
            author_id,
            reader_id: Uuid::new_v4(),
            news,
            comment,
            note,
        }
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
        test::init_service(
            App::new()
                .app_data(web::Data::new(self.state.clone()))
                .configure(super::configure_routes),
        )
        .await
    }

    fn token(&self, user: &str) -> String {
        let user_id = match user {
            "author" => self.author_id,
            "reader" => self.reader_id,
            other => panic!("unknown fixture user {other}"),
        };
        self.state.tokens.generate_token(user_id, user).unwrap()
    }

    pub fn bearer(&self, user: &str) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
    }

    pub fn cookie(&self, user: &str) -> Cookie<'static> {
        Cookie::new(ACCESS_TOKEN_COOKIE, self.token(user))
    }

    /// `count` more news items, one per day going back from today.
    pub async fn seed_news(&self, count: u64) {
        let today = Utc::now().date_naive();
        for i in 0..count {
            self.news_repo
                .create(News::dated(
                    format!("Новость {i}"),
                    "Просто текст.".into(),
                    today - Days::new(i),
                ))
                .await
                .unwrap();
        }
    }

    pub async fn comment_count(&self) -> u64 {
        self.comments_repo.count().await.unwrap()
    }

    pub async fn comment_text(&self) -> String {
        self.comments_repo
            .find_by_id(self.comment.id)
            .await
            .unwrap()
            .unwrap()
            .text
    }

    pub async fn note_count(&self) -> u64 {
        self.notes_repo.count().await.unwrap()
    }

    pub async fn stored_note(&self) -> Note {
        self.notes_repo
            .find_by_id(self.note.id)
            .await
            .unwrap()
            .unwrap()
    }
}

/// `Location` header of a redirect.
pub fn location(resp: &ServiceResponse<BoxBody>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
