//! Application state - shared across all handlers.

use std::sync::Arc;

use ya_core::ports::{
    CommentRepository, NewsRepository, NoteRepository, PasswordService, TokenService,
    UserRepository,
};
use ya_core::services::{CommentService, NewsService, NoteService, UserService};
use ya_infra::{
    Argon2PasswordService, InMemoryCommentRepository, InMemoryNewsRepository,
    InMemoryNoteRepository, InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use ya_infra::{
    DatabaseConnections, PostgresCommentRepository, PostgresNewsRepository,
    PostgresNoteRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// The store behind the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub notes: Arc<dyn NoteRepository>,
}

impl Repositories {
    /// Process-local store, lost on restart.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            news: Arc::new(InMemoryNewsRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            notes: Arc::new(InMemoryNoteRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(connections.main.clone())),
            news: Arc::new(PostgresNewsRepository::new(connections.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(connections.main.clone())),
            notes: Arc::new(PostgresNoteRepository::new(connections.main.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub news: Arc<NewsService>,
    pub comments: Arc<CommentService>,
    pub notes: Arc<NoteService>,
    pub users: Arc<UserService>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state, on PostgreSQL when it is configured
    /// and reachable, in memory otherwise.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = Self::connect(config).await;
        tracing::info!("Application state initialized");
        Self::with_repositories(repos, config)
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> Repositories {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Repositories::in_memory();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => Repositories::postgres(&connections),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Repositories::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Repositories::in_memory()
    }

    /// Wire the services over `repos`.
    pub fn with_repositories(repos: Repositories, config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            news: Arc::new(NewsService::new(
                repos.news.clone(),
                repos.comments.clone(),
                config.feed.clone(),
            )),
            comments: Arc::new(CommentService::new(
                repos.news,
                repos.comments,
                config.moderation.clone(),
            )),
            notes: Arc::new(NoteService::new(repos.notes)),
            users: Arc::new(UserService::new(repos.users, passwords, tokens.clone())),
            tokens,
        }
    }
}
