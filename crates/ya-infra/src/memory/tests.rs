//! Service behaviour over the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, Utc};
use uuid::Uuid;

use ya_core::config::{FeedConfig, ModerationConfig};
use ya_core::domain::{Comment, Destination, News, Note, User};
use ya_core::error::{DomainError, RepoError};
use ya_core::ownership::{Action, Actor};
use ya_core::ports::{BaseRepository, NoteRepository, UserRepository};
use ya_core::services::{CommentInput, CommentService, NewsService, NoteInput, NoteService};
use ya_core::validation::{FORBIDDEN_WORDS_WARNING, slug_taken_message};

use super::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
    InMemoryUserRepository,
};

fn note_input(title: &str, text: &str, slug: &str) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        text: text.to_string(),
        slug: slug.to_string(),
    }
}

struct NotesFixture {
    repo: Arc<InMemoryNoteRepository>,
    service: NoteService,
    author: Actor,
    reader: Actor,
    note: Note,
}

async fn notes_fixture() -> NotesFixture {
    let repo = Arc::new(InMemoryNoteRepository::new());
    let author_id = Uuid::new_v4();
    let note = repo
        .create(Note::new(
            author_id,
            "Заголовок".to_string(),
            "Текст заметки".to_string(),
            "note-slug".to_string(),
        ))
        .await
        .unwrap();

    NotesFixture {
        service: NoteService::new(repo.clone()),
        repo,
        author: Actor::User(author_id),
        reader: Actor::User(Uuid::new_v4()),
        note,
    }
}

struct NewsFixture {
    comments_repo: Arc<InMemoryCommentRepository>,
    news: NewsService,
    comments: CommentService,
    author: Actor,
    reader: Actor,
    item: News,
    comment: Comment,
}

async fn news_fixture() -> NewsFixture {
    let news_repo = Arc::new(InMemoryNewsRepository::new());
    let comments_repo = Arc::new(InMemoryCommentRepository::new());
    let author_id = Uuid::new_v4();

    let item = news_repo
        .create(News::new("Заголовок".to_string(), "Текст".to_string()))
        .await
        .unwrap();
    let comment = comments_repo
        .create(Comment::new(item.id, author_id, "Текст комментария".to_string()))
        .await
        .unwrap();

    NewsFixture {
        news: NewsService::new(news_repo.clone(), comments_repo.clone(), FeedConfig::default()),
        comments: CommentService::new(
            news_repo,
            comments_repo.clone(),
            ModerationConfig::default(),
        ),
        comments_repo,
        author: Actor::User(author_id),
        reader: Actor::User(Uuid::new_v4()),
        item,
        comment,
    }
}

// -- repository --

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let repo = InMemoryUserRepository::new();
    repo.create(User::new("author".into(), "hash".into()))
        .await
        .unwrap();

    let result = repo.create(User::new("author".into(), "hash".into())).await;

    assert!(matches!(result, Err(RepoError::Unique(_))));
    assert!(repo.find_by_username("author").await.unwrap().is_some());
}

#[tokio::test]
async fn test_update_may_keep_own_slug() {
    let f = notes_fixture().await;
    let mut note = f.note.clone();
    note.title = "Другой".to_string();

    let updated = f.repo.update(note).await.unwrap();

    assert_eq!(updated.slug, "note-slug");
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let repo = InMemoryNoteRepository::new();
    let note = Note::new(Uuid::new_v4(), "t".into(), "x".into(), "s".into());

    assert!(matches!(repo.update(note).await, Err(RepoError::NotFound)));
}

// -- notes --

#[tokio::test]
async fn test_author_creates_note() {
    let f = notes_fixture().await;

    let created = f
        .service
        .create(&f.author, note_input("Новый", "Текст", "new-slug"))
        .await
        .unwrap();

    assert_eq!(created.redirect, Destination::NotesDone);
    assert_eq!(f.repo.count().await.unwrap(), 2);
    let stored = f.repo.find_by_slug("new-slug").await.unwrap().unwrap();
    assert_eq!(stored.title, "Новый");
    assert_eq!(stored.text, "Текст");
    assert_eq!(Some(stored.author_id), f.author.id());
}

#[tokio::test]
async fn test_anonymous_cannot_create_note() {
    let f = notes_fixture().await;

    let result = f
        .service
        .create(&Actor::Anonymous, note_input("Новый", "Текст", "new-slug"))
        .await;

    assert!(matches!(result, Err(DomainError::AnonymousDenied)));
    assert_eq!(f.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() {
    let f = notes_fixture().await;

    let result = f
        .service
        .create(&f.reader, note_input("Новый", "Текст", "note-slug"))
        .await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.get("slug"), [slug_taken_message("note-slug")]);
    assert_eq!(f.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_empty_slug_is_derived_from_title() {
    let f = notes_fixture().await;

    let created = f
        .service
        .create(&f.author, note_input("Note", "Текст", ""))
        .await
        .unwrap();

    assert_eq!(created.value.slug, "note");
    assert!(f.repo.find_by_slug("note").await.unwrap().is_some());
}

#[tokio::test]
async fn test_cyrillic_title_is_transliterated() {
    let f = notes_fixture().await;

    let created = f
        .service
        .create(&f.author, note_input("Новая заметка", "Текст", ""))
        .await
        .unwrap();

    assert_eq!(created.value.slug, "novaya-zametka");
}

#[tokio::test]
async fn test_all_errors_are_reported_together() {
    let f = notes_fixture().await;

    let result = f
        .service
        .create(&f.author, note_input("", "", "bad slug!"))
        .await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected a validation error");
    };
    assert!(errors.has("title"));
    assert!(errors.has("text"));
    assert!(errors.has("slug"));
}

#[tokio::test]
async fn test_author_edits_note_keeping_slug() {
    let f = notes_fixture().await;

    let edited = f
        .service
        .update(&f.author, "note-slug", note_input("Новый заголовок", "Новый текст", "note-slug"))
        .await
        .unwrap();

    assert_eq!(edited.redirect, Destination::NotesDone);
    let stored = f.repo.find_by_id(f.note.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Новый заголовок");
    assert_eq!(stored.text, "Новый текст");
    assert_eq!(stored.slug, "note-slug");
}

#[tokio::test]
async fn test_edit_cannot_take_foreign_slug() {
    let f = notes_fixture().await;
    f.service
        .create(&f.reader, note_input("Travel", "Текст", "travel"))
        .await
        .unwrap();

    let result = f
        .service
        .update(&f.author, "note-slug", note_input("Заголовок", "Текст", "travel"))
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    let stored = f.repo.find_by_id(f.note.id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "note-slug");
}

#[tokio::test]
async fn test_other_user_cannot_edit_note() {
    let f = notes_fixture().await;

    let result = f
        .service
        .update(&f.reader, "note-slug", note_input("Чужой", "Чужой", "note-slug"))
        .await;

    assert!(matches!(result, Err(DomainError::Forbidden)));
    let stored = f.repo.find_by_id(f.note.id).await.unwrap().unwrap();
    assert_eq!(stored.title, f.note.title);
    assert_eq!(stored.text, f.note.text);
}

#[tokio::test]
async fn test_other_user_cannot_delete_note() {
    let f = notes_fixture().await;

    let result = f.service.delete(&f.reader, "note-slug").await;

    assert!(matches!(result, Err(DomainError::Forbidden)));
    assert_eq!(f.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_author_deletes_note() {
    let f = notes_fixture().await;

    let deleted = f.service.delete(&f.author, "note-slug").await.unwrap();

    assert_eq!(deleted.redirect, Destination::NotesDone);
    assert_eq!(f.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_anonymous_is_denied_before_lookup() {
    let f = notes_fixture().await;

    for slug in ["note-slug", "missing"] {
        let result = f.service.get(&Actor::Anonymous, slug, Action::View).await;
        assert!(matches!(result, Err(DomainError::AnonymousDenied)));
    }
}

#[tokio::test]
async fn test_list_shows_only_own_notes() {
    let f = notes_fixture().await;

    let own = f.service.list(&f.author).await.unwrap();
    let other = f.service.list(&f.reader).await.unwrap();

    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, f.note.id);
    assert!(other.is_empty());
}

/// Note store whose lookup of one slug misses, as if another writer took
/// it between the check and the write.
struct StaleSlugLookup {
    inner: Arc<InMemoryNoteRepository>,
    hidden: &'static str,
}

#[async_trait]
impl BaseRepository<Note, Uuid> for StaleSlugLookup {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, entity: Note) -> Result<Note, RepoError> {
        self.inner.create(entity).await
    }

    async fn update(&self, entity: Note) -> Result<Note, RepoError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        self.inner.count().await
    }
}

#[async_trait]
impl NoteRepository for StaleSlugLookup {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, RepoError> {
        if slug == self.hidden {
            return Ok(None);
        }
        self.inner.find_by_slug(slug).await
    }

    async fn find_by_author_id(&self, author_id: Uuid) -> Result<Vec<Note>, RepoError> {
        self.inner.find_by_author_id(author_id).await
    }
}

/// Note store that refuses every insert because the author row is gone.
struct MissingAuthor;

#[async_trait]
impl BaseRepository<Note, Uuid> for MissingAuthor {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Note>, RepoError> {
        Ok(None)
    }

    async fn create(&self, _entity: Note) -> Result<Note, RepoError> {
        Err(RepoError::ForeignKey(
            "insert or update on table \"notes\" violates foreign key constraint".to_string(),
        ))
    }

    async fn update(&self, _entity: Note) -> Result<Note, RepoError> {
        Err(RepoError::NotFound)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::NotFound)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(0)
    }
}

#[async_trait]
impl NoteRepository for MissingAuthor {
    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Note>, RepoError> {
        Ok(None)
    }

    async fn find_by_author_id(&self, _author_id: Uuid) -> Result<Vec<Note>, RepoError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_slug_taken_at_commit_is_a_field_error() {
    let f = notes_fixture().await;
    let service = NoteService::new(Arc::new(StaleSlugLookup {
        inner: f.repo.clone(),
        hidden: "note-slug",
    }));

    let result = service
        .create(&f.reader, note_input("Новый", "Текст", "note-slug"))
        .await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.get("slug"), [slug_taken_message("note-slug")]);
    assert_eq!(f.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_slug_taken_at_commit_on_edit_is_a_field_error() {
    let f = notes_fixture().await;
    f.service
        .create(&f.reader, note_input("Travel", "Текст", "travel"))
        .await
        .unwrap();
    let service = NoteService::new(Arc::new(StaleSlugLookup {
        inner: f.repo.clone(),
        hidden: "travel",
    }));

    let result = service
        .update(&f.author, "note-slug", note_input("Заголовок", "Текст", "travel"))
        .await;

    let Err(DomainError::Validation(errors)) = result else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.get("slug"), [slug_taken_message("travel")]);
    let stored = f.repo.find_by_id(f.note.id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "note-slug");
    assert_eq!(f.repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_author_is_not_reported_as_taken_slug() {
    let service = NoteService::new(Arc::new(MissingAuthor));

    let result = service
        .create(&Actor::User(Uuid::new_v4()), note_input("Новый", "Текст", "fresh-unique"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Repo(RepoError::ForeignKey(_)))
    ));
}

// -- news and comments --

#[tokio::test]
async fn test_home_page_is_limited_and_newest_first() {
    let news_repo = Arc::new(InMemoryNewsRepository::new());
    let today = Utc::now().date_naive();
    for i in 0..11 {
        news_repo
            .create(News::dated(
                format!("Новость {i}"),
                "Просто текст.".to_string(),
                today - Days::new(i),
            ))
            .await
            .unwrap();
    }
    let service = NewsService::new(
        news_repo,
        Arc::new(InMemoryCommentRepository::new()),
        FeedConfig::default(),
    );

    let page = service.home(1).await.unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 11);
    assert_eq!(page.items[0].date, today);
    assert!(page.items.windows(2).all(|w| w[0].date >= w[1].date));

    let second = service.home(2).await.unwrap();
    assert_eq!(second.items.len(), 1);
}

#[tokio::test]
async fn test_detail_lists_comments_oldest_first() {
    let f = news_fixture().await;
    let author_id = f.author.id().unwrap();
    let now = Utc::now();
    for i in 1..=3 {
        let mut comment = Comment::new(f.item.id, author_id, format!("Текст {i}"));
        comment.created_at = now + chrono::Duration::days(i);
        f.comments_repo.create(comment).await.unwrap();
    }

    let detail = f.news.detail(f.item.id).await.unwrap();

    assert_eq!(detail.comments.len(), 4);
    assert!(
        detail
            .comments
            .windows(2)
            .all(|w| w[0].created_at <= w[1].created_at)
    );
}

#[tokio::test]
async fn test_detail_of_missing_news_is_not_found() {
    let f = news_fixture().await;

    let result = f.news.detail(Uuid::new_v4()).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_user_can_comment() {
    let f = news_fixture().await;

    let created = f
        .comments
        .create(&f.reader, f.item.id, CommentInput { text: "Текст".into() })
        .await
        .unwrap();

    assert_eq!(created.redirect, Destination::NewsComments(f.item.id));
    assert_eq!(f.comments_repo.count().await.unwrap(), 2);
    assert_eq!(Some(created.value.author_id), f.reader.id());
}

#[tokio::test]
async fn test_anonymous_cannot_comment() {
    let f = news_fixture().await;

    let result = f
        .comments
        .create(&Actor::Anonymous, f.item.id, CommentInput { text: "Текст".into() })
        .await;

    assert!(matches!(result, Err(DomainError::AnonymousDenied)));
    assert_eq!(f.comments_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_forbidden_words_are_rejected() {
    let f = news_fixture().await;

    for word in ["редиска", "негодяй"] {
        let text = format!("Какой-то текст, {word}, еще текст");
        let result = f
            .comments
            .create(&f.reader, f.item.id, CommentInput { text })
            .await;

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.get("text"), [FORBIDDEN_WORDS_WARNING]);
    }
    assert_eq!(f.comments_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_author_edits_comment() {
    let f = news_fixture().await;

    let edited = f
        .comments
        .update(&f.author, f.comment.id, CommentInput { text: "Обновлённый".into() })
        .await
        .unwrap();

    assert_eq!(edited.redirect, Destination::NewsComments(f.item.id));
    let stored = f.comments_repo.find_by_id(f.comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Обновлённый");
}

#[tokio::test]
async fn test_other_user_cannot_edit_comment() {
    let f = news_fixture().await;

    let result = f
        .comments
        .update(&f.reader, f.comment.id, CommentInput { text: "Чужой".into() })
        .await;

    assert!(matches!(result, Err(DomainError::Forbidden)));
    let stored = f.comments_repo.find_by_id(f.comment.id).await.unwrap().unwrap();
    assert_eq!(stored.text, f.comment.text);
}

#[tokio::test]
async fn test_other_user_cannot_delete_comment() {
    let f = news_fixture().await;

    let result = f.comments.delete(&f.reader, f.comment.id).await;

    assert!(matches!(result, Err(DomainError::Forbidden)));
    assert_eq!(f.comments_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_author_deletes_comment() {
    let f = news_fixture().await;

    let deleted = f.comments.delete(&f.author, f.comment.id).await.unwrap();

    assert_eq!(deleted.redirect, Destination::NewsComments(f.item.id));
    assert_eq!(f.comments_repo.count().await.unwrap(), 0);
}

// -- accounts --

#[cfg(feature = "auth")]
mod accounts {
    use std::sync::Arc;

    use async_trait::async_trait;
    use uuid::Uuid;
    use ya_core::domain::User;
    use ya_core::error::{DomainError, RepoError};
    use ya_core::ports::{BaseRepository, TokenService, UserRepository};
    use ya_core::services::{Credentials, NON_FIELD_ERRORS, UserService};
    use ya_core::validation::USERNAME_TAKEN;

    use crate::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
    use crate::memory::InMemoryUserRepository;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn setup() -> (Arc<InMemoryUserRepository>, Arc<JwtTokenService>, UserService) {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(JwtTokenService::new(JwtConfig::default()));
        let service = UserService::new(
            users.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
        );
        (users, tokens, service)
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let (users, tokens, service) = setup();

        let user = service
            .signup(credentials("reader", "long-enough"))
            .await
            .unwrap();
        let session = service
            .login(credentials("reader", "long-enough"))
            .await
            .unwrap();

        let stored = users.find_by_username("reader").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "long-enough");
        assert_eq!(session.user.id, user.id);
        assert_eq!(tokens.validate_token(&session.token).unwrap().user_id, user.id);
    }

    #[tokio::test]
    async fn test_signup_with_taken_username() {
        let (_, _, service) = setup();
        service
            .signup(credentials("reader", "long-enough"))
            .await
            .unwrap();

        let result = service.signup(credentials("reader", "other-password")).await;

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.get("username"), [USERNAME_TAKEN]);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let (_, _, service) = setup();
        service
            .signup(credentials("reader", "long-enough"))
            .await
            .unwrap();

        for form in [
            credentials("reader", "wrong-password"),
            credentials("nobody", "long-enough"),
        ] {
            let Err(DomainError::Validation(errors)) = service.login(form).await else {
                panic!("expected a validation error");
            };
            assert!(errors.has(NON_FIELD_ERRORS));
        }
    }

    /// User store whose username lookup always misses, as if the name was
    /// registered between the check and the insert.
    struct StaleUsernameLookup(Arc<InMemoryUserRepository>);

    #[async_trait]
    impl BaseRepository<User, Uuid> for StaleUsernameLookup {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            self.0.find_by_id(id).await
        }

        async fn create(&self, entity: User) -> Result<User, RepoError> {
            self.0.create(entity).await
        }

        async fn update(&self, entity: User) -> Result<User, RepoError> {
            self.0.update(entity).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.0.delete(id).await
        }

        async fn count(&self) -> Result<u64, RepoError> {
            self.0.count().await
        }
    }

    #[async_trait]
    impl UserRepository for StaleUsernameLookup {
        async fn find_by_username(&self, _username: &str) -> Result<Option<User>, RepoError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_username_taken_at_commit_is_a_field_error() {
        let (users, tokens, service) = setup();
        service
            .signup(credentials("reader", "long-enough"))
            .await
            .unwrap();
        let racing = UserService::new(
            Arc::new(StaleUsernameLookup(users.clone())),
            Arc::new(Argon2PasswordService::new()),
            tokens,
        );

        let result = racing.signup(credentials("reader", "other-password")).await;

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.get("username"), [USERNAME_TAKEN]);
        assert_eq!(users.count().await.unwrap(), 1);
    }
}
