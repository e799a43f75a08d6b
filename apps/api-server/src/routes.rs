//! Named destinations and the paths they resolve to.

use std::borrow::Cow;

use uuid::Uuid;

use ya_core::domain::Destination;

pub const LOGIN: &str = "/auth/login/";
pub const NEWS_HOME: &str = "/";
pub const NOTES_DONE: &str = "/notes/done/";

pub fn news_detail(id: Uuid) -> String {
    format!("/news/{id}/")
}

/// Where a successful mutation sends the client.
pub fn destination(target: Destination) -> String {
    match target {
        Destination::NewsComments(news_id) => format!("{}#comments", news_detail(news_id)),
        Destination::NotesDone => NOTES_DONE.to_string(),
    }
}

/// Login page that returns to `next` afterwards.
///
/// Each path segment is percent-encoded, `/` separators are kept.
pub fn login_redirect(next: &str) -> String {
    let next = next
        .split('/')
        .map(|segment| {
            let decoded = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment));
            urlencoding::encode(&decoded).into_owned()
        })
        .collect::<Vec<_>>()
        .join("/");
    format!("{LOGIN}?next={next}")
}

/// `next` is followed only when it stays on this site.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => NEWS_HOME,
    }
}

/// Browsers read `\` as `/` and drop tabs and newlines, so `/\host` and
/// `/\t/host` both point off-site.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
