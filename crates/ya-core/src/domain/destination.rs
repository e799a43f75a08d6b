use uuid::Uuid;

/// Where the client is sent after a successful mutation.
///
/// The routing layer turns these into concrete locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Comment section of a news detail page.
    NewsComments(Uuid),
    /// Confirmation page of the notes application.
    NotesDone,
}
