//! Ownership guard.
//!
//! Every comment and note has exactly one owner. Whether an actor may act
//! on a resource is a plain comparison of identities; nothing here touches
//! the store.

use uuid::Uuid;

use crate::error::DomainError;

/// The identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(Uuid),
}

impl Actor {
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Actor::Anonymous => None,
            Actor::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User(_))
    }

    /// Id of the authenticated actor, or `AnonymousDenied`.
    pub fn require_user(&self) -> Result<Uuid, DomainError> {
        self.id().ok_or(DomainError::AnonymousDenied)
    }
}

impl From<Option<Uuid>> for Actor {
    fn from(id: Option<Uuid>) -> Self {
        id.map_or(Actor::Anonymous, Actor::User)
    }
}

/// What the actor is trying to do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read a private resource (notes only; comments are public).
    View,
    Edit,
    Delete,
}

/// Guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// The actor must log in first.
    AnonymousDenied,
    /// The actor is logged in but owns nothing here.
    ForbiddenDenied,
}

impl Access {
    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Access::Allowed => Ok(()),
            Access::AnonymousDenied => Err(DomainError::AnonymousDenied),
            Access::ForbiddenDenied => Err(DomainError::Forbidden),
        }
    }
}

/// Resources with a single owning identity.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Decide whether `actor` may perform `action` on `resource`.
///
/// All guarded actions are owner-only; `action` is only logged.
pub fn authorize<R: Owned + ?Sized>(actor: &Actor, resource: &R, action: Action) -> Access {
    let access = match actor {
        Actor::Anonymous => Access::AnonymousDenied,
        Actor::User(id) if *id == resource.owner_id() => Access::Allowed,
        Actor::User(_) => Access::ForbiddenDenied,
    };
    tracing::trace!(?action, ?access, "ownership check");
    access
}
