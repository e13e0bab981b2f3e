//! Identity of the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Identity is owned by the host: the app seeds it from `ClientConfig` and
//! an embedding sign-in flow may replace it through the `RwSignal<AuthState>`
//! context. The chat controller reads the user id from here for every
//! request; the chat page watches it to clear the conversation on sign-out
//! and to load the routed session on sign-in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// The signed-in caller. `id` is sent verbatim as `X-User-ID`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    /// A user known only by id. Blank ids are not an identity.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        (!id.is_empty()).then(|| Self { id: id.to_owned(), name: String::new() })
    }
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// Signed in as `user_id` when present, otherwise signed out.
    #[must_use]
    pub fn from_user_id(user_id: Option<&str>) -> Self {
        Self { user: user_id.and_then(User::from_id), loading: false }
    }

    /// Identity to attach to backend requests, if signed in.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str()).filter(|id| !id.trim().is_empty())
    }
}
