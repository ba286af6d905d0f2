use std::collections::BTreeSet;

use parking_lot::RwLock;

use crate::traits::UserDirectory;

/// In-process user directory keyed by username.
///
/// Holds names only. Hosts that verify credentials keep them in their own store
/// and mirror registrations here, or implement [`UserDirectory`] directly.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<BTreeSet<String>>,
}

impl InMemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the user was already registered.
    pub fn add_user(&self, username: impl Into<String>) -> bool {
        let username = username.into();
        tracing::debug!(user = %username, "Registering user");
        self.users.write().insert(username)
    }

    /// Returns `false` if the user was not registered.
    pub fn remove_user(&self, username: &str) -> bool {
        let removed = self.users.write().remove(username);
        if removed {
            tracing::debug!(user = %username, "Removed user");
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.users.read().contains(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn is_empty(&self) -> bool {
        InMemoryUserDirectory::is_empty(self)
    }
}

impl<S: Into<String>> FromIterator<S> for InMemoryUserDirectory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            users: RwLock::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}
