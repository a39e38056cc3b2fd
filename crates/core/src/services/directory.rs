//! Directory service.

use std::sync::Arc;

use fedigraph_common::{AppError, AppResult};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::entities::Actor;
use crate::store::ActorStore;

/// Input for registering an actor.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterActorInput {
    /// Local username; no `@` or whitespace.
    #[validate(length(min = 1, max = 128), custom(function = "validate_username"))]
    pub username: String,
    /// Human-readable name.
    #[validate(length(max = 256))]
    pub display_name: String,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.contains('@') || username.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("username_charset"));
    }
    Ok(())
}

/// Service owning actor registration and lookup.
#[derive(Clone)]
pub struct DirectoryService {
    store: ActorStore,
    server_name: Arc<str>,
}

impl DirectoryService {
    /// Create a new directory service for `server_name`.
    #[must_use]
    pub fn new(store: ActorStore, server_name: &str) -> Self {
        Self {
            store,
            server_name: Arc::from(server_name),
        }
    }

    /// Server name used in handles.
    #[must_use]
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub(crate) const fn store(&self) -> &ActorStore {
        &self.store
    }

    /// Register a new actor.
    pub fn register(&self, input: RegisterActorInput) -> AppResult<Actor> {
        input.validate()?;

        let actor = Actor::new(&input.username, &input.display_name, &self.server_name);
        let mut table = self.store.write();
        if !table.insert(actor.clone()) {
            return Err(AppError::DuplicateActor(input.username));
        }

        tracing::debug!(username = %input.username, handle = %actor.handle(), "Registered actor");
        Ok(actor)
    }

    /// Resolve a bare username or `@username@server` handle.
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<Actor> {
        self.store
            .read()
            .resolve(identifier, &self.server_name)
            .cloned()
    }

    /// Snapshot of all actors in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Actor> {
        self.store.read().iter().cloned().collect()
    }

    /// Remove an actor and sever every edge that references it.
    ///
    /// Activities it already delivered stay in other actors' inboxes.
    pub fn remove(&self, username: &str) -> bool {
        let mut table = self.store.write();
        let Some(removed) = table.remove(username) else {
            return false;
        };

        let mut severed = 0usize;
        for follower in removed.followers() {
            if let Some(actor) = table.get_mut(follower)
                && actor.remove_following(username)
            {
                severed += 1;
            }
        }
        for followee in removed.following() {
            if let Some(actor) = table.get_mut(followee)
                && actor.remove_follower(username)
            {
                severed += 1;
            }
        }

        tracing::info!(username = %username, severed_edges = severed, "Removed actor");
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> DirectoryService {
        DirectoryService::new(ActorStore::new(), "srv")
    }

    fn input(username: &str, display_name: &str) -> RegisterActorInput {
        RegisterActorInput {
            username: username.to_string(),
            display_name: display_name.to_string(),
        }
    }

    #[test]
    fn test_register_builds_handle() {
        let directory = service();
        let actor = directory.register(input("alice", "Alice Wonderland")).unwrap();

        assert_eq!(actor.handle(), "@alice@srv");
        assert_eq!(actor.display_name(), "Alice Wonderland");
    }

    #[test]
    fn test_register_duplicate_returns_error() {
        let directory = service();
        directory.register(input("alice", "Alice")).unwrap();

        match directory.register(input("alice", "Impostor")) {
            Err(AppError::DuplicateActor(name)) => assert_eq!(name, "alice"),
            other => panic!("Expected DuplicateActor error, got {other:?}"),
        }
        assert_eq!(directory.resolve("alice").unwrap().display_name(), "Alice");
    }

    #[test]
    fn test_register_rejects_invalid_usernames() {
        let directory = service();
        for bad in ["", "al@ice", "al ice"] {
            assert!(matches!(
                directory.register(input(bad, "x")),
                Err(AppError::Validation(_))
            ));
        }
        assert!(directory.list().is_empty());
    }

    #[test]
    fn test_resolve_bare_and_qualified() {
        let directory = service();
        directory.register(input("alice", "Alice")).unwrap();

        let bare = directory.resolve("alice").unwrap();
        let qualified = directory.resolve("@alice@srv").unwrap();
        assert_eq!(bare.username(), qualified.username());
        assert!(directory.resolve("@alice@other").is_none());
        assert!(directory.resolve("nobody").is_none());
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let directory = service();
        directory.register(input("alice", "Alice")).unwrap();
        directory.register(input("bob", "Bob")).unwrap();

        let mut listed = directory.list();
        listed.clear();

        let names: Vec<String> = directory
            .list()
            .iter()
            .map(|a| a.username().to_string())
            .collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_remove_reports_existence() {
        let directory = service();
        directory.register(input("alice", "Alice")).unwrap();

        assert!(directory.remove("alice"));
        assert!(!directory.remove("alice"));
        assert!(directory.resolve("alice").is_none());
    }

    #[test]
    fn test_remove_cascades_edges() {
        let directory = service();
        for name in ["alice", "bob", "carol"] {
            directory.register(input(name, name)).unwrap();
        }
        {
            let mut table = directory.store().write();
            // bob -> alice, alice -> carol
            table.get_mut("alice").unwrap().add_follower("bob");
            table.get_mut("bob").unwrap().add_following("alice");
            table.get_mut("alice").unwrap().add_following("carol");
            table.get_mut("carol").unwrap().add_follower("alice");
        }

        assert!(directory.remove("alice"));

        assert!(directory.resolve("bob").unwrap().following().is_empty());
        assert!(directory.resolve("carol").unwrap().followers().is_empty());
    }
}
