//! Actor storage.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::entities::Actor;
use crate::identifier::Identifier;

/// Actors keyed by username, enumerated in registration order.
#[derive(Debug, Default)]
pub struct ActorTable {
    actors: HashMap<String, Actor>,
    order: Vec<String>,
}

impl ActorTable {
    /// Find an actor by bare username.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<&Actor> {
        self.actors.get(username)
    }

    pub(crate) fn get_mut(&mut self, username: &str) -> Option<&mut Actor> {
        self.actors.get_mut(username)
    }

    /// Check whether a username is registered.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.actors.contains_key(username)
    }

    /// Resolve a bare username or a `@username@server` handle.
    ///
    /// Handles naming another server never resolve.
    #[must_use]
    pub fn resolve(&self, identifier: &str, server_name: &str) -> Option<&Actor> {
        let username = Identifier::parse(identifier)?.username_on(server_name)?;
        self.get(username)
    }

    /// Iterate over actors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.order.iter().filter_map(|username| self.actors.get(username))
    }

    /// Number of registered actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether no actor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Insert an actor. Returns `false` and leaves the table untouched if the
    /// username is taken.
    pub(crate) fn insert(&mut self, actor: Actor) -> bool {
        if self.actors.contains_key(actor.username()) {
            return false;
        }
        self.order.push(actor.username().to_string());
        self.actors.insert(actor.username().to_string(), actor);
        true
    }

    pub(crate) fn remove(&mut self, username: &str) -> Option<Actor> {
        let actor = self.actors.remove(username)?;
        self.order.retain(|name| name != username);
        Some(actor)
    }
}

/// Shared handle to the actor table.
///
/// Every service holds a clone; one coarse lock guards the whole table so
/// operations touching two actors at once stay atomic.
#[derive(Clone, Default)]
pub struct ActorStore {
    table: Arc<RwLock<ActorTable>>,
}

impl ActorStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire shared read access.
    pub fn read(&self) -> RwLockReadGuard<'_, ActorTable> {
        self.table.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, ActorTable> {
        self.table.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(names: &[&str]) -> ActorTable {
        let mut table = ActorTable::default();
        for name in names {
            assert!(table.insert(Actor::new(name, name, "srv")));
        }
        table
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut table = table_with(&["alice"]);
        assert!(!table.insert(Actor::new("alice", "Other Alice", "srv")));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("alice").map(Actor::display_name), Some("alice"));
    }

    #[test]
    fn test_iter_keeps_registration_order() {
        let table = table_with(&["zed", "alice", "mike"]);
        let names: Vec<&str> = table.iter().map(Actor::username).collect();
        assert_eq!(names, vec!["zed", "alice", "mike"]);
    }

    #[test]
    fn test_remove_drops_from_order() {
        let mut table = table_with(&["a", "b", "c"]);
        assert!(table.remove("b").is_some());
        assert!(table.remove("b").is_none());

        let names: Vec<&str> = table.iter().map(Actor::username).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(!table.contains("b"));
    }

    #[test]
    fn test_resolve_forms() {
        let table = table_with(&["alice"]);

        assert!(table.resolve("alice", "srv").is_some());
        assert!(table.resolve("@alice@srv", "srv").is_some());
        assert!(table.resolve("@alice@other", "srv").is_none());
        assert!(table.resolve("@alice", "srv").is_none());
        assert!(table.resolve("bob", "srv").is_none());
    }

    #[test]
    fn test_store_clones_share_table() {
        let store = ActorStore::new();
        let clone = store.clone();

        clone.write().insert(Actor::new("alice", "Alice", "srv"));

        assert!(store.read().contains("alice"));
        assert!(!store.read().is_empty());
    }
}
