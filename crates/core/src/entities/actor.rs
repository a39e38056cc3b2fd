//! Actor entity (registered accounts).

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Activity;
use crate::identifier::format_handle;

/// A registered account.
///
/// Follow edges are stored as usernames on both ends: `followers` on the
/// target and `following` on the follower. The follow graph service keeps the
/// two halves in step.
#[derive(Debug, Clone)]
pub struct Actor {
    username: String,
    display_name: String,
    handle: String,
    created_at: DateTime<Utc>,

    /// Usernames of actors following this actor
    followers: BTreeSet<String>,

    /// Usernames of actors this actor follows
    following: BTreeSet<String>,

    /// Authored activities, oldest first
    outbox: Vec<Arc<Activity>>,

    /// Received activities, newest first
    inbox: VecDeque<Arc<Activity>>,
}

impl Actor {
    pub(crate) fn new(username: &str, display_name: &str, server_name: &str) -> Self {
        Self {
            username: username.to_string(),
            display_name: display_name.to_string(),
            handle: format_handle(username, server_name),
            created_at: Utc::now(),
            followers: BTreeSet::new(),
            following: BTreeSet::new(),
            outbox: Vec::new(),
            inbox: VecDeque::new(),
        }
    }

    /// Local username, unique on this server.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Fully-qualified `@username@server` handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Registration time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Usernames of this actor's followers.
    #[must_use]
    pub const fn followers(&self) -> &BTreeSet<String> {
        &self.followers
    }

    /// Usernames of the actors this actor follows.
    #[must_use]
    pub const fn following(&self) -> &BTreeSet<String> {
        &self.following
    }

    /// Authored activities in posting order.
    #[must_use]
    pub fn outbox(&self) -> &[Arc<Activity>] {
        &self.outbox
    }

    /// Received activities, newest first.
    pub fn inbox(&self) -> impl ExactSizeIterator<Item = &Arc<Activity>> {
        self.inbox.iter()
    }

    pub(crate) fn add_follower(&mut self, username: &str) -> bool {
        self.followers.insert(username.to_string())
    }

    pub(crate) fn remove_follower(&mut self, username: &str) -> bool {
        self.followers.remove(username)
    }

    pub(crate) fn add_following(&mut self, username: &str) -> bool {
        self.following.insert(username.to_string())
    }

    pub(crate) fn remove_following(&mut self, username: &str) -> bool {
        self.following.remove(username)
    }

    pub(crate) fn push_outbox(&mut self, activity: Arc<Activity>) {
        self.outbox.push(activity);
    }

    pub(crate) fn deliver(&mut self, activity: Arc<Activity>) {
        self.inbox.push_front(activity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ActivityType;

    #[test]
    fn test_new_actor_identity() {
        let actor = Actor::new("alice", "Alice Wonderland", "srv");

        assert_eq!(actor.username(), "alice");
        assert_eq!(actor.display_name(), "Alice Wonderland");
        assert_eq!(actor.handle(), "@alice@srv");
        assert!(actor.followers().is_empty());
        assert!(actor.following().is_empty());
        assert!(actor.outbox().is_empty());
        assert_eq!(actor.inbox().len(), 0);
    }

    #[test]
    fn test_inbox_is_newest_first() {
        let mut actor = Actor::new("bob", "Bob", "srv");
        let first = Arc::new(Activity::new(ActivityType::Create, "alice", "first"));
        let second = Arc::new(Activity::new(ActivityType::Create, "alice", "second"));

        actor.deliver(first);
        actor.deliver(second);

        let contents: Vec<&str> = actor.inbox().map(|a| a.content()).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }

    #[test]
    fn test_outbox_is_append_order() {
        let mut actor = Actor::new("alice", "Alice", "srv");
        actor.push_outbox(Arc::new(Activity::new(ActivityType::Create, "alice", "1")));
        actor.push_outbox(Arc::new(Activity::new(ActivityType::Create, "alice", "2")));

        let contents: Vec<&str> = actor.outbox().iter().map(|a| a.content()).collect();
        assert_eq!(contents, vec!["1", "2"]);
    }

    #[test]
    fn test_edge_sets_report_changes() {
        let mut actor = Actor::new("alice", "Alice", "srv");

        assert!(actor.add_following("bob"));
        assert!(!actor.add_following("bob"));
        assert!(actor.remove_following("bob"));
        assert!(!actor.remove_following("bob"));

        assert!(actor.add_follower("carol"));
        assert!(actor.remove_follower("carol"));
    }
}
