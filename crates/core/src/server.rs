//! The server contract and its in-memory implementation.

use std::sync::Arc;

use fedigraph_common::{AppResult, Config};

use crate::entities::{Activity, ActivityType, Actor};
use crate::services::{
    DirectoryService, DistributionService, FollowingService, RegisterActorInput,
};
use crate::store::ActorStore;

/// Operations a fedigraph server offers to its callers.
///
/// Mutations fail loudly with a typed error. Graph queries (`is_following`,
/// `followers`, `following`) treat an unknown actor as having no edges, so
/// callers can ask without checking existence first.
pub trait Server: Send + Sync {
    /// Server name used in handles.
    fn name(&self) -> &str;

    /// Register a new actor.
    fn register_actor(&self, username: &str, display_name: &str) -> AppResult<Actor>;

    /// Resolve a bare username or `@username@server` handle.
    fn resolve_actor(&self, identifier: &str) -> Option<Actor>;

    /// Snapshot of all actors in registration order.
    fn list_actors(&self) -> Vec<Actor>;

    /// Remove an actor and every edge referencing it.
    fn remove_actor(&self, username: &str) -> bool;

    /// Make `follower_id` follow `target_id`.
    fn follow(&self, follower_id: &str, target_id: &str) -> AppResult<bool>;

    /// Target-side spelling of [`Server::follow`].
    fn add_follower(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        self.follow(follower_id, target_id)
    }

    /// Remove the edge `follower_id` -> `target_id`.
    fn unfollow(&self, follower_id: &str, target_id: &str) -> AppResult<bool>;

    /// Target-side spelling of [`Server::unfollow`].
    fn remove_follower(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        self.unfollow(follower_id, target_id)
    }

    /// Check whether `follower_id` follows `target_id`.
    fn is_following(&self, follower_id: &str, target_id: &str) -> bool;

    /// Followers of the actor named by `identifier`.
    fn followers(&self, identifier: &str) -> Vec<Actor>;

    /// Actors followed by the actor named by `identifier`.
    fn following(&self, identifier: &str) -> Vec<Actor>;

    /// Post an activity and fan it out to current followers.
    fn post(
        &self,
        actor_id: &str,
        activity_type: ActivityType,
        content: &str,
    ) -> AppResult<Arc<Activity>>;

    /// Deliver an existing activity to the named inboxes.
    fn deliver_external(&self, activity: &Arc<Activity>, targets: &[&str]) -> usize;

    /// Inbox of `actor_id`, newest first.
    fn inbox(&self, actor_id: &str) -> AppResult<Vec<Arc<Activity>>>;

    /// Outbox of `actor_id`, oldest first.
    fn outbox(&self, actor_id: &str) -> AppResult<Vec<Arc<Activity>>>;

    /// Every outbox concatenated in registration order.
    fn all_activities(&self) -> Vec<Arc<Activity>>;
}

/// Server keeping all state in memory.
#[derive(Clone)]
pub struct InMemoryServer {
    base_url: String,
    directory: DirectoryService,
    following: FollowingService,
    distribution: DistributionService,
}

impl InMemoryServer {
    /// Create a server named `name` with base URL `https://{name}`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_base_url(name, format!("https://{name}"))
    }

    /// Create a server from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(&config.server.name, config.server.base_url())
    }

    fn with_base_url(name: &str, base_url: String) -> Self {
        let directory = DirectoryService::new(ActorStore::new(), name);
        Self {
            base_url,
            following: FollowingService::new(directory.clone()),
            distribution: DistributionService::new(directory.clone()),
            directory,
        }
    }

    /// Public base URL used when rendering activities.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render an activity as `ActivityStreams` JSON rooted at this server.
    #[must_use]
    pub fn render(&self, activity: &Activity) -> serde_json::Value {
        activity.to_activity_streams(&self.base_url)
    }
}

impl Server for InMemoryServer {
    fn name(&self) -> &str {
        self.directory.server_name()
    }

    fn register_actor(&self, username: &str, display_name: &str) -> AppResult<Actor> {
        self.directory.register(RegisterActorInput {
            username: username.to_string(),
            display_name: display_name.to_string(),
        })
    }

    fn resolve_actor(&self, identifier: &str) -> Option<Actor> {
        self.directory.resolve(identifier)
    }

    fn list_actors(&self) -> Vec<Actor> {
        self.directory.list()
    }

    fn remove_actor(&self, username: &str) -> bool {
        self.directory.remove(username)
    }

    fn follow(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        self.following.follow(follower_id, target_id)
    }

    fn unfollow(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        self.following.unfollow(follower_id, target_id)
    }

    fn is_following(&self, follower_id: &str, target_id: &str) -> bool {
        self.following.is_following(follower_id, target_id)
    }

    fn followers(&self, identifier: &str) -> Vec<Actor> {
        self.following.followers(identifier)
    }

    fn following(&self, identifier: &str) -> Vec<Actor> {
        self.following.following(identifier)
    }

    fn post(
        &self,
        actor_id: &str,
        activity_type: ActivityType,
        content: &str,
    ) -> AppResult<Arc<Activity>> {
        self.distribution.post(actor_id, activity_type, content)
    }

    fn deliver_external(&self, activity: &Arc<Activity>, targets: &[&str]) -> usize {
        self.distribution.deliver_external(activity, targets)
    }

    fn inbox(&self, actor_id: &str) -> AppResult<Vec<Arc<Activity>>> {
        self.distribution.inbox(actor_id)
    }

    fn outbox(&self, actor_id: &str) -> AppResult<Vec<Arc<Activity>>> {
        self.distribution.outbox(actor_id)
    }

    fn all_activities(&self) -> Vec<Arc<Activity>> {
        self.distribution.all_activities()
    }
}
