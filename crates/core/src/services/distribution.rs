//! Activity distribution service.

use std::sync::Arc;

use fedigraph_common::{AppError, AppResult};

use crate::entities::{Activity, ActivityType, Actor};
use crate::services::directory::DirectoryService;

/// Service posting activities and fanning them out to follower inboxes.
#[derive(Clone)]
pub struct DistributionService {
    directory: DirectoryService,
}

impl DistributionService {
    /// Create a new distribution service.
    #[must_use]
    pub const fn new(directory: DirectoryService) -> Self {
        Self { directory }
    }

    /// Post an activity on behalf of `actor_id`.
    ///
    /// The activity is appended to the author's outbox and prepended to the
    /// inbox of every actor following the author at this moment.
    pub fn post(
        &self,
        actor_id: &str,
        activity_type: ActivityType,
        content: &str,
    ) -> AppResult<Arc<Activity>> {
        let mut table = self.directory.store().write();
        let author = table
            .get_mut(actor_id)
            .ok_or_else(|| AppError::ActorNotFound(actor_id.to_string()))?;

        let activity = Arc::new(Activity::new(activity_type, actor_id, content));
        author.push_outbox(Arc::clone(&activity));

        let followers: Vec<String> = author.followers().iter().cloned().collect();
        for follower in &followers {
            if let Some(actor) = table.get_mut(follower) {
                actor.deliver(Arc::clone(&activity));
            }
        }

        tracing::debug!(
            actor_id = %actor_id,
            activity_id = %activity.id(),
            activity_type = %activity_type,
            fan_out = followers.len(),
            "Posted activity"
        );
        Ok(activity)
    }

    /// Deliver an existing activity to each target that resolves.
    ///
    /// Targets may be bare usernames or handles; unknown targets are
    /// skipped. Returns how many inboxes received the activity.
    pub fn deliver_external(&self, activity: &Arc<Activity>, targets: &[&str]) -> usize {
        let mut table = self.directory.store().write();
        let mut delivered = 0;

        for target in targets {
            let username = table
                .resolve(target, self.directory.server_name())
                .map(|actor| actor.username().to_string());
            if let Some(actor) = username.and_then(|name| table.get_mut(&name)) {
                actor.deliver(Arc::clone(activity));
                delivered += 1;
            }
        }

        tracing::debug!(
            activity_id = %activity.id(),
            requested = targets.len(),
            delivered,
            "Delivered external activity"
        );
        delivered
    }

    /// Outbox of `actor_id`, oldest first.
    pub fn outbox(&self, actor_id: &str) -> AppResult<Vec<Arc<Activity>>> {
        self.with_actor(actor_id, |actor| actor.outbox().to_vec())
    }

    /// Inbox of `actor_id`, newest first.
    pub fn inbox(&self, actor_id: &str) -> AppResult<Vec<Arc<Activity>>> {
        self.with_actor(actor_id, |actor| actor.inbox().cloned().collect())
    }

    /// Every outbox concatenated in registration order.
    #[must_use]
    pub fn all_activities(&self) -> Vec<Arc<Activity>> {
        self.directory
            .store()
            .read()
            .iter()
            .flat_map(|actor| actor.outbox().iter().cloned())
            .collect()
    }

    fn with_actor<T>(&self, actor_id: &str, f: impl FnOnce(&Actor) -> T) -> AppResult<T> {
        self.directory
            .store()
            .read()
            .get(actor_id)
            .map(f)
            .ok_or_else(|| AppError::ActorNotFound(actor_id.to_string()))
    }
}
