//! Following service.

use fedigraph_common::{AppError, AppResult};

use crate::entities::Actor;
use crate::services::directory::DirectoryService;
use crate::store::ActorTable;

/// Follow graph service.
///
/// Mutations take bare usernames and fail with [`AppError::ActorNotFound`]
/// when either side is missing. Queries never fail: an unknown actor simply
/// has no edges.
#[derive(Clone)]
pub struct FollowingService {
    directory: DirectoryService,
}

impl FollowingService {
    /// Create a new following service.
    #[must_use]
    pub const fn new(directory: DirectoryService) -> Self {
        Self { directory }
    }

    /// Make `follower_id` follow `target_id`.
    ///
    /// Returns `false` without changes if the edge already exists.
    pub fn follow(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        let mut table = self.directory.store().write();
        ensure_exists(&table, follower_id)?;

        let target = table
            .get_mut(target_id)
            .ok_or_else(|| AppError::ActorNotFound(target_id.to_string()))?;
        if !target.add_follower(follower_id) {
            return Ok(false);
        }

        if let Some(follower) = table.get_mut(follower_id) {
            follower.add_following(target_id);
        }

        tracing::debug!(follower_id = %follower_id, target_id = %target_id, "Followed");
        Ok(true)
    }

    /// Remove the edge `follower_id` -> `target_id`.
    ///
    /// Returns `false` if the target does not list the follower. The
    /// follower-side half is removed if present and ignored otherwise.
    pub fn unfollow(&self, follower_id: &str, target_id: &str) -> AppResult<bool> {
        let mut table = self.directory.store().write();
        ensure_exists(&table, follower_id)?;

        let target = table
            .get_mut(target_id)
            .ok_or_else(|| AppError::ActorNotFound(target_id.to_string()))?;
        if !target.remove_follower(follower_id) {
            return Ok(false);
        }

        let reverse_removed = table
            .get_mut(follower_id)
            .is_some_and(|follower| follower.remove_following(target_id));
        if !reverse_removed {
            tracing::warn!(
                follower_id = %follower_id,
                target_id = %target_id,
                "Follower-side edge was already missing"
            );
        }

        tracing::debug!(follower_id = %follower_id, target_id = %target_id, "Unfollowed");
        Ok(true)
    }

    /// Check whether `follower_id` follows `target_id`.
    #[must_use]
    pub fn is_following(&self, follower_id: &str, target_id: &str) -> bool {
        self.directory
            .store()
            .read()
            .get(follower_id)
            .is_some_and(|follower| follower.following().contains(target_id))
    }

    /// Followers of the actor named by `identifier`.
    ///
    /// Accepts a bare username or handle; unknown actors have no followers.
    #[must_use]
    pub fn followers(&self, identifier: &str) -> Vec<Actor> {
        let table = self.directory.store().read();
        table
            .resolve(identifier, self.directory.server_name())
            .map(|actor| collect_actors(&table, actor.followers()))
            .unwrap_or_default()
    }

    /// Actors followed by the actor named by `identifier`.
    #[must_use]
    pub fn following(&self, identifier: &str) -> Vec<Actor> {
        let table = self.directory.store().read();
        table
            .resolve(identifier, self.directory.server_name())
            .map(|actor| collect_actors(&table, actor.following()))
            .unwrap_or_default()
    }
}

fn ensure_exists(table: &ActorTable, username: &str) -> AppResult<()> {
    if table.contains(username) {
        Ok(())
    } else {
        Err(AppError::ActorNotFound(username.to_string()))
    }
}

fn collect_actors<'a>(
    table: &ActorTable,
    usernames: impl IntoIterator<Item = &'a String>,
) -> Vec<Actor> {
    usernames
        .into_iter()
        .filter_map(|username| table.get(username))
        .cloned()
        .collect()
}
