//! Activity entity (one posted action).

use std::fmt;

use chrono::{DateTime, Utc};
use fedigraph_common::IdGenerator;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Kind of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ActivityType {
    /// A new post.
    Create,
    /// An edit of an earlier post.
    Update,
    /// Removal of an earlier post.
    Delete,
    /// Follow notification.
    Follow,
    /// Like of another activity.
    Like,
    /// Boost of another activity.
    Announce,
    /// Reversal of an earlier activity.
    Undo,
}

impl ActivityType {
    /// `ActivityStreams` type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Follow => "Follow",
            Self::Like => "Like",
            Self::Announce => "Announce",
            Self::Undo => "Undo",
        }
    }

    /// Whether the activity wraps a freshly authored note.
    const fn carries_note(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one posted action.
///
/// Activities are shared as `Arc<Activity>` between the author's outbox and
/// every inbox that received them, so fields are only exposed through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    id: String,
    #[serde(rename = "type")]
    activity_type: ActivityType,
    author_id: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl Activity {
    /// Create a new activity stamped with the current time.
    #[must_use]
    pub fn new(
        activity_type: ActivityType,
        author_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: IdGenerator::new().generate(),
            activity_type,
            author_id: author_id.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Unique activity ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of this activity.
    #[must_use]
    pub const fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    /// Username of the author.
    #[must_use]
    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    /// Text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Render this activity as an `ActivityStreams` object.
    ///
    /// `Create` and `Update` wrap the content in a `Note`; every other kind
    /// carries the content as its object directly.
    #[must_use]
    pub fn to_activity_streams(&self, base_url: &str) -> Value {
        let actor_url = format!("{base_url}/users/{}", self.author_id);
        let activity_url = format!("{base_url}/activities/{}", self.id);

        let object = if self.activity_type.carries_note() {
            json!({
                "type": "Note",
                "id": format!("{base_url}/notes/{}", self.id),
                "attributedTo": actor_url,
                "content": self.content,
                "published": self.created_at.to_rfc3339(),
            })
        } else {
            Value::String(self.content.clone())
        };

        json!({
            "@context": "https://www.w3.org/ns/activitystreams",
            "id": activity_url,
            "type": self.activity_type.as_str(),
            "actor": actor_url,
            "published": self.created_at.to_rfc3339(),
            "object": object,
        })
    }
}
