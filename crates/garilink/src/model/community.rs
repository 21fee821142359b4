//! Community entities: discussion groups and their posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A community discussion group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Group name.
    pub name: String,

    /// What the group is about.
    pub description: String,

    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

impl Entity for Group {
    const NAMESPACE: &'static str = "groups";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A post in one discussion group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPost {
    /// Unique identifier (assigned by the record store).
    pub id: String,

    /// Id of the group this post belongs to.
    pub group_id: String,

    /// Id of the posting user.
    pub author_id: String,

    /// Post body.
    pub body: String,

    /// When the post was made.
    pub posted_at: DateTime<Utc>,
}

impl GroupPost {
    /// Create a new post dated now.
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        author_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            group_id: group_id.into(),
            author_id: author_id.into(),
            body: body.into(),
            posted_at: Utc::now(),
        }
    }
}

impl Entity for GroupPost {
    const NAMESPACE: &'static str = "group_posts";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}
