use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Language code → text mapping. Ordered so that rendered multi-language
/// labels come out the same on every export.
pub type LocalizedText = BTreeMap<String, String>;

/// Lifecycle status of a comment round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Round is still being prepared by its owner.
    #[default]
    #[serde(rename = "INCOMPLETE")]
    Incomplete,
    /// Round is published and waits for its start date.
    #[serde(rename = "AWAIT")]
    Await,
    /// Round is open for comments.
    #[serde(rename = "INPROGRESS")]
    InProgress,
    /// Round has been closed.
    #[serde(rename = "ENDED")]
    Ended,
}

impl RoundStatus {
    /// Wire code of the status.
    pub fn code(self) -> &'static str {
        match self {
            RoundStatus::Incomplete => "INCOMPLETE",
            RoundStatus::Await => "AWAIT",
            RoundStatus::InProgress => "INPROGRESS",
            RoundStatus::Ended => "ENDED",
        }
    }
}

/// The external resource a round comments on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Container type code such as `codelist`, `terminology` or `datamodel`.
    pub container_type: String,
    pub container_uri: String,
    #[serde(default)]
    pub label: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    #[serde(default)]
    pub pref_label: LocalizedText,
}

/// A single comment. `parent_id` is `None` for top-level comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    #[serde(default)]
    pub sequence_id: u32,
    pub thread_id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub content: Option<String>,
    /// Status the commenter proposes as the outcome; tallied by the results.
    #[serde(default)]
    pub end_status: Option<String>,
    #[serde(default)]
    pub proposed_status: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub uri: Option<String>,
    /// Creation time in UTC.
    pub created: NaiveDateTime,
    #[serde(default)]
    pub modified: Option<NaiveDateTime>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Discussion attached to one resource inside the round's source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: Uuid,
    #[serde(default)]
    pub sequence_id: u32,
    pub round_id: Uuid,
    #[serde(default)]
    pub label: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub current_status: Option<String>,
    #[serde(default)]
    pub proposed_status: Option<String>,
    #[serde(default)]
    pub proposed_text: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub uri: Option<String>,
    pub created: NaiveDateTime,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl CommentThread {
    pub fn find_comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id == comment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRound {
    pub id: Uuid,
    #[serde(default)]
    pub sequence_id: u32,
    #[serde(default)]
    pub label: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub status: RoundStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub source: Source,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub uri: Option<String>,
    pub created: NaiveDateTime,
    #[serde(default)]
    pub modified: Option<NaiveDateTime>,
    #[serde(default)]
    pub threads: Vec<CommentThread>,
}

impl CommentRound {
    /// Threads ordered by creation time; equal timestamps keep stored order.
    pub fn threads_by_created(&self) -> Vec<&CommentThread> {
        let mut threads: Vec<&CommentThread> = self.threads.iter().collect();
        threads.sort_by_key(|thread| thread.created);
        threads
    }
}
