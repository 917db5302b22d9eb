use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};
use crate::{Reply, Score, Viewer, VisibilityMode};

/// A reply as the host serializes it. The visibility tag stays a raw string
/// until [`ReplyRecord::into_reply`] checks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub id: String,
    pub author_id: String,
    #[serde(default)]
    pub author_phone_number: Option<String>,
    #[serde(default)]
    pub body: String,
    pub visibility: String,
    #[serde(default)]
    pub allowed_phone_numbers: Vec<String>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

impl ReplyRecord {
    pub fn into_reply(self) -> Option<Reply> {
        let visibility = VisibilityMode::from_str(&self.visibility)?;
        Some(Reply {
            id: self.id,
            author_id: self.author_id,
            author_phone_number: self.author_phone_number,
            body: self.body,
            visibility,
            allowed_phone_numbers: self.allowed_phone_numbers,
            scores: self.scores,
        })
    }
}

impl From<Reply> for ReplyRecord {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            author_id: reply.author_id,
            author_phone_number: reply.author_phone_number,
            body: reply.body,
            visibility: reply.visibility.label().to_string(),
            allowed_phone_numbers: reply.allowed_phone_numbers,
            scores: reply.scores,
        }
    }
}

/// The replies to one prompt together with the viewer looking at them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub viewer: Viewer,
    #[serde(default)]
    pub replies: Vec<ReplyRecord>,
}

impl FeedSnapshot {
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read_to_string(path).await.map_err(|err| {
            Error::Snapshot(format!("failed to read {}: {}", path.display(), err))
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Err(Error::Snapshot("snapshot is empty".to_string()));
        }
        serde_json::from_str(data)
            .map_err(|err| Error::Snapshot(format!("failed to parse snapshot: {}", err)))
    }

    /// Decoded replies. Records with an unrecognized visibility tag are
    /// dropped, so nobody sees them.
    pub fn replies(&self) -> Vec<Reply> {
        self.replies
            .iter()
            .cloned()
            .filter_map(|record| {
                let id = record.id.clone();
                let tag = record.visibility.clone();
                let reply = record.into_reply();
                if reply.is_none() {
                    warn!(reply = %id, visibility = %tag, "dropping reply with unknown visibility");
                }
                reply
            })
            .collect()
    }
}
