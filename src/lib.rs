pub mod config;
pub mod contacts;
pub mod error;
pub mod feed;
pub mod scores;
pub mod snapshot;
pub mod visibility;

use serde::{Deserialize, Serialize};

pub use contacts::{normalize_phone_number, ContactBook};
pub use error::{Error, Result};
pub use feed::{FeedBuckets, FeedOrderer, FeedOutput, FeedPartitioner, FeedPipeline, ReplyViewModel};
pub use scores::{BucketShare, ScoreAggregator, ScoreBreakdown};
pub use visibility::VisibilityFilter;

/// Lowest and highest rating a viewer can cast on a reply.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Who may see a reply at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisibilityMode {
    All,
    Contacts,
    IndividualContacts,
}

impl VisibilityMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "public" => Some(VisibilityMode::All),
            "contacts" => Some(VisibilityMode::Contacts),
            "individualcontacts" | "individual_contacts" | "individual-contacts" => {
                Some(VisibilityMode::IndividualContacts)
            }
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisibilityMode::All => "all",
            VisibilityMode::Contacts => "contacts",
            VisibilityMode::IndividualContacts => "individualContacts",
        }
    }
}

/// Which subset of replies a feed tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedMode {
    Locked,
    Unlocked,
    MyReply,
}

impl FeedMode {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "locked" => Some(FeedMode::Locked),
            "unlocked" => Some(FeedMode::Unlocked),
            "myreply" | "my_reply" | "my-reply" | "mine" => Some(FeedMode::MyReply),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedMode::Locked => "locked",
            FeedMode::Unlocked => "unlocked",
            FeedMode::MyReply => "myReply",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub user_id: String,
    pub reply_id: String,
    /// Expected in `MIN_SCORE..=MAX_SCORE`; anything else is kept but counts
    /// toward no rating bucket.
    pub value: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub author_id: String,
    /// Resolved by the host from the author's account; `None` is never a contact.
    #[serde(default)]
    pub author_phone_number: Option<String>,
    pub body: String,
    pub visibility: VisibilityMode,
    /// Only meaningful for [`VisibilityMode::IndividualContacts`].
    #[serde(default)]
    pub allowed_phone_numbers: Vec<String>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

impl Reply {
    pub fn is_authored_by(&self, viewer: &Viewer) -> bool {
        self.author_id == viewer.id
    }

    pub fn score_by(&self, user_id: &str) -> Option<&Score> {
        self.scores.iter().find(|score| score.user_id == user_id)
    }

    /// A reply is unlocked for a viewer exactly when that viewer has rated it.
    pub fn is_unlocked_for(&self, viewer: &Viewer) -> bool {
        self.score_by(&viewer.id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: String,
    pub phone_number: String,
    #[serde(default)]
    pub contact_phone_numbers: Vec<String>,
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
