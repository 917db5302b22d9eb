use serde::{Deserialize, Serialize};

use crate::contacts::ContactBook;
use crate::visibility::VisibilityFilter;
use crate::{FeedMode, Reply, Score, Viewer, VisibilityMode};

/// A reply as the presentation layer consumes it for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyViewModel {
    pub reply: Reply,
    pub viewer_score: Option<Score>,
    pub is_current_users_friend: bool,
    pub is_unlocked: bool,
}

impl ReplyViewModel {
    pub fn id(&self) -> &str {
        &self.reply.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedBuckets {
    pub friends: Vec<ReplyViewModel>,
    pub others: Vec<ReplyViewModel>,
}

impl FeedBuckets {
    pub fn len(&self) -> usize {
        self.friends.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty() && self.others.is_empty()
    }

    pub fn concat(self) -> Vec<ReplyViewModel> {
        let mut items = self.friends;
        items.extend(self.others);
        items
    }
}

/// Splits the replies eligible for a feed tab into friends and strangers.
#[derive(Debug, Clone, Default)]
pub struct FeedPartitioner {
    visibility: VisibilityFilter,
}

impl FeedPartitioner {
    pub fn new(visibility: VisibilityFilter) -> Self {
        Self { visibility }
    }

    /// Both buckets keep input order. The viewer's own replies never land in
    /// a bucket; `MyReply` always yields empty buckets (see [`Self::my_reply`]).
    pub fn partition(&self, replies: &[Reply], viewer: &Viewer, mode: FeedMode) -> FeedBuckets {
        let mut buckets = FeedBuckets::default();
        if mode == FeedMode::MyReply {
            return buckets;
        }

        let contacts = ContactBook::for_viewer(viewer);
        for reply in replies {
            if reply.is_authored_by(viewer) {
                continue;
            }
            if !self.visibility.is_visible_with(reply, viewer, &contacts) {
                continue;
            }

            let viewer_score = reply.score_by(&viewer.id).cloned();
            let did_rate = viewer_score.is_some();
            match mode {
                FeedMode::Locked if did_rate => continue,
                FeedMode::Unlocked if !did_rate => continue,
                _ => {}
            }

            let is_friend = contacts.contains_opt(reply.author_phone_number.as_deref())
                || reply.visibility == VisibilityMode::IndividualContacts;
            let item = ReplyViewModel {
                reply: reply.clone(),
                viewer_score,
                is_current_users_friend: is_friend,
                // Locked items are unrated by construction.
                is_unlocked: mode == FeedMode::Unlocked && did_rate,
            };

            if is_friend {
                buckets.friends.push(item);
            } else {
                buckets.others.push(item);
            }
        }

        buckets
    }

    /// The viewer's own reply to the prompt, if they posted one.
    pub fn my_reply(&self, replies: &[Reply], viewer: &Viewer) -> Option<ReplyViewModel> {
        let reply = replies.iter().find(|reply| reply.is_authored_by(viewer))?;
        let viewer_score = reply.score_by(&viewer.id).cloned();
        let is_unlocked = viewer_score.is_some();
        Some(ReplyViewModel {
            reply: reply.clone(),
            viewer_score,
            is_current_users_friend: false,
            is_unlocked,
        })
    }
}
