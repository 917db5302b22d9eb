use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FeedConfig;
use crate::feed::{FeedOrderer, FeedPartitioner, ReplyViewModel};
use crate::visibility::VisibilityFilter;
use crate::{FeedMode, Reply, Viewer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedOutput {
    pub mode: FeedMode,
    pub items: Vec<ReplyViewModel>,
    /// Only set for [`FeedMode::MyReply`]; `None` there means the viewer has
    /// not replied yet.
    pub my_reply: Option<ReplyViewModel>,
}

/// Visibility, partitioning and ordering run back to back for one feed tab.
#[derive(Debug, Clone, Default)]
pub struct FeedPipeline {
    partitioner: FeedPartitioner,
    orderer: FeedOrderer,
}

impl FeedPipeline {
    pub fn new(partitioner: FeedPartitioner, orderer: FeedOrderer) -> Self {
        Self {
            partitioner,
            orderer,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(
            FeedPartitioner::new(VisibilityFilter::new()),
            FeedOrderer::new(config.ordering.clone()),
        )
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        replies: &[Reply],
        viewer: &Viewer,
        mode: FeedMode,
        rng: &mut R,
    ) -> FeedOutput {
        if mode == FeedMode::MyReply {
            let my_reply = self.partitioner.my_reply(replies, viewer);
            debug!(
                viewer = %viewer.id,
                found = my_reply.is_some(),
                "resolved own reply"
            );
            return FeedOutput {
                mode,
                items: Vec::new(),
                my_reply,
            };
        }

        let buckets = self.partitioner.partition(replies, viewer, mode);
        debug!(
            viewer = %viewer.id,
            mode = mode.label(),
            total = replies.len(),
            friends = buckets.friends.len(),
            others = buckets.others.len(),
            "partitioned replies"
        );

        let items = self.orderer.order(buckets, mode, rng);
        FeedOutput {
            mode,
            items,
            my_reply: None,
        }
    }
}
