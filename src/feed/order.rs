use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::feed::{FeedBuckets, ReplyViewModel};
use crate::FeedMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Target share of friends' replies in the shuffled top block.
    pub friend_ratio: f64,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self { friend_ratio: 0.7 }
    }
}

/// Merges the friend and stranger buckets into display order.
#[derive(Debug, Clone)]
pub struct FeedOrderer {
    config: OrderingConfig,
}

impl Default for FeedOrderer {
    fn default() -> Self {
        Self::new(OrderingConfig::default())
    }
}

impl FeedOrderer {
    pub fn new(config: OrderingConfig) -> Self {
        Self { config }
    }

    /// How many strangers' replies join `friend_count` friends in the top
    /// block. `None` when the configured ratio cannot form a block.
    pub fn others_needed(&self, friend_count: usize) -> Option<usize> {
        let ratio = self.config.friend_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return None;
        }
        let block_size = (friend_count as f64 / ratio).round();
        Some((block_size - friend_count as f64).max(0.0) as usize)
    }

    pub fn order<R: Rng + ?Sized>(
        &self,
        buckets: FeedBuckets,
        mode: FeedMode,
        rng: &mut R,
    ) -> Vec<ReplyViewModel> {
        if mode != FeedMode::Locked {
            return buckets.concat();
        }

        let others_needed = match self.others_needed(buckets.friends.len()) {
            Some(needed) if needed < buckets.others.len() => needed,
            _ => return buckets.concat(),
        };

        let FeedBuckets { friends, mut others } = buckets;
        let remainder = others.split_off(others_needed);
        let mut block = friends;
        block.extend(others);
        block.shuffle(rng);
        block.extend(remainder);
        block
    }
}
