pub mod order;
pub mod partition;
pub mod pipeline;

pub use order::{FeedOrderer, OrderingConfig};
pub use partition::{FeedBuckets, FeedPartitioner, ReplyViewModel};
pub use pipeline::{FeedOutput, FeedPipeline};
