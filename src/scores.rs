use serde::{Deserialize, Serialize};

use crate::{Score, MAX_SCORE, MIN_SCORE};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub max_bar_height: f64,
    /// Multiplier for bars at or below `boost_threshold_percent`, so thin
    /// buckets stay readable.
    pub low_share_boost: f64,
    pub boost_threshold_percent: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_bar_height: 100.0,
            low_share_boost: 1.3,
            boost_threshold_percent: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub value: u8,
    pub votes: usize,
    pub ratio: f64,
    pub percentage: f64,
    pub bar_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_votes: usize,
    pub buckets: Vec<BucketShare>,
    pub average: Option<f64>,
}

impl ScoreBreakdown {
    pub fn bucket(&self, value: u8) -> Option<&BucketShare> {
        self.buckets.iter().find(|bucket| bucket.value == value)
    }
}

/// Vote share per rating bucket for a reply's histogram.
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    config: ChartConfig,
}

impl ScoreAggregator {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Unrounded share of votes equal to `value`, in `0.0..=1.0`.
    pub fn ratio_for(&self, scores: &[Score], value: u8) -> f64 {
        if scores.is_empty() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return 0.0;
        }
        let votes = count_votes(scores, value);
        votes as f64 / scores.len() as f64
    }

    /// Share of votes equal to `value` as a percentage rounded to two decimals.
    pub fn percentage_for(&self, scores: &[Score], value: u8) -> f64 {
        round_to(self.ratio_for(scores, value) * 100.0, 2)
    }

    pub fn bar_height(&self, ratio: f64) -> f64 {
        if !ratio.is_finite() || ratio <= 0.0 {
            return 0.0;
        }
        let max = self.config.max_bar_height;
        let mut height = ratio * max;
        if ratio * 100.0 <= self.config.boost_threshold_percent {
            height *= self.config.low_share_boost;
        }
        height.min(max)
    }

    pub fn breakdown(&self, scores: &[Score]) -> ScoreBreakdown {
        let buckets = (MIN_SCORE..=MAX_SCORE)
            .map(|value| {
                let ratio = self.ratio_for(scores, value);
                BucketShare {
                    value,
                    votes: count_votes(scores, value),
                    ratio,
                    percentage: round_to(ratio * 100.0, 2),
                    bar_height: self.bar_height(ratio),
                }
            })
            .collect();

        ScoreBreakdown {
            total_votes: scores.len(),
            buckets,
            average: average_score(scores),
        }
    }
}

/// Mean of the in-range votes; `None` when there are none.
pub fn average_score(scores: &[Score]) -> Option<f64> {
    let (sum, count) = scores
        .iter()
        .filter(|score| in_range(score.value))
        .fold((0i64, 0usize), |(sum, count), score| (sum + score.value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

fn count_votes(scores: &[Score], value: u8) -> usize {
    scores
        .iter()
        .filter(|score| score.value == i64::from(value))
        .count()
}

fn in_range(value: i64) -> bool {
    (i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&value)
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
