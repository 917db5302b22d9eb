use abe_feed::config::FeedConfig;
use abe_feed::snapshot::{FeedSnapshot, ReplyRecord};
use abe_feed::{Error, Reply, ScoreAggregator, VisibilityMode};

const SNAPSHOT: &str = r#"{
  "viewer": {
    "id": "v1",
    "phone_number": "555-2222",
    "contact_phone_numbers": ["555-3333"]
  },
  "replies": [
    {
      "id": "r1",
      "author_id": "a1",
      "author_phone_number": "555-3333",
      "body": "first",
      "visibility": "contacts",
      "scores": [{ "user_id": "v1", "reply_id": "r1", "value": 4 }]
    },
    {
      "id": "r2",
      "author_id": "a2",
      "body": "second",
      "visibility": "individualContacts",
      "allowed_phone_numbers": ["555-2222"]
    },
    {
      "id": "r3",
      "author_id": "a3",
      "body": "third",
      "visibility": "friendsOfFriends"
    }
  ]
}"#;

#[test]
fn snapshot_decodes_and_drops_unknown_visibility() {
    let snapshot = FeedSnapshot::from_json(SNAPSHOT).expect("snapshot");
    assert_eq!(snapshot.viewer.id, "v1");
    assert_eq!(snapshot.replies.len(), 3);

    let replies = snapshot.replies();
    let ids: Vec<&str> = replies.iter().map(|reply| reply.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
    assert_eq!(replies[0].visibility, VisibilityMode::Contacts);
    assert_eq!(replies[0].scores[0].value, 4);
    assert!(replies[0].scores[0].comment.is_none());
    assert_eq!(replies[1].visibility, VisibilityMode::IndividualContacts);
    assert!(replies[1].author_phone_number.is_none());
}

#[test]
fn out_of_range_score_values_still_decode() {
    let data = r#"{
      "viewer": { "id": "v1", "phone_number": "555-2222" },
      "replies": [
        { "id": "ok", "author_id": "a1", "visibility": "all",
          "scores": [{ "user_id": "a2", "reply_id": "ok", "value": 3 }] },
        { "id": "odd", "author_id": "a2", "visibility": "all",
          "scores": [
            { "user_id": "v1", "reply_id": "odd", "value": -1 },
            { "user_id": "a3", "reply_id": "odd", "value": 300 },
            { "user_id": "a4", "reply_id": "odd", "value": 5 }
          ] }
      ]
    }"#;

    let snapshot = FeedSnapshot::from_json(data).expect("snapshot");
    let replies = snapshot.replies();
    assert_eq!(replies.len(), 2);

    let odd = &replies[1];
    assert_eq!(odd.scores.len(), 3);
    assert!(odd.is_unlocked_for(&snapshot.viewer));

    let aggregator = ScoreAggregator::default();
    let breakdown = aggregator.breakdown(&odd.scores);
    assert_eq!(breakdown.total_votes, 3);
    let counted: usize = breakdown.buckets.iter().map(|bucket| bucket.votes).sum();
    assert_eq!(counted, 1);
    assert!((aggregator.percentage_for(&odd.scores, 5) - 33.33).abs() < 1e-9);
    assert_eq!(breakdown.average, Some(5.0));
}

#[test]
fn empty_or_malformed_snapshot_is_an_error() {
    assert!(matches!(FeedSnapshot::from_json("  "), Err(Error::Snapshot(_))));
    assert!(matches!(FeedSnapshot::from_json("{\"viewer\": 3}"), Err(Error::Snapshot(_))));
}

#[test]
fn reply_record_round_trips_visibility_label() {
    let reply = Reply {
        id: "r".to_string(),
        author_id: "a".to_string(),
        author_phone_number: None,
        body: String::new(),
        visibility: VisibilityMode::IndividualContacts,
        allowed_phone_numbers: Vec::new(),
        scores: Vec::new(),
    };
    let record = ReplyRecord::from(reply.clone());
    assert_eq!(record.visibility, "individualContacts");
    assert_eq!(record.into_reply(), Some(reply));
}

#[test]
fn default_config_is_valid_and_serializes() {
    let config = FeedConfig::default();
    assert!(config.validate().is_ok());
    assert!((config.ordering.friend_ratio - 0.7).abs() < 1e-12);

    let payload = toml::to_string_pretty(&config).expect("serialize");
    let parsed: FeedConfig = toml::from_str(&payload).expect("parse");
    assert!((parsed.chart.low_share_boost - 1.3).abs() < 1e-12);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let parsed: FeedConfig = toml::from_str("[ordering]\nfriend_ratio = 0.5\n").expect("parse");
    assert!((parsed.ordering.friend_ratio - 0.5).abs() < 1e-12);
    assert!((parsed.chart.max_bar_height - 100.0).abs() < 1e-12);
}

#[test]
fn invalid_ratio_is_rejected() {
    let mut config = FeedConfig::default();
    config.ordering.friend_ratio = 0.0;
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    config.ordering.friend_ratio = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn boost_threshold_must_be_a_percentage() {
    for threshold in [f64::NAN, -1.0, 100.5, f64::INFINITY] {
        let mut config = FeedConfig::default();
        config.chart.boost_threshold_percent = threshold;
        assert!(matches!(config.validate(), Err(Error::Config(_))), "{}", threshold);
    }

    let mut config = FeedConfig::default();
    config.chart.boost_threshold_percent = 0.0;
    assert!(config.validate().is_ok());
    config.chart.boost_threshold_percent = 100.0;
    assert!(config.validate().is_ok());
}
