#![cfg(feature = "serde")]

use blobmatch::{
    BackgroundThreshold, BlobCounterConfig, BlobFilter, ForegroundRule, LabelingStrategy,
    MatchConfig, ObjectsOrder,
};

#[test]
fn blob_counter_config_round_trips() {
    let config = BlobCounterConfig {
        background: BackgroundThreshold::rgb(10, 20, 30),
        rule: ForegroundRule::AllChannels,
        strategy: LabelingStrategy::FloodFill,
        order: ObjectsOrder::XY,
        size_filter: Some(BlobFilter {
            min_width: 3,
            coupled: true,
            ..BlobFilter::default()
        }),
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: BlobCounterConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn missing_fields_take_defaults() {
    let config: MatchConfig = serde_json::from_str(r#"{"nms_radius": 4}"#).unwrap();
    assert_eq!(config.nms_radius, 4);
    assert_eq!(config.similarity_threshold, 0.9);
    assert!(!config.parallel);

    let config: BlobCounterConfig = serde_json::from_str(r#"{"order": "Area"}"#).unwrap();
    assert_eq!(config.order, ObjectsOrder::Area);
    assert_eq!(config.size_filter, None);

    let filter: BlobFilter = serde_json::from_str(r#"{"max_height": 8}"#).unwrap();
    assert_eq!(filter.min_width, 1);
    assert_eq!(filter.max_height, 8);
}
