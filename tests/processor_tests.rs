use wireframe_replay::model::capture::CaptureFrame;
use wireframe_replay::model::context::ViewContext;
use wireframe_replay::model::record::{
    IncrementalData, MobileRecord, PointerEventType, PointerType, RecordBundle,
};
use wireframe_replay::model::wireframe::Wireframe;
use wireframe_replay::processor::recorded_data::{ProcessorConfig, RecordedDataProcessor};
use wireframe_replay::record_frames;

use crate::common::fixtures::{context, flat_tree, landscape, opaque_shape, portrait, row_of_shapes};

mod common;

fn new_processor() -> RecordedDataProcessor<Vec<RecordBundle>> {
    RecordedDataProcessor::new(Vec::new())
}

fn kinds(bundle: &RecordBundle) -> Vec<&'static str> {
    bundle
        .records
        .iter()
        .map(|r| match r {
            MobileRecord::Meta { .. } => "meta",
            MobileRecord::Focus { .. } => "focus",
            MobileRecord::ViewEnd { .. } => "view_end",
            MobileRecord::FullSnapshot { .. } => "full",
            MobileRecord::IncrementalSnapshot {
                data: IncrementalData::Mutation(_),
                ..
            } => "mutation",
            MobileRecord::IncrementalSnapshot {
                data: IncrementalData::ViewportResize { .. },
                ..
            } => "resize",
            MobileRecord::IncrementalSnapshot { .. } => "incremental",
        })
        .collect()
}

// =========================================================================
// New views
// =========================================================================

#[test]
fn first_snapshot_starts_a_view() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), context("home"), 1_000);

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].view_id, "home");
    assert_eq!(kinds(&bundles[0]), vec!["meta", "focus", "full"]);

    assert_eq!(
        bundles[0].records[0],
        MobileRecord::Meta {
            timestamp: 1_000,
            width: 1080,
            height: 1920,
        }
    );
    assert_eq!(
        bundles[0].records[1],
        MobileRecord::Focus {
            timestamp: 1_000,
            has_focus: true,
        }
    );
    assert!(
        bundles[0].records.iter().all(|r| r.timestamp() == 1_000),
        "Every record of a pass shares its timestamp"
    );
}

#[test]
fn full_snapshot_carries_flattened_tree() {
    let mut processor = new_processor();
    let root = flat_tree(vec![
        opaque_shape(1, 0, 0, 10, 10),
        Wireframe::shape(2, 0, 0, 10, 10), // invisible, filtered
        Wireframe::text(3, 20, 0, 10, 10, "hi"),
    ]);
    processor.process_snapshot(&root, &portrait(), context("home"), 0);

    let MobileRecord::FullSnapshot { wireframes, .. } = &processor.writer()[0].records[2] else {
        panic!("Expected a full snapshot");
    };
    let ids: Vec<i64> = wireframes.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(processor.prev_snapshot().len(), 2);
}

#[test]
fn empty_snapshot_still_produces_full_snapshot_on_new_view() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(vec![], &portrait(), context("blank"), 0);

    let bundles = processor.writer();
    assert_eq!(kinds(&bundles[0]), vec!["meta", "focus", "full"]);
}

#[test]
fn view_change_ends_previous_view_first() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("details"), 500);

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 3);

    assert_eq!(bundles[1].view_id, "home", "View end belongs to the old view");
    assert_eq!(bundles[1].records, vec![MobileRecord::ViewEnd { timestamp: 500 }]);

    assert_eq!(bundles[2].view_id, "details");
    assert_eq!(kinds(&bundles[2]), vec!["meta", "focus", "full"]);
    assert_eq!(processor.prev_context(), &context("details"));
}

#[test]
fn session_change_is_a_new_view() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(
        row_of_shapes(1),
        &portrait(),
        ViewContext::new("app-1", "session-2", "home"),
        100,
    );

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 3);
    assert_eq!(bundles[1].session_id, "session-1");
    assert_eq!(bundles[2].session_id, "session-2");
}

// =========================================================================
// Invalid context
// =========================================================================

#[test]
fn invalid_context_is_skipped() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), ViewContext::invalid(), 0);

    assert!(processor.writer().is_empty());
    assert!(processor.prev_snapshot().is_empty(), "State is left untouched");
    assert!(!processor.prev_context().is_valid());
}

#[test]
fn invalid_context_between_views_keeps_state() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(5), &portrait(), ViewContext::invalid(), 100);

    assert_eq!(processor.writer().len(), 1);
    assert_eq!(processor.prev_context(), &context("home"));
    assert_eq!(processor.prev_snapshot().len(), 2);

    // the view resumes without a new meta record
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), context("home"), 200);
    assert_eq!(processor.writer().len(), 1, "Nothing changed");
}

#[test]
fn empty_ids_are_invalid() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), ViewContext::new("", "s", "v"), 0);

    assert!(processor.writer().is_empty());
}

// =========================================================================
// Incremental snapshots
// =========================================================================

#[test]
fn unchanged_snapshot_writes_nothing() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(3), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(3), &portrait(), context("home"), 100);
    processor.process_flat_snapshot(row_of_shapes(3), &portrait(), context("home"), 200);

    assert_eq!(processor.writer().len(), 1, "Only the initial bundle");
}

#[test]
fn change_within_view_is_incremental() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(3), &portrait(), context("home"), 100);

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 2);
    assert_eq!(kinds(&bundles[1]), vec!["mutation"]);

    let MobileRecord::IncrementalSnapshot {
        timestamp,
        data: IncrementalData::Mutation(mutations),
    } = &bundles[1].records[0]
    else {
        panic!("Expected a mutation record");
    };
    assert_eq!(*timestamp, 100);
    assert_eq!(mutations.adds.len(), 1);
    assert_eq!(mutations.adds[0].previous_id, Some(2));
    assert_eq!(mutations.adds[0].wireframe.id, 3);
}

#[test]
fn incremental_diff_is_against_latest_snapshot() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), context("home"), 100);
    processor.process_flat_snapshot(row_of_shapes(3), &portrait(), context("home"), 200);

    let MobileRecord::IncrementalSnapshot {
        data: IncrementalData::Mutation(mutations),
        ..
    } = &processor.writer()[2].records[0]
    else {
        panic!("Expected a mutation record");
    };
    assert_eq!(mutations.adds.len(), 1, "Only the third shape is new");
    assert_eq!(mutations.adds[0].wireframe.id, 3);
}

// =========================================================================
// Full snapshot cadence
// =========================================================================

#[test]
fn full_snapshot_after_interval_even_without_change() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 2_999);
    assert_eq!(processor.writer().len(), 1, "Interval not reached yet");

    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 3_000);

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 2);
    assert_eq!(kinds(&bundles[1]), vec!["full"], "No meta or focus for the same view");
}

#[test]
fn interval_restarts_at_each_full_snapshot() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 3_500);
    processor.process_flat_snapshot(row_of_shapes(2), &portrait(), context("home"), 5_000);

    let bundles = processor.writer();
    assert_eq!(kinds(&bundles[1]), vec!["full"]);
    assert_eq!(kinds(&bundles[2]), vec!["mutation"], "Only 1.5s since the last full snapshot");
}

#[test]
fn custom_interval_is_honored() {
    let config = ProcessorConfig {
        full_snapshot_interval_ms: 500,
    };
    let mut processor = RecordedDataProcessor::with_config(Vec::new(), config);
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 600);

    assert_eq!(processor.writer().len(), 2);
    assert_eq!(kinds(&processor.writer()[1]), vec!["full"]);
}

// =========================================================================
// Orientation
// =========================================================================

#[test]
fn orientation_change_resizes_then_resends_full_snapshot() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(1), &landscape(), context("home"), 100);

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 2);
    assert_eq!(kinds(&bundles[1]), vec!["resize", "full"]);
    assert_eq!(
        bundles[1].records[0],
        MobileRecord::IncrementalSnapshot {
            timestamp: 100,
            data: IncrementalData::ViewportResize {
                width: 1920,
                height: 1080,
            },
        }
    );
}

#[test]
fn orientation_change_with_new_view() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 0);
    processor.process_flat_snapshot(row_of_shapes(1), &landscape(), context("details"), 100);

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 3);
    assert_eq!(kinds(&bundles[1]), vec!["view_end"]);
    assert_eq!(kinds(&bundles[2]), vec!["meta", "focus", "resize", "full"]);
}

#[test]
fn first_snapshot_is_not_an_orientation_change() {
    let mut processor = new_processor();
    processor.process_flat_snapshot(row_of_shapes(1), &landscape(), context("home"), 0);

    assert_eq!(kinds(&processor.writer()[0]), vec!["meta", "focus", "full"]);
}

// =========================================================================
// Touch records
// =========================================================================

fn pointer(timestamp: i64, event: PointerEventType) -> MobileRecord {
    MobileRecord::IncrementalSnapshot {
        timestamp,
        data: IncrementalData::PointerInteraction {
            pointer_event_type: event,
            pointer_type: PointerType::Touch,
            pointer_id: 0,
            x: 10,
            y: 20,
        },
    }
}

#[test]
fn touch_records_are_forwarded_as_is() {
    let mut processor = new_processor();
    let records = vec![pointer(10, PointerEventType::Down), pointer(20, PointerEventType::Up)];

    processor.process_touch_records(records.clone(), &context("home"));

    let bundles = processor.writer();
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].records, records);
    assert_eq!(bundles[0].view_id, "home");
}

#[test]
fn touch_records_do_not_touch_snapshot_state() {
    let mut processor = new_processor();
    processor.process_touch_records(vec![pointer(10, PointerEventType::Move)], &context("home"));

    assert!(!processor.prev_context().is_valid(), "Touches never start a view");

    processor.process_flat_snapshot(row_of_shapes(1), &portrait(), context("home"), 20);
    assert_eq!(kinds(&processor.writer()[1]), vec!["meta", "focus", "full"]);
}

#[test]
fn touch_records_dropped_without_view_or_records() {
    let mut processor = new_processor();
    processor.process_touch_records(vec![pointer(10, PointerEventType::Down)], &ViewContext::invalid());
    processor.process_touch_records(vec![], &context("home"));

    assert!(processor.writer().is_empty());
}

// =========================================================================
// Frame sequences
// =========================================================================

#[test]
fn record_frames_processes_in_order() {
    let frames = vec![
        CaptureFrame {
            timestamp: 0,
            context: context("home"),
            system: portrait(),
            root: flat_tree(row_of_shapes(1)),
        },
        CaptureFrame {
            timestamp: 100,
            context: context("home"),
            system: portrait(),
            root: flat_tree(row_of_shapes(2)),
        },
        CaptureFrame {
            timestamp: 200,
            context: ViewContext::invalid(),
            system: portrait(),
            root: flat_tree(vec![]),
        },
        CaptureFrame {
            timestamp: 300,
            context: context("details"),
            system: portrait(),
            root: flat_tree(row_of_shapes(1)),
        },
    ];

    let bundles = record_frames(&frames, ProcessorConfig::default());

    let summary: Vec<(&str, Vec<&str>)> = bundles
        .iter()
        .map(|b| (b.view_id.as_str(), kinds(b)))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("home", vec!["meta", "focus", "full"]),
            ("home", vec!["mutation"]),
            ("home", vec!["view_end"]),
            ("details", vec!["meta", "focus", "full"]),
        ]
    );
}

#[test]
fn record_bundle_json_shape() {
    let bundle = RecordBundle::new(&context("home"), vec![MobileRecord::ViewEnd { timestamp: 5 }]);
    let json = serde_json::to_value(&bundle).expect("serializes");

    assert_eq!(json["view_id"], "home");
    assert_eq!(json["records"][0]["type"], "view_end");
    assert_eq!(json["records"][0]["timestamp"], 5);
    assert_eq!(bundle.context(), context("home"));
}
