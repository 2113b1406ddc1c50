mod common;

use infinite_timeline::core::{Record, RecordId};
use infinite_timeline::interaction::{GestureSource, GestureTarget};
use infinite_timeline::markers::ElementPool;
use proptest::prelude::*;

use common::{assert_bindings_match_window, build_engine, date, pipeline_records};

#[test]
fn first_render_binds_exactly_the_visible_records() {
    let mut engine = build_engine();
    engine.render().expect("render");

    assert_bindings_match_window(&engine);
    assert_eq!(engine.marker_pool().active_count(), 7);
    assert_eq!(engine.marker_pool().idle_count(), 0);
    assert_eq!(engine.renderer().last_visible_marker_count, 7);
    assert!(engine.marker_for(RecordId(7)).is_none());
}

#[test]
fn markers_leaving_the_window_are_reused_for_entering_records() {
    let mut engine = build_engine();
    engine.render().expect("render");
    let created = engine.marker_pool().len();

    // Two months to the future: 60 days at 5 px per day.
    engine
        .gesture_start(GestureTarget::ChartBody, GestureSource::Mouse, 400.0)
        .expect("start");
    engine.gesture_move(100.0).expect("move");
    engine.gesture_end(None).expect("end");

    assert_bindings_match_window(&engine);
    assert!(engine.marker_for(RecordId(0)).is_none());
    assert!(engine.marker_for(RecordId(8)).is_some());
    assert_eq!(engine.marker_pool().len(), created);
}

#[test]
fn released_markers_are_parked_and_hidden() {
    let mut engine = build_engine();
    engine.render().expect("render");
    let gamma = engine.marker_for(RecordId(1)).expect("gamma bound");

    // Two months into the past: only the first record stays visible.
    engine
        .gesture_start(GestureTarget::ChartBody, GestureSource::Mouse, 0.0)
        .expect("start");
    engine.gesture_move(300.0).expect("move");

    let handle = engine.marker_handle(gamma).expect("handle");
    assert!(!handle.is_active());
    assert!(!handle.visible);
    assert_eq!(handle.bound_record, None);
    assert_eq!(handle.geometry.x, -1000.0);

    assert_eq!(engine.marker_pool().active_count(), 1);
    assert_eq!(engine.marker_pool().idle_count(), 6);
    let frame = engine.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.markers.len(), 7);
    assert_eq!(frame.visible_markers().count(), 1);
}

#[test]
fn replacing_records_rebinds_on_next_render() {
    let mut engine = build_engine();
    engine.render().expect("render");
    let pool_len = engine.marker_pool().len();

    let records = vec![
        Record::new("Solo", "Adobe", 100_000.0, date(2011, 12, 10), 50.0),
        Record::new("Duo", "Google", 200_000.0, date(2012, 1, 10), 75.0),
    ];
    engine.set_records(records).expect("set records");
    assert_eq!(engine.marker_pool().active_count(), 0);

    engine.render().expect("render");
    assert_bindings_match_window(&engine);
    assert_eq!(engine.marker_pool().active_count(), 2);
    assert_eq!(engine.marker_pool().len(), pool_len);
}

#[test]
fn unsorted_or_invalid_records_are_rejected() {
    let mut engine = build_engine();

    let mut unsorted = pipeline_records();
    unsorted.swap(9, 10);
    assert!(engine.set_records(unsorted).is_err());
    assert!(engine.set_records(Vec::new()).is_err());

    let mut bad_probability = pipeline_records();
    bad_probability[0].probability = 140.0;
    assert!(engine.set_records(bad_probability).is_err());

    assert_eq!(engine.records().len(), pipeline_records().len());
}

#[test]
fn pool_release_of_idle_marker_is_noop() {
    let mut pool = ElementPool::default();
    let marker = pool.acquire();
    pool.release(marker).expect("release");
    pool.release(marker).expect("second release");

    assert_eq!(pool.idle_count(), 1);
    assert_eq!(pool.acquire(), marker);
    assert_eq!(pool.len(), 1);
}

proptest! {
    #[test]
    fn bindings_track_window_across_pans(moves in prop::collection::vec(-400.0f64..400.0, 1..12)) {
        let mut engine = build_engine();
        engine.render().expect("render");
        let mut pool_len = engine.marker_pool().len();

        for distance in moves {
            engine
                .gesture_start(GestureTarget::ChartBody, GestureSource::Touch, 200.0)
                .expect("start");
            engine.gesture_move(200.0 + distance).expect("move");
            assert_bindings_match_window(&engine);
            engine.gesture_end(None).expect("end");

            prop_assert!(engine.marker_pool().len() >= pool_len);
            pool_len = engine.marker_pool().len();
        }
    }
}
