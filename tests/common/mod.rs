#![allow(dead_code)]

use chrono::NaiveDate;
use infinite_timeline::api::{ChartEngine, ChartEngineConfig};
use infinite_timeline::core::{Record, RecordId, Viewport};
use infinite_timeline::render::{NullRenderer, Renderer};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Pipeline sample sorted by close date.
pub fn pipeline_records() -> Vec<Record> {
    vec![
        Record::new("Apollo", "Adobe", 250_000.0, date(2011, 12, 1), 30.0),
        Record::new("Gamma", "JetBlue", 300_000.0, date(2012, 1, 7), 60.0),
        Record::new("Air", "Google", 470_000.0, date(2012, 1, 22), 40.0),
        Record::new("Alpha", "Google", 575_000.0, date(2012, 1, 26), 90.0),
        Record::new("Lamda", "Motorola", 150_000.0, date(2012, 1, 31), 5.0),
        Record::new("Salsa", "Adobe", 198_000.0, date(2012, 2, 16), 50.0),
        Record::new("Big Bang", "Motorola", 250_000.0, date(2012, 2, 21), 70.0),
        Record::new("Delta", "JetBlue", 345_000.0, date(2012, 3, 7), 50.0),
        Record::new("Omega", "McDonald's Corp", 300_000.0, date(2012, 3, 27), 60.0),
        Record::new("New Era", "McDonald's Corp", 600_000.0, date(2012, 4, 3), 30.0),
        Record::new("Corfu", "Verizon", 500_000.0, date(2012, 4, 23), 82.0),
        Record::new("Malibu", "Verizon", 700_000.0, date(2012, 5, 2), 24.0),
        Record::new("Borneo", "Adobe", 400_000.0, date(2012, 6, 9), 85.0),
    ]
}

/// 505x275 container: a 460x200 plot area at 5 px per day.
pub fn compact_config() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(505, 275))
}

pub fn build_engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(NullRenderer::default(), compact_config(), pipeline_records())
        .expect("engine init")
}

pub fn build_wide_engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(1045, 275)),
        pipeline_records(),
    )
    .expect("engine init")
}

/// Checks that records inside the last window hold exactly one bound, visible
/// marker and that records outside hold none.
pub fn assert_bindings_match_window<R: Renderer>(engine: &ChartEngine<R>) {
    let window = engine.current_window().expect("rendered window");
    let mut seen = std::collections::HashSet::new();

    for (index, record) in engine.records().iter().enumerate() {
        let marker = engine.marker_for(RecordId(index));
        if window.contains(record.close_date) {
            let marker = marker.unwrap_or_else(|| panic!("record {index} should be bound"));
            let handle = engine.marker_handle(marker).expect("handle exists");
            assert!(handle.is_active());
            assert!(handle.visible);
            assert_eq!(handle.bound_record, Some(RecordId(index)));
            assert!(seen.insert(marker), "marker {marker:?} bound twice");
        } else {
            assert!(marker.is_none(), "record {index} should be unbound");
        }
    }

    let pool = engine.marker_pool();
    assert_eq!(pool.active_count() + pool.idle_count(), pool.len());
    assert_eq!(pool.active_count(), seen.len());
}
