// File: crates/trendline-core/tests/series_format.rs
// Purpose: Collection validation and the UTC date/number formatting used by labels and titles.

use skia_safe::Color;
use trendline_core::format::{details_title, format_compact, format_decimals, format_grouped, range_title, DateScale};
use trendline_core::types::{DAY, HOUR};
use trendline_core::{ChartError, Series, SeriesCollection, ValueRange};

/// 2019-04-06 00:00:00 UTC, a Saturday.
const BASE: f64 = 1_554_508_800.0;

fn series(values: Vec<f64>) -> Series {
    Series::new("S", Color::BLACK, values)
}

#[test]
fn collection_invariants() {
    assert_eq!(SeriesCollection::new(vec![], vec![]).unwrap_err(), ChartError::EmptyAxis);
    assert_eq!(
        SeriesCollection::new(vec![0.0, 2.0, 2.0], vec![]).unwrap_err(),
        ChartError::UnsortedAxis { index: 2, previous: 2.0, current: 2.0 }
    );
    assert_eq!(
        SeriesCollection::new(vec![0.0, 1.0], vec![series(vec![1.0])]).unwrap_err(),
        ChartError::LengthMismatch { name: "S".into(), expected: 2, actual: 1 }
    );
    assert_eq!(
        SeriesCollection::new(vec![0.0, 1.0], vec![series(vec![1.0, f64::NAN])]).unwrap_err(),
        ChartError::NonFiniteValue { name: "S".into(), index: 1 }
    );
}

#[test]
fn collection_queries() {
    let c = SeriesCollection::new(vec![10.0, 20.0, 30.0], vec![series(vec![1.0, 2.0, 3.0])]).expect("valid");
    assert_eq!(c.horizontal_range(), ValueRange::new(10.0, 30.0));
    assert_eq!(c.native_spacing(), Some(10.0));
    assert_eq!(c.closest_index(24.0), Some(1));
    assert_eq!(c.closest_index(25.0), Some(1), "first wins a tie");
    assert_eq!(c.closest_index(-100.0), Some(0));
    assert_eq!(c.points(0), vec![(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)]);
    assert!(c.points(5).is_empty());

    let single = SeriesCollection::new(vec![5.0], vec![series(vec![1.0])]).expect("valid");
    assert_eq!(single.native_spacing(), None);
}

#[test]
fn date_labels_and_titles() {
    assert_eq!(DateScale::Day.format_label(BASE), "Apr 6");
    assert_eq!(DateScale::Hour.format_label(BASE + 14.0 * HOUR), "14:00");
    assert_eq!(DateScale::Day.interval(), DAY);

    assert_eq!(range_title(BASE, BASE + 12.0 * HOUR), "Saturday, 6 Apr 2019");
    assert_eq!(range_title(BASE, BASE + 6.0 * DAY), "6 Apr 2019 - 12 Apr 2019");
    assert_eq!(details_title(BASE, false), "Sat, 6 Apr");
    assert_eq!(details_title(BASE + 14.0 * HOUR, true), "14:00");
}

#[test]
fn number_formatting() {
    assert_eq!(format_grouped(1_234_567.5), "1 234 567.5");
    assert_eq!(format_grouped(-1200.0), "-1 200");
    assert_eq!(format_grouped(42.0), "42");
    assert_eq!(format_decimals(2.50, 2), "2.5");
    assert_eq!(format_decimals(-0.001, 2), "0");
    assert_eq!(format_decimals(0.125, 3), "0.125");
    assert_eq!(format_compact(1500.0, 1), "1.5K");
    assert_eq!(format_compact(2_500_000.0, 0), "2.5M");
    assert_eq!(format_compact(999.0, 0), "999");
}
