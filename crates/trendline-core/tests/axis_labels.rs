// File: crates/trendline-core/tests/axis_labels.rs
// Purpose: Date label strides, nice-number gridlines and row reconciliation.

use trendline_core::axis::{
    horizontal_labels, horizontal_stride, nice_step, percent_labels, shared_row_count, vertical_labels, AxisLabel,
    AxisRows, HorizontalLabeler,
};
use trendline_core::format::format_decimals;
use trendline_core::types::DAY;
use trendline_core::ValueRange;

#[test]
fn stride_is_power_of_two() {
    assert_eq!(horizontal_stride(10.0 * DAY, DAY, 600.0, 60.0), 1);
    assert_eq!(horizontal_stride(10.0 * DAY, DAY, 300.0, 60.0), 2);
    assert_eq!(horizontal_stride(10.0 * DAY, DAY, 180.0, 60.0), 4);
    for width in [50.0f32, 120.0, 333.0, 720.0] {
        let s = horizontal_stride(365.0 * DAY, DAY, width, 60.0);
        assert!(s.is_power_of_two(), "stride {s} for width {width}");
    }
}

#[test]
fn labels_are_anchored_at_last_sample() {
    let ts: Vec<f64> = (0..=10).map(|i| i as f64).collect();
    let labels = horizontal_labels(&ts, 3, |t| format!("{t}"));
    let values: Vec<f64> = labels.iter().map(|l| l.value).collect();
    assert_eq!(values, vec![1.0, 4.0, 7.0, 10.0]);
    assert_eq!(labels[3].text, "10");
}

#[test]
fn empty_axis_yields_sentinel() {
    assert_eq!(horizontal_labels(&[], 1, |t| t.to_string()), vec![AxisLabel::sentinel()]);
    let (range, labels) = vertical_labels(ValueRange::new(5.0, 5.0), 300.0, 50.0);
    assert_eq!(range, ValueRange::unit());
    assert_eq!(labels, vec![AxisLabel::new(0.0, "0")]);
}

#[test]
fn labeler_only_reports_stride_changes() {
    let ts: Vec<f64> = (0..30).map(|i| i as f64 * DAY).collect();
    let visible = ValueRange::new(0.0, 29.0 * DAY);
    let mut labeler = HorizontalLabeler::new();
    let fmt = |t: f64| format!("{}", t / DAY);
    assert!(labeler.update(&ts, visible, 600.0, 60.0, DAY, false, fmt).is_some());
    assert!(labeler.update(&ts, visible, 600.0, 60.0, DAY, false, fmt).is_none());
    assert!(labeler.update(&ts, visible, 600.0, 60.0, DAY, true, fmt).is_some(), "force");
    let narrow = ValueRange::new(20.0 * DAY, 29.0 * DAY);
    assert!(labeler.update(&ts, narrow, 600.0, 60.0, DAY, false, fmt).is_some());
    assert_eq!(labeler.previous_stride(), Some(1));
    labeler.reset();
    assert_eq!(labeler.previous_stride(), None);
}

#[test]
fn nice_step_snaps_to_anchor() {
    let s = nice_step(100.0, 250.0, 50.0).expect("step");
    assert_eq!(s.anchor, 1.5);
    assert!((s.step - 15.0).abs() < 1e-9);
    assert_eq!(s.decimals, 2);

    let s = nice_step(0.5, 250.0, 50.0).expect("step");
    assert_eq!(s.anchor, 0.5);
    assert!((s.step - 0.05).abs() < 1e-12);
    assert_eq!(s.decimals, 3);

    assert!(nice_step(0.0, 250.0, 50.0).is_none());
    assert!(nice_step(10.0, 0.0, 50.0).is_none());
}

#[test]
fn rows_cover_the_range() {
    let rows = AxisRows::compute(ValueRange::new(0.0, 100.0), 250.0, 50.0, true).expect("rows");
    assert_eq!(rows.count, 7);
    assert_eq!(rows.expanded_range(rows.count), ValueRange::new(0.0, 105.0));
    let labels = rows.labels(rows.count, format_decimals);
    assert_eq!(labels.first().map(|l| l.text.as_str()), Some("0"));
    assert_eq!(labels.last().map(|l| l.text.as_str()), Some("90"));

    let hidden = AxisRows::compute(ValueRange::new(0.0, 100.0), 250.0, 50.0, false).expect("rows");
    assert_eq!(hidden.count, 0);
}

#[test]
fn shared_rows_follow_longest_visible_axis() {
    let a = AxisRows::compute(ValueRange::new(0.0, 100.0), 250.0, 50.0, true);
    let b = AxisRows::compute(ValueRange::new(0.0, 10.0), 250.0, 50.0, true);
    let total = shared_row_count(&[a, b]);
    assert!(total >= a.map(|r| r.count).unwrap_or(0));
    assert!(total >= b.map(|r| r.count).unwrap_or(0));
    assert_eq!(shared_row_count(&[None, None]), 0);
}

#[test]
fn percent_axis_is_fixed() {
    let labels = percent_labels();
    let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["0", "25", "50", "75", "100"]);
    assert_eq!(labels[2].value, 0.5);
}
