use std::path::PathBuf;

use orderscope::data::filter::{orders_in_range, values_at};
use orderscope::data::loader::load_file;
use orderscope::data::report::{self, Report};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

#[test]
fn csv_load_to_report_end_to_end() {
    let path = write_fixture(
        "orderscope_e2e.csv",
        "Customer_ID,Value,Ship_Mode,Segment,Order_Date\n\
         c1,10,A,X,2024-01-01\n\
         c1,20,A,X,2024-01-02\n\
         c2,30,B,Y,2024-01-03\n\
         c2,40,B,Y,2024-01-04\n",
    );
    let dataset = load_file(&path).expect("fixture should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.value_bounds, Some((10.0, 40.0)));

    let report = Report::build(&dataset);

    assert_eq!(report.summary.count, 4);
    assert!((report.summary.total_value - 100.0).abs() < 1e-9);
    assert!((report.summary.average_value.unwrap() - 25.0).abs() < 1e-9);

    assert_eq!(report.top_combos.len(), 2);
    assert_eq!(report.top_combos[0].ship_mode, "A");
    assert_eq!(report.top_combos[0].count, 2);

    let top = &report.top_customers[0];
    assert_eq!(top.customer_id, "c2");
    assert_eq!(top.order_count, 2);
    assert!((top.total_revenue - 70.0).abs() < 1e-9);
    let combo = top.dominant_combo.as_ref().expect("c2 has combo data");
    assert_eq!(combo.ship_mode, "B");
    assert_eq!(combo.segment, "Y");

    // inclusive range filter keeps the boundary orders
    let in_range = orders_in_range(&dataset, 20.0, 30.0);
    assert_eq!(values_at(&dataset, &in_range), vec![20.0, 30.0]);

    // histogram over the filtered values accounts for every order exactly once
    let values = values_at(&dataset, &in_range);
    let bins = report::histogram(&values, report::HISTOGRAM_BINS);
    assert_eq!(
        bins.iter().map(|b| b.count).sum::<usize>(),
        values.len()
    );
}

#[test]
fn report_degrades_without_optional_columns() {
    let path = write_fixture("orderscope_e2e_minimal.csv", "Value\n5\n15\n25\n");
    let dataset = load_file(&path).expect("fixture should load");
    std::fs::remove_file(&path).ok();

    let report = Report::build(&dataset);

    assert_eq!(report.summary.count, 3);
    assert!((report.summary.total_value - 45.0).abs() < 1e-9);
    // sections tied to absent columns come back empty, not as errors
    assert!(report.top_combos.is_empty());
    assert!(report.top_customers.is_empty());
    assert!(report.ship_mode_counts.is_empty());
    assert!(report.segment_counts.is_empty());
}

#[test]
fn empty_file_yields_the_degenerate_dashboard() {
    let path = write_fixture("orderscope_e2e_empty.csv", "Value,Ship_Mode,Segment\n");
    let dataset = load_file(&path).expect("header-only file should load");
    std::fs::remove_file(&path).ok();

    assert!(dataset.is_empty());
    assert_eq!(dataset.value_bounds, None);

    let report = Report::build(&dataset);
    assert_eq!(report.summary.count, 0);
    assert_eq!(report.summary.total_value, 0.0);
    assert_eq!(report.summary.average_value, None);

    let bins = report::histogram(&[], report::HISTOGRAM_BINS);
    assert_eq!(bins.len(), 1);
    assert_eq!(bins[0].count, 0);
}
