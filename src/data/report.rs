use std::collections::HashMap;

use serde::Serialize;

use super::model::OrderDataset;

/// Default truncation / bucketing parameters for the dashboard.
pub const TOP_COMBOS: usize = 10;
pub const TOP_CUSTOMERS: usize = 5;
pub const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Dataset-wide metrics for the 3-up metric row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total_value: f64,
    /// `None` for an empty dataset (shown as "n/a" instead of dividing by
    /// zero).
    pub average_value: Option<f64>,
}

pub fn summary(dataset: &OrderDataset) -> Summary {
    let count = dataset.len();
    let total_value: f64 = dataset.orders.iter().map(|o| o.value).sum();
    let average_value = (count > 0).then(|| total_value / count as f64);
    Summary {
        count,
        total_value,
        average_value,
    }
}

// ---------------------------------------------------------------------------
// Ship mode × segment combos
// ---------------------------------------------------------------------------

/// A (ship mode, segment) categorical pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combo {
    pub ship_mode: String,
    pub segment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComboCount {
    pub ship_mode: String,
    pub segment: String,
    pub count: usize,
}

/// Occurrence counts per (ship mode, segment) pair, count descending,
/// truncated to `k`.
///
/// Groups are accumulated in first-encounter order and the sort is stable,
/// so equal counts keep that order. Empty when either column is absent.
pub fn top_combos(dataset: &OrderDataset, k: usize) -> Vec<ComboCount> {
    if !(dataset.columns.ship_mode && dataset.columns.segment) {
        return Vec::new();
    }

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut counts: Vec<ComboCount> = Vec::new();

    for order in &dataset.orders {
        let (Some(ship), Some(segment)) = (order.ship_mode.as_deref(), order.segment.as_deref())
        else {
            continue;
        };
        match index.get(&(ship, segment)) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert((ship, segment), counts.len());
                counts.push(ComboCount {
                    ship_mode: ship.to_string(),
                    segment: segment.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}

// ---------------------------------------------------------------------------
// Per-customer rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRollup {
    pub customer_id: String,
    pub order_count: usize,
    pub total_revenue: f64,
    /// The customer's most frequent (ship mode, segment) pair; `None` when
    /// no order of theirs carries both fields.
    pub dominant_combo: Option<Combo>,
}

struct CustomerAcc {
    customer_id: String,
    order_count: usize,
    total_revenue: f64,
    /// Combo occurrence table in first-encounter order for this customer.
    combo_counts: Vec<(Combo, usize)>,
}

/// Per-customer rollups, total revenue descending, truncated to `k`.
///
/// One grouped pass over the dataset builds every customer's combo table,
/// then a single arg-max per customer picks the dominant combo. Equal
/// revenues keep first-encounter order (stable sort); combo ties go to the
/// pair seen first in that customer's row order.
pub fn top_customers(dataset: &OrderDataset, k: usize) -> Vec<CustomerRollup> {
    if !dataset.columns.customer_id {
        return Vec::new();
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut accs: Vec<CustomerAcc> = Vec::new();

    for order in &dataset.orders {
        let Some(id) = order.customer_id.as_deref() else {
            continue;
        };
        let i = match index.get(id) {
            Some(&i) => i,
            None => {
                index.insert(id, accs.len());
                accs.push(CustomerAcc {
                    customer_id: id.to_string(),
                    order_count: 0,
                    total_revenue: 0.0,
                    combo_counts: Vec::new(),
                });
                accs.len() - 1
            }
        };

        let acc = &mut accs[i];
        acc.order_count += 1;
        acc.total_revenue += order.value;

        if let (Some(ship), Some(segment)) = (order.ship_mode.as_deref(), order.segment.as_deref())
        {
            match acc
                .combo_counts
                .iter_mut()
                .find(|(c, _)| c.ship_mode == ship && c.segment == segment)
            {
                Some((_, n)) => *n += 1,
                None => acc.combo_counts.push((
                    Combo {
                        ship_mode: ship.to_string(),
                        segment: segment.to_string(),
                    },
                    1,
                )),
            }
        }
    }

    let mut rollups: Vec<CustomerRollup> = accs
        .into_iter()
        .map(|acc| CustomerRollup {
            dominant_combo: dominant_combo(&acc.combo_counts),
            customer_id: acc.customer_id,
            order_count: acc.order_count,
            total_revenue: acc.total_revenue,
        })
        .collect();

    rollups.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
    rollups.truncate(k);
    rollups
}

/// First strict maximum of an in-order combo table: ties keep the pair
/// encountered first.
fn dominant_combo(combo_counts: &[(Combo, usize)]) -> Option<Combo> {
    let mut best: Option<&(Combo, usize)> = None;
    for entry in combo_counts {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(combo, _)| combo.clone())
}

// ---------------------------------------------------------------------------
// Per-category counts (bar charts)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    ShipMode,
    Segment,
}

impl CategoryColumn {
    pub fn title(self) -> &'static str {
        match self {
            CategoryColumn::ShipMode => "Ship Mode",
            CategoryColumn::Segment => "Segment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Occurrence counts for one categorical column, count descending with
/// stable first-encounter ties. Empty when the column is absent.
pub fn category_counts(dataset: &OrderDataset, column: CategoryColumn) -> Vec<CategoryCount> {
    let present = match column {
        CategoryColumn::ShipMode => dataset.columns.ship_mode,
        CategoryColumn::Segment => dataset.columns.segment,
    };
    if !present {
        return Vec::new();
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for order in &dataset.orders {
        let label = match column {
            CategoryColumn::ShipMode => order.ship_mode.as_deref(),
            CategoryColumn::Segment => order.segment.as_deref(),
        };
        let Some(label) = label else {
            continue;
        };
        match index.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(CategoryCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// Histogram bucketing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]` of `values`.
///
/// Degenerate input falls back to a single bin instead of a zero bucket
/// width: no values → `[0, 0]` with count 0, all-equal values → one bin
/// covering the point range with the full count. The maximum value lands
/// in the last bin.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() {
        return vec![HistogramBin {
            lower: 0.0,
            upper: 0.0,
            count: 0,
        }];
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let bin_count = bin_count.max(1);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Assembled report (export surface)
// ---------------------------------------------------------------------------

/// Everything the dashboard shows, in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub top_combos: Vec<ComboCount>,
    pub top_customers: Vec<CustomerRollup>,
    pub ship_mode_counts: Vec<CategoryCount>,
    pub segment_counts: Vec<CategoryCount>,
}

impl Report {
    pub fn build(dataset: &OrderDataset) -> Self {
        Report {
            summary: summary(dataset),
            top_combos: top_combos(dataset, TOP_COMBOS),
            top_customers: top_customers(dataset, TOP_CUSTOMERS),
            ship_mode_counts: category_counts(dataset, CategoryColumn::ShipMode),
            segment_counts: category_counts(dataset, CategoryColumn::Segment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnPresence, Order, OrderDataset};

    fn order(value: f64, ship: &str, segment: &str, customer: &str) -> Order {
        Order {
            value,
            ship_mode: Some(ship.to_string()),
            segment: Some(segment.to_string()),
            customer_id: Some(customer.to_string()),
        }
    }

    /// The 4-row dataset: values [10,20,30,40], combos (A,X)x2 then (B,Y)x2,
    /// customers c1 (rows 1-2) and c2 (rows 3-4).
    fn small_dataset() -> OrderDataset {
        OrderDataset::from_orders(
            vec![
                order(10.0, "A", "X", "c1"),
                order(20.0, "A", "X", "c1"),
                order(30.0, "B", "Y", "c2"),
                order(40.0, "B", "Y", "c2"),
            ],
            ColumnPresence {
                ship_mode: true,
                segment: true,
                customer_id: true,
            },
        )
    }

    fn empty_dataset() -> OrderDataset {
        OrderDataset::from_orders(Vec::new(), ColumnPresence::default())
    }

    #[test]
    fn summary_matches_dataset() {
        let s = summary(&small_dataset());
        assert_eq!(s.count, 4);
        assert!((s.total_value - 100.0).abs() < 1e-9);
        assert!((s.average_value.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn summary_of_empty_dataset_has_no_average() {
        let s = summary(&empty_dataset());
        assert_eq!(s.count, 0);
        assert_eq!(s.total_value, 0.0);
        assert_eq!(s.average_value, None);
    }

    #[test]
    fn top_combos_counts_and_order() {
        let combos = top_combos(&small_dataset(), TOP_COMBOS);
        assert_eq!(combos.len(), 2);
        // equal counts: first-encountered combo (A, X) stays first
        assert_eq!(combos[0].ship_mode, "A");
        assert_eq!(combos[0].segment, "X");
        assert_eq!(combos[0].count, 2);
        assert_eq!(combos[1].ship_mode, "B");
        assert_eq!(combos[1].count, 2);
    }

    #[test]
    fn top_combos_is_sorted_and_truncated() {
        let mut orders = Vec::new();
        for (n, ship) in [(1, "A"), (3, "B"), (2, "C")] {
            for _ in 0..n {
                orders.push(order(1.0, ship, "X", "c"));
            }
        }
        let ds = OrderDataset::from_orders(
            orders,
            ColumnPresence {
                ship_mode: true,
                segment: true,
                customer_id: true,
            },
        );

        let combos = top_combos(&ds, 2);
        assert_eq!(combos.len(), 2);
        assert!(combos[0].count >= combos[1].count);
        assert_eq!(combos[0].ship_mode, "B");
        assert_eq!(combos[1].ship_mode, "C");
    }

    #[test]
    fn top_combos_empty_without_both_columns() {
        let ds = OrderDataset::from_orders(
            vec![order(1.0, "A", "X", "c1")],
            ColumnPresence {
                ship_mode: true,
                segment: false,
                customer_id: true,
            },
        );
        assert!(top_combos(&ds, TOP_COMBOS).is_empty());
    }

    #[test]
    fn top_customers_ranked_by_revenue() {
        let customers = top_customers(&small_dataset(), TOP_CUSTOMERS);
        assert_eq!(customers.len(), 2);

        assert_eq!(customers[0].customer_id, "c2");
        assert_eq!(customers[0].order_count, 2);
        assert!((customers[0].total_revenue - 70.0).abs() < 1e-9);
        let combo = customers[0].dominant_combo.as_ref().unwrap();
        assert_eq!((combo.ship_mode.as_str(), combo.segment.as_str()), ("B", "Y"));

        assert_eq!(customers[1].customer_id, "c1");
        assert!((customers[1].total_revenue - 30.0).abs() < 1e-9);
        let combo = customers[1].dominant_combo.as_ref().unwrap();
        assert_eq!((combo.ship_mode.as_str(), combo.segment.as_str()), ("A", "X"));
    }

    #[test]
    fn top_customers_truncates_to_k() {
        let orders = (0..8)
            .map(|i| order(i as f64, "A", "X", &format!("c{i}")))
            .collect();
        let ds = OrderDataset::from_orders(
            orders,
            ColumnPresence {
                ship_mode: true,
                segment: true,
                customer_id: true,
            },
        );
        let customers = top_customers(&ds, 5);
        assert_eq!(customers.len(), 5);
        for pair in customers.windows(2) {
            assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
    }

    #[test]
    fn dominant_combo_tie_goes_to_first_encountered() {
        // c1 ships (A, X) and (B, Y) once each: the earlier pair wins.
        let ds = OrderDataset::from_orders(
            vec![order(5.0, "A", "X", "c1"), order(5.0, "B", "Y", "c1")],
            ColumnPresence {
                ship_mode: true,
                segment: true,
                customer_id: true,
            },
        );
        let customers = top_customers(&ds, TOP_CUSTOMERS);
        let combo = customers[0].dominant_combo.as_ref().unwrap();
        assert_eq!((combo.ship_mode.as_str(), combo.segment.as_str()), ("A", "X"));
    }

    #[test]
    fn dominant_combo_is_none_without_combo_columns() {
        let ds = OrderDataset::from_orders(
            vec![Order {
                value: 9.0,
                ship_mode: None,
                segment: None,
                customer_id: Some("c1".to_string()),
            }],
            ColumnPresence {
                ship_mode: false,
                segment: false,
                customer_id: true,
            },
        );
        let customers = top_customers(&ds, TOP_CUSTOMERS);
        assert_eq!(customers[0].dominant_combo, None);
        assert_eq!(customers[0].order_count, 1);
    }

    #[test]
    fn category_counts_sorted_with_stable_ties() {
        let mut orders = vec![
            order(1.0, "First", "X", "c"),
            order(1.0, "Second", "X", "c"),
            order(1.0, "Second", "X", "c"),
            order(1.0, "Third", "X", "c"),
        ];
        orders.push(order(1.0, "First", "X", "c"));
        let ds = OrderDataset::from_orders(
            orders,
            ColumnPresence {
                ship_mode: true,
                segment: true,
                customer_id: true,
            },
        );

        let counts = category_counts(&ds, CategoryColumn::ShipMode);
        let labels: Vec<&str> = counts.iter().map(|c| c.label.as_str()).collect();
        // "First" and "Second" both have 2; "First" was seen first
        assert_eq!(labels, vec!["First", "Second", "Third"]);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), ds.len());
    }

    #[test]
    fn histogram_counts_sum_to_input_length() {
        let values: Vec<f64> = (0..97).map(|i| (i as f64).sin() * 50.0).collect();
        let bins = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
    }

    #[test]
    fn histogram_max_value_lands_in_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.last().unwrap().count, 2); // 3.0 and 4.0
        assert_eq!(bins.last().unwrap().upper, 4.0);
    }

    #[test]
    fn histogram_degenerate_range_is_a_single_bin() {
        let bins = histogram(&[7.0, 7.0, 7.0], HISTOGRAM_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].lower, 7.0);
        assert_eq!(bins[0].upper, 7.0);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn histogram_of_nothing_is_an_empty_fallback_bin() {
        let bins = histogram(&[], HISTOGRAM_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = Report::build(&small_dataset());
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"total_value\": 100.0"));
        assert!(json.contains("\"customer_id\": \"c2\""));
    }
}
