// ---------------------------------------------------------------------------
// Order – one row of the source table
// ---------------------------------------------------------------------------

/// A single sales order (one row of the source table).
///
/// `value` is always present; the categorical fields mirror the optional
/// source columns and are `None` when the column was absent or the cell
/// was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order value (currency amount).
    pub value: f64,
    pub ship_mode: Option<String>,
    pub segment: Option<String>,
    pub customer_id: Option<String>,
}

// ---------------------------------------------------------------------------
// ColumnPresence – which optional columns the source carried
// ---------------------------------------------------------------------------

/// Which optional columns were present in the source header.
///
/// Dashboard sections depending on an absent column are omitted rather
/// than treated as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnPresence {
    pub ship_mode: bool,
    pub segment: bool,
    pub customer_id: bool,
}

// ---------------------------------------------------------------------------
// OrderDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset, immutable after load, with precomputed facts
/// the UI needs up front.
#[derive(Debug, Clone)]
pub struct OrderDataset {
    /// All orders, in file row order.
    pub orders: Vec<Order>,
    /// Optional columns found in the source header.
    pub columns: ColumnPresence,
    /// Global (min, max) over `value`; `None` when the dataset is empty.
    /// Bounds the filter slider.
    pub value_bounds: Option<(f64, f64)>,
}

impl OrderDataset {
    /// Build a dataset from parsed rows, computing the value bounds.
    pub fn from_orders(orders: Vec<Order>, columns: ColumnPresence) -> Self {
        let value_bounds = orders.iter().fold(None, |acc: Option<(f64, f64)>, o| {
            Some(match acc {
                Some((lo, hi)) => (lo.min(o.value), hi.max(o.value)),
                None => (o.value, o.value),
            })
        });
        OrderDataset {
            orders,
            columns,
            value_bounds,
        }
    }

    /// Number of orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(value: f64) -> Order {
        Order {
            value,
            ship_mode: None,
            segment: None,
            customer_id: None,
        }
    }

    #[test]
    fn value_bounds_span_the_data() {
        let ds = OrderDataset::from_orders(
            vec![order(30.0), order(10.0), order(20.0)],
            ColumnPresence::default(),
        );
        assert_eq!(ds.value_bounds, Some((10.0, 30.0)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = OrderDataset::from_orders(Vec::new(), ColumnPresence::default());
        assert!(ds.is_empty());
        assert_eq!(ds.value_bounds, None);
    }
}
