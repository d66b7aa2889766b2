use super::model::OrderDataset;

// ---------------------------------------------------------------------------
// Value-range filter
// ---------------------------------------------------------------------------

/// Return indices of orders whose value lies within `[min, max]`.
///
/// Both bounds are inclusive. A reversed range (`min > max`) selects
/// nothing; the slider UI clamps its handles so this only arises from
/// programmatic callers.
pub fn orders_in_range(dataset: &OrderDataset, min: f64, max: f64) -> Vec<usize> {
    dataset
        .orders
        .iter()
        .enumerate()
        .filter(|(_, o)| o.value >= min && o.value <= max)
        .map(|(i, _)| i)
        .collect()
}

/// Values of the orders selected by `indices`, in dataset order.
pub fn values_at(dataset: &OrderDataset, indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| dataset.orders[i].value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnPresence, Order, OrderDataset};

    fn dataset(values: &[f64]) -> OrderDataset {
        let orders = values
            .iter()
            .map(|&value| Order {
                value,
                ship_mode: None,
                segment: None,
                customer_id: None,
            })
            .collect();
        OrderDataset::from_orders(orders, ColumnPresence::default())
    }

    #[test]
    fn both_bounds_are_inclusive() {
        let ds = dataset(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(orders_in_range(&ds, 20.0, 30.0), vec![1, 2]);
    }

    #[test]
    fn exact_boundary_values_are_kept() {
        let ds = dataset(&[5.0, 7.5, 10.0]);
        assert_eq!(orders_in_range(&ds, 5.0, 5.0), vec![0]);
        assert_eq!(orders_in_range(&ds, 10.0, 10.0), vec![2]);
    }

    #[test]
    fn reversed_range_selects_nothing() {
        let ds = dataset(&[10.0, 20.0, 30.0]);
        assert!(orders_in_range(&ds, 30.0, 10.0).is_empty());
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let ds = dataset(&[10.0, 20.0]);
        assert!(orders_in_range(&ds, 100.0, 200.0).is_empty());
    }

    #[test]
    fn values_follow_indices() {
        let ds = dataset(&[10.0, 20.0, 30.0]);
        let idx = orders_in_range(&ds, 15.0, 35.0);
        assert_eq!(values_at(&ds, &idx), vec![20.0, 30.0]);
    }
}
