use std::path::Path;

use crate::data::filter::orders_in_range;
use crate::data::loader;
use crate::data::model::OrderDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Owns the loaded dataset
/// and passes it into the pure reporting functions.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<OrderDataset>,

    /// Current (min, max) of the value filter slider.
    pub value_range: (f64, f64),

    /// Indices of orders inside the current value range (cached).
    pub filtered_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            value_range: (0.0, 0.0),
            filtered_indices: Vec::new(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset the slider to the full value
    /// range and select everything.
    pub fn set_dataset(&mut self, dataset: OrderDataset) {
        self.value_range = dataset.value_bounds.unwrap_or((0.0, 0.0));
        self.filtered_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `filtered_indices` after a slider change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let (min, max) = self.value_range;
            self.filtered_indices = orders_in_range(ds, min, max);
        }
    }

    /// Move the slider to a new range, clamped to the dataset bounds, and
    /// refilter. Keeps min <= max so the engine never sees a reversed range
    /// from the UI.
    pub fn set_value_range(&mut self, mut min: f64, mut max: f64) {
        if let Some(ds) = &self.dataset {
            if let Some((lo, hi)) = ds.value_bounds {
                min = min.clamp(lo, hi);
                max = max.clamp(lo, hi);
            }
        }
        if min > max {
            max = min;
        }
        self.value_range = (min, max);
        self.refilter();
    }

    /// Load a dataset from `path`, surfacing failures in the status area.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} orders from {} (columns: {:?})",
                    dataset.len(),
                    path.display(),
                    dataset.columns
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }
}
