use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{CategoryColors, HISTOGRAM_FILL};
use crate::data::filter::values_at;
use crate::data::model::OrderDataset;
use crate::data::report::{self, CategoryColumn};
use crate::state::AppState;
use crate::ui::panels::section_heading;

// ---------------------------------------------------------------------------
// Category bar charts
// ---------------------------------------------------------------------------

/// Bar charts of order counts per ship mode and per segment. Each chart is
/// omitted when its column is absent from the source.
pub fn category_sections(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    if ds.columns.ship_mode {
        category_bar_chart(ui, ds, CategoryColumn::ShipMode, "ship_mode_bars");
    }
    if ds.columns.segment {
        category_bar_chart(ui, ds, CategoryColumn::Segment, "segment_bars");
    }
}

fn category_bar_chart(ui: &mut Ui, ds: &OrderDataset, column: CategoryColumn, id: &str) {
    section_heading(ui, &format!("Orders by {}", column.title()));
    let counts = report::category_counts(ds, column);
    if counts.is_empty() {
        ui.label("No orders.");
        return;
    }
    let colors = CategoryColors::new(&counts);

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .width(0.6)
                .name(&c.label)
                .fill(colors.color_for(&c.label))
        })
        .collect();

    Plot::new(id)
        .height(220.0)
        .y_axis_label("Number of Orders")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    // colour key under the chart, one entry per category
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for c in &counts {
            ui.label(
                RichText::new(format!("■ {} ({})", c.label, c.count))
                    .color(colors.color_for(&c.label)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Value distribution histogram
// ---------------------------------------------------------------------------

/// Histogram of order values inside the current filter range.
pub fn histogram_section(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };

    section_heading(ui, "Order Value Distribution");
    let values = values_at(ds, &state.filtered_indices);
    let bins = report::histogram(&values, report::HISTOGRAM_BINS);

    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            // a degenerate (point-range) bin still gets a visible bar
            let width = if b.upper > b.lower { b.upper - b.lower } else { 1.0 };
            let center = 0.5 * (b.lower + b.upper);
            Bar::new(center, b.count as f64)
                .width(width)
                .fill(HISTOGRAM_FILL)
                .stroke(Stroke::new(1.0, Color32::from_gray(60)))
        })
        .collect();

    Plot::new("value_histogram")
        .height(260.0)
        .x_axis_label("Order Value")
        .y_axis_label("Number of Orders")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
