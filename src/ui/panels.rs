use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Slider, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::OrderDataset;
use crate::data::report::{self, Report};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.dataset.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export report…"))
                .clicked()
            {
                export_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} orders loaded, {} in range",
                ds.len(),
                state.filtered_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let mut text = RichText::new(msg.as_str());
            if msg.starts_with("Error:") {
                text = text.color(Color32::RED);
            }
            ui.label(text);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open orders data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_report_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export report")
        .add_filter("JSON", &["json"])
        .set_file_name("orders_report.json")
        .save_file()
    else {
        return;
    };

    let result = match &state.dataset {
        Some(ds) => write_report(ds, &path),
        None => return,
    };
    match result {
        Ok(()) => {
            log::info!("Report written to {}", path.display());
            state.status_message = Some(format!("Report written to {}", path.display()));
        }
        Err(e) => {
            log::error!("Report export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn write_report(dataset: &OrderDataset, path: &Path) -> anyhow::Result<()> {
    let report = Report::build(dataset);
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Metric row
// ---------------------------------------------------------------------------

/// The 3-up metric display: order count, total revenue, average value.
pub fn metric_row(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    let s = report::summary(ds);

    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Orders", s.count.to_string());
        metric(&mut cols[1], "Total Revenue", format_currency(s.total_value));
        metric(
            &mut cols[2],
            "Average Order Value",
            s.average_value
                .map(format_currency)
                .unwrap_or_else(|| "n/a".to_string()),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.heading(RichText::new(value).strong());
    });
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Top ship mode × segment combinations. Omitted entirely when either
/// column is absent from the source.
pub fn combo_section(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    if !(ds.columns.ship_mode && ds.columns.segment) {
        return;
    }

    section_heading(ui, "Top Ship Mode × Segment Combos");
    let combos = report::top_combos(ds, report::TOP_COMBOS);
    if combos.is_empty() {
        ui.label("No orders.");
        return;
    }

    ui.push_id("combo_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .vscroll(false)
            .striped(true)
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Ship Mode");
                });
                header.col(|ui| {
                    ui.strong("Segment");
                });
                header.col(|ui| {
                    ui.strong("Orders");
                });
            })
            .body(|mut body| {
                for combo in &combos {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&combo.ship_mode);
                        });
                        row.col(|ui| {
                            ui.label(&combo.segment);
                        });
                        row.col(|ui| {
                            ui.label(combo.count.to_string());
                        });
                    });
                }
            });
    });
}

/// Top customers by revenue, with each customer's dominant combo.
/// Omitted when the customer column is absent.
pub fn customer_section(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else { return };
    if !ds.columns.customer_id {
        return;
    }

    section_heading(ui, "Top 5 Customers");
    let customers = report::top_customers(ds, report::TOP_CUSTOMERS);
    if customers.is_empty() {
        ui.label("No orders.");
        return;
    }

    ui.push_id("customer_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .vscroll(false)
            .striped(true)
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Customer");
                });
                header.col(|ui| {
                    ui.strong("Orders");
                });
                header.col(|ui| {
                    ui.strong("Revenue");
                });
                header.col(|ui| {
                    ui.strong("Top Combo");
                });
            })
            .body(|mut body| {
                for customer in &customers {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&customer.customer_id);
                        });
                        row.col(|ui| {
                            ui.label(customer.order_count.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format_currency(customer.total_revenue));
                        });
                        row.col(|ui| {
                            let combo = customer
                                .dominant_combo
                                .as_ref()
                                .map(|c| format!("{} / {}", c.ship_mode, c.segment))
                                .unwrap_or_else(|| "—".to_string());
                            ui.label(combo);
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Value filter
// ---------------------------------------------------------------------------

/// Min/max slider pair bounded by the dataset's global value range.
pub fn value_filter(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        return;
    }

    section_heading(ui, "Filter Orders by Value");
    let Some((lo, hi)) = state.dataset.as_ref().and_then(|ds| ds.value_bounds) else {
        ui.label("No orders to filter.");
        return;
    };
    let (mut min, mut max) = state.value_range;
    let mut changed = false;
    changed |= ui
        .add(Slider::new(&mut min, lo..=hi).text("Min value"))
        .changed();
    changed |= ui
        .add(Slider::new(&mut max, lo..=hi).text("Max value"))
        .changed();
    if changed {
        state.set_value_range(min, max);
    }

    let total = state.dataset.as_ref().map_or(0, OrderDataset::len);
    ui.label(format!(
        "{} of {total} orders in range",
        state.filtered_indices.len()
    ));
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn section_heading(ui: &mut Ui, title: &str) {
    ui.add_space(16.0);
    ui.heading(title);
    ui.separator();
}

/// `1234567.891` → `$1,234,567.89`
pub fn format_currency(v: f64) -> String {
    let negative = v < 0.0;
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::format_currency;

    #[test]
    fn currency_formatting_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(25.0), "$25.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.0), "-$42.00");
    }
}
