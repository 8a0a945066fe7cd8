use eframe::egui::{Color32, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::color;
use crate::data::model::{HourHistogram, PickupDataset};
use crate::state::AppState;

/// Rows shown in the raw-data table before it gets unwieldy.
const TABLE_ROW_CAP: usize = 100;

/// Height of the map plots.
const MAP_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Central panel – dashboard sections
// ---------------------------------------------------------------------------

/// Render the dashboard: raw table, hour histogram, and the pickup maps.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Uber pickups in NYC — press \"Load data\" to begin");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Raw data");
            raw_table(ui, dataset);
            ui.separator();

            if let Some(hist) = &state.histogram {
                ui.heading("Number of pickups by hour");
                hour_bar_chart(ui, hist);
                ui.separator();
            }

            ui.heading("Map of all pickups");
            all_pickups_map(ui, dataset);
            ui.separator();

            if let Some(view) = &state.filtered {
                ui.heading(format!("Map of all pickups at {}:00", view.hour));
                filtered_map(ui, state, dataset);
                ui.separator();
            }

            if state.show_synthetic {
                ui.heading("Synthetic density layer");
                synthetic_map(ui, state);
            }
        });
}

// ---------------------------------------------------------------------------
// Raw-data table
// ---------------------------------------------------------------------------

fn raw_table(ui: &mut Ui, dataset: &PickupDataset) {
    let n_rows = dataset.len().min(TABLE_ROW_CAP);
    if dataset.len() > n_rows {
        ui.label(format!("First {n_rows} of {} rows", dataset.len()));
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(150.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in ["date/time", "lat", "lon", "base"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, n_rows, |mut row| {
                let p = &dataset.pickups[row.index()];
                row.col(|ui| {
                    ui.label(p.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.4}", p.lat));
                });
                row.col(|ui| {
                    ui.label(format!("{:.4}", p.lon));
                });
                row.col(|ui| {
                    ui.label(&p.base);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Hour histogram bar chart
// ---------------------------------------------------------------------------

fn hour_bar_chart(ui: &mut Ui, hist: &HourHistogram) {
    let bars: Vec<Bar> = hist
        .buckets
        .iter()
        .enumerate()
        .map(|(hour, &count)| {
            Bar::new(hour as f64, f64::from(count))
                .width(0.9)
                .fill(color::hour_color(hour as u32))
                .name(format!("{hour}:00"))
        })
        .collect();

    Plot::new("hour_histogram")
        .height(220.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_label("hour of day")
        .y_axis_label("pickups")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Pickup maps (lon/lat scatter standing in for map tiles)
// ---------------------------------------------------------------------------

/// All pickups, coloured by hour of day. One series per non-empty hour so
/// the legend doubles as a colour key.
fn all_pickups_map(ui: &mut Ui, dataset: &PickupDataset) {
    let palette = color::hour_palette();

    let mut by_hour: Vec<Vec<[f64; 2]>> = vec![Vec::new(); 24];
    for p in &dataset.pickups {
        by_hour[p.hour() as usize].push([p.lon, p.lat]);
    }

    Plot::new("all_pickups_map")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .legend(egui_plot::Legend::default())
        .x_axis_label("lon")
        .y_axis_label("lat")
        .show(ui, |plot_ui| {
            for (hour, coords) in by_hour.into_iter().enumerate() {
                if coords.is_empty() {
                    continue;
                }
                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(1.5)
                        .color(palette[hour])
                        .name(format!("{hour}:00")),
                );
            }
        });
}

/// Only the pickups at the slider hour.
fn filtered_map(ui: &mut Ui, state: &AppState, dataset: &PickupDataset) {
    let Some(view) = &state.filtered else {
        return;
    };
    let points: PlotPoints = view.pickups(dataset).map(|p| [p.lon, p.lat]).collect();

    Plot::new("filtered_map")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .x_axis_label("lon")
        .y_axis_label("lat")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(2.0)
                    .color(color::hour_color(view.hour)),
            );
        });
}

/// Decorative normally-distributed scatter around midtown.
fn synthetic_map(ui: &mut Ui, state: &AppState) {
    let points: PlotPoints = state.synthetic_points.iter().copied().collect();

    Plot::new("synthetic_map")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .x_axis_label("lon")
        .y_axis_label("lat")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(2.0)
                    .color(Color32::from_rgba_unmultiplied(255, 0, 0, 160)),
            );
        });
}
