use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the left control panel: load controls, hour slider, date picker,
/// selectbox, and the run counter.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Load controls ----
            ui.strong("Data");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Rows:");
                ui.add(
                    egui::DragValue::new(&mut state.row_limit)
                        .range(100..=1_000_000)
                        .speed(100),
                );
            });
            if ui.button("Load data").clicked() {
                state.load_remote();
            }
            if state.loading {
                ui.label("Loading data...");
            } else if state.dataset.is_some() {
                ui.label("Loading data...done!");
            }
            ui.separator();

            // ---- Hour slider ----
            ui.strong("Hour filter");
            let mut hour = state.hour_filter;
            if ui
                .add(egui::Slider::new(&mut hour, 0..=23).text("hour"))
                .changed()
            {
                state.set_hour(hour);
            }
            ui.separator();

            // ---- Date picker ----
            ui.strong("Date input");
            ui.add(egui_extras::DatePickerButton::new(&mut state.selected_date).id_salt("date_input"));
            ui.label(format!("Date is: {}", state.selected_date.format("%Y-%m-%d")));
            ui.separator();

            // ---- Selectbox over dataset dates ----
            ui.strong("Date time selected");
            date_selectbox(ui, state);
            match &state.selected_option {
                Some(option) => ui.label(format!("You selected: {option}")),
                None => ui.label("You selected: (nothing yet)"),
            };
            ui.separator();

            // ---- Synthetic density layer toggle ----
            ui.checkbox(&mut state.show_synthetic, "Show synthetic density layer");
            ui.separator();

            // ---- Run counter ----
            ui.heading(format!("This page has run {} times.", state.run_counter));
            if ui.button("Run it again").clicked() {
                state.mark_run();
            }
        });
}

/// Selectbox listing the distinct dates present in the dataset; starts
/// unselected with a placeholder.
fn date_selectbox(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let selected_text = state
        .selected_option
        .clone()
        .unwrap_or_else(|| "Select date/time...".to_string());

    egui::ComboBox::from_id_salt("date_option")
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            for date in &dataset.dates {
                let label = date.format("%Y-%m-%d").to_string();
                let is_selected = state.selected_option.as_deref() == Some(label.as_str());
                if ui.selectable_label(is_selected, &label).clicked() {
                    state.selected_option = Some(label);
                }
            }
        });
}

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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let filtered = state.filtered.as_ref().map_or(0, |v| v.len());
            ui.label(format!(
                "{} pickups loaded, {} at {}:00",
                ds.len(),
                filtered,
                state.hour_filter
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open pickup data")
        .add_filter("Supported files", &["csv", "gz"])
        .add_filter("CSV", &["csv"])
        .add_filter("Gzipped CSV", &["gz"])
        .pick_file();

    if let Some(path) = file {
        state.load_local(&path);
    }
}
