use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – time control
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("💙 Zetta Lab 2025").strong());
    });
    ui.separator();

    ui.strong("📅 Controle de Tempo");
    let years = match &state.dataset {
        Some(ds) => ds.years(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let current = state.selected_year;
    let mut chosen = current;
    egui::ComboBox::from_id_salt("year")
        .selected_text(current.map(|y| y.to_string()).unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for year in &years {
                ui.selectable_value(&mut chosen, Some(*year), year.to_string());
            }
        });
    if chosen != current {
        if let Some(year) = chosen {
            log::info!("Selected year {year}");
            state.select_year(year);
        }
    }

    ui.separator();
    ui.label(RichText::new("Sistema de Apoio à Decisão").weak());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(year)) = (&state.dataset, state.selected_year) {
            ui.label(format!(
                "{} records, {} for {year}",
                ds.len(),
                state.visible_rows().len()
            ))
            .on_hover_text(format!(
                "{}\n{}",
                ds.source.display(),
                ds.columns.join(", ")
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Tab strip under the heading.
pub fn tabs(ui: &mut Ui, state: &mut AppState) {
    let mut chosen = state.tab;
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut chosen, tab, tab.title());
        }
    });
    state.select_tab(chosen);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Load an explicit file, bypassing the candidate search and the cache.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("CSV (;)", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_csv(&path) {
            Ok(dataset) => {
                log::info!(
                    "Opened {} with {} records over years {:?}",
                    path.display(),
                    dataset.len(),
                    dataset.years()
                );
                state.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
