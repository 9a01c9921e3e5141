use eframe::egui::{self, RichText, Ui};

use crate::catalog::Catalog;
use crate::data::loader::LoadError;
use crate::state::{AppState, Tab};
use crate::ui::{BAD, explain, panels, plot, simulator};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ZettaApp {
    pub catalog: Catalog,
    pub state: AppState,
}

impl ZettaApp {
    /// Load the dataset through the catalog before the first frame.
    pub fn new(catalog: Catalog) -> Self {
        let mut state = AppState::default();
        match catalog.dataset() {
            Ok(dataset) => {
                log::info!(
                    "Showing {} records from {}",
                    dataset.len(),
                    dataset.source.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("{e}");
                state.set_load_error(e);
            }
        }
        Self { catalog, state }
    }
}

impl eframe::App for ZettaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year control ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.state.load_error {
                load_error(ui, err);
                return;
            }

            ui.heading("Monitoramento Estratégico de Saúde");
            if let Some(year) = self.state.selected_year {
                ui.label(format!(
                    "Panorama Brasil {year} | Doenças Isquêmicas do Coração (Adultos e Idosos)"
                ));
            }
            panels::tabs(ui, &mut self.state);
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| match self.state.tab {
                    Tab::Overview => plot::overview(ui, &self.state),
                    Tab::Simulator => simulator::simulator(ui, &mut self.state, &self.catalog),
                    Tab::Explainability => {
                        explain::explainability(ui, &mut self.state, &self.catalog)
                    }
                });
        });
    }
}

fn load_error(ui: &mut Ui, err: &LoadError) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(load_error_heading(err)).color(BAD).strong());
            ui.code(err.to_string());
            ui.label("Use File → Open dataset… to pick a file.");
        });
    });
}

fn load_error_heading(err: &LoadError) -> &'static str {
    match err {
        LoadError::NotFound { .. } => "❌ Erro Crítico: o arquivo de dados não foi encontrado.",
        _ => "❌ Erro Crítico: o arquivo de dados não pôde ser lido.",
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn heading_names_the_actual_failure() {
        let missing = LoadError::NotFound {
            tried: vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")],
        };
        assert!(load_error_heading(&missing).contains("não foi encontrado"));

        let malformed = LoadError::InvalidYear {
            line: 3,
            value: "dois mil".into(),
        };
        let heading = load_error_heading(&malformed);
        assert!(!heading.contains("não foi encontrado"));
        assert!(heading.contains("não pôde ser lido"));
        assert!(!load_error_heading(&LoadError::MissingColumn("ano")).contains("encontrado"));
    }
}
