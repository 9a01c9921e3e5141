use std::path::PathBuf;

use eframe::egui::{self, Ui};

use crate::catalog::Catalog;
use crate::predict::artifact::explainability_image_name;
use crate::state::AppState;
use crate::ui::WARN;

pub fn explainability(ui: &mut Ui, state: &mut AppState, catalog: &Catalog) {
    ui.heading("O que define o Risco?");
    ui.label("Interpretação do Modelo (SHAP Values)");
    ui.add_space(8.0);

    let target = &catalog.settings().target_column;
    let image = state
        .explain_image
        .get_or_insert_with(|| locate_image(catalog, target));
    match image {
        Some(path) => {
            egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                ui.add(
                    egui::Image::new(format!("file://{}", path.display()))
                        .max_width(ui.available_width())
                        .shrink_to_fit(),
                );
                ui.label(
                    egui::RichText::new("Impacto das Variáveis na Decisão do Modelo").weak(),
                );
            });
        }
        None => {
            ui.colored_label(
                WARN,
                format!(
                    "Imagem SHAP não encontrada. Verifique se o arquivo '{}' foi gerado.",
                    explainability_image_name(target)
                ),
            );
        }
    }
}

/// Absolute path, so the `file://` URI does not depend on the working directory.
fn locate_image(catalog: &Catalog, target: &str) -> Option<PathBuf> {
    let path = catalog.explainability_image(target)?;
    log::info!("Explainability image: {}", path.display());
    Some(std::fs::canonicalize(&path).unwrap_or(path))
}
