use eframe::egui::{self, RichText, Slider, Ui};

use crate::catalog::Catalog;
use crate::data::region::Region;
use crate::predict::scenario::{Prediction, SCHEMA_HINT, ScenarioInput, simulate};
use crate::state::AppState;
use crate::ui::{BAD, GOOD, WARN, metric};

// ---------------------------------------------------------------------------
// Simulator tab
// ---------------------------------------------------------------------------

pub fn simulator(ui: &mut Ui, state: &mut AppState, catalog: &Catalog) {
    ui.heading("Simulador Preditivo");
    ui.label(
        "Configure um cenário hipotético abaixo. O modelo recalcula a previsão \
         com base nos padrões históricos e regionais.",
    );
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        parameters(&mut cols[0], state);
        projection(&mut cols[1], state, catalog);
    });
}

fn parameters(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("Parâmetros").strong());

    let mut region = state.scenario_region;
    egui::ComboBox::from_id_salt("scenario_region")
        .selected_text(region.name())
        .show_ui(ui, |ui: &mut Ui| {
            for r in Region::ALL {
                ui.selectable_value(&mut region, r, r.name());
            }
        });
    if region != state.scenario_region {
        state.set_scenario_region(region);
    }
    ui.separator();

    let s = &mut state.scenario;
    ui.add(Slider::new(&mut s.idhm, ScenarioInput::IDHM_RANGE).text("IDHM"));
    ui.add(Slider::new(&mut s.gini, ScenarioInput::GINI_RANGE).text("Desigualdade (Gini)"));
    ui.add(Slider::new(&mut s.leitos_sus_10k, ScenarioInput::LEITOS_RANGE).text("Leitos SUS/10k"));
    ui.add(Slider::new(&mut s.fumantes_pct, ScenarioInput::FUMANTES_RANGE).text("Tabagismo (%)"));
    ui.add(Slider::new(&mut s.pib_pct, ScenarioInput::PIB_RANGE).text("PIB (%)"));

    egui::CollapsingHeader::new("ℹ Dúvidas sobre o comportamento?")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new("Por que aumentar Leitos parece aumentar a morte?").strong());
            ui.label(
                "Causalidade reversa: locais com mais mortes (grandes centros) \
                 possuem mais UTIs instaladas.",
            );
            ui.add_space(4.0);
            ui.label(RichText::new("Por que Tabagismo parece proteger?").strong());
            ui.label(
                "Viés de renda: estados com maior IDH historicamente registram \
                 mais tabagismo neste conjunto de dados.",
            );
        });
}

fn projection(ui: &mut Ui, state: &mut AppState, catalog: &Catalog) {
    ui.label(RichText::new("Projeção do Modelo (Adultos/Idosos)").strong());

    let target = catalog.settings().target_column.clone();
    let model = match catalog.model(&target) {
        Ok(Some(model)) => model,
        Ok(None) => {
            ui.colored_label(
                WARN,
                "⚠ Modelo não encontrado na pasta 'modelos'. Gere o arquivo do modelo \
                 antes de usar o simulador.",
            );
            return;
        }
        Err(e) => {
            let msg = format!("Erro ao carregar o modelo: {e}");
            state.report_error(&msg);
            ui.colored_label(BAD, msg);
            return;
        }
    };

    let baseline = state.summary.as_ref().and_then(|s| s.mortality_mean);
    let year = state.selected_year.map(|y| y.to_string()).unwrap_or_default();

    match simulate(model.as_ref(), &state.scenario) {
        Ok(predicted) => {
            let label = format!("Taxa prevista para {}", state.scenario_region);
            match baseline {
                Some(base) => {
                    let p = Prediction::compare(predicted, base);
                    // Lower mortality is the good direction.
                    let color = if p.is_reduction() { GOOD } else { BAD };
                    metric(
                        ui,
                        &label,
                        &format!("{:.2}", p.predicted),
                        Some((format!("{:+.2}", p.delta), color)),
                    );
                    if p.is_reduction() {
                        ui.colored_label(GOOD, "✅ Cenário de Redução de Mortalidade.");
                    } else {
                        ui.colored_label(BAD, "⚠ Cenário de Aumento de Mortalidade.");
                    }
                    ui.label(format!(
                        "Base de comparação (média Brasil {year}): {:.2}",
                        p.baseline
                    ));
                }
                None => {
                    metric(ui, &label, &format!("{predicted:.2}"), None);
                    ui.label(format!("Sem média de referência para {year}."));
                }
            }
            state.last_error = None;
        }
        Err(e) => {
            let msg = format!("Erro na predição: {e}");
            state.report_error(&msg);
            ui.colored_label(BAD, msg);
            ui.colored_label(WARN, SCHEMA_HINT);
        }
    }
}
