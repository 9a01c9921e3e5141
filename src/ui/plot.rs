use eframe::egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points, uniform_grid_spacer};

use crate::data::filter::ranking;
use crate::data::model::{Indicator, Record};
use crate::data::region::Region;
use crate::state::AppState;
use crate::ui::{format_opt, metric};

const MORTALITY: Indicator = Indicator::MortalidadeAdultosIdosos;

// ---------------------------------------------------------------------------
// Overview tab: headline metrics, ranking, IDHM scatter
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        ui.label("No data for the selected year.");
        return;
    };

    ui.label(RichText::new(format!("Indicadores de {}", summary.year)).strong());
    ui.columns(4, |cols: &mut [Ui]| {
        metric(
            &mut cols[0],
            "Mortalidade Média (por 100k, adultos/idosos)",
            &format_opt(summary.mortality_mean, 2),
            None,
        );
        metric(&mut cols[1], "IDHM Médio", &format_opt(summary.idhm_mean, 3), None);
        metric(&mut cols[2], "Leitos SUS (Média)", &format_opt(summary.beds_mean, 1), None);
        metric(&mut cols[3], "Estados Analisados", &summary.state_count.to_string(), None);
    });
    ui.separator();

    let rows = state.visible_rows();
    ui.columns(2, |cols: &mut [Ui]| {
        ranking_chart(&mut cols[0], state, &rows);
        idhm_scatter(&mut cols[1], state, &rows);
    });
    ui.separator();
    state_table(ui, &rows);
}

/// Horizontal bars, lowest mortality at the bottom, one series per region.
fn ranking_chart(ui: &mut Ui, state: &AppState, rows: &[&Record]) {
    ui.label(RichText::new("Ranking Nacional de Mortalidade").strong());
    let ranked = ranking(rows, MORTALITY);
    let names: Vec<String> = ranked.iter().map(|r| r.estado.clone()).collect();

    Plot::new("ranking_plot")
        .legend(Legend::default())
        .x_axis_label("Óbitos por 100k")
        .y_axis_formatter(move |mark, _range| rank_label(&names, mark.value))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .height(600.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for region in Region::ALL.into_iter().chain([Region::Other]) {
                let bars: Vec<Bar> = ranked
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.region() == region)
                    .filter_map(|(pos, r)| {
                        let v = r.get(MORTALITY)?;
                        Some(Bar::new(pos as f64, v).name(&r.estado).width(0.8))
                    })
                    .collect();
                if bars.is_empty() {
                    continue;
                }
                let chart = BarChart::new(bars)
                    .horizontal()
                    .color(state.colors.color_for(region))
                    .name(region.name());
                plot_ui.bar_chart(chart);
            }
        });
}

/// State name for a bar position, empty between and beyond the bars.
fn rank_label(names: &[String], value: f64) -> String {
    let index = value.round();
    if index < 0.0 || (value - index).abs() > 1e-6 {
        return String::new();
    }
    names.get(index as usize).cloned().unwrap_or_default()
}

/// IDHM vs mortality; marker radius grows with population.
fn idhm_scatter(ui: &mut Ui, state: &AppState, rows: &[&Record]) {
    ui.label(RichText::new("Desenvolvimento (IDH) vs Mortalidade").strong());
    let max_pop = rows
        .iter()
        .filter_map(|r| r.population())
        .fold(0.0_f64, f64::max);

    Plot::new("idhm_scatter")
        .legend(Legend::default())
        .x_axis_label("IDHM")
        .y_axis_label("Óbitos por 100k")
        .height(400.0)
        .show(ui, |plot_ui| {
            for r in rows {
                let (Some(x), Some(y)) = (r.get(Indicator::Idhm), r.get(MORTALITY)) else {
                    continue;
                };
                let radius = marker_radius(r.population(), max_pop);
                let points = Points::new(PlotPoints::new(vec![[x, y]]))
                    .radius(radius)
                    .filled(true)
                    .color(state.colors.color_for(r.region()))
                    .name(r.region().name());
                plot_ui.points(points);
            }
        });
}

/// Per-state rows of the selected year with the derived region columns.
fn state_table(ui: &mut Ui, rows: &[&Record]) {
    egui::CollapsingHeader::new("Dados por estado")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("state_table")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui: &mut Ui| {
                    for header in ["Estado", "Regiao", "Regiao_Cod", "IDHM", "Mortalidade"] {
                        ui.strong(header);
                    }
                    ui.end_row();
                    for r in rows {
                        ui.label(r.estado.as_str());
                        ui.label(r.region().name());
                        ui.label(r.region_code().to_string());
                        ui.label(format_opt(r.get(Indicator::Idhm), 3));
                        ui.label(format_opt(r.get(MORTALITY), 2));
                        ui.end_row();
                    }
                });
        });
}

/// Area-proportional radius between 3 and 18 px.
fn marker_radius(population: Option<f64>, max_population: f64) -> f32 {
    const MIN: f32 = 3.0;
    const MAX: f32 = 18.0;
    match population {
        Some(p) if max_population > 0.0 && p > 0.0 => {
            let share = (p / max_population).sqrt() as f32;
            MIN + (MAX - MIN) * share
        }
        _ => MIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_scales_with_population() {
        assert_eq!(marker_radius(None, 100.0), 3.0);
        assert_eq!(marker_radius(Some(100.0), 100.0), 18.0);
        assert_eq!(marker_radius(Some(10.0), 0.0), 3.0);
        let quarter = marker_radius(Some(25.0), 100.0);
        assert!((quarter - 10.5).abs() < 1e-5);
    }

    #[test]
    fn rank_labels_follow_bar_positions() {
        let names = vec!["Bahia".to_string(), "Acre".to_string()];
        assert_eq!(rank_label(&names, 0.0), "Bahia");
        assert_eq!(rank_label(&names, 1.0), "Acre");
        assert_eq!(rank_label(&names, 0.5), "");
        assert_eq!(rank_label(&names, 2.0), "");
        assert_eq!(rank_label(&names, -1.0), "");
    }
}
