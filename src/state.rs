use std::path::PathBuf;
use std::sync::Arc;

use crate::color::RegionColors;
use crate::data::filter::{YearSummary, rows_for_year};
use crate::data::loader::LoadError;
use crate::data::model::{Dataset, Record};
use crate::data::region::Region;
use crate::predict::scenario::ScenarioInput;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Simulator,
    Explainability,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Simulator, Tab::Explainability];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "📊 Panorama Nacional",
            Tab::Simulator => "🤖 Simulador de Cenários",
            Tab::Explainability => "🧠 Inteligência do Modelo",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset shown in the views (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Load failure that blocks every data view.
    pub load_error: Option<LoadError>,

    /// Year used by every view; defaults to the newest one.
    pub selected_year: Option<i32>,

    /// Headline numbers for `selected_year` (cached).
    pub summary: Option<YearSummary>,

    pub tab: Tab,

    /// Explainability image lookup, redone each time its tab is entered.
    /// The inner `None` means the image was looked for and not found.
    pub explain_image: Option<Option<PathBuf>>,

    /// Region chosen in the simulator; `scenario.regiao_cod` follows it.
    pub scenario_region: Region,
    pub scenario: ScenarioInput,

    pub colors: RegionColors,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Last error written to the log by a view, to log each failure once.
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            load_error: None,
            selected_year: None,
            summary: None,
            tab: Tab::Overview,
            explain_image: None,
            scenario_region: Region::Norte,
            scenario: ScenarioInput::default(),
            colors: RegionColors::default(),
            status_message: None,
            last_error: None,
        }
    }
}

impl AppState {
    /// Ingest a loaded dataset and select its newest year.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        if dataset.is_empty() {
            log::warn!("{} has a header but no records", dataset.source.display());
        }
        self.selected_year = dataset.years().first().copied();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.refresh_summary();
    }

    pub fn set_load_error(&mut self, err: LoadError) {
        self.dataset = None;
        self.selected_year = None;
        self.summary = None;
        self.load_error = Some(err);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        if tab == Tab::Explainability {
            self.explain_image = None;
        }
    }

    pub fn select_year(&mut self, year: i32) {
        self.selected_year = Some(year);
        self.refresh_summary();
    }

    pub fn set_scenario_region(&mut self, region: Region) {
        self.scenario_region = region;
        self.scenario = self.scenario.with_region(region);
    }

    /// Log `message` unless it is the error already reported last frame.
    pub fn report_error(&mut self, message: &str) {
        if self.last_error.as_deref() != Some(message) {
            log::error!("{message}");
            self.last_error = Some(message.to_string());
        }
    }

    /// Records of the selected year.
    pub fn visible_rows(&self) -> Vec<&Record> {
        match (&self.dataset, self.selected_year) {
            (Some(ds), Some(year)) => rows_for_year(ds, year),
            _ => Vec::new(),
        }
    }

    fn refresh_summary(&mut self) {
        self.summary = match (&self.dataset, self.selected_year) {
            (Some(ds), Some(year)) => Some(YearSummary::compute(ds, year)),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::Indicator;

    fn dataset() -> Arc<Dataset> {
        let rec = |estado: &str, ano, m| {
            let indicators = BTreeMap::from([(Indicator::MortalidadeAdultosIdosos, m)]);
            Record::new(estado.to_string(), ano, indicators, BTreeMap::new())
        };
        Arc::new(Dataset::new(
            vec![rec("Acre", 2019, 10.0), rec("Acre", 2020, 4.0), rec("Pará", 2020, 8.0)],
            vec!["Estado".into(), "ano".into()],
            PathBuf::from("mem.csv"),
        ))
    }

    #[test]
    fn newest_year_is_selected_on_load() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.selected_year, Some(2020));
        assert_eq!(state.visible_rows().len(), 2);
        assert_eq!(state.summary.as_ref().unwrap().mortality_mean, Some(6.0));

        state.select_year(2019);
        assert_eq!(state.visible_rows().len(), 1);
        assert_eq!(state.summary.as_ref().unwrap().mortality_mean, Some(10.0));
    }

    #[test]
    fn load_error_clears_data() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_load_error(LoadError::MissingColumn("Estado"));
        assert!(state.dataset.is_none());
        assert!(state.visible_rows().is_empty());
        assert!(matches!(
            state.load_error,
            Some(LoadError::MissingColumn("Estado"))
        ));
    }

    #[test]
    fn image_lookup_is_reset_only_when_entering_its_tab() {
        let mut state = AppState::default();
        state.select_tab(Tab::Explainability);
        state.explain_image = Some(None);

        // Re-selecting the current tab keeps the cached lookup.
        state.select_tab(Tab::Explainability);
        assert_eq!(state.explain_image, Some(None));

        state.select_tab(Tab::Simulator);
        assert_eq!(state.explain_image, Some(None));

        state.select_tab(Tab::Explainability);
        assert_eq!(state.tab, Tab::Explainability);
        assert!(state.explain_image.is_none());
    }

    #[test]
    fn repeated_errors_are_remembered_once() {
        let mut state = AppState::default();
        state.report_error("boom");
        state.report_error("boom");
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        state.report_error("other");
        assert_eq!(state.last_error.as_deref(), Some("other"));
    }

    #[test]
    fn scenario_region_drives_code() {
        let mut state = AppState::default();
        assert_eq!(state.scenario.regiao_cod, 1);
        state.set_scenario_region(Region::CentroOeste);
        assert_eq!(state.scenario.regiao_cod, 3);
    }
}
