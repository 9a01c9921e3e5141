use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use crate::config::Settings;
use crate::data::loader::{self, LoadError};
use crate::data::model::Dataset;
use crate::predict::artifact::{self, ModelError};
use crate::predict::regressor::FittedModel;

// ---------------------------------------------------------------------------
// Catalog – process-wide, load-once resources
// ---------------------------------------------------------------------------

/// Owns the dataset and model caches for the lifetime of the process.
///
/// Created once in `main` after [`Settings`] are resolved.  The dataset
/// is parsed on the first successful call to [`Catalog::dataset`]; each
/// model on the first call to [`Catalog::model`] for its target.  Entries
/// are written once and only read afterwards.  A failed dataset load is
/// not cached, so a file added later is picked up on the next call.  A
/// model artifact that fails to decode is cached like absence.
pub struct Catalog {
    settings: Settings,
    dataset: OnceLock<Arc<Dataset>>,
    models: Mutex<HashMap<String, ModelEntry>>,
}

pub type ModelEntry = Result<Option<Arc<FittedModel>>, Arc<ModelError>>;

impl Catalog {
    pub fn new(settings: Settings) -> Self {
        Catalog {
            settings,
            dataset: OnceLock::new(),
            models: Mutex::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The dataset, parsed from the first existing candidate path.
    pub fn dataset(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(ds) = self.dataset.get() {
            return Ok(Arc::clone(ds));
        }
        let loaded = Arc::new(loader::load_dataset(&self.settings.data_paths())?);
        Ok(Arc::clone(self.dataset.get_or_init(|| loaded)))
    }

    /// The fitted model for `target`, `None` if no artifact exists.
    /// Absence and decode failures are cached like a hit.
    pub fn model(&self, target: &str) -> ModelEntry {
        let mut models = self.models.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = models.get(target) {
            return entry.clone();
        }
        let entry = artifact::load_model(&self.settings.model_paths(), target)
            .map(|model| model.map(Arc::new))
            .map_err(Arc::new);
        models.insert(target.to_string(), entry.clone());
        entry
    }

    /// Looked up on every call; the explainability tab keeps the answer.
    pub fn explainability_image(&self, target: &str) -> Option<PathBuf> {
        artifact::find_explainability_image(&self.settings.image_paths(), target)
    }
}
