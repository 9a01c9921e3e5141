use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "ZETTA_CONFIG";
pub const ROOT_ENV: &str = "ZETTA_ROOT";
pub const TARGET_ENV: &str = "ZETTA_TARGET";
pub const DEFAULT_CONFIG_FILE: &str = "zetta.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Where to look for data, models and images.  Relative paths resolve
/// against `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub root: PathBuf,
    pub data_candidates: Vec<PathBuf>,
    pub model_dirs: Vec<PathBuf>,
    pub image_dirs: Vec<PathBuf>,
    /// Column the simulator predicts.
    pub target_column: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            root: PathBuf::from("."),
            data_candidates: vec![
                PathBuf::from("dados/saidas_1_parte/dataset_final_tratado.csv"),
                PathBuf::from("saidas_1_parte/dataset_final_tratado.csv"),
            ],
            model_dirs: vec![PathBuf::from("modelos"), PathBuf::from("dados/modelos")],
            image_dirs: vec![
                PathBuf::from("."),
                PathBuf::from("dados/saidas_2_parte"),
                PathBuf::from("saidas_2_parte"),
            ],
            target_column: "Taxa_Mortes_Isquemicas_Adultos_Idosos_por_100k".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then the config file (if any), then environment overrides.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut settings = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Settings::default()
                }
            }
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Using config {}", path.display());
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid settings JSON")
    }

    /// Apply `ZETTA_ROOT` / `ZETTA_TARGET` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ROOT_ENV).filter(|s| !s.is_empty()) {
            self.root = PathBuf::from(root);
        }
        if let Some(target) = lookup(TARGET_ENV).filter(|s| !s.is_empty()) {
            self.target_column = target;
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn data_paths(&self) -> Vec<PathBuf> {
        self.data_candidates.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn model_paths(&self) -> Vec<PathBuf> {
        self.model_dirs.iter().map(|p| self.resolve(p)).collect()
    }

    pub fn image_paths(&self) -> Vec<PathBuf> {
        self.image_dirs.iter().map(|p| self.resolve(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let s = Settings::from_json(r#"{ "root": "/srv/zetta" }"#).unwrap();
        assert_eq!(s.root, PathBuf::from("/srv/zetta"));
        assert_eq!(s.model_dirs, Settings::default().model_dirs);
        assert_eq!(
            s.data_paths()[0],
            PathBuf::from("/srv/zetta/dados/saidas_1_parte/dataset_final_tratado.csv")
        );
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Settings::from_json(r#"{ "root": 3 }"#).is_err());
    }

    #[test]
    fn env_overrides() {
        let mut s = Settings::default();
        s.apply_env(|key| match key {
            ROOT_ENV => Some("/data".into()),
            TARGET_ENV => Some("Taxa_Mortes_Isquemicas_Total_por_100k".into()),
            _ => None,
        });
        assert_eq!(s.root, PathBuf::from("/data"));
        assert_eq!(s.target_column, "Taxa_Mortes_Isquemicas_Total_por_100k");

        let mut untouched = Settings::default();
        untouched.apply_env(|_| Some(String::new()));
        assert_eq!(untouched, Settings::default());
    }

    #[test]
    fn absolute_paths_ignore_root() {
        let s = Settings {
            root: PathBuf::from("/base"),
            model_dirs: vec![PathBuf::from("/abs/modelos"), PathBuf::from("rel")],
            ..Settings::default()
        };
        assert_eq!(
            s.model_paths(),
            vec![PathBuf::from("/abs/modelos"), PathBuf::from("/base/rel")]
        );
    }
}
