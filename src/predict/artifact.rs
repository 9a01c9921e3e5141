use std::path::{Path, PathBuf};

use thiserror::Error;

use super::regressor::FittedModel;
use crate::data::loader::first_existing;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("reading model {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding model {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model {} is malformed: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// `"Taxa X/Y"` → `"taxa_x_y"`.
pub fn model_stem(target: &str) -> String {
    target.replace([' ', '/', '\\'], "_").to_lowercase()
}

pub fn model_file_name(target: &str) -> String {
    format!("modelo_{}.json", model_stem(target))
}

/// Look for the artifact of `target` in `dirs`, in order.
///
/// `Ok(None)` means no candidate file exists: the model has simply not
/// been trained yet.  A file that exists but does not decode is an error.
pub fn load_model(dirs: &[PathBuf], target: &str) -> Result<Option<FittedModel>, ModelError> {
    let file_name = model_file_name(target);
    let candidates: Vec<PathBuf> = dirs.iter().map(|d| d.join(&file_name)).collect();

    match first_existing(&candidates) {
        Some(path) => read_model(path).map(Some),
        None => {
            log::warn!("No model artifact {file_name} in {dirs:?}");
            Ok(None)
        }
    }
}

/// Decode and validate one artifact file.
pub fn read_model(path: &Path) -> Result<FittedModel, ModelError> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model: FittedModel = serde_json::from_str(&text).map_err(|source| ModelError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    model.validate().map_err(|reason| ModelError::Invalid {
        path: path.to_path_buf(),
        reason,
    })?;
    log::info!("Loaded model from {}", path.display());
    Ok(model)
}

// ---------------------------------------------------------------------------
// Explainability image
// ---------------------------------------------------------------------------

/// The target name is used verbatim here, unlike the model file.
pub fn explainability_image_name(target: &str) -> String {
    format!("shap_summary_{target}.png")
}

pub fn find_explainability_image(dirs: &[PathBuf], target: &str) -> Option<PathBuf> {
    let file_name = explainability_image_name(target);
    let candidates: Vec<PathBuf> = dirs.iter().map(|d| d.join(&file_name)).collect();
    first_existing(&candidates).map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINEAR: &str = r#"{
        "kind": "linear",
        "feature_names": ["IDHM"],
        "coefficients": [-10.0],
        "intercept": 20.0
    }"#;

    #[test]
    fn stem_normalisation() {
        assert_eq!(model_stem("Taxa X/Y"), "taxa_x_y");
        assert_eq!(model_stem(r"A\B C"), "a_b_c");
        assert_eq!(
            model_file_name("Taxa_Mortes_Isquemicas_Adultos_Idosos_por_100k"),
            "modelo_taxa_mortes_isquemicas_adultos_idosos_por_100k.json"
        );
    }

    #[test]
    fn absent_model_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = vec![dir.path().join("modelos"), dir.path().join("dados/modelos")];
        assert!(load_model(&dirs, "Taxa X/Y").unwrap().is_none());
    }

    #[test]
    fn second_directory_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("dados/modelos");
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(second.join("modelo_taxa_x_y.json"), LINEAR).unwrap();

        let dirs = vec![dir.path().join("modelos"), second];
        let model = load_model(&dirs, "Taxa X/Y").unwrap().unwrap();
        assert!(matches!(model, FittedModel::Linear(_)));
    }

    #[test]
    fn first_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a");
        let second = dir.path().join("b");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        std::fs::write(first.join("modelo_t.json"), LINEAR).unwrap();
        std::fs::write(second.join("modelo_t.json"), "not json").unwrap();

        assert!(load_model(&[first, second], "T").unwrap().is_some());
    }

    #[test]
    fn corrupt_and_malformed_artifacts_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modelo_bad.json"), "{ nope").unwrap();
        let dirs = vec![dir.path().to_path_buf()];
        assert!(matches!(
            load_model(&dirs, "bad"),
            Err(ModelError::Decode { .. })
        ));

        std::fs::write(
            dir.path().join("modelo_short.json"),
            r#"{"kind":"linear","feature_names":["a","b"],"coefficients":[1.0],"intercept":0.0}"#,
        )
        .unwrap();
        assert!(matches!(
            load_model(&dirs, "short"),
            Err(ModelError::Invalid { .. })
        ));
    }

    #[test]
    fn image_lookup_uses_raw_target() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("saidas_2_parte");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("shap_summary_Taxa_A.png"), b"png").unwrap();

        let dirs = vec![dir.path().to_path_buf(), out.clone()];
        assert_eq!(
            find_explainability_image(&dirs, "Taxa_A"),
            Some(out.join("shap_summary_Taxa_A.png"))
        );
        assert_eq!(find_explainability_image(&dirs, "Taxa_B"), None);
    }
}
