/// Prediction layer: fitted model artifacts and the what-if simulator.
///
/// ```text
///  modelos/modelo_<target>.json ──► artifact::load_model ──► FittedModel
///                                                               │
///  ScenarioInput ──► FeatureFrame (training column order) ──────┤
///                                                               ▼
///                                          scenario::simulate ──► f64
/// ```

pub mod artifact;
pub mod regressor;
pub mod scenario;
