use std::ops::RangeInclusive;

use super::regressor::{FeatureFrame, PredictionError, Regressor};
use crate::data::region::Region;

/// Hint shown next to a prediction failure.
pub const SCHEMA_HINT: &str =
    "Check that the model was trained with the 'Regiao_Cod' column in the same feature order.";

// ---------------------------------------------------------------------------
// ScenarioInput – one hypothetical state profile
// ---------------------------------------------------------------------------

/// Inputs of the what-if simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioInput {
    pub idhm: f64,
    pub gini: f64,
    pub leitos_sus_10k: f64,
    pub fumantes_pct: f64,
    pub pib_pct: f64,
    pub regiao_cod: u8,
}

impl ScenarioInput {
    pub const IDHM_RANGE: RangeInclusive<f64> = 0.5..=0.9;
    pub const GINI_RANGE: RangeInclusive<f64> = 0.3..=0.7;
    pub const LEITOS_RANGE: RangeInclusive<f64> = 0.0..=50.0;
    pub const FUMANTES_RANGE: RangeInclusive<f64> = 5.0..=25.0;
    pub const PIB_RANGE: RangeInclusive<f64> = -5.0..=5.0;

    /// Feature columns, in the order the model was trained with.
    pub const FEATURES: [&'static str; 6] = [
        "IDHM",
        "Gini",
        "Leitos_SUS|10k",
        "%_Fumantes",
        "PIB_%",
        "Regiao_Cod",
    ];

    pub fn with_region(mut self, region: Region) -> Self {
        self.regiao_cod = region.code();
        self
    }

    pub fn to_frame(&self) -> FeatureFrame {
        let values = [
            self.idhm,
            self.gini,
            self.leitos_sus_10k,
            self.fumantes_pct,
            self.pib_pct,
            f64::from(self.regiao_cod),
        ];
        FeatureFrame::single_row(Self::FEATURES.into_iter().zip(values))
    }
}

impl Default for ScenarioInput {
    /// Slider starting positions, region Norte.
    fn default() -> Self {
        ScenarioInput {
            idhm: 0.75,
            gini: 0.5,
            leitos_sus_10k: 15.0,
            fumantes_pct: 10.0,
            pib_pct: 1.0,
            regiao_cod: Region::Norte.code(),
        }
    }
}

/// Predict the rate for one scenario.  Not cached: every call runs the model.
pub fn simulate<M: Regressor + ?Sized>(
    model: &M,
    input: &ScenarioInput,
) -> Result<f64, PredictionError> {
    model
        .predict(&input.to_frame())?
        .first()
        .copied()
        .ok_or(PredictionError::EmptyOutput)
}

// ---------------------------------------------------------------------------
// Prediction – scenario output against the year's baseline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub predicted: f64,
    pub baseline: f64,
    pub delta: f64,
}

impl Prediction {
    pub fn compare(predicted: f64, baseline: f64) -> Self {
        Prediction {
            predicted,
            baseline,
            delta: predicted - baseline,
        }
    }

    pub fn is_reduction(&self) -> bool {
        self.delta < 0.0
    }
}
