use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// FeatureFrame – named columns, one or more rows
// ---------------------------------------------------------------------------

/// A small column-named table fed to a model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureFrame {
    /// A one-row frame from `(column, value)` pairs, order preserved.
    pub fn single_row<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let (columns, row): (Vec<String>, Vec<f64>) =
            pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        FeatureFrame {
            columns,
            rows: vec![row],
        }
    }

    /// Check the frame has exactly the `expected` columns in the same order.
    pub fn check_schema(&self, expected: &[String]) -> Result<(), PredictionError> {
        if let Some(missing) = expected.iter().find(|e| !self.columns.contains(e)) {
            return Err(PredictionError::MissingFeature(missing.clone()));
        }
        if let Some(extra) = self.columns.iter().find(|c| !expected.contains(c)) {
            return Err(PredictionError::UnexpectedFeature(extra.clone()));
        }
        if self.columns != expected {
            return Err(PredictionError::FeatureOrder {
                expected: expected.to_vec(),
                got: self.columns.clone(),
            });
        }
        for row in &self.rows {
            if let Some((col, v)) = self.columns.iter().zip(row).find(|(_, v)| !v.is_finite()) {
                return Err(PredictionError::NonFinite {
                    feature: col.clone(),
                    value: *v,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("feature '{0}' expected by the model is missing from the input")]
    MissingFeature(String),

    #[error("feature '{0}' was not seen when the model was fitted")]
    UnexpectedFeature(String),

    #[error("feature order differs from fit time: expected {expected:?}, got {got:?}")]
    FeatureOrder { expected: Vec<String>, got: Vec<String> },

    #[error("feature '{feature}' has non-finite value {value}")]
    NonFinite { feature: String, value: f64 },

    #[error("model produced no output")]
    EmptyOutput,
}

// ---------------------------------------------------------------------------
// Regressor trait
// ---------------------------------------------------------------------------

/// A fitted model mapping a feature row to a scalar.
pub trait Regressor {
    /// Column names seen at fit time, in order.
    fn feature_names(&self) -> &[String];

    /// Predict one row already aligned to `feature_names`.
    fn predict_row(&self, row: &[f64]) -> f64;

    /// One prediction per frame row, after checking the schema.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>, PredictionError> {
        frame.check_schema(self.feature_names())?;
        Ok(frame.rows.iter().map(|r| self.predict_row(r)).collect())
    }
}

// ---------------------------------------------------------------------------
// Linear model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

// ---------------------------------------------------------------------------
// Tree ensemble (random forest / gradient boosting)
// ---------------------------------------------------------------------------

/// One decision tree in flat node-array form.  `children_left[i] == -1`
/// marks node `i` as a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl Tree {
    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        // Bounded by node count; validated trees never loop.
        for _ in 0..self.value.len() {
            let left = self.children_left[node];
            if left < 0 {
                break;
            }
            let x = row[self.feature[node] as usize];
            node = if x <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let n = self.value.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err("tree node arrays differ in length".into());
        }
        for i in 0..n {
            let (l, r) = (self.children_left[i], self.children_right[i]);
            if l < 0 {
                continue;
            }
            let in_range = |c: i64| c > i as i64 && (c as usize) < n;
            if !in_range(l) || !in_range(r) {
                return Err(format!("node {i} has child index out of range"));
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= n_features {
                return Err(format!("node {i} splits on unknown feature {f}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs.
    Mean,
    /// `base_score + learning_rate * sum` of tree outputs.
    Sum,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub feature_names: Vec<String>,
    pub trees: Vec<Tree>,
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "one")]
    pub learning_rate: f64,
}

impl Regressor for TreeEnsemble {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + self.learning_rate * total,
        }
    }
}

// ---------------------------------------------------------------------------
// FittedModel – what a model artifact decodes to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedModel {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl FittedModel {
    /// Structural checks that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            FittedModel::Linear(m) => {
                if m.coefficients.len() != m.feature_names.len() {
                    return Err(format!(
                        "{} coefficients for {} features",
                        m.coefficients.len(),
                        m.feature_names.len()
                    ));
                }
                Ok(())
            }
            FittedModel::TreeEnsemble(m) => {
                if m.trees.is_empty() {
                    return Err("ensemble has no trees".into());
                }
                for (i, tree) in m.trees.iter().enumerate() {
                    tree.validate(m.feature_names.len())
                        .map_err(|e| format!("tree {i}: {e}"))?;
                }
                Ok(())
            }
        }
    }
}

impl Regressor for FittedModel {
    fn feature_names(&self) -> &[String] {
        match self {
            FittedModel::Linear(m) => m.feature_names(),
            FittedModel::TreeEnsemble(m) => m.feature_names(),
        }
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        match self {
            FittedModel::Linear(m) => m.predict_row(row),
            FittedModel::TreeEnsemble(m) => m.predict_row(row),
        }
    }
}
