//! The model bundle: regressor + categorical encoders + feature layout.
//!
//! A bundle is built once and only read afterwards. It is `Send + Sync`, so the
//! registry can hand out `&'static` references to any number of concurrent
//! predictions.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use nalgebra::DMatrix;

use crate::error::EngineError;
use crate::models::encoder::LabelEncoder;
use crate::models::ensemble::{GradientBoostedTrees, Regressor};

const REGRESSOR_ARTIFACT: &str = "regressor artifact";
const ENCODER_ARTIFACT: &str = "encoder artifact";

#[derive(Debug)]
pub struct ModelBundle {
    regressor: Box<dyn Regressor>,
    encoders: HashMap<String, LabelEncoder>,
    feature_names: Vec<String>,
    log_target: bool,
}

impl ModelBundle {
    /// Assemble a bundle from parts.
    ///
    /// The regressor's input width must match `feature_names`.
    pub fn new(
        regressor: impl Regressor + 'static,
        encoders: HashMap<String, LabelEncoder>,
        feature_names: Vec<String>,
        log_target: bool,
    ) -> Result<Self, EngineError> {
        if regressor.n_features() != feature_names.len() {
            return Err(EngineError::Configuration(format!(
                "regressor expects {} features but {} feature names were given",
                regressor.n_features(),
                feature_names.len()
            )));
        }
        Ok(Self {
            regressor: Box::new(regressor),
            encoders,
            feature_names,
            log_target,
        })
    }

    /// Build a bundle from a tree ensemble; feature layout and target
    /// transform come from the ensemble artifact itself.
    pub fn from_ensemble(
        model: GradientBoostedTrees,
        encoders: HashMap<String, LabelEncoder>,
    ) -> Result<Self, EngineError> {
        let feature_names = model.feature_names.clone();
        let log_target = model.log_target;
        Self::new(model, encoders, feature_names, log_target)
    }

    /// Load both artifacts from disk.
    pub fn load(model_path: &Path, encoders_path: &Path) -> Result<Self, EngineError> {
        let model_json = fs::read_to_string(model_path).map_err(|e| {
            EngineError::model_load(REGRESSOR_ARTIFACT, model_path.display(), e)
        })?;
        let encoders_json = fs::read_to_string(encoders_path).map_err(|e| {
            EngineError::model_load(ENCODER_ARTIFACT, encoders_path.display(), e)
        })?;

        let model = parse_regressor(&model_json, &model_path.display().to_string())?;
        let encoders = parse_encoders(&encoders_json, &encoders_path.display().to_string())?;
        Self::from_ensemble(model, encoders)
    }

    /// Build a bundle from in-memory artifact JSON.
    pub fn from_json(model_json: &str, encoders_json: &str) -> Result<Self, EngineError> {
        let model = parse_regressor(model_json, "<memory>")?;
        let encoders = parse_encoders(encoders_json, "<memory>")?;
        Self::from_ensemble(model, encoders)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn encoder(&self, column: &str) -> Option<&LabelEncoder> {
        self.encoders.get(column)
    }

    pub fn log_target(&self) -> bool {
        self.log_target
    }

    /// Run the regressor on a single feature vector.
    pub fn predict_one(&self, features: &[f64]) -> Result<f64, EngineError> {
        if features.len() != self.feature_names.len() {
            return Err(EngineError::Configuration(format!(
                "feature vector has {} values, model expects {}",
                features.len(),
                self.feature_names.len()
            )));
        }
        let x = DMatrix::from_row_slice(1, features.len(), features);
        let y = self.regressor.predict(&x);
        y.iter().next().copied().ok_or_else(|| {
            EngineError::Unexpected("regressor returned no prediction".into())
        })
    }
}

fn parse_regressor(json: &str, path: &str) -> Result<GradientBoostedTrees, EngineError> {
    let model: GradientBoostedTrees = serde_json::from_str(json)
        .map_err(|e| EngineError::model_load(REGRESSOR_ARTIFACT, path, e))?;
    model
        .validate()
        .map_err(|e| EngineError::model_load(REGRESSOR_ARTIFACT, path, e))?;
    Ok(model)
}

fn parse_encoders(json: &str, path: &str) -> Result<HashMap<String, LabelEncoder>, EngineError> {
    serde_json::from_str(json).map_err(|e| EngineError::model_load(ENCODER_ARTIFACT, path, e))
}
