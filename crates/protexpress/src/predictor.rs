use crate::error::PredictError;
use crate::ranking::{apply_rate_fallback, rank_methods};
use crate::result::{MethodScore, PredictionResult};
use protexpress_core::{Feature, FeatureVector};
use protexpress_models::{ArtifactError, ArtifactSet, Classifier, Regressor, Role, SuccessRates};
use std::path::Path;
use tracing::{debug, info};

/// Tag classifiers emit this label when no tag is recommended.
pub const UNKNOWN_TAG: &str = "unknown";

/// Runs every loaded model against one sequence and assembles the result.
///
/// The artifacts are fixed at construction; `predict` takes `&self` and may be
/// called concurrently.
#[derive(Debug)]
pub struct Predictor {
    artifacts: ArtifactSet,
    success_rates: SuccessRates,
}

impl Predictor {
    pub fn new(artifacts: ArtifactSet, success_rates: SuccessRates) -> Self {
        Self {
            artifacts,
            success_rates,
        }
    }

    /// Load the models and the optional success-rate table from `dir`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let artifacts = ArtifactSet::from_dir(dir)?;
        let success_rates = SuccessRates::from_dir(dir)?;
        info!(
            dir = %dir.display(),
            methods = artifacts.methods.len(),
            success_rates = success_rates.len(),
            buffer_ph = artifacts.buffer_ph.is_some(),
            salt_mm = artifacts.salt_mm.is_some(),
            yield_mg = artifacts.yield_mg.is_some(),
            "loaded predictor artifacts"
        );
        Ok(Self::new(artifacts, success_rates))
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    pub fn success_rates(&self) -> &SuccessRates {
        &self.success_rates
    }

    pub fn predict(&self, sequence: &str) -> Result<PredictionResult, PredictError> {
        let features = FeatureVector::from_sequence(sequence)?;
        self.predict_features(&features)
    }

    pub fn predict_features(
        &self,
        features: &FeatureVector,
    ) -> Result<PredictionResult, PredictError> {
        let expression = self
            .artifacts
            .expression
            .positive_probability(features)
            .map_err(PredictError::inference(Role::Expression.to_string()))?;

        let tag_n = self
            .artifacts
            .tag_n
            .predict_label(features)
            .map_err(PredictError::inference(Role::TagN.to_string()))?;
        let tag_c = self
            .artifacts
            .tag_c
            .predict_label(features)
            .map_err(PredictError::inference(Role::TagC.to_string()))?;

        let scores = self
            .artifacts
            .methods
            .iter()
            .map(|(name, model)| {
                model
                    .positive_probability(features)
                    .map(|p| MethodScore::new(name.as_str(), p))
                    .map_err(PredictError::inference(format!("method `{name}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ranked = apply_rate_fallback(rank_methods(scores), &self.success_rates);

        let buffer_ph = regress(self.artifacts.buffer_ph.as_deref(), features, Role::BufferPh)?;
        let salt_mm = regress(self.artifacts.salt_mm.as_deref(), features, Role::SaltMm)?;
        let yield_mg = regress(self.artifacts.yield_mg.as_deref(), features, Role::YieldMg)?;

        debug!(
            length = features[Feature::Length],
            expression,
            methods = ranked.len(),
            "prediction complete"
        );

        Ok(PredictionResult::new(
            expression,
            recommended_tag(tag_n),
            recommended_tag(tag_c),
            ranked,
            buffer_ph,
            salt_mm,
            yield_mg,
        ))
    }
}

fn recommended_tag(label: String) -> Option<String> {
    (label != UNKNOWN_TAG).then_some(label)
}

fn regress(
    model: Option<&dyn Regressor>,
    features: &FeatureVector,
    role: Role,
) -> Result<Option<f64>, PredictError> {
    model
        .map(|m| m.predict_value(features))
        .transpose()
        .map_err(PredictError::inference(role.to_string()))
}
