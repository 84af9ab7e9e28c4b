//! ONNX Runtime backend.
//!
//! Expects scikit-learn style exports (skl2onnx with the zipmap disabled):
//! a single float input of shape `[1, NUM_FEATURES]`; classifiers expose the
//! predicted label as their first output and a `[1, n_classes]` probability
//! tensor; regressors expose one `[1, 1]` output.
//!
use crate::error::{ArtifactError, InferenceError};
use crate::traits::{Classifier, Regressor};
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use protexpress_core::{FeatureVector, NUM_FEATURES};
use std::path::Path;
use tracing::debug;

pub struct OnnxModel {
    session: Session,
    input_name: String,
    output_names: Vec<String>,
}

impl OnnxModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level1)?
            .with_intra_threads(1)?
            .commit_from_file(path)?;

        let invalid = |reason: &str| ArtifactError::InvalidModel {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| invalid("model declares no inputs"))?;
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        if output_names.is_empty() {
            return Err(invalid("model declares no outputs"));
        }
        debug!(
            path = %path.display(),
            input = %input_name,
            outputs = ?output_names,
            "loaded ONNX model"
        );

        Ok(Self {
            session,
            input_name,
            output_names,
        })
    }

    fn input(&self, features: &FeatureVector) -> Result<Array2<f32>, InferenceError> {
        Array2::from_shape_vec((1, NUM_FEATURES), features.to_f32_vec())
            .map_err(|e| InferenceError::Shape(e.to_string()))
    }

    fn first_output(&self) -> &str {
        &self.output_names[0]
    }

    // skl2onnx names it `output_probability`; otherwise take the second output.
    fn probability_output(&self) -> Option<&str> {
        self.output_names
            .iter()
            .find(|name| name.contains("prob"))
            .or_else(|| self.output_names.get(1))
            .map(String::as_str)
    }
}

impl Classifier for OnnxModel {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        let name = self
            .probability_output()
            .ok_or(InferenceError::EmptyOutput)?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => self.input(features)?]?)?;
        let proba = outputs[name].try_extract_tensor::<f32>()?;
        Ok(proba.iter().map(|&p| p as f64).collect())
    }

    fn predict_label(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        let name = self.first_output();
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => self.input(features)?]?)?;
        let label = &outputs[name];
        if let Ok(labels) = label.try_extract_string_tensor() {
            return labels.iter().next().cloned().ok_or(InferenceError::EmptyOutput);
        }
        if let Ok(labels) = label.try_extract_tensor::<i64>() {
            return labels
                .iter()
                .next()
                .map(|l| l.to_string())
                .ok_or(InferenceError::EmptyOutput);
        }
        Err(InferenceError::OutputType(name.to_string()))
    }
}

impl Regressor for OnnxModel {
    fn predict_value(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let name = self.first_output();
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => self.input(features)?]?)?;
        let value = &outputs[name];
        if let Ok(values) = value.try_extract_tensor::<f32>() {
            return values
                .iter()
                .next()
                .map(|&v| v as f64)
                .ok_or(InferenceError::EmptyOutput);
        }
        if let Ok(values) = value.try_extract_tensor::<f64>() {
            return values.iter().next().copied().ok_or(InferenceError::EmptyOutput);
        }
        Err(InferenceError::OutputType(name.to_string()))
    }
}
