//! Model capabilities.
//!
//! Backends are looked up by role and invoked through these traits only.
//! Implementations must be read-only during inference: `predict_*` takes
//! `&self`, may be called from several threads at once, and must not mutate
//! shared state.
use crate::error::InferenceError;
use protexpress_core::FeatureVector;

pub trait Classifier: Send + Sync {
    /// Class probabilities for a single sample, in the model's class order.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError>;

    /// Most likely class label.
    fn predict_label(&self, features: &FeatureVector) -> Result<String, InferenceError>;

    /// Probability of the positive class (column 1) of a binary classifier.
    fn positive_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let proba = self.predict_proba(features)?;
        proba
            .get(1)
            .copied()
            .ok_or(InferenceError::MissingProbability {
                expected: 2,
                actual: proba.len(),
            })
    }
}

pub trait Regressor: Send + Sync {
    fn predict_value(&self, features: &FeatureVector) -> Result<f64, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneColumn;

    impl Classifier for OneColumn {
        fn predict_proba(&self, _: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
            Ok(vec![1.0])
        }
        fn predict_label(&self, _: &FeatureVector) -> Result<String, InferenceError> {
            Ok("only".to_string())
        }
    }

    #[test]
    fn test_positive_probability_needs_two_columns() {
        let fv = FeatureVector::from_sequence("MKV").unwrap();
        let err = OneColumn.positive_probability(&fv).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::MissingProbability {
                expected: 2,
                actual: 1
            }
        ));
    }
}
