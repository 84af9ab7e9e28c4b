use protexpress_core::SequenceError;
use protexpress_models::InferenceError;
use thiserror::Error;

/// A failed prediction. No partial result accompanies it.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("{role} model failed: {source}")]
    Inference {
        role: String,
        #[source]
        source: InferenceError,
    },
}

impl PredictError {
    pub(crate) fn inference(role: impl Into<String>) -> impl FnOnce(InferenceError) -> Self {
        let role = role.into();
        move |source| PredictError::Inference { role, source }
    }
}
