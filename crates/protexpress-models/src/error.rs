use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading an artifact directory.
///
/// Any of these makes the predictor unusable. A legitimately absent optional
/// artifact is not an error and never produces one of these.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("required artifact `{role}` not found in {dir:?}")]
    Missing { role: &'static str, dir: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid model {path:?}: {reason}")]
    InvalidModel { path: PathBuf, reason: String },

    #[error("unsupported model format for {path:?} (expected .safetensors or .onnx)")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid model parameters: {0}")]
    Parameters(String),

    #[error(transparent)]
    Safetensors(#[from] safetensors::SafeTensorError),

    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[cfg(feature = "onnx")]
    #[error(transparent)]
    Onnx(#[from] ort::Error),
}

/// Failures raised by a model while scoring a feature vector.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("expected at least {expected} class probabilities, model returned {actual}")]
    MissingProbability { expected: usize, actual: usize },

    #[error("model produced no output")]
    EmptyOutput,

    #[error("model output `{0}` has an unsupported type")]
    OutputType(String),

    #[error("shape mismatch: {0}")]
    Shape(String),

    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[cfg(feature = "onnx")]
    #[error(transparent)]
    Onnx(#[from] ort::Error),
}
