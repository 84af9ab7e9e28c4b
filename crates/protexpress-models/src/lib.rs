//! protexpress-models
//!
//! Trained-model plumbing for the expression predictor.
//!
//! - [`Classifier`] / [`Regressor`]: the two capabilities any backend must provide.
//! - [`LinearModel`]: linear / logistic / softmax models stored as safetensors and run with candle.
//! - [`OnnxModel`]: scikit-learn style exports run with ONNX Runtime (`onnx` feature).
//! - [`ArtifactSet`] / [`SuccessRates`]: loading a predictor artifact directory.
//!
mod artifacts;
mod error;
mod linear;
#[cfg(feature = "onnx")]
mod onnx;
mod rates;
mod traits;

pub use artifacts::{ArtifactSet, MethodModel, Role, METHOD_INDEX_FILE};
pub use error::{ArtifactError, InferenceError};
pub use linear::{LinearModel, ModelKind};
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
pub use rates::{SuccessRates, SUCCESS_RATES_FILE};
pub use traits::{Classifier, Regressor};
