//! # protexpress
//!
//! Protein expression and purification recommendations from sequence.
//!
//! A [`Predictor`] holds a loaded artifact directory (see
//! [`protexpress_models::ArtifactSet`]) and turns a raw amino-acid sequence
//! into a [`PredictionResult`]: expression-success probability, affinity-tag
//! recommendations, a ranked list of purification methods, buffer conditions,
//! expected yield, and a suggested protocol summarizing them.
//!
//! When no per-method classifiers are installed the ranking falls back to the
//! historical success rates in `method_success_rates.json`, if present.
//!
//! ```ignore
//! use protexpress::Predictor;
//!
//! let predictor = Predictor::from_dir("artifacts")?;
//! let result = predictor.predict("MHHHHHHSSGVDLGTENLYFQSMAS")?;
//! println!("{}", result.suggested_protocol.expression);
//! ```
mod error;
mod predictor;
mod ranking;
mod result;

pub use error::PredictError;
pub use predictor::{Predictor, UNKNOWN_TAG};
pub use ranking::{apply_rate_fallback, rank_methods};
pub use result::{
    expression_sentence, BufferConditions, MethodScore, PredictionResult, SuggestedProtocol,
    Tagging, DEFAULT_BUFFER_PH, DEFAULT_SALT_MM, PROTOCOL_METHODS,
};
