//! The prediction result bundle.
//!
//! Serializes to:
//!
//! ```json
//! {
//!   "expression_success_prob": 0.82,
//!   "recommended_tag_n": "His6",
//!   "recommended_tag_c": null,
//!   "purification_methods_ranked": [["His-tag IMAC", 0.91], ["Ion exchange", 0.40]],
//!   "buffer_ph": 7.4,
//!   "suggested_protocol": {
//!     "expression": "Predicted success: 82%.",
//!     "tagging": { "N_term": "His6", "C_term": null },
//!     "purification": ["His-tag IMAC", "Ion exchange"],
//!     "buffer": { "pH": 7.4, "salt_mM": null },
//!     "expected_yield_mg": null
//!   }
//! }
//! ```
//!
//! `buffer_ph`, `salt_mm` and `yield_mg` are left out when no regressor was
//! available; inside the protocol they are always present and may be `null`.
use serde::{Deserialize, Serialize};

/// pH to show when no buffer-pH regressor is available.
pub const DEFAULT_BUFFER_PH: f64 = 7.5;
/// Salt (mM) to show when no salt regressor is available.
pub const DEFAULT_SALT_MM: f64 = 300.0;

/// Number of methods carried into the suggested protocol.
pub const PROTOCOL_METHODS: usize = 3;

/// A purification method and its score, serialized as `[name, score]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodScore(pub String, pub f64);

impl MethodScore {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self(name.into(), score)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn score(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub expression_success_prob: f64,
    pub recommended_tag_n: Option<String>,
    pub recommended_tag_c: Option<String>,
    /// Highest score first.
    pub purification_methods_ranked: Vec<MethodScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt_mm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_mg: Option<f64>,
    pub suggested_protocol: SuggestedProtocol,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedProtocol {
    pub expression: String,
    pub tagging: Tagging,
    pub purification: Vec<String>,
    pub buffer: BufferConditions,
    pub expected_yield_mg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagging {
    #[serde(rename = "N_term")]
    pub n_term: Option<String>,
    #[serde(rename = "C_term")]
    pub c_term: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferConditions {
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    #[serde(rename = "salt_mM")]
    pub salt_mm: Option<f64>,
}

impl BufferConditions {
    pub fn ph_or_default(&self) -> f64 {
        self.ph.unwrap_or(DEFAULT_BUFFER_PH)
    }

    pub fn salt_mm_or_default(&self) -> f64 {
        self.salt_mm.unwrap_or(DEFAULT_SALT_MM)
    }
}

/// `"Predicted success: NN%."`, the probability rounded to a whole percent.
pub fn expression_sentence(probability: f64) -> String {
    format!("Predicted success: {:.0}%.", probability * 100.0)
}

impl PredictionResult {
    /// Assemble a result and its protocol from the final ranking.
    pub fn new(
        expression_success_prob: f64,
        recommended_tag_n: Option<String>,
        recommended_tag_c: Option<String>,
        purification_methods_ranked: Vec<MethodScore>,
        buffer_ph: Option<f64>,
        salt_mm: Option<f64>,
        yield_mg: Option<f64>,
    ) -> Self {
        let suggested_protocol = SuggestedProtocol {
            expression: expression_sentence(expression_success_prob),
            tagging: Tagging {
                n_term: recommended_tag_n.clone(),
                c_term: recommended_tag_c.clone(),
            },
            purification: purification_methods_ranked
                .iter()
                .take(PROTOCOL_METHODS)
                .map(|m| m.name().to_string())
                .collect(),
            buffer: BufferConditions {
                ph: buffer_ph,
                salt_mm,
            },
            expected_yield_mg: yield_mg,
        };
        Self {
            expression_success_prob,
            recommended_tag_n,
            recommended_tag_c,
            purification_methods_ranked,
            buffer_ph,
            salt_mm,
            yield_mg,
            suggested_protocol,
        }
    }
}
