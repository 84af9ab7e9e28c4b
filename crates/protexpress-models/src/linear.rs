//! Linear models stored as safetensors.
//!
//! A model file holds `weight` `[k, NUM_FEATURES]` and `bias` `[k]`, plus an
//! optional standardization step (`scaler.mean`, `scaler.scale`, both
//! `[NUM_FEATURES]`) applied before the linear map. The header metadata
//! carries `kind` (`classifier` | `regressor`) and, for classifiers, an
//! optional `classes` JSON array.
//!
//! - classifier, `k == 1`: binary logistic regression, probabilities `[1 - p, p]`
//! - classifier, `k >= 2`: multinomial (softmax) over `k` classes
//! - regressor, `k == 1`: ordinary linear prediction
use crate::error::{ArtifactError, InferenceError};
use crate::traits::{Classifier, Regressor};
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module};
use protexpress_core::{FeatureVector, NUM_FEATURES};
use safetensors::SafeTensors;
use std::collections::HashMap;
use std::path::Path;
use strum::{Display, EnumString};

const KIND_KEY: &str = "kind";
const CLASSES_KEY: &str = "classes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ModelKind {
    Classifier,
    Regressor,
}

#[derive(Debug, Clone)]
struct Scaler {
    mean: Tensor,
    scale: Tensor,
}

#[derive(Debug, Clone)]
pub struct LinearModel {
    kind: ModelKind,
    linear: Linear,
    outputs: usize,
    scaler: Option<Scaler>,
    classes: Vec<String>,
}

impl LinearModel {
    pub fn new(
        kind: ModelKind,
        weight: Tensor,
        bias: Tensor,
        classes: Vec<String>,
    ) -> Result<Self, ArtifactError> {
        let (outputs, inputs) = weight.dims2()?;
        if inputs != NUM_FEATURES {
            return Err(ArtifactError::Parameters(format!(
                "weight has {inputs} input columns, expected {NUM_FEATURES}"
            )));
        }
        if bias.dims1()? != outputs {
            return Err(ArtifactError::Parameters(format!(
                "bias length {} does not match {outputs} weight rows",
                bias.dims1()?
            )));
        }
        match kind {
            ModelKind::Regressor if outputs != 1 => {
                return Err(ArtifactError::Parameters(format!(
                    "regressor needs a single output row, found {outputs}"
                )));
            }
            ModelKind::Classifier if outputs == 0 => {
                return Err(ArtifactError::Parameters(
                    "classifier has no output rows".to_string(),
                ));
            }
            ModelKind::Classifier if !classes.is_empty() && classes.len() != outputs.max(2) => {
                return Err(ArtifactError::Parameters(format!(
                    "{} class labels for {} classes",
                    classes.len(),
                    outputs.max(2)
                )));
            }
            _ => {}
        }
        let weight = weight.to_dtype(DType::F32)?;
        let bias = bias.to_dtype(DType::F32)?;
        Ok(Self {
            kind,
            linear: Linear::new(weight, Some(bias)),
            outputs,
            scaler: None,
            classes,
        })
    }

    /// Standardize features as `(x - mean) / scale` before the linear map.
    pub fn with_scaler(mut self, mean: Tensor, scale: Tensor) -> Result<Self, ArtifactError> {
        for (name, t) in [("mean", &mean), ("scale", &scale)] {
            if t.dims1()? != NUM_FEATURES {
                return Err(ArtifactError::Parameters(format!(
                    "scaler {name} has {} values, expected {NUM_FEATURES}",
                    t.dims1()?
                )));
            }
        }
        self.scaler = Some(Scaler {
            mean: mean.to_dtype(DType::F32)?,
            scale: scale.to_dtype(DType::F32)?,
        });
        Ok(self)
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Class labels; stringified indices when the file carries none.
    pub fn classes(&self) -> Vec<String> {
        if self.classes.is_empty() {
            (0..self.outputs.max(2)).map(|idx| idx.to_string()).collect()
        } else {
            self.classes.clone()
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let buffer = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_buffer(&buffer).map_err(|e| ArtifactError::InvalidModel {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_buffer(buffer: &[u8]) -> Result<Self, ArtifactError> {
        let (_, metadata) = SafeTensors::read_metadata(buffer)?;
        let info = metadata.metadata().clone().unwrap_or_default();

        let kind = info
            .get(KIND_KEY)
            .ok_or_else(|| ArtifactError::Parameters(format!("missing `{KIND_KEY}` metadata")))?;
        let kind: ModelKind = kind
            .parse()
            .map_err(|_| ArtifactError::Parameters(format!("unknown model kind `{kind}`")))?;
        let classes: Vec<String> = match info.get(CLASSES_KEY) {
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                ArtifactError::Parameters(format!("invalid `{CLASSES_KEY}` metadata: {e}"))
            })?,
            None => Vec::new(),
        };

        let mut tensors = candle_core::safetensors::load_buffer(buffer, &Device::Cpu)?;
        let mut take = |name: &str| tensors.remove(name);
        let weight = take("weight")
            .ok_or_else(|| ArtifactError::Parameters("missing `weight` tensor".to_string()))?;
        let bias = take("bias")
            .ok_or_else(|| ArtifactError::Parameters("missing `bias` tensor".to_string()))?;
        let scaler = (take("scaler.mean"), take("scaler.scale"));

        let model = Self::new(kind, weight, bias, classes)?;
        match scaler {
            (Some(mean), Some(scale)) => model.with_scaler(mean, scale),
            (None, None) => Ok(model),
            _ => Err(ArtifactError::Parameters(
                "scaler needs both `scaler.mean` and `scaler.scale`".to_string(),
            )),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ArtifactError> {
        let mut info = HashMap::new();
        info.insert(KIND_KEY.to_string(), self.kind.to_string());
        if !self.classes.is_empty() {
            let classes = serde_json::to_string(&self.classes)
                .map_err(|e| ArtifactError::Parameters(e.to_string()))?;
            info.insert(CLASSES_KEY.to_string(), classes);
        }

        let mut tensors = vec![("weight", self.linear.weight())];
        if let Some(bias) = self.linear.bias() {
            tensors.push(("bias", bias));
        }
        if let Some(scaler) = &self.scaler {
            tensors.push(("scaler.mean", &scaler.mean));
            tensors.push(("scaler.scale", &scaler.scale));
        }
        safetensors::serialize_to_file(tensors, &Some(info), path.as_ref())?;
        Ok(())
    }

    fn forward(&self, features: &FeatureVector) -> Result<Vec<f32>, InferenceError> {
        let mut xs = features.to_tensor(&Device::Cpu)?;
        if let Some(scaler) = &self.scaler {
            xs = xs.broadcast_sub(&scaler.mean)?.broadcast_div(&scaler.scale)?;
        }
        let ys = self.linear.forward(&xs)?;
        Ok(ys.squeeze(0)?.to_vec1::<f32>()?)
    }
}

fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().fold(f64::NEG_INFINITY, |m, &z| m.max(z as f64));
    let exps: Vec<f64> = logits.iter().map(|&z| (z as f64 - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl Classifier for LinearModel {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, InferenceError> {
        if self.kind != ModelKind::Classifier {
            return Err(InferenceError::Shape(
                "regressor cannot produce class probabilities".to_string(),
            ));
        }
        let logits = self.forward(features)?;
        match logits.as_slice() {
            [] => Err(InferenceError::EmptyOutput),
            [z] => {
                let p = logistic(*z as f64);
                Ok(vec![1.0 - p, p])
            }
            many => Ok(softmax(many)),
        }
    }

    fn predict_label(&self, features: &FeatureVector) -> Result<String, InferenceError> {
        let proba = self.predict_proba(features)?;
        let mut best: Option<(usize, f64)> = None;
        for (idx, &p) in proba.iter().enumerate() {
            if best.map_or(true, |(_, bp)| p > bp) {
                best = Some((idx, p));
            }
        }
        let (idx, _) = best.ok_or(InferenceError::EmptyOutput)?;
        self.classes()
            .into_iter()
            .nth(idx)
            .ok_or(InferenceError::MissingProbability {
                expected: idx + 1,
                actual: proba.len(),
            })
    }
}

impl Regressor for LinearModel {
    fn predict_value(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if self.kind != ModelKind::Regressor {
            return Err(InferenceError::Shape(
                "classifier cannot produce a regression value".to_string(),
            ));
        }
        self.forward(features)?
            .first()
            .map(|&y| y as f64)
            .ok_or(InferenceError::EmptyOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protexpress_core::Feature;

    fn zeros(rows: usize) -> Tensor {
        Tensor::zeros((rows, NUM_FEATURES), DType::F32, &Device::Cpu).unwrap()
    }

    fn vector(values: &[f32]) -> Tensor {
        Tensor::new(values, &Device::Cpu).unwrap()
    }

    fn features() -> FeatureVector {
        FeatureVector::from_sequence("MHHHHHHSSGVDLGTENLYFQSMAS").unwrap()
    }

    #[test]
    fn test_binary_logistic() {
        let model = LinearModel::new(ModelKind::Classifier, zeros(1), vector(&[0.0]), vec![])
            .unwrap();
        let proba = model.predict_proba(&features()).unwrap();
        assert_eq!(proba, vec![0.5, 0.5]);
        // ties resolve to the first class
        assert_eq!(model.predict_label(&features()).unwrap(), "0");
    }

    #[test]
    fn test_length_weight() {
        let mut w = vec![0f32; NUM_FEATURES];
        w[Feature::Length.to_index()] = 1.0;
        let weight = Tensor::from_vec(w, (1, NUM_FEATURES), &Device::Cpu).unwrap();
        let model =
            LinearModel::new(ModelKind::Regressor, weight, vector(&[2.5]), vec![]).unwrap();
        let value = model.predict_value(&features()).unwrap();
        assert!((value - 27.5).abs() < 1e-5);
    }

    #[test]
    fn test_scaler_is_applied() {
        let mut w = vec![0f32; NUM_FEATURES];
        w[Feature::Length.to_index()] = 1.0;
        let weight = Tensor::from_vec(w, (1, NUM_FEATURES), &Device::Cpu).unwrap();
        let mut mean = vec![0f32; NUM_FEATURES];
        mean[Feature::Length.to_index()] = 5.0;
        let scale = vec![2f32; NUM_FEATURES];
        let model = LinearModel::new(ModelKind::Regressor, weight, vector(&[0.0]), vec![])
            .unwrap()
            .with_scaler(vector(&mean), vector(&scale))
            .unwrap();
        let value = model.predict_value(&features()).unwrap();
        assert!((value - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_softmax_labels() {
        let classes = vec!["His6".to_string(), "GST".to_string(), "unknown".to_string()];
        let model = LinearModel::new(
            ModelKind::Classifier,
            zeros(3),
            vector(&[0.0, 2.0, 1.0]),
            classes,
        )
        .unwrap();
        let proba = model.predict_proba(&features()).unwrap();
        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(model.predict_label(&features()).unwrap(), "GST");
    }

    #[test]
    fn test_invalid_shapes() {
        let wrong_width = Tensor::zeros((1, 20), DType::F32, &Device::Cpu).unwrap();
        assert!(matches!(
            LinearModel::new(ModelKind::Classifier, wrong_width, vector(&[0.0]), vec![]),
            Err(ArtifactError::Parameters(_))
        ));
        assert!(matches!(
            LinearModel::new(ModelKind::Regressor, zeros(2), vector(&[0.0, 0.0]), vec![]),
            Err(ArtifactError::Parameters(_))
        ));
        assert!(matches!(
            LinearModel::new(ModelKind::Classifier, zeros(2), vector(&[0.0]), vec![]),
            Err(ArtifactError::Parameters(_))
        ));
        assert!(matches!(
            LinearModel::new(
                ModelKind::Classifier,
                zeros(1),
                vector(&[0.0]),
                vec!["only".to_string()]
            ),
            Err(ArtifactError::Parameters(_))
        ));
    }

    #[test]
    fn test_kind_mismatch() {
        let regressor =
            LinearModel::new(ModelKind::Regressor, zeros(1), vector(&[1.0]), vec![]).unwrap();
        assert!(regressor.predict_proba(&features()).is_err());
        let classifier =
            LinearModel::new(ModelKind::Classifier, zeros(1), vector(&[1.0]), vec![]).unwrap();
        assert!(classifier.predict_value(&features()).is_err());
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(ModelKind::Classifier.to_string(), "classifier");
        assert_eq!("regressor".parse::<ModelKind>().unwrap(), ModelKind::Regressor);
        assert!("svm".parse::<ModelKind>().is_err());
    }
}
