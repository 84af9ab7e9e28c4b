//! protexpress-test-data
//!
//! Fixtures for testing the prediction pipeline.
//!
//! * [`TestFile`] packages small FASTA files embedded in the crate and writes
//!   them to temporary files for programs to operate on.
//! * [`TestArtifacts`] writes a complete artifact directory of constant linear
//!   models, so every prediction made against it is known in advance. Any role
//!   can be swapped for one of the embedded ONNX graphs.
use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use protexpress_core::NUM_FEATURES;
use protexpress_models::{
    LinearModel, MethodModel, ModelKind, METHOD_INDEX_FILE, SUCCESS_RATES_FILE,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempDir};

/// N-terminal His6 tag, linker and TEV site ahead of a short payload.
pub const SAMPLE_SEQUENCE: &str = "MHHHHHHSSGVDLGTENLYFQSMAS";

#[derive(Debug, Clone, Copy)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use protexpress_test_data::TestFile;
/// let (fasta, _temp) = TestFile::fasta_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// [`SAMPLE_SEQUENCE`] wrapped over three lines.
    pub fn fasta_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/fasta/his_tagged.fasta"),
            suffix: "fasta",
        }
    }
    /// Two records, `MKVLAAGIL` and `PESTDK`, the second padded with spaces.
    pub fn fasta_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/fasta/two_records.fasta"),
            suffix: "fa",
        }
    }

    /// ONNX binary classifier: probabilities `[0.18, 0.82]`, int64 label `1`.
    /// See `data/onnx/Readme.md`.
    pub fn onnx_binary_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/onnx/binary_082.onnx"),
            suffix: "onnx",
        }
    }
    /// ONNX classifier over string classes `["unknown", "His6"]` that always
    /// predicts `unknown`.
    pub fn onnx_tag_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/onnx/tag_unknown.onnx"),
            suffix: "onnx",
        }
    }
    /// ONNX regressor returning `7.25`.
    pub fn onnx_regressor_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/onnx/regressor_725.onnx"),
            suffix: "onnx",
        }
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        fs::write(path, self.filebinary)
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}

/// Builder for an artifact directory whose models ignore their input.
///
/// Classifiers carry zero weights and a bias chosen so the positive class
/// probability (or the winning label) is fixed; regressors return their bias.
///
/// ```ignore
/// use protexpress_test_data::TestArtifacts;
/// let dir = TestArtifacts::default().expression(0.82).create_temp()?;
/// let predictor = Predictor::from_dir(dir.path())?;
/// ```
#[derive(Debug, Clone)]
pub struct TestArtifacts {
    expression: f64,
    tag_n: String,
    tag_c: String,
    methods: Vec<(String, f64)>,
    buffer_ph: Option<f64>,
    salt_mm: Option<f64>,
    yield_mg: Option<f64>,
    success_rates: Vec<(String, f64)>,
    onnx: HashMap<&'static str, TestFile>,
}

impl Default for TestArtifacts {
    fn default() -> Self {
        Self {
            expression: 0.82,
            tag_n: "His6".to_string(),
            tag_c: "unknown".to_string(),
            methods: Vec::new(),
            buffer_ph: None,
            salt_mm: None,
            yield_mg: None,
            success_rates: Vec::new(),
            onnx: HashMap::new(),
        }
    }
}

impl TestArtifacts {
    pub fn expression(mut self, probability: f64) -> Self {
        self.expression = probability;
        self
    }

    pub fn tag_n(mut self, label: &str) -> Self {
        self.tag_n = label.to_string();
        self
    }

    pub fn tag_c(mut self, label: &str) -> Self {
        self.tag_c = label.to_string();
        self
    }

    /// Append a per-method classifier with a fixed positive probability.
    pub fn method(mut self, name: &str, probability: f64) -> Self {
        self.methods.push((name.to_string(), probability));
        self
    }

    pub fn buffer_ph(mut self, value: f64) -> Self {
        self.buffer_ph = Some(value);
        self
    }

    pub fn salt_mm(mut self, value: f64) -> Self {
        self.salt_mm = Some(value);
        self
    }

    pub fn yield_mg(mut self, value: f64) -> Self {
        self.yield_mg = Some(value);
        self
    }

    /// Append an entry to `method_success_rates.json`.
    pub fn success_rate(mut self, name: &str, rate: f64) -> Self {
        self.success_rates.push((name.to_string(), rate));
        self
    }

    /// Store the model for file stem `stem` (e.g. `tag_c`) as an ONNX graph
    /// instead of a linear model.
    pub fn onnx(mut self, stem: &'static str, file: TestFile) -> Self {
        self.onnx.insert(stem, file);
        self
    }

    pub fn create_temp(&self) -> Result<TempDir> {
        let dir = Builder::new().prefix("protexpress-artifacts").tempdir()?;
        self.write_to(dir.path())?;
        Ok(dir)
    }

    pub fn write_to(&self, dir: &Path) -> Result<()> {
        for (stem, file) in &self.onnx {
            file.write_to(dir.join(format!("{stem}.onnx")))?;
        }
        let linear = |stem: &str| {
            (!self.onnx.contains_key(stem)).then(|| dir.join(format!("{stem}.safetensors")))
        };

        if let Some(path) = linear("clf_expr") {
            binary_classifier(self.expression)?.save(path)?;
        }
        if let Some(path) = linear("tag_n") {
            label_classifier(&self.tag_n)?.save(path)?;
        }
        if let Some(path) = linear("tag_c") {
            label_classifier(&self.tag_c)?.save(path)?;
        }
        for (value, stem) in [
            (self.buffer_ph, "reg_buffer_ph"),
            (self.salt_mm, "reg_salt_mm"),
            (self.yield_mg, "reg_yield_mg"),
        ] {
            if let (Some(value), Some(path)) = (value, linear(stem)) {
                constant_regressor(value)?.save(path)?;
            }
        }

        if !self.methods.is_empty() {
            fs::create_dir_all(dir.join("methods"))?;
            let mut index = Vec::with_capacity(self.methods.len());
            for (idx, (name, probability)) in self.methods.iter().enumerate() {
                let model = PathBuf::from("methods").join(format!("method_{idx}.safetensors"));
                binary_classifier(*probability)?.save(dir.join(&model))?;
                index.push(MethodModel {
                    name: name.clone(),
                    model,
                });
            }
            fs::write(
                dir.join(METHOD_INDEX_FILE),
                serde_json::to_string_pretty(&index)?,
            )?;
        }

        if !self.success_rates.is_empty() {
            let table: Map<String, Value> = self
                .success_rates
                .iter()
                .map(|(name, rate)| (name.clone(), Value::from(*rate)))
                .collect();
            fs::write(
                dir.join(SUCCESS_RATES_FILE),
                serde_json::to_string_pretty(&table)?,
            )?;
        }
        Ok(())
    }
}

fn zero_weight(rows: usize) -> Result<Tensor> {
    Ok(Tensor::zeros((rows, NUM_FEATURES), DType::F32, &Device::Cpu)?)
}

/// Logistic regression whose positive-class probability is always `p`.
pub fn binary_classifier(p: f64) -> Result<LinearModel> {
    let logit = (p / (1.0 - p)).ln() as f32;
    let bias = Tensor::new(&[logit], &Device::Cpu)?;
    Ok(LinearModel::new(ModelKind::Classifier, zero_weight(1)?, bias, vec![])?)
}

/// Two-class softmax model that always predicts `label`.
pub fn label_classifier(label: &str) -> Result<LinearModel> {
    let bias = Tensor::new(&[1f32, 0.0], &Device::Cpu)?;
    let classes = vec![label.to_string(), format!("not {label}")];
    Ok(LinearModel::new(ModelKind::Classifier, zero_weight(2)?, bias, classes)?)
}

/// Regressor that always predicts `value`.
pub fn constant_regressor(value: f64) -> Result<LinearModel> {
    let bias = Tensor::new(&[value as f32], &Device::Cpu)?;
    Ok(LinearModel::new(ModelKind::Regressor, zero_weight(1)?, bias, vec![])?)
}
