//! Artifact directory loading.
//!
//! ```text
//! artifacts/
//! ├── clf_expr.safetensors        expression classifier      (required)
//! ├── tag_n.safetensors           N-terminal tag classifier  (required)
//! ├── tag_c.onnx                  C-terminal tag classifier  (required)
//! ├── method_models.json          [{"name": .., "model": ..}] per-method classifiers
//! ├── methods/imac.safetensors
//! ├── reg_buffer_ph.safetensors   optional regressors
//! ├── reg_salt_mm.safetensors
//! ├── reg_yield_mg.onnx
//! └── method_success_rates.json   optional fallback table
//! ```
//!
//! Each model may be stored as `.safetensors` (see [`LinearModel`]) or `.onnx`.
//! When both exist the safetensors file is used.
use crate::error::ArtifactError;
use crate::linear::{LinearModel, ModelKind};
#[cfg(feature = "onnx")]
use crate::onnx::OnnxModel;
use crate::traits::{Classifier, Regressor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, IntoStaticStr};
use tracing::debug;

pub const METHOD_INDEX_FILE: &str = "method_models.json";

const MODEL_EXTENSIONS: [&str; 2] = ["safetensors", "onnx"];

/// Fixed model roles and their file stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Role {
    #[strum(serialize = "clf_expr")]
    Expression,
    #[strum(serialize = "tag_n")]
    TagN,
    #[strum(serialize = "tag_c")]
    TagC,
    #[strum(serialize = "reg_buffer_ph")]
    BufferPh,
    #[strum(serialize = "reg_salt_mm")]
    SaltMm,
    #[strum(serialize = "reg_yield_mg")]
    YieldMg,
}

impl Role {
    pub fn file_stem(&self) -> &'static str {
        self.into()
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Role::Expression | Role::TagN | Role::TagC)
    }
}

/// One entry of `method_models.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    /// Model file, relative to the artifact directory.
    pub model: PathBuf,
}

/// The trained models a predictor runs. Immutable once built.
pub struct ArtifactSet {
    pub expression: Box<dyn Classifier>,
    pub tag_n: Box<dyn Classifier>,
    pub tag_c: Box<dyn Classifier>,
    /// Per-method binary classifiers, in index order.
    pub methods: Vec<(String, Box<dyn Classifier>)>,
    pub buffer_ph: Option<Box<dyn Regressor>>,
    pub salt_mm: Option<Box<dyn Regressor>>,
    pub yield_mg: Option<Box<dyn Regressor>>,
}

impl ArtifactSet {
    /// An artifact set with only the required classifiers.
    pub fn new(
        expression: Box<dyn Classifier>,
        tag_n: Box<dyn Classifier>,
        tag_c: Box<dyn Classifier>,
    ) -> Self {
        Self {
            expression,
            tag_n,
            tag_c,
            methods: Vec::new(),
            buffer_ph: None,
            salt_mm: None,
            yield_mg: None,
        }
    }

    pub fn with_method(mut self, name: impl Into<String>, model: Box<dyn Classifier>) -> Self {
        self.methods.push((name.into(), model));
        self
    }

    pub fn with_buffer_ph(mut self, model: Box<dyn Regressor>) -> Self {
        self.buffer_ph = Some(model);
        self
    }

    pub fn with_salt_mm(mut self, model: Box<dyn Regressor>) -> Self {
        self.salt_mm = Some(model);
        self
    }

    pub fn with_yield_mg(mut self, model: Box<dyn Regressor>) -> Self {
        self.yield_mg = Some(model);
        self
    }

    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ArtifactError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "artifact directory does not exist",
                ),
            });
        }
        Ok(Self {
            expression: required_classifier(dir, Role::Expression)?,
            tag_n: required_classifier(dir, Role::TagN)?,
            tag_c: required_classifier(dir, Role::TagC)?,
            methods: load_methods(dir)?,
            buffer_ph: optional_regressor(dir, Role::BufferPh)?,
            salt_mm: optional_regressor(dir, Role::SaltMm)?,
            yield_mg: optional_regressor(dir, Role::YieldMg)?,
        })
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .field("buffer_ph", &self.buffer_ph.is_some())
            .field("salt_mm", &self.salt_mm.is_some())
            .field("yield_mg", &self.yield_mg.is_some())
            .finish_non_exhaustive()
    }
}

fn locate(dir: &Path, stem: &str) -> Option<PathBuf> {
    MODEL_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}

fn load_linear(path: &Path, expected: ModelKind) -> Result<LinearModel, ArtifactError> {
    let model = LinearModel::load(path)?;
    if model.kind() != expected {
        return Err(ArtifactError::InvalidModel {
            path: path.to_path_buf(),
            reason: format!("expected a {expected}, found a {}", model.kind()),
        });
    }
    Ok(model)
}

fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ArtifactError> {
    debug!(path = %path.display(), "loading classifier");
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("safetensors") => Ok(Box::new(load_linear(path, ModelKind::Classifier)?)),
        #[cfg(feature = "onnx")]
        Some("onnx") => Ok(Box::new(OnnxModel::load(path)?)),
        _ => Err(ArtifactError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn load_regressor(path: &Path) -> Result<Box<dyn Regressor>, ArtifactError> {
    debug!(path = %path.display(), "loading regressor");
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("safetensors") => Ok(Box::new(load_linear(path, ModelKind::Regressor)?)),
        #[cfg(feature = "onnx")]
        Some("onnx") => Ok(Box::new(OnnxModel::load(path)?)),
        _ => Err(ArtifactError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn required_classifier(dir: &Path, role: Role) -> Result<Box<dyn Classifier>, ArtifactError> {
    let path = locate(dir, role.file_stem()).ok_or_else(|| ArtifactError::Missing {
        role: role.file_stem(),
        dir: dir.to_path_buf(),
    })?;
    load_classifier(&path)
}

fn optional_regressor(dir: &Path, role: Role) -> Result<Option<Box<dyn Regressor>>, ArtifactError> {
    match locate(dir, role.file_stem()) {
        Some(path) => load_regressor(&path).map(Some),
        None => {
            debug!(role = %role, "optional regressor not provided");
            Ok(None)
        }
    }
}

fn load_methods(dir: &Path) -> Result<Vec<(String, Box<dyn Classifier>)>, ArtifactError> {
    let index = dir.join(METHOD_INDEX_FILE);
    if !index.is_file() {
        debug!(path = %index.display(), "no per-method classifiers");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(&index).map_err(|source| ArtifactError::Io {
        path: index.clone(),
        source,
    })?;
    let entries: Vec<MethodModel> =
        serde_json::from_str(&raw).map_err(|source| ArtifactError::Json {
            path: index.clone(),
            source,
        })?;

    let mut seen = HashSet::new();
    let mut methods = Vec::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.name.clone()) {
            return Err(ArtifactError::InvalidModel {
                path: index,
                reason: format!("method `{}` is listed twice", entry.name),
            });
        }
        let model = load_classifier(&dir.join(&entry.model))?;
        methods.push((entry.name, model));
    }
    Ok(methods)
}
