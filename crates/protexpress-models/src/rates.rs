//! Empirical purification-method success rates.
use crate::error::ArtifactError;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

pub const SUCCESS_RATES_FILE: &str = "method_success_rates.json";

/// Method name -> historical success fraction, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuccessRates {
    rates: Vec<(String, f64)>,
}

impl SuccessRates {
    pub fn new(rates: Vec<(String, f64)>) -> Self {
        Self { rates }
    }

    /// Read `method_success_rates.json` from `dir`; a missing file is an empty table.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ArtifactError> {
        let path = dir.as_ref().join(SUCCESS_RATES_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no method success-rate table");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let rates = table
            .into_iter()
            .map(|(name, value)| match value.as_f64() {
                Some(rate) => Ok((name, rate)),
                None => Err(ArtifactError::InvalidModel {
                    path: path.to_path_buf(),
                    reason: format!("success rate for `{name}` is not a number: {value}"),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(path = %path.display(), methods = rates.len(), "loaded method success rates");
        Ok(Self { rates })
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(name, rate)| (name.as_str(), *rate))
    }
}

impl FromIterator<(String, f64)> for SuccessRates {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_order_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SUCCESS_RATES_FILE),
            r#"{"Size exclusion": 0.5, "His-tag IMAC": 0.9, "Ion exchange": 0.6}"#,
        )
        .unwrap();
        let rates = SuccessRates::from_dir(dir.path()).unwrap();
        let names: Vec<_> = rates.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Size exclusion", "His-tag IMAC", "Ion exchange"]);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rates = SuccessRates::from_dir(dir.path()).unwrap();
        assert!(rates.is_empty());
    }

    #[test]
    fn test_malformed_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SUCCESS_RATES_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SuccessRates::from_dir(dir.path()),
            Err(ArtifactError::Json { .. })
        ));
        std::fs::write(&path, r#"{"Ion exchange": "high"}"#).unwrap();
        assert!(matches!(
            SuccessRates::from_dir(dir.path()),
            Err(ArtifactError::InvalidModel { .. })
        ));
    }
}
