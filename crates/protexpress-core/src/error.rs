use thiserror::Error;

/// Errors raised while turning raw input into a feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("empty sequence: no residue letters left after cleaning")]
    Empty,
}
