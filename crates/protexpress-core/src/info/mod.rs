//! Reference data for amino acids.
pub(crate) mod constants;
