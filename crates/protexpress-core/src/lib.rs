//! # protexpress-core
//!
//! Sequence-level featurization for protein expression prediction.
//!
//! __protexpress-core__ provides functionality for:
//! * Cleaning raw amino-acid strings and reading FASTA input
//! * Residue constants (Kyte-Doolittle hydropathy, residue groups)
//! * Encoding a sequence into the fixed 29-value [`FeatureVector`] the
//!   trained expression/purification models consume
//!
//! The feature order is a contract with the trained artifacts. It is defined
//! once, by the declaration order of [`Feature`], and never changes.
//!
//! ```
//! use protexpress_core::{Feature, FeatureVector};
//!
//! let features = FeatureVector::from_sequence("MKV LLA").unwrap();
//! assert_eq!(features[Feature::Length], 6.0);
//! ```
mod error;
mod featurize;
mod info;
mod sequence;

pub use self::error::SequenceError;
pub use self::featurize::{Feature, FeatureVector, NUM_FEATURES};
pub use self::info::constants::{
    aa_index, hydropathy, is_standard_residue, ACIDIC, AMINO_ACIDS, AROMATIC, BASIC,
    HYDROPHOBIC, POLAR,
};
pub use self::sequence::{clean_sequence, read_fasta, read_fasta_file};
