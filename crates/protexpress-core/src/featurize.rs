//! Protein Featurizer
//!
//! Encode a single protein sequence as the fixed-length numeric vector used by
//! the expression, tagging and purification models.
//!
//! Returns 29 values, in [`Feature`] declaration order:
//! - Fractional composition of the 20 standard residues
//! - Cleaned sequence length
//! - GRAVY (mean Kyte-Doolittle hydropathy)
//! - Hydrophobic, aromatic, polar, acidic and basic fractions
//! - Glycine + proline fraction
//! - Crude net charge per residue at pH 7
use crate::error::SequenceError;
use crate::info::constants::{
    aa_index, hydropathy, ACIDIC, AMINO_ACIDS, AROMATIC, BASIC, HYDROPHOBIC, POLAR,
};
use crate::sequence::clean_sequence;
use candle_core::{Device, Tensor};
use std::ops::Index;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

pub const NUM_FEATURES: usize = Feature::COUNT;

/// Named feature dimensions.
///
/// The discriminant of each variant is its column in the feature vector.
/// Reordering variants breaks every trained artifact.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter, EnumCount, IntoStaticStr)]
pub enum Feature {
    #[strum(serialize = "aa_I_frac")] FracI,
    #[strum(serialize = "aa_V_frac")] FracV,
    #[strum(serialize = "aa_L_frac")] FracL,
    #[strum(serialize = "aa_F_frac")] FracF,
    #[strum(serialize = "aa_C_frac")] FracC,
    #[strum(serialize = "aa_M_frac")] FracM,
    #[strum(serialize = "aa_A_frac")] FracA,
    #[strum(serialize = "aa_G_frac")] FracG,
    #[strum(serialize = "aa_T_frac")] FracT,
    #[strum(serialize = "aa_S_frac")] FracS,
    #[strum(serialize = "aa_W_frac")] FracW,
    #[strum(serialize = "aa_Y_frac")] FracY,
    #[strum(serialize = "aa_P_frac")] FracP,
    #[strum(serialize = "aa_H_frac")] FracH,
    #[strum(serialize = "aa_E_frac")] FracE,
    #[strum(serialize = "aa_Q_frac")] FracQ,
    #[strum(serialize = "aa_D_frac")] FracD,
    #[strum(serialize = "aa_N_frac")] FracN,
    #[strum(serialize = "aa_K_frac")] FracK,
    #[strum(serialize = "aa_R_frac")] FracR,
    #[strum(serialize = "length")] Length,
    #[strum(serialize = "gravy")] Gravy,
    #[strum(serialize = "frac_hydrophobic")] FracHydrophobic,
    #[strum(serialize = "frac_aromatic")] FracAromatic,
    #[strum(serialize = "frac_polar")] FracPolar,
    #[strum(serialize = "frac_acidic")] FracAcidic,
    #[strum(serialize = "frac_basic")] FracBasic,
    #[strum(serialize = "frac_gly_pro")] FracGlyPro,
    #[strum(serialize = "net_charge_pH7")] NetChargePh7,
}

impl Feature {
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Composition feature for a standard residue.
    pub fn composition(aa: char) -> Option<Self> {
        aa_index(aa).and_then(|idx| Self::iter().nth(idx))
    }
}

/// Fixed-length sequence descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; NUM_FEATURES],
}

impl FeatureVector {
    /// Clean `sequence` and encode it.
    pub fn from_sequence(sequence: &str) -> Result<Self, SequenceError> {
        Self::from_cleaned(&clean_sequence(sequence))
    }

    fn from_cleaned(sequence: &str) -> Result<Self, SequenceError> {
        if sequence.is_empty() {
            return Err(SequenceError::Empty);
        }
        // Non-standard letters count toward the length but nothing else.
        let length = sequence.chars().count();
        let mut counts = [0usize; 20];
        for aa in sequence.chars() {
            if let Some(idx) = aa_index(aa) {
                counts[idx] += 1;
            }
        }
        let n = length as f64;
        let count = |aa: char| aa_index(aa).map_or(0, |idx| counts[idx]) as f64;
        let group = |members: &[char]| members.iter().map(|&aa| count(aa)).sum::<f64>() / n;

        let mut values = [0.0; NUM_FEATURES];
        for (idx, c) in counts.iter().enumerate() {
            values[idx] = *c as f64 / n;
        }
        let gravy = AMINO_ACIDS
            .iter()
            .zip(counts.iter())
            .map(|(&aa, &c)| hydropathy(aa).unwrap_or(0.0) * c as f64)
            .sum::<f64>()
            / n;

        values[Feature::Length.to_index()] = n;
        values[Feature::Gravy.to_index()] = gravy;
        values[Feature::FracHydrophobic.to_index()] = group(&HYDROPHOBIC);
        values[Feature::FracAromatic.to_index()] = group(&AROMATIC);
        values[Feature::FracPolar.to_index()] = group(&POLAR);
        values[Feature::FracAcidic.to_index()] = group(&ACIDIC);
        values[Feature::FracBasic.to_index()] = group(&BASIC);
        values[Feature::FracGlyPro.to_index()] = (count('G') + count('P')) / n;
        values[Feature::NetChargePh7.to_index()] =
            (count('K') + count('R') + 0.1 * count('H') - count('D') - count('E')) / n;

        Ok(Self { values })
    }

    /// Column names in vector order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Feature::iter().map(<&'static str>::from)
    }

    /// Look up a value by its column name.
    pub fn get(&self, name: &str) -> Option<f64> {
        name.parse::<Feature>().ok().map(|f| self[f])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        NUM_FEATURES
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Composition fractions of the 20 standard residues.
    pub fn composition(&self) -> &[f64] {
        &self.values[..AMINO_ACIDS.len()]
    }

    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    /// `[1, NUM_FEATURES]` f32 tensor, a batch of one.
    pub fn to_tensor(&self, device: &Device) -> candle_core::Result<Tensor> {
        Tensor::from_vec(self.to_f32_vec(), (1, NUM_FEATURES), device)
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.values[feature.to_index()]
    }
}
