//! # Constants
//!
//! Residue-level reference values used by the featurizer.
//!
//! ## Alphabet
//! [`AMINO_ACIDS`] lists the 20 standard one-letter codes in the order of the
//! hydropathy table. Composition features are emitted in this order.
//!
//! ## Residue groups
//!
//! - [`HYDROPHOBIC`] - A V L I M F W Y C
//! - [`AROMATIC`] - F Y W
//! - [`POLAR`] - S T N Q
//! - [`ACIDIC`] - D E
//! - [`BASIC`] - K R H
//!

pub const AMINO_ACIDS: [char; 20] = [
    'I', 'V', 'L', 'F', 'C', 'M', 'A', 'G', 'T', 'S', 'W', 'Y', 'P', 'H', 'E', 'Q', 'D', 'N', 'K',
    'R',
];

pub const HYDROPHOBIC: [char; 9] = ['A', 'V', 'L', 'I', 'M', 'F', 'W', 'Y', 'C'];
pub const AROMATIC: [char; 3] = ['F', 'Y', 'W'];
pub const POLAR: [char; 4] = ['S', 'T', 'N', 'Q'];
pub const ACIDIC: [char; 2] = ['D', 'E'];
pub const BASIC: [char; 3] = ['K', 'R', 'H'];

#[rustfmt::skip]
/// Kyte-Doolittle hydropathy.
///
/// Kyte J, Doolittle RF. A simple method for displaying the hydropathic
/// character of a protein. J Mol Biol. 1982.
pub fn hydropathy(aa: char) -> Option<f64> {
    match aa {
        'I' =>  Some(4.5), 'V' =>  Some(4.2), 'L' =>  Some(3.8), 'F' =>  Some(2.8),
        'C' =>  Some(2.5), 'M' =>  Some(1.9), 'A' =>  Some(1.8), 'G' => Some(-0.4),
        'T' => Some(-0.7), 'S' => Some(-0.8), 'W' => Some(-0.9), 'Y' => Some(-1.3),
        'P' => Some(-1.6), 'H' => Some(-3.2), 'E' => Some(-3.5), 'Q' => Some(-3.5),
        'D' => Some(-3.5), 'N' => Some(-3.5), 'K' => Some(-3.9), 'R' => Some(-4.5),
        _   => None,
    }
}

#[rustfmt::skip]
/// Position of a residue in [`AMINO_ACIDS`].
pub fn aa_index(aa: char) -> Option<usize> {
    match aa {
        'I' => Some(0),  'V' => Some(1),  'L' => Some(2),  'F' => Some(3),
        'C' => Some(4),  'M' => Some(5),  'A' => Some(6),  'G' => Some(7),
        'T' => Some(8),  'S' => Some(9),  'W' => Some(10), 'Y' => Some(11),
        'P' => Some(12), 'H' => Some(13), 'E' => Some(14), 'Q' => Some(15),
        'D' => Some(16), 'N' => Some(17), 'K' => Some(18), 'R' => Some(19),
        _   => None,
    }
}

pub fn is_standard_residue(aa: char) -> bool {
    aa_index(aa).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_alphabet() {
        for (idx, aa) in AMINO_ACIDS.iter().enumerate() {
            assert_eq!(aa_index(*aa), Some(idx));
            assert!(hydropathy(*aa).is_some());
        }
        assert_eq!(aa_index('X'), None);
        assert_eq!(aa_index('a'), None);
        assert_eq!(hydropathy('B'), None);
    }

    #[test]
    fn test_hydropathy_values() {
        assert_eq!(hydropathy('I'), Some(4.5));
        assert_eq!(hydropathy('R'), Some(-4.5));
        assert_eq!(hydropathy('G'), Some(-0.4));
    }

    #[test]
    fn test_groups_are_standard() {
        let groups: [&[char]; 5] = [&HYDROPHOBIC, &AROMATIC, &POLAR, &ACIDIC, &BASIC];
        for group in groups {
            assert!(group.iter().all(|aa| is_standard_residue(*aa)));
        }
        assert!(!is_standard_residue('X'));
    }
}
