use proptest::prelude::*;
use protexpress_core::{clean_sequence, Feature, FeatureVector, SequenceError, NUM_FEATURES};

const STANDARD: &str = "IVLFCMAGTSWYPHEQDNKR";

fn standard_sequence() -> impl Strategy<Value = String> {
    let residues: Vec<char> = STANDARD.chars().collect();
    proptest::collection::vec(proptest::sample::select(residues), 1..400)
        .prop_map(|residues| residues.into_iter().collect())
}

proptest! {
    #[test]
    fn composition_sums_to_one(seq in standard_sequence()) {
        let fv = FeatureVector::from_sequence(&seq).unwrap();
        let total: f64 = fv.composition().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "composition sums to {}", total);
        prop_assert_eq!(fv[Feature::Length], seq.len() as f64);
    }

    #[test]
    fn encoding_is_stable_under_recleaning(seq in "[A-Za-z0-9 \\-\\n\\t*]{0,200}") {
        let raw = FeatureVector::from_sequence(&seq);
        let cleaned = FeatureVector::from_sequence(&clean_sequence(&seq));
        prop_assert_eq!(raw, cleaned);
    }

    #[test]
    fn encoding_is_deterministic(seq in standard_sequence()) {
        let a = FeatureVector::from_sequence(&seq).unwrap();
        let b = FeatureVector::from_sequence(&seq).unwrap();
        prop_assert_eq!(a.as_slice(), b.as_slice());
        prop_assert_eq!(a.as_slice().len(), NUM_FEATURES);
    }

    #[test]
    fn fractions_are_bounded(seq in "[A-Z]{1,200}") {
        let fv = FeatureVector::from_sequence(&seq).unwrap();
        for (name, value) in FeatureVector::names().zip(fv.as_slice()) {
            if name.starts_with("aa_") || name.starts_with("frac_") {
                prop_assert!((0.0..=1.0).contains(value), "{} = {}", name, value);
            }
        }
    }
}

#[test]
fn whitespace_digits_and_case_are_ignored() {
    let reference = FeatureVector::from_sequence("MHHHHHHSSGVDLGTENLYFQSMAS").unwrap();
    let noisy = FeatureVector::from_sequence("  mhhhhhh SSG 12 vdlgtenlyfq\nSMAS ").unwrap();
    assert_eq!(reference, noisy);
}

#[test]
fn no_letters_is_an_error() {
    assert_eq!(FeatureVector::from_sequence(""), Err(SequenceError::Empty));
    assert_eq!(FeatureVector::from_sequence("123456"), Err(SequenceError::Empty));
}
