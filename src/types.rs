//! Shared types used across the crate.
//! Includes the positional `FeatureVector` fed to the classifier and the
//! `Prediction` it produces.
use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of positional inputs the model was trained on.
pub const FEATURE_COUNT: usize = 8;

/// Positional feature names, in the order the model expects them.
/// Used for diagnostics only; the ordering itself is fixed by the model artifact.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree",
    "age",
];

/// Ordered clinical measurements for a single patient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Parse exactly `FEATURE_COUNT` textual values.
    ///
    /// The count is checked before any value is parsed, so an arity error is
    /// reported even when the values themselves are not numeric.
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        if args.len() != FEATURE_COUNT {
            return Err(Error::argument_count(args.len()));
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (i, (slot, raw)) in values.iter_mut().zip(args).enumerate() {
            let raw = raw.as_ref();
            *slot = raw.trim().parse::<f64>().map_err(|_| Error::InvalidNumber {
                position: i + 1,
                value: raw.to_string(),
            })?;
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// One-row batch in the precision the tree evaluator works in.
    pub fn to_batch(&self) -> Array2<f32> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.values[j] as f32)
    }

    /// `(name, value)` pairs in positional order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.named().map(|(n, v)| format!("{n}={v}")).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Class label produced by the classifier (0 = negative, 1 = positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prediction {
    pub label: u32,
}

impl Prediction {
    pub fn is_positive(&self) -> bool {
        self.label == 1
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_accepts_reference_row() {
        let fv = FeatureVector::parse_args(&["6", "148", "72", "35", "0", "33.6", "0.627", "50"])
            .unwrap();
        assert_eq!(
            fv.values(),
            &[6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0]
        );
    }

    #[test]
    fn test_parse_args_accepts_negatives_exponents_and_padding() {
        let fv = FeatureVector::parse_args(&["-1", " 2 ", "1e2", "+4", "5.", ".5", "7", "8"])
            .unwrap();
        assert_eq!(fv.values(), &[-1.0, 2.0, 100.0, 4.0, 5.0, 0.5, 7.0, 8.0]);
    }

    #[test]
    fn test_parse_args_nan_is_kept() {
        let fv = FeatureVector::parse_args(&["nan", "1", "2", "3", "4", "5", "6", "7"]).unwrap();
        assert!(fv.values()[0].is_nan());
    }

    #[test]
    fn test_parse_args_wrong_count() {
        let err = FeatureVector::parse_args(&["1", "2", "3"]).unwrap_err();
        assert!(matches!(
            err,
            Error::ArgumentCount {
                expected: 8,
                got: 3
            }
        ));
    }

    #[test]
    fn test_parse_args_count_checked_before_values() {
        let err = FeatureVector::parse_args(&["a", "b"]).unwrap_err();
        assert!(matches!(err, Error::ArgumentCount { got: 2, .. }));
    }

    #[test]
    fn test_parse_args_reports_first_bad_value() {
        let err =
            FeatureVector::parse_args(&["1", "2", "x", "4", "y", "6", "7", "8"]).unwrap_err();
        match err {
            Error::InvalidNumber { position, value } => {
                assert_eq!(position, 3);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_to_batch_shape() {
        let fv = FeatureVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let batch = fv.to_batch();
        assert_eq!(batch.dim(), (1, FEATURE_COUNT));
        assert_eq!(batch[[0, 7]], 8.0);
    }

    #[test]
    fn test_display_uses_names() {
        let fv = FeatureVector::new([0.0; FEATURE_COUNT]);
        let s = fv.to_string();
        assert!(s.starts_with("pregnancies=0"));
        assert!(s.ends_with("age=0"));
    }
}
