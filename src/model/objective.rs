//! Learning objectives understood by the evaluator and how each one turns raw
//! ensemble margins into a class label.
use std::fmt;
use std::str::FromStr;

use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// `binary:logistic` and `reg:logistic`
    Logistic,
    /// `binary:logitraw`
    LogitRaw,
    /// `binary:hinge`
    Hinge,
    /// `multi:softprob`
    SoftProb,
    /// `multi:softmax`
    SoftMax,
}

impl Objective {
    pub fn is_multiclass(&self) -> bool {
        matches!(self, Objective::SoftProb | Objective::SoftMax)
    }

    /// Convert the user-facing `base_score` into margin space.
    pub fn base_margin(&self, base_score: f32) -> Result<f32, ModelError> {
        match self {
            Objective::Logistic | Objective::LogitRaw => {
                if !(base_score > 0.0 && base_score < 1.0) {
                    return Err(ModelError::InvalidParam {
                        name: "base_score",
                        value: format!("{base_score} (must be in (0, 1) for a logistic objective)"),
                    });
                }
                Ok(-(1.0 / base_score - 1.0).ln())
            }
            Objective::Hinge | Objective::SoftProb | Objective::SoftMax => Ok(base_score),
        }
    }

    /// Map the margins of one row (one entry per output group) to a label.
    ///
    /// Single-output objectives are thresholded at 0.5 after their output
    /// transform: sigmoid for logistic, identity for logitraw, and a 0/1 step
    /// at zero for hinge. Returns `None` for an empty row.
    pub fn label(&self, margins: &[f32]) -> Option<u32> {
        let first = *margins.first()?;
        let label = match self {
            Objective::Logistic => u32::from(sigmoid(first) > 0.5),
            Objective::LogitRaw => u32::from(first > 0.5),
            Objective::Hinge => u32::from(first > 0.0),
            Objective::SoftProb | Objective::SoftMax => argmax(margins),
        };
        Some(label)
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn argmax(values: &[f32]) -> u32 {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best as u32
}

impl FromStr for Objective {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary:logistic" | "reg:logistic" => Ok(Objective::Logistic),
            "binary:logitraw" => Ok(Objective::LogitRaw),
            "binary:hinge" => Ok(Objective::Hinge),
            "multi:softprob" => Ok(Objective::SoftProb),
            "multi:softmax" => Ok(Objective::SoftMax),
            other => Err(ModelError::UnsupportedObjective(other.to_string())),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Objective::Logistic => "binary:logistic",
            Objective::LogitRaw => "binary:logitraw",
            Objective::Hinge => "binary:hinge",
            Objective::SoftProb => "multi:softprob",
            Objective::SoftMax => "multi:softmax",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_objectives() {
        assert_eq!("binary:logistic".parse::<Objective>().unwrap(), Objective::Logistic);
        assert_eq!("reg:logistic".parse::<Objective>().unwrap(), Objective::Logistic);
        assert_eq!("multi:softmax".parse::<Objective>().unwrap(), Objective::SoftMax);
        assert!(matches!(
            "reg:squarederror".parse::<Objective>(),
            Err(ModelError::UnsupportedObjective(_))
        ));
    }

    #[test]
    fn test_logistic_base_margin() {
        let m = Objective::Logistic.base_margin(0.5).unwrap();
        assert!(m.abs() < 1e-6);
        assert!(Objective::Logistic.base_margin(0.0).is_err());
        assert!(Objective::Logistic.base_margin(1.0).is_err());
        assert_eq!(Objective::SoftProb.base_margin(0.5).unwrap(), 0.5);
    }

    #[test]
    fn test_logistic_label_threshold() {
        assert_eq!(Objective::Logistic.label(&[0.3]), Some(1));
        assert_eq!(Objective::Logistic.label(&[-0.3]), Some(0));
        // sigmoid(0) == 0.5 is not strictly greater than the threshold
        assert_eq!(Objective::Logistic.label(&[0.0]), Some(0));
    }

    #[test]
    fn test_logitraw_uses_half_threshold() {
        assert_eq!(Objective::LogitRaw.label(&[0.01]), Some(0));
        assert_eq!(Objective::LogitRaw.label(&[0.5]), Some(0));
        assert_eq!(Objective::LogitRaw.label(&[0.6]), Some(1));
    }

    #[test]
    fn test_hinge_labels() {
        assert_eq!(Objective::Hinge.label(&[0.01]), Some(1));
        assert_eq!(Objective::Hinge.label(&[0.0]), Some(0));
        assert_eq!(Objective::Hinge.label(&[-2.0]), Some(0));
    }

    #[test]
    fn test_multiclass_argmax_prefers_first_on_tie() {
        assert_eq!(Objective::SoftProb.label(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(Objective::SoftMax.label(&[0.5, 0.5]), Some(0));
    }

    #[test]
    fn test_empty_margins_have_no_label() {
        for objective in [
            Objective::Logistic,
            Objective::LogitRaw,
            Objective::Hinge,
            Objective::SoftProb,
            Objective::SoftMax,
        ] {
            assert_eq!(objective.label(&[]), None);
        }
    }
}
