use serde::Serialize;
use std::fmt;

use crate::fingerprint::{Fingerprint, PLACEHOLDER};

/// Outcome of aligning two fingerprints. `similarity` is `None` when no
/// aligned pair carried comparable information; callers must read it
/// together with `coverage`, since similarity alone is meaningless at low
/// coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub similarity: Option<f64>,
    pub coverage: f64,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.similarity {
            Some(s) => write!(f, "similarity: {s:.6}, coverage: {:.6}", self.coverage),
            None => write!(f, "similarity: undefined, coverage: {:.6}", self.coverage),
        }
    }
}

/// Align two fingerprints position-by-position up to the shorter length;
/// positions beyond that are excluded. A pair is skipped when either side
/// is the placeholder. Coverage is measured against the first operand.
pub fn compare(first: &Fingerprint, second: &Fingerprint) -> Comparison {
    let mut matches = 0u64;
    let mut mismatches = 0u64;
    for (c1, c2) in first.as_str().chars().zip(second.as_str().chars()) {
        if c1 == PLACEHOLDER || c2 == PLACEHOLDER {
            continue;
        }
        if c1 == c2 {
            matches += 1;
        } else {
            mismatches += 1;
        }
    }

    let total = matches + mismatches;
    let similarity = if total > 0 {
        Some(matches as f64 / total as f64)
    } else {
        None
    };
    let coverage = if first.is_empty() {
        0.0
    } else {
        total as f64 / first.len() as f64
    };
    Comparison {
        similarity,
        coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(s: &str) -> Fingerprint {
        Fingerprint::parse(s).expect("valid fingerprint")
    }

    #[test]
    fn identical_fingerprints_match_fully() {
        let result = compare(&fp("6c1f"), &fp("6c1f"));
        assert_eq!(result.similarity, Some(1.0));
        assert_eq!(result.coverage, 1.0);
    }

    #[test]
    fn placeholders_are_excluded_on_either_side() {
        // Positions 0 and 2 are masked; of the rest, one matches and one
        // does not.
        let result = compare(&fp(".a1b"), &fp("aa2b"));
        assert_eq!(result.similarity, Some(0.5));
        assert_eq!(result.coverage, 0.5);
    }

    #[test]
    fn uppercase_literal_matches_its_lowercase_twin() {
        let result = compare(&fp("6C1F"), &fp("6c1f"));
        assert_eq!(result.similarity, Some(1.0));
        assert_eq!(result.coverage, 1.0);
    }

    #[test]
    fn all_placeholder_comparison_is_undefined_not_zero() {
        let result = compare(&fp("...."), &fp("...."));
        assert_eq!(result.similarity, None);
        assert_eq!(result.coverage, 0.0);
    }

    #[test]
    fn zero_similarity_is_distinct_from_undefined() {
        let result = compare(&fp("ab"), &fp("cd"));
        assert_eq!(result.similarity, Some(0.0));
        assert_eq!(result.coverage, 1.0);
    }

    #[test]
    fn length_mismatch_truncates_to_shorter_operand() {
        // Only the first two positions align; coverage is still measured
        // against the full first operand.
        let result = compare(&fp("ab12"), &fp("ab"));
        assert_eq!(result.similarity, Some(1.0));
        assert_eq!(result.coverage, 0.5);
    }

    #[test]
    fn empty_first_operand_yields_zero_coverage() {
        let result = compare(&fp(""), &fp("abcd"));
        assert_eq!(result.similarity, None);
        assert_eq!(result.coverage, 0.0);
    }

    #[test]
    fn serializes_undefined_similarity_as_null() {
        let result = compare(&fp("."), &fp("."));
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"similarity":null,"coverage":0.0}"#);
    }
}
