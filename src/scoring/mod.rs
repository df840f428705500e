//! Fit scoring: subscores, weight passes, aggregation and lexical overlap

pub mod evaluator;
pub mod features;
pub mod subscores;
pub mod synonyms;
pub mod weights;
pub mod word_overlap;

pub use evaluator::{evaluate, evaluate_with, run_all, ScoreCard, Stability};
pub use features::{Feature, FeatureMap};
pub use subscores::{subscores, SkillIndex};
pub use synonyms::synonymize;
pub use weights::{backend_depth_contributions, build_weightsets, WeightPass, WeightVector};
pub use word_overlap::{word_comparison_score, WordComparison, WordOverlapAnalyzer};

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(7.25, 1), 7.3);
        assert_eq!(round_to(7.24, 1), 7.2);
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
