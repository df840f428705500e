//! Pass evaluation and aggregation into a score card

use crate::input::records::{Candidate, JobDescription};
use crate::scoring::features::FeatureMap;
use crate::scoring::round_to;
use crate::scoring::subscores::{subscores_with_index, SkillIndex};
use crate::scoring::weights::{build_weightsets_with_index, WeightVector};
use crate::scoring::word_overlap::{WordComparison, WordOverlapAnalyzer};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PASS_THRESHOLD: f64 = 8.0;

/// Relative jitter applied to every weight during the stability check.
pub const PERTURB_PCT: f64 = 0.1;

/// Largest re-evaluation delta still considered a stable score.
pub const DEFAULT_STABLE_DELTA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stability {
    pub reeval_score: f64,
    pub delta: f64,
}

impl Stability {
    pub fn is_stable(&self, max_delta: f64) -> bool {
        self.delta <= max_delta
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub iterations: Vec<f64>,
    pub final_score: f64,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
    pub word_comparison: WordComparison,
}

/// Map one weight vector over the subscores onto the 1-10 scale.
pub fn evaluate_with(subscores: &FeatureMap, weights: &WeightVector) -> f64 {
    let total: f64 = weights
        .iter()
        .map(|(feature, weight)| weight * subscores.get(&feature).copied().unwrap_or(0.0))
        .sum();
    1.0 + 9.0 * total.clamp(0.0, 1.0)
}

pub fn evaluate(candidate: &Candidate, jd: &JobDescription, weights: &WeightVector) -> f64 {
    let index = SkillIndex::new(candidate);
    evaluate_with(&subscores_with_index(&index, candidate, jd), weights)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

/// Run every pass, average, and re-check passing scores under weight jitter.
pub fn run_all<R: Rng + ?Sized>(
    jd: &JobDescription,
    candidate: &Candidate,
    pass_threshold: f64,
    rng: &mut R,
) -> ScoreCard {
    let index = SkillIndex::new(candidate);
    let subscores = subscores_with_index(&index, candidate, jd);
    let passes = build_weightsets_with_index(&index, jd);

    let iterations: Vec<f64> = passes
        .iter()
        .map(|pass| {
            let score = evaluate_with(&subscores, &pass.weights);
            debug!("pass '{}' scored {:.3}", pass.label, score);
            score
        })
        .collect();
    let final_score = round_to(mean(&iterations), 1);

    let stability = if final_score >= pass_threshold && !passes.is_empty() {
        let perturbed: Vec<f64> = passes
            .iter()
            .map(|pass| evaluate_with(&subscores, &pass.weights.perturb(PERTURB_PCT, rng)))
            .collect();
        let reeval_score = round_to(mean(&perturbed), 2);
        let delta = round_to((final_score - reeval_score).abs(), 2);
        debug!("stability re-evaluation {:.2} (delta {:.2})", reeval_score, delta);
        Some(Stability { reeval_score, delta })
    } else {
        None
    };

    let word_comparison = WordOverlapAnalyzer::new().compare(&jd.full_text, &candidate.full_text, rng);

    ScoreCard {
        iterations,
        final_score,
        labels: passes.into_iter().map(|pass| pass.label).collect(),
        stability,
        word_comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::records::Requirements;
    use crate::scoring::features::Feature;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strong_pair() -> (JobDescription, Candidate) {
        let jd = JobDescription {
            requirements: Requirements {
                must_have: vec!["python".into(), "django".into(), "sql".into()],
                nice_to_have: vec!["aws".into()],
            },
            primary_stack: vec!["python".into()],
            domain: vec!["fintech".into()],
            full_text: "Python Django engineer with SQL and AWS for a fintech platform".into(),
            ..JobDescription::default()
        };
        let candidate = Candidate {
            skills: vec!["python".into(), "django".into(), "sql".into(), "aws".into()],
            domains: vec!["fintech".into()],
            years_overall: 20.0,
            full_text: "Python Django SQL REST API JSON AWS Azure Power BI pandas numpy scikit \
                regression time series airflow dbt tableau gcp javascript typescript node java \
                php migration rewrite porting self-taught course cert agile scrum stakeholder \
                product ux fintech"
                .into(),
            ..Candidate::default()
        };
        (jd, candidate)
    }

    #[test]
    fn test_evaluate_weighted_sum() {
        let weights = WeightVector::normalized([(Feature::Python, 0.5), (Feature::Sql, 0.5)]);
        let subscores: FeatureMap = [(Feature::Python, 1.0), (Feature::Sql, 0.0)].into_iter().collect();

        assert!((evaluate_with(&subscores, &weights) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_bounds() {
        let weights = WeightVector::normalized([(Feature::Python, 1.0)]);
        let none = FeatureMap::new();
        let full: FeatureMap = [(Feature::Python, 1.0)].into_iter().collect();

        assert_eq!(evaluate_with(&none, &weights), 1.0);
        assert_eq!(evaluate_with(&full, &weights), 10.0);
        assert_eq!(evaluate_with(&full, &WeightVector::default()), 1.0);
    }

    #[test]
    fn test_run_all_is_deterministic_with_seed() {
        let (jd, candidate) = strong_pair();
        let a = run_all(&jd, &candidate, DEFAULT_PASS_THRESHOLD, &mut StdRng::seed_from_u64(3));
        let b = run_all(&jd, &candidate, DEFAULT_PASS_THRESHOLD, &mut StdRng::seed_from_u64(3));

        assert_eq!(a, b);
        assert_eq!(a.iterations.len(), 10);
        assert_eq!(a.labels.len(), 10);
        assert!(a.iterations.iter().all(|s| (1.0..=10.0).contains(s)));
    }

    #[test]
    fn test_stability_present_only_at_or_above_threshold() {
        let (jd, candidate) = strong_pair();
        let mut rng = StdRng::seed_from_u64(11);

        let card = run_all(&jd, &candidate, 1.0, &mut rng);
        let stability = card.stability.expect("threshold 1.0 always passes");
        assert!(stability.delta >= 0.0);
        assert!(stability.is_stable(f64::INFINITY));

        let card = run_all(&jd, &candidate, 10.1, &mut rng);
        assert!(card.stability.is_none());
    }

    #[test]
    fn test_empty_inputs_floor_at_one() {
        let card = run_all(
            &JobDescription::default(),
            &Candidate::default(),
            DEFAULT_PASS_THRESHOLD,
            &mut StdRng::seed_from_u64(0),
        );

        assert!(card.iterations.iter().all(|s| *s >= 1.0));
        assert!(card.final_score >= 1.0);
        assert!(card.stability.is_none());
        assert_eq!(card.word_comparison.average, 0.0);
    }
}
