//! Screening pipeline: fit score, stop conditions and the final decision

use crate::config::Config;
use crate::input::records::{Candidate, JobDescription};
use crate::scoring::{run_all, ScoreCard, SkillIndex};
use crate::stop::{stop_conditions, StopResult};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// A triggered stop rule always rejects; otherwise the score decides.
    pub fn decide(stop_triggered: bool, final_score: f64, threshold: f64) -> Self {
        if !stop_triggered && final_score >= threshold {
            Decision::Accept
        } else {
            Decision::Reject
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Accept => write!(f, "accept"),
            Decision::Reject => write!(f, "reject"),
        }
    }
}

/// JD requirement terms split by whether the candidate evidences them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDiff {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl KeywordDiff {
    pub fn compute(index: &SkillIndex, jd: &JobDescription) -> Self {
        let mut seen = HashSet::new();
        let mut diff = KeywordDiff::default();

        let terms = jd
            .requirements
            .must_have
            .iter()
            .chain(&jd.requirements.nice_to_have)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty());

        for term in terms {
            if !seen.insert(term.to_lowercase()) {
                continue;
            }
            if index.has_skill(term) {
                diff.matched.push(term.to_string());
            } else {
                diff.missing.push(term.to_string());
            }
        }
        diff
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub scorecard: ScoreCard,
    pub stop: StopResult,
    pub decision: Decision,
    /// Only set when the stability check ran.
    pub stable: Option<bool>,
    pub keywords: KeywordDiff,
}

pub struct Screener {
    config: Config,
}

impl Screener {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen<R: Rng + ?Sized>(
        &self,
        jd: &JobDescription,
        candidate: &Candidate,
        rng: &mut R,
    ) -> ScreeningOutcome {
        let threshold = self.config.scoring.pass_threshold;

        let scorecard = run_all(jd, candidate, threshold, rng);
        let stop = stop_conditions(scorecard.final_score, jd, candidate, &self.config.stop);
        let decision = Decision::decide(stop.triggered, scorecard.final_score, threshold);
        let stable = scorecard
            .stability
            .map(|s| s.is_stable(self.config.scoring.stable_delta));
        let keywords = KeywordDiff::compute(&SkillIndex::new(candidate), jd);

        debug!(
            "screened: final {:.1}, stop reasons {:?}, decision {}",
            scorecard.final_score, stop.reasons, decision
        );

        ScreeningOutcome {
            scorecard,
            stop,
            decision,
            stable,
            keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::records::Requirements;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn job(text: &str) -> JobDescription {
        JobDescription {
            requirements: Requirements {
                must_have: vec!["Python".into(), "django".into(), "python".into()],
                nice_to_have: vec!["Kubernetes".into(), " ".into()],
            },
            primary_stack: vec!["python".into()],
            full_text: text.into(),
            ..JobDescription::default()
        }
    }

    fn candidate() -> Candidate {
        Candidate {
            skills: vec!["python".into(), "django".into()],
            years_overall: 6.0,
            full_text: "Python and Django developer building REST APIs".into(),
            ..Candidate::default()
        }
    }

    #[test]
    fn test_decide() {
        assert_eq!(Decision::decide(false, 8.0, 8.0), Decision::Accept);
        assert_eq!(Decision::decide(false, 7.9, 8.0), Decision::Reject);
        assert_eq!(Decision::decide(true, 9.5, 8.0), Decision::Reject);
    }

    #[test]
    fn test_keyword_diff_dedups_in_jd_order() {
        let diff = KeywordDiff::compute(&SkillIndex::new(&candidate()), &job(""));

        assert_eq!(diff.matched, vec!["Python", "django"]);
        assert_eq!(diff.missing, vec!["Kubernetes"]);
    }

    #[test]
    fn test_stop_rule_forces_reject() {
        let screener = Screener::new(Config::default().with_pass_threshold(1.0));
        let outcome = screener.screen(
            &job("Python developer for a factory floor"),
            &candidate(),
            &mut StdRng::seed_from_u64(5),
        );

        assert!(outcome.stop.triggered);
        assert_eq!(outcome.stop.reasons, vec!["jd_disqualify_keywords"]);
        assert_eq!(outcome.decision, Decision::Reject);
        assert!(outcome.stable.is_some());
    }

    #[test]
    fn test_low_threshold_accepts_clean_job() {
        let screener = Screener::new(Config::default().with_pass_threshold(1.0));
        let outcome = screener.screen(
            &job("Python Django developer"),
            &candidate(),
            &mut StdRng::seed_from_u64(5),
        );

        assert!(!outcome.stop.triggered);
        assert_eq!(outcome.decision, Decision::Accept);
        assert_eq!(outcome.stop.details.min_score.threshold, 1.0);
    }

    #[test]
    fn test_unreachable_threshold_skips_stability() {
        let screener = Screener::new(Config::default().with_pass_threshold(10.5));
        let outcome = screener.screen(
            &job("Python Django developer"),
            &candidate(),
            &mut StdRng::seed_from_u64(5),
        );

        assert_eq!(outcome.decision, Decision::Reject);
        assert_eq!(outcome.stable, None);
        assert_eq!(outcome.stop.reasons, vec!["final_score_below_8"]);
    }
}
