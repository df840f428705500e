//! Stop-condition rule engine
//!
//! Hard disqualifiers evaluated over a job description after scoring. Every
//! rule is an entry in [`rules::RULES`]; disabled rules are skipped but the
//! numbers they would have used are still reported in [`StopDetails`].

pub mod patterns;
pub mod rules;

use crate::config::StopConfig;
use crate::input::records::{Candidate, JobDescription};
use log::debug;
use rules::{JdFacts, RULES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    #[serde(rename = "final")]
    pub final_score: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDetail {
    pub required: Option<f64>,
    pub threshold: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDetail {
    pub days: Option<f64>,
    pub threshold: u32,
    pub ca_or_ny: bool,
    pub no_remote: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopDetails {
    pub min_score: ScoreDetail,
    pub years: ThresholdDetail,
    pub management: ThresholdDetail,
    pub onsite: LocationDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_keywords_found: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopResult {
    pub triggered: bool,
    pub reasons: Vec<String>,
    pub details: StopDetails,
}

/// Evaluate every enabled stop rule against the job description.
pub fn stop_conditions(
    final_score: f64,
    jd: &JobDescription,
    candidate: &Candidate,
    config: &StopConfig,
) -> StopResult {
    let facts = JdFacts::gather(final_score, jd, candidate, config);
    let mut details = StopDetails::default();
    let mut reasons: Vec<String> = Vec::new();

    for rule in RULES {
        (rule.detail)(&facts, &mut details);

        if !rule.check.is_enabled(&config.checks) || !(rule.predicate)(&facts) {
            continue;
        }
        debug!("stop rule {:?} hit: {}", rule.check, rule.reason);
        if !reasons.iter().any(|r| r == rule.reason) {
            reasons.push(rule.reason.to_string());
        }
    }

    StopResult {
        triggered: !reasons.is_empty(),
        reasons,
        details,
    }
}
