//! Report structures wrapping screening outcomes with metadata

use crate::input::records::JobDescription;
use crate::screener::{Decision, ScreeningOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report metadata and generation info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub screener_version: String,
    pub job_file: String,
    pub resume_file: String,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(job_file: &str, resume_file: &str, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            screener_version: env!("CARGO_PKG_VERSION").to_string(),
            job_file: job_file.to_string(),
            resume_file: resume_file.to_string(),
            processing_time_ms,
        }
    }
}

/// Identifying fields of the job description, when the record has them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl JobSummary {
    pub fn from_job(jd: &JobDescription) -> Self {
        Self {
            title: jd.title.clone(),
            company: jd.company.clone(),
            location: jd.location.display_name(),
        }
    }

    /// "Title at Company", falling back to whichever part is known.
    pub fn headline(&self) -> Option<String> {
        match (&self.title, &self.company) {
            (Some(title), Some(company)) => Some(format!("{} at {}", title, company)),
            (Some(title), None) => Some(title.clone()),
            (None, Some(company)) => Some(company.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub job: JobSummary,
    pub verdict: String,
    pub outcome: ScreeningOutcome,
    pub metadata: ReportMetadata,
}

impl ScreeningReport {
    pub fn new(outcome: ScreeningOutcome, jd: &JobDescription, metadata: ReportMetadata) -> Self {
        Self {
            job: JobSummary::from_job(jd),
            verdict: verdict(&outcome),
            outcome,
            metadata,
        }
    }
}

/// One-line summary of the decision.
pub fn verdict(outcome: &ScreeningOutcome) -> String {
    let score = outcome.scorecard.final_score;
    match outcome.decision {
        Decision::Accept => match outcome.stable {
            Some(false) => format!("Accept at {:.1}/10, but the score is sensitive to weighting", score),
            _ => format!("Accept at {:.1}/10", score),
        },
        Decision::Reject if outcome.stop.triggered => format!(
            "Reject at {:.1}/10: {}",
            score,
            outcome.stop.reasons.join(", ")
        ),
        Decision::Reject => format!("Reject at {:.1}/10: below the pass threshold", score),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub rank: usize,
    pub candidate_file: String,
    pub final_score: f64,
    pub decision: Decision,
    pub reasons: Vec<String>,
}

/// Candidates screened against one job, best score first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub job_file: String,
    pub job: JobSummary,
    pub ranking: Vec<BatchEntry>,
    /// Files that could not be loaded, with the error message.
    pub skipped: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(job_file: &str, jd: &JobDescription) -> Self {
        Self {
            generated_at: Utc::now(),
            job_file: job_file.to_string(),
            job: JobSummary::from_job(jd),
            ranking: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn add(&mut self, candidate_file: &str, outcome: &ScreeningOutcome) {
        self.ranking.push(BatchEntry {
            rank: 0,
            candidate_file: candidate_file.to_string(),
            final_score: outcome.scorecard.final_score,
            decision: outcome.decision,
            reasons: outcome.stop.reasons.clone(),
        });
    }

    pub fn skip(&mut self, candidate_file: &str, error: &str) {
        self.skipped.push((candidate_file.to_string(), error.to_string()));
    }

    /// Sort by final score, accepted candidates first on ties, and number the ranks.
    pub fn rank(&mut self) {
        self.ranking.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| (a.decision != Decision::Accept).cmp(&(b.decision != Decision::Accept)))
        });
        for (i, entry) in self.ranking.iter_mut().enumerate() {
            entry.rank = i + 1;
        }
    }

    pub fn accepted(&self) -> usize {
        self.ranking
            .iter()
            .filter(|e| e.decision == Decision::Accept)
            .count()
    }
}
