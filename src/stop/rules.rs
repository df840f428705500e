//! Ordered stop-rule table and the JD facts it reads

use crate::config::{StopChecks, StopConfig};
use crate::input::records::{Candidate, JobDescription};
use crate::stop::patterns::{self, KeywordScanner, OT_TERMS};
use crate::stop::{LocationDetail, ScoreDetail, StopDetails, ThresholdDetail};
use log::debug;

/// Toggle identifiers, one per configurable check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCheck {
    JdKeywords,
    MinScore,
    Yrs8,
    Mgmt5,
    ArchitectNoIc,
    Legacy,
    LocationNoRemote,
    DevopsOnly,
    QaOnly,
    PmOnly,
    Clearance,
    PhysicalOnly,
    ComplianceOnly,
    GrcOnly,
}

impl StopCheck {
    pub fn is_enabled(self, checks: &StopChecks) -> bool {
        match self {
            StopCheck::JdKeywords => checks.jd_keywords,
            StopCheck::MinScore => checks.min_score,
            StopCheck::Yrs8 => checks.yrs8,
            StopCheck::Mgmt5 => checks.mgmt5,
            StopCheck::ArchitectNoIc => checks.architect_no_ic,
            StopCheck::Legacy => checks.legacy,
            StopCheck::LocationNoRemote => checks.location_no_remote,
            StopCheck::DevopsOnly => checks.devops_only,
            StopCheck::QaOnly => checks.qa_only,
            StopCheck::PmOnly => checks.pm_only,
            StopCheck::Clearance => checks.clearance,
            StopCheck::PhysicalOnly => checks.physical_only,
            StopCheck::ComplianceOnly => checks.compliance_only,
            StopCheck::GrcOnly => checks.grc_only,
        }
    }
}

/// Everything the rules need, computed once per call.
pub struct JdFacts<'a> {
    pub final_score: f64,
    pub config: &'a StopConfig,
    pub text: &'a str,
    pub lower: String,
    pub candidate_lower: String,
    pub stop_keywords_found: Vec<String>,
    pub required_years: Option<f64>,
    pub direct_reports: Option<f64>,
    pub onsite_days: Option<f64>,
    pub ca_or_ny: bool,
    pub no_remote: bool,
}

impl<'a> JdFacts<'a> {
    pub fn gather(
        final_score: f64,
        jd: &'a JobDescription,
        candidate: &Candidate,
        config: &'a StopConfig,
    ) -> Self {
        let text = jd.full_text.as_str();
        let lower = text.to_lowercase();

        Self {
            final_score,
            config,
            text,
            stop_keywords_found: disqualifying_keywords(text, &lower, config),
            required_years: required_years(jd),
            direct_reports: patterns::direct_reports_from_text(text).map(f64::from),
            onsite_days: onsite_days(jd, &lower),
            ca_or_ny: patterns::CA_OR_NY.is_match(&lower),
            no_remote: patterns::NO_REMOTE.is_match(&lower),
            candidate_lower: candidate.full_text.to_lowercase(),
            lower,
        }
    }

    fn lacks_technical_context(&self) -> bool {
        !patterns::TECHNICAL_CONTEXT.is_match(&self.lower)
    }

    fn non_dev(&self, role: &regex::Regex) -> bool {
        role.is_match(&self.lower) && !patterns::DEV_VOCABULARY.is_match(&self.lower)
    }
}

/// Structured minimum when set, compared unrounded; otherwise parsed from text.
fn required_years(jd: &JobDescription) -> Option<f64> {
    let structured = jd.experience_bounds.min_years;
    if structured > 0.0 {
        return Some(structured);
    }
    patterns::years_from_text(&jd.full_text).map(f64::from)
}

fn onsite_days(jd: &JobDescription, lower: &str) -> Option<f64> {
    patterns::onsite_days_from_text(lower).map(f64::from).or_else(|| {
        let location = &jd.location;
        (location.onsite && location.days_on_site > 0.0).then_some(location.days_on_site)
    })
}

fn at_least(value: Option<f64>, threshold: u32) -> bool {
    value.is_some_and(|v| v >= f64::from(threshold))
}

/// Configured stop keywords plus OT terms that are not in a security context.
fn disqualifying_keywords(text: &str, lower: &str, config: &StopConfig) -> Vec<String> {
    let mut found: Vec<String> = KeywordScanner::new(&config.effective_stop_keywords())
        .find(text)
        .into_iter()
        .map(|(keyword, _)| keyword)
        .collect();

    for (term, start) in KeywordScanner::new(OT_TERMS).find(lower) {
        let window = patterns::context_window(lower, start);
        if patterns::SECURITY_CONTEXT.is_match(&window) {
            debug!("'{}' excused by security context: {:?}", term, window);
        } else {
            found.push(term);
        }
    }

    let mut seen = std::collections::HashSet::new();
    found.retain(|k| seen.insert(k.to_lowercase()));
    found
}

pub struct StopRule {
    pub check: StopCheck,
    pub reason: &'static str,
    pub predicate: fn(&JdFacts) -> bool,
    pub detail: fn(&JdFacts, &mut StopDetails),
}

fn no_detail(_: &JdFacts, _: &mut StopDetails) {}

/// Rules in evaluation order. Reasons are reported in this order, once each.
pub static RULES: &[StopRule] = &[
    StopRule {
        check: StopCheck::JdKeywords,
        reason: "jd_disqualify_keywords",
        predicate: |f| !f.stop_keywords_found.is_empty(),
        detail: |f, d| {
            if !f.stop_keywords_found.is_empty() {
                d.stop_keywords_found = Some(f.stop_keywords_found.clone());
            }
        },
    },
    StopRule {
        check: StopCheck::MinScore,
        reason: "final_score_below_8",
        predicate: |f| f.final_score < f.config.min_final_score,
        detail: |f, d| {
            d.min_score = ScoreDetail {
                final_score: f.final_score,
                threshold: f.config.min_final_score,
            }
        },
    },
    StopRule {
        check: StopCheck::Yrs8,
        reason: "requires_min_years",
        predicate: |f| {
            at_least(f.required_years, f.config.thresholds.years_min_required_stop)
        },
        detail: |f, d| {
            d.years = ThresholdDetail {
                required: f.required_years,
                threshold: f.config.thresholds.years_min_required_stop,
            }
        },
    },
    StopRule {
        check: StopCheck::Mgmt5,
        reason: "requires_direct_reports_threshold",
        predicate: |f| {
            at_least(f.direct_reports, f.config.thresholds.management_required_stop)
        },
        detail: |f, d| {
            d.management = ThresholdDetail {
                required: f.direct_reports,
                threshold: f.config.thresholds.management_required_stop,
            }
        },
    },
    StopRule {
        check: StopCheck::ArchitectNoIc,
        reason: "architect_without_ic",
        predicate: |f| {
            patterns::ARCHITECT.is_match(f.text) && !patterns::INDIVIDUAL_CONTRIBUTOR.is_match(f.text)
        },
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::Legacy,
        reason: "legacy_stack",
        predicate: |f| patterns::LEGACY_STACK.is_match(f.text),
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::LocationNoRemote,
        reason: "location_no_remote",
        predicate: |f| {
            let days_stop = at_least(f.onsite_days, f.config.thresholds.onsite_days_stop);
            (f.ca_or_ny || days_stop) && f.no_remote
        },
        detail: |f, d| {
            d.onsite = LocationDetail {
                days: f.onsite_days,
                threshold: f.config.thresholds.onsite_days_stop,
                ca_or_ny: f.ca_or_ny,
                no_remote: f.no_remote,
            }
        },
    },
    StopRule {
        check: StopCheck::Clearance,
        reason: "requires_security_clearance",
        predicate: |f| {
            patterns::CLEARANCE.is_match(&f.lower) && !patterns::CLEARANCE.is_match(&f.candidate_lower)
        },
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::PhysicalOnly,
        reason: "physical_security_only",
        predicate: |f| patterns::PHYSICAL_SECURITY.is_match(&f.lower) && f.lacks_technical_context(),
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::ComplianceOnly,
        reason: "compliance_only",
        predicate: |f| patterns::COMPLIANCE.is_match(&f.lower) && f.lacks_technical_context(),
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::GrcOnly,
        reason: "grc_only",
        predicate: |f| patterns::GOVERNANCE.is_match(&f.lower) && f.lacks_technical_context(),
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::DevopsOnly,
        reason: "non_dev_role",
        predicate: |f| f.non_dev(&patterns::DEVOPS_ROLE),
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::QaOnly,
        reason: "non_dev_role",
        predicate: |f| f.non_dev(&patterns::QA_ROLE),
        detail: no_detail,
    },
    StopRule {
        check: StopCheck::PmOnly,
        reason: "non_dev_role",
        predicate: |f| f.non_dev(&patterns::PM_ROLE),
        detail: no_detail,
    },
];
