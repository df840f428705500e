//! Subscore calculation: candidate evidence projected onto feature keys

use crate::input::records::{Candidate, JobDescription};
use crate::scoring::features::{Feature, FeatureMap};
use crate::scoring::synonyms::synonymize;
use std::collections::HashSet;

/// Lowercased view of a candidate used for skill lookups.
pub struct SkillIndex {
    skills: HashSet<String>,
    frameworks: HashSet<String>,
    text: String,
}

impl SkillIndex {
    pub fn new(candidate: &Candidate) -> Self {
        let lower_set = |items: &[String]| -> HashSet<String> {
            items.iter().map(|s| s.trim().to_lowercase()).collect()
        };

        Self {
            skills: lower_set(&candidate.skills),
            frameworks: lower_set(&candidate.frameworks),
            text: candidate.full_text.to_lowercase(),
        }
    }

    /// True when any alias of `term` is a listed skill or framework, or a
    /// substring of the candidate's text.
    pub fn has_skill(&self, term: &str) -> bool {
        synonymize(term).iter().any(|alias| {
            self.skills.contains(alias)
                || self.frameworks.contains(alias)
                || self.text.contains(alias.as_str())
        })
    }

    pub fn has_any<S: AsRef<str>>(&self, terms: &[S]) -> bool {
        terms.iter().any(|t| self.has_skill(t.as_ref()))
    }

    /// Lowercased candidate text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fraction of `terms` the candidate evidences; 0 for an empty list.
    pub fn coverage(&self, terms: &[String]) -> f64 {
        if terms.is_empty() {
            return 0.0;
        }
        let matched = terms.iter().filter(|t| self.has_skill(t)).count();
        matched as f64 / terms.len() as f64
    }
}

fn flag(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}

pub fn normalize_years(years: f64) -> f64 {
    years.clamp(0.0, 20.0) / 20.0
}

pub fn match_must_have(index: &SkillIndex, jd: &JobDescription) -> f64 {
    index.coverage(&jd.requirements.must_have)
}

pub fn match_preferred(index: &SkillIndex, jd: &JobDescription) -> f64 {
    index.coverage(&jd.requirements.nice_to_have)
}

pub fn years_meet(candidate: &Candidate, jd: &JobDescription) -> f64 {
    flag(candidate.years_overall >= jd.experience_bounds.min_years)
}

pub fn domain_overlap(candidate: &Candidate, jd: &JobDescription) -> f64 {
    let jd_domains: HashSet<String> = jd.domain.iter().map(|d| d.to_lowercase()).collect();
    flag(
        candidate
            .domains
            .iter()
            .any(|d| jd_domains.contains(&d.to_lowercase())),
    )
}

/// Onsite deal-breaker: a five-day onsite role needs an onsite-capable candidate.
pub fn constraints_ok(candidate: &Candidate, jd: &JobDescription) -> f64 {
    let full_onsite = jd.location.onsite && jd.location.days_on_site >= 5.0;
    flag(!(full_onsite && !candidate.location.onsite))
}

/// Compute every feature value for the pair.
pub fn subscores(candidate: &Candidate, jd: &JobDescription) -> FeatureMap {
    let index = SkillIndex::new(candidate);
    subscores_with_index(&index, candidate, jd)
}

pub fn subscores_with_index(index: &SkillIndex, candidate: &Candidate, jd: &JobDescription) -> FeatureMap {
    let skill = |term: &str| flag(index.has_skill(term));
    let any = |terms: &[&str]| flag(index.has_any(terms));
    let tenure = normalize_years(candidate.years_overall);

    let values = [
        (Feature::Python, skill("python")),
        (Feature::Django, skill("django")),
        (Feature::DataStats, any(&["time series", "regression", "r", "sas", "eviews"])),
        (Feature::CloudBi, any(&["azure", "power bi"])),
        (
            Feature::Sql,
            any(&["sql", "ms-sql", "pl/sql", "t-sql", "transact-sql", "sql server"]),
        ),
        (Feature::Api, any(&["api", "json"])),
        (Feature::Genexp, tenure),
        (Feature::Domain, domain_overlap(candidate, jd)),
        (Feature::Constraints, constraints_ok(candidate, jd)),
        (Feature::Timeseries, any(&["time series", "time-series"])),
        (Feature::Regression, any(&["regression"])),
        (Feature::StatsPkgs, any(&["r", "sas", "eviews"])),
        (Feature::Azure, skill("azure")),
        (Feature::Powerbi, skill("power bi")),
        (Feature::WebOverlap, any(&["javascript", "typescript", "node", "api"])),
        (Feature::Process, any(&["sdlc", "agile", "scrum"])),
        (Feature::Stakeholder, any(&["stakeholder", "ux", "product"])),
        (Feature::Tenure, tenure),
        (Feature::Recency, 1.0),
        (Feature::MustHave, match_must_have(index, jd)),
        (Feature::Preferred, match_preferred(index, jd)),
        (Feature::Years, years_meet(candidate, jd)),
        (Feature::Xfer, any(&["c#", "php", "java", "javascript"])),
        (Feature::Migrations, any(&["migration", "rewrite", "porting"])),
        (Feature::Selflearn, any(&["self", "learn", "course", "cert"])),
        (Feature::Aws, skill("aws")),
        (Feature::Gcp, skill("gcp")),
        (Feature::Docker, skill("docker")),
        (Feature::Kubernetes, skill("kubernetes")),
        (Feature::Terraform, skill("terraform")),
        (Feature::Postgres, any(&["postgres", "postgresql"])),
        (Feature::Mysql, skill("mysql")),
        (Feature::Oracle, skill("oracle")),
        (Feature::Mongodb, skill("mongodb")),
        (Feature::Kafka, skill("kafka")),
        (Feature::Rabbitmq, skill("rabbitmq")),
        (Feature::Tableau, skill("tableau")),
        (Feature::Dbt, skill("dbt")),
        (Feature::Airflow, skill("airflow")),
        (Feature::Pandas, skill("pandas")),
        (Feature::Numpy, skill("numpy")),
        (Feature::Scikit, any(&["scikit", "sklearn", "scikit-learn"])),
        (Feature::React, skill("react")),
        (Feature::Vue, skill("vue")),
        (Feature::Angular, skill("angular")),
        (Feature::Nodejs, any(&["node", "node.js", "nodejs"])),
        (Feature::Express, skill("express")),
        (Feature::Java, skill("java")),
        (Feature::Spring, skill("spring")),
        (Feature::Dotnet, any(&[".net", "dotnet"])),
        (Feature::Excel, skill("excel")),
    ];

    values.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::records::{ExperienceBounds, Location, Requirements};

    fn candidate(text: &str) -> Candidate {
        Candidate::from_text(text)
    }

    #[test]
    fn test_has_skill_uses_synonyms_and_lists() {
        let mut c = candidate("Built ETL on SQL Server and k8s");
        c.frameworks = vec!["Django".into()];
        let index = SkillIndex::new(&c);

        assert!(index.has_skill("ms-sql"));
        assert!(index.has_skill("kubernetes"));
        assert!(index.has_skill("django"));
        assert!(!index.has_skill("terraform"));
    }

    #[test]
    fn test_normalize_years_clamps() {
        assert_eq!(normalize_years(-3.0), 0.0);
        assert_eq!(normalize_years(10.0), 0.5);
        assert_eq!(normalize_years(35.0), 1.0);
    }

    #[test]
    fn test_keyword_coverage_fractions() {
        let c = candidate("python and docker");
        let jd = JobDescription {
            requirements: Requirements {
                must_have: vec!["python".into(), "docker".into(), "terraform".into(), "go".into()],
                nice_to_have: vec![],
            },
            ..JobDescription::default()
        };
        let index = SkillIndex::new(&c);

        assert_eq!(match_must_have(&index, &jd), 0.5);
        assert_eq!(match_preferred(&index, &jd), 0.0);
    }

    #[test]
    fn test_years_and_domain() {
        let mut c = candidate("");
        c.years_overall = 6.0;
        c.domains = vec!["FinTech".into()];
        let jd = JobDescription {
            domain: vec!["fintech".into()],
            experience_bounds: ExperienceBounds { min_years: 5.0 },
            ..JobDescription::default()
        };

        assert_eq!(years_meet(&c, &jd), 1.0);
        assert_eq!(domain_overlap(&c, &jd), 1.0);

        c.years_overall = 4.0;
        assert_eq!(years_meet(&c, &jd), 0.0);
    }

    #[test]
    fn test_constraints_requires_onsite_capability_for_full_week() {
        let jd = JobDescription {
            location: Location {
                onsite: true,
                days_on_site: 5.0,
                ..Location::default()
            },
            ..JobDescription::default()
        };
        let mut c = candidate("");
        assert_eq!(constraints_ok(&c, &jd), 0.0);

        c.location.onsite = true;
        assert_eq!(constraints_ok(&c, &jd), 1.0);

        let hybrid = JobDescription {
            location: Location {
                onsite: true,
                days_on_site: 3.0,
                ..Location::default()
            },
            ..JobDescription::default()
        };
        assert_eq!(constraints_ok(&candidate(""), &hybrid), 1.0);
    }

    #[test]
    fn test_subscores_cover_every_feature_within_unit_range() {
        let c = candidate("Python developer using pandas, numpy and AWS");
        let scores = subscores(&c, &JobDescription::default());

        assert_eq!(scores.len(), Feature::ALL.len());
        assert!(scores.values().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(scores[&Feature::Python], 1.0);
        assert_eq!(scores[&Feature::Pandas], 1.0);
        assert_eq!(scores[&Feature::Aws], 1.0);
        assert_eq!(scores[&Feature::Recency], 1.0);
        assert_eq!(scores[&Feature::Kafka], 0.0);
    }
}
