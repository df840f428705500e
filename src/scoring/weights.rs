//! Weight passes: nine static lenses plus the JD-driven Backend Depth pass

use crate::input::records::{Candidate, JobDescription};
use crate::scoring::features::{Feature, FeatureMap};
use crate::scoring::subscores::SkillIndex;
use crate::scoring::synonyms::synonymize;
use log::debug;
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

pub const BACKEND_DEPTH_LABEL: &str = "Backend Depth";

/// JD emphasis multipliers for the Backend Depth pass.
const BOOST_REQUIRED: f64 = 2.0;
const BOOST_PREFERRED: f64 = 1.5;
const BOOST_NONE: f64 = 1.0;

/// Cap on the log2 mention density bonus.
const DENSITY_CAP: f64 = 3.0;

/// A feature-keyed weight map whose values sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightVector(FeatureMap);

impl WeightVector {
    /// Build a vector from raw weights, renormalizing to sum 1.
    pub fn normalized<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (Feature, f64)>,
    {
        let mut weights = FeatureMap::new();
        for (feature, weight) in raw {
            *weights.entry(feature).or_insert(0.0) += weight.max(0.0);
        }
        Self::renormalize(weights)
    }

    fn renormalize(mut weights: FeatureMap) -> Self {
        let sum: f64 = weights.values().sum();
        let denominator = if sum > 0.0 { sum } else { 1.0 };
        for weight in weights.values_mut() {
            *weight /= denominator;
        }
        Self(weights)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0.get(&feature).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Jitter each weight by a uniform factor in `[1 - pct, 1 + pct)` and
    /// renormalize.
    pub fn perturb<R: Rng + ?Sized>(&self, pct: f64, rng: &mut R) -> Self {
        let jittered = self
            .0
            .iter()
            .map(|(feature, weight)| {
                let delta = (rng.random::<f64>() * 2.0 - 1.0) * pct * weight;
                (*feature, (weight + delta).max(0.0))
            })
            .collect();
        Self::renormalize(jittered)
    }
}

/// One labelled evaluation lens.
#[derive(Debug, Clone, Serialize)]
pub struct WeightPass {
    pub label: String,
    pub weights: WeightVector,
}

impl WeightPass {
    fn new(label: &str, weights: WeightVector) -> Self {
        Self {
            label: label.to_string(),
            weights,
        }
    }
}

/// Technology features considered by Backend Depth, with the aliases used for
/// presence, JD emphasis and mention counting.
const STACK_FEATURES: &[(Feature, &[&str])] = &[
    (Feature::Python, &["python"]),
    (Feature::Django, &["django"]),
    (
        Feature::Sql,
        &["sql", "ms-sql", "sql server", "t-sql", "pl/sql", "transact-sql"],
    ),
    (Feature::Api, &["api", "json"]),
    (Feature::WebOverlap, &["javascript", "typescript", "node"]),
    (Feature::Azure, &["azure"]),
    (Feature::Aws, &["aws", "amazon web services"]),
    (Feature::Gcp, &["gcp", "google cloud", "google cloud platform"]),
    (Feature::Powerbi, &["power bi", "powerbi"]),
    (Feature::Tableau, &["tableau"]),
    (Feature::Airflow, &["airflow", "apache airflow"]),
    (Feature::Dbt, &["dbt", "data build tool"]),
    (Feature::Pandas, &["pandas"]),
    (Feature::Numpy, &["numpy"]),
    (Feature::Scikit, &["scikit-learn", "sklearn", "scikit"]),
    (Feature::Docker, &["docker"]),
    (Feature::Kubernetes, &["kubernetes", "k8s"]),
    (Feature::Terraform, &["terraform"]),
    (Feature::Postgres, &["postgres", "postgresql"]),
    (Feature::Mysql, &["mysql"]),
    (Feature::Oracle, &["oracle", "oracle db"]),
    (Feature::Mongodb, &["mongodb", "mongo"]),
    (Feature::Kafka, &["kafka", "apache kafka"]),
    (Feature::Rabbitmq, &["rabbitmq"]),
    (Feature::React, &["react", "reactjs", "react.js"]),
    (Feature::Vue, &["vue", "vuejs", "vue.js"]),
    (Feature::Angular, &["angular", "angularjs"]),
    (Feature::Nodejs, &["node", "nodejs", "node.js"]),
    (Feature::Express, &["express", "express.js"]),
    (Feature::Java, &["java"]),
    (Feature::Spring, &["spring", "spring boot", "springboot"]),
    (Feature::Dotnet, &[".net", "dotnet"]),
    (Feature::Excel, &["excel", "microsoft excel"]),
];

const BACKEND_FALLBACK: [Feature; 4] = [Feature::Python, Feature::Django, Feature::Sql, Feature::Api];

/// Lowercased JD emphasis lists.
struct JdEmphasis {
    primary: HashSet<String>,
    must: HashSet<String>,
    preferred: HashSet<String>,
}

impl JdEmphasis {
    fn new(jd: &JobDescription) -> Self {
        let lower = |items: &[String]| -> HashSet<String> {
            items.iter().map(|s| s.trim().to_lowercase()).collect()
        };
        Self {
            primary: lower(&jd.primary_stack),
            must: lower(&jd.requirements.must_have),
            preferred: lower(&jd.requirements.nice_to_have),
        }
    }

    fn boost(&self, aliases: &[&str]) -> f64 {
        let listed = |set: &HashSet<String>| aliases.iter().any(|a| set.contains(*a));
        if listed(&self.primary) || listed(&self.must) {
            BOOST_REQUIRED
        } else if listed(&self.preferred) {
            BOOST_PREFERRED
        } else {
            BOOST_NONE
        }
    }
}

/// Whole-word counter over every synonym of a feature's aliases. Boundaries
/// are ASCII, so accented letters next to a term do not hide it.
struct MentionCounter {
    patterns: Vec<Regex>,
}

impl MentionCounter {
    fn new(aliases: &[&str]) -> Self {
        let patterns = aliases
            .iter()
            .flat_map(|alias| synonymize(alias))
            .filter_map(|synonym| {
                Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(&synonym))).ok()
            })
            .collect();
        Self { patterns }
    }

    /// Each synonym is counted on its own, so overlapping alias sets count twice.
    fn count(&self, text: &str) -> usize {
        self.patterns.iter().map(|re| re.find_iter(text).count()).sum()
    }
}

/// One counter per entry of `STACK_FEATURES`, in the same order.
static STACK_MENTIONS: LazyLock<Vec<MentionCounter>> = LazyLock::new(|| {
    STACK_FEATURES
        .iter()
        .map(|(_, aliases)| MentionCounter::new(aliases))
        .collect()
});

pub fn mention_density(mentions: usize) -> f64 {
    1.0 + DENSITY_CAP.min((1.0 + mentions as f64).log2())
}

/// Raw (unnormalized) Backend Depth weight for every evidenced feature.
pub fn backend_depth_contributions(jd: &JobDescription, candidate: &Candidate) -> FeatureMap {
    let index = SkillIndex::new(candidate);
    backend_depth_with_index(&index, jd)
}

fn backend_depth_with_index(index: &SkillIndex, jd: &JobDescription) -> FeatureMap {
    let emphasis = JdEmphasis::new(jd);
    let mut contributions = FeatureMap::new();

    for ((feature, aliases), counter) in STACK_FEATURES.iter().zip(STACK_MENTIONS.iter()) {
        if !index.has_any(aliases) {
            continue;
        }
        let boost = emphasis.boost(aliases);
        let mentions = counter.count(index.text());
        let weight = boost * mention_density(mentions);
        debug!(
            "backend depth: {} boost={} mentions={} weight={:.3}",
            feature, boost, mentions, weight
        );
        *contributions.entry(*feature).or_insert(0.0) += weight;
    }

    contributions
}

fn backend_depth(index: &SkillIndex, jd: &JobDescription) -> WeightVector {
    let contributions = backend_depth_with_index(index, jd);
    if contributions.values().sum::<f64>() <= 0.0 {
        return WeightVector::normalized(BACKEND_FALLBACK.iter().map(|f| (*f, 1.0)));
    }
    WeightVector::normalized(contributions)
}

fn static_pass(label: &str, raw: &[(Feature, f64)]) -> WeightPass {
    WeightPass::new(label, WeightVector::normalized(raw.iter().copied()))
}

/// Build the ten labelled weight passes for a JD/candidate pair.
pub fn build_weightsets(jd: &JobDescription, candidate: &Candidate) -> Vec<WeightPass> {
    let index = SkillIndex::new(candidate);
    build_weightsets_with_index(&index, jd)
}

pub fn build_weightsets_with_index(index: &SkillIndex, jd: &JobDescription) -> Vec<WeightPass> {
    use Feature::*;

    vec![
        static_pass(
            "Python/Django Focus",
            &[(Python, 0.35), (Django, 0.25), (Api, 0.2), (Sql, 0.2)],
        ),
        WeightPass::new(BACKEND_DEPTH_LABEL, backend_depth(index, jd)),
        static_pass(
            "Data/Modeling",
            &[
                (Pandas, 0.25),
                (Numpy, 0.15),
                (Scikit, 0.2),
                (Sql, 0.2),
                (Timeseries, 0.1),
                (Regression, 0.1),
            ],
        ),
        static_pass(
            "Cloud/BI",
            &[
                (Azure, 0.25),
                (Aws, 0.1),
                (Gcp, 0.1),
                (Powerbi, 0.2),
                (Tableau, 0.1),
                (Dbt, 0.1),
                (Airflow, 0.15),
            ],
        ),
        static_pass(
            "Transferability",
            &[(WebOverlap, 0.3), (Xfer, 0.25), (Migrations, 0.25), (Selflearn, 0.2)],
        ),
        static_pass("Domain Fit", &[(Domain, 0.7), (Constraints, 0.3)]),
        static_pass("Experience Tenure", &[(Genexp, 0.5), (Tenure, 0.2), (Years, 0.3)]),
        static_pass("Keyword Match Strict", &[(MustHave, 0.8), (Preferred, 0.2)]),
        static_pass(
            "Learning Agility",
            &[(Selflearn, 0.5), (Process, 0.25), (Stakeholder, 0.25)],
        ),
        static_pass(
            "Holistic",
            &[
                (MustHave, 0.3),
                (Preferred, 0.1),
                (Domain, 0.1),
                (Genexp, 0.15),
                (WebOverlap, 0.1),
                (Api, 0.1),
                (Sql, 0.1),
                (CloudBi, 0.05),
            ],
        ),
    ]
}
