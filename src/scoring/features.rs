//! Feature keys shared by the subscore calculator and the weight builder

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of signals derived from a job description and a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Python,
    Django,
    DataStats,
    CloudBi,
    Sql,
    Api,
    Genexp,
    Domain,
    Constraints,
    Timeseries,
    Regression,
    StatsPkgs,
    Azure,
    Powerbi,
    WebOverlap,
    Process,
    Stakeholder,
    Tenure,
    Recency,
    MustHave,
    Preferred,
    Years,
    Xfer,
    Migrations,
    Selflearn,
    Aws,
    Gcp,
    Docker,
    Kubernetes,
    Terraform,
    Postgres,
    Mysql,
    Oracle,
    Mongodb,
    Kafka,
    Rabbitmq,
    Tableau,
    Dbt,
    Airflow,
    Pandas,
    Numpy,
    Scikit,
    React,
    Vue,
    Angular,
    Nodejs,
    Express,
    Java,
    Spring,
    Dotnet,
    Excel,
}

impl Feature {
    pub const ALL: [Feature; 51] = [
        Feature::Python,
        Feature::Django,
        Feature::DataStats,
        Feature::CloudBi,
        Feature::Sql,
        Feature::Api,
        Feature::Genexp,
        Feature::Domain,
        Feature::Constraints,
        Feature::Timeseries,
        Feature::Regression,
        Feature::StatsPkgs,
        Feature::Azure,
        Feature::Powerbi,
        Feature::WebOverlap,
        Feature::Process,
        Feature::Stakeholder,
        Feature::Tenure,
        Feature::Recency,
        Feature::MustHave,
        Feature::Preferred,
        Feature::Years,
        Feature::Xfer,
        Feature::Migrations,
        Feature::Selflearn,
        Feature::Aws,
        Feature::Gcp,
        Feature::Docker,
        Feature::Kubernetes,
        Feature::Terraform,
        Feature::Postgres,
        Feature::Mysql,
        Feature::Oracle,
        Feature::Mongodb,
        Feature::Kafka,
        Feature::Rabbitmq,
        Feature::Tableau,
        Feature::Dbt,
        Feature::Airflow,
        Feature::Pandas,
        Feature::Numpy,
        Feature::Scikit,
        Feature::React,
        Feature::Vue,
        Feature::Angular,
        Feature::Nodejs,
        Feature::Express,
        Feature::Java,
        Feature::Spring,
        Feature::Dotnet,
        Feature::Excel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Python => "python",
            Feature::Django => "django",
            Feature::DataStats => "data_stats",
            Feature::CloudBi => "cloud_bi",
            Feature::Sql => "sql",
            Feature::Api => "api",
            Feature::Genexp => "genexp",
            Feature::Domain => "domain",
            Feature::Constraints => "constraints",
            Feature::Timeseries => "timeseries",
            Feature::Regression => "regression",
            Feature::StatsPkgs => "stats_pkgs",
            Feature::Azure => "azure",
            Feature::Powerbi => "powerbi",
            Feature::WebOverlap => "web_overlap",
            Feature::Process => "process",
            Feature::Stakeholder => "stakeholder",
            Feature::Tenure => "tenure",
            Feature::Recency => "recency",
            Feature::MustHave => "must_have",
            Feature::Preferred => "preferred",
            Feature::Years => "years",
            Feature::Xfer => "xfer",
            Feature::Migrations => "migrations",
            Feature::Selflearn => "selflearn",
            Feature::Aws => "aws",
            Feature::Gcp => "gcp",
            Feature::Docker => "docker",
            Feature::Kubernetes => "kubernetes",
            Feature::Terraform => "terraform",
            Feature::Postgres => "postgres",
            Feature::Mysql => "mysql",
            Feature::Oracle => "oracle",
            Feature::Mongodb => "mongodb",
            Feature::Kafka => "kafka",
            Feature::Rabbitmq => "rabbitmq",
            Feature::Tableau => "tableau",
            Feature::Dbt => "dbt",
            Feature::Airflow => "airflow",
            Feature::Pandas => "pandas",
            Feature::Numpy => "numpy",
            Feature::Scikit => "scikit",
            Feature::React => "react",
            Feature::Vue => "vue",
            Feature::Angular => "angular",
            Feature::Nodejs => "nodejs",
            Feature::Express => "express",
            Feature::Java => "java",
            Feature::Spring => "spring",
            Feature::Dotnet => "dotnet",
            Feature::Excel => "excel",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered feature-to-value map. Ordering keeps randomized passes reproducible.
pub type FeatureMap = BTreeMap<Feature, f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_complete_and_unique() {
        let mut keys: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Feature::ALL.len());
    }

    #[test]
    fn test_serde_name_matches_key() {
        for feature in Feature::ALL {
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.as_str()));
        }
    }
}
