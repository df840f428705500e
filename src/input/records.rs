//! Job description and candidate records
//!
//! Both records are assembled by an upstream extractor and consumed read-only
//! by the scoring and stop engines. Every field is optional on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub onsite: bool,
    pub days_on_site: f64,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Location {
    /// Human readable "City, ST" form, if either part is known.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceBounds {
    pub min_years: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    pub title: Option<String>,
    pub company: Option<String>,
    pub requirements: Requirements,
    pub primary_stack: Vec<String>,
    pub domain: Vec<String>,
    pub experience_bounds: ExperienceBounds,
    pub location: Location,
    pub full_text: String,
}

impl JobDescription {
    /// A record carrying only raw text, as produced for unstructured input.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            full_text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub skills: Vec<String>,
    pub frameworks: Vec<String>,
    pub domains: Vec<String>,
    pub years_overall: f64,
    pub location: Location,
    pub full_text: String,
}

impl Candidate {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            full_text: text.into(),
            ..Self::default()
        }
    }

    /// Append a cover letter to the candidate's full text.
    pub fn with_cover_letter(mut self, cover_letter: &str) -> Self {
        self.full_text = format!("{}\n{}", self.full_text, cover_letter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let jd: JobDescription = serde_json::from_str(
            r#"{"requirements": {"must_have": ["python"]}, "location": {"onsite": true}}"#,
        )
        .unwrap();

        assert_eq!(jd.requirements.must_have, vec!["python".to_string()]);
        assert!(jd.requirements.nice_to_have.is_empty());
        assert_eq!(jd.experience_bounds.min_years, 0.0);
        assert!(jd.location.onsite);
        assert_eq!(jd.location.days_on_site, 0.0);
        assert!(jd.full_text.is_empty());
    }

    #[test]
    fn test_integer_and_float_years_both_parse() {
        let a: Candidate = serde_json::from_str(r#"{"years_overall": 7}"#).unwrap();
        let b: Candidate = serde_json::from_str(r#"{"years_overall": 7.5}"#).unwrap();
        assert_eq!(a.years_overall, 7.0);
        assert_eq!(b.years_overall, 7.5);
    }

    #[test]
    fn test_cover_letter_is_appended_after_newline() {
        let candidate = Candidate::from_text("Resume body").with_cover_letter("Dear team");
        assert_eq!(candidate.full_text, "Resume body\nDear team");
    }

    #[test]
    fn test_location_display_name() {
        let location = Location {
            city: Some("Austin".into()),
            state: Some("TX".into()),
            ..Location::default()
        };
        assert_eq!(location.display_name().as_deref(), Some("Austin, TX"));
        assert_eq!(Location::default().display_name(), None);
    }
}
