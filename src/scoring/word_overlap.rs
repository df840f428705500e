//! Lexical overlap diagnostic between a job description and a resume

use crate::scoring::round_to;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Base/frequency/coverage weights for each of the ten iterations.
const ITERATION_WEIGHTS: [[f64; 3]; 10] = [
    [0.5, 0.3, 0.2],
    [0.4, 0.4, 0.2],
    [0.3, 0.5, 0.2],
    [0.3, 0.3, 0.4],
    [0.4, 0.3, 0.3],
    [0.5, 0.25, 0.25],
    [0.35, 0.4, 0.25],
    [0.3, 0.4, 0.3],
    [0.4, 0.35, 0.25],
    [0.33, 0.33, 0.34],
];

const VARIATION_PCT: f64 = 0.05;
const TOP_COMMON_WORDS: usize = 50;
const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonWord {
    pub word: String,
    pub jd_count: usize,
    pub resume_count: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub jd_words: usize,
    pub resume_words: usize,
    pub common_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordComparison {
    pub iterations: Vec<f64>,
    pub average: f64,
    pub common_words: Vec<CommonWord>,
    pub stats: WordStats,
}

impl WordComparison {
    fn empty() -> Self {
        Self {
            iterations: vec![0.0; ITERATION_WEIGHTS.len()],
            average: 0.0,
            common_words: Vec::new(),
            stats: WordStats::default(),
        }
    }
}

pub struct WordOverlapAnalyzer {
    stop_words: HashSet<String>,
}

impl Default for WordOverlapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl WordOverlapAnalyzer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Lowercase words of three or more characters drawn from letters,
    /// digits and `+ # . -`, with at least one letter and no stop words.
    pub fn extract_words(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || c.is_whitespace()
                    || matches!(c, '+' | '#' | '.' | '-')
                {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|w| w.len() >= MIN_WORD_LEN)
            .filter(|w| !self.stop_words.contains(*w))
            .filter(|w| w.chars().any(|c| c.is_ascii_lowercase()))
            .map(str::to_string)
            .collect()
    }

    /// Words present in both texts, most frequent first. Ties keep the order
    /// in which the word first appears in the job description.
    pub fn find_common_words(&self, jd_words: &[String], resume_words: &[String]) -> Vec<CommonWord> {
        let resume_freq = frequencies(resume_words);

        let mut jd_order: Vec<&str> = Vec::new();
        let mut jd_freq: HashMap<&str, usize> = HashMap::new();
        for word in jd_words {
            let count = jd_freq.entry(word.as_str()).or_insert(0);
            if *count == 0 {
                jd_order.push(word.as_str());
            }
            *count += 1;
        }

        let mut common: Vec<CommonWord> = jd_order
            .into_iter()
            .filter_map(|word| {
                let resume_count = *resume_freq.get(word)?;
                let jd_count = jd_freq[word];
                Some(CommonWord {
                    word: word.to_string(),
                    jd_count,
                    resume_count,
                    total: jd_count + resume_count,
                })
            })
            .collect();

        common.sort_by(|a, b| b.total.cmp(&a.total));
        common
    }

    /// Ten jittered overlap scores on a 1-10 scale.
    pub fn compare<R: Rng + ?Sized>(&self, jd_text: &str, resume_text: &str, rng: &mut R) -> WordComparison {
        let jd_words = self.extract_words(jd_text);
        let resume_words = self.extract_words(resume_text);

        if jd_words.is_empty() || resume_words.is_empty() {
            return WordComparison::empty();
        }

        let common = self.find_common_words(&jd_words, &resume_words);
        let jd_count = jd_words.len() as f64;
        let resume_count = resume_words.len() as f64;
        let common_count = common.len() as f64;

        let base_score = common_count / jd_count;
        let freq_score = common
            .iter()
            .map(|c| c.jd_count.min(c.resume_count))
            .sum::<usize>() as f64
            / jd_count;
        let coverage_score = common_count / resume_count;

        let iterations: Vec<f64> = ITERATION_WEIGHTS
            .iter()
            .map(|[w1, w2, w3]| {
                let variation = 1.0 + (rng.random::<f64>() * 2.0 - 1.0) * VARIATION_PCT;
                let raw = (base_score * w1 + freq_score * w2 + coverage_score * w3) * variation;
                round_to(1.0 + raw.min(1.0) * 9.0, 2)
            })
            .collect();

        let average = round_to(iterations.iter().sum::<f64>() / iterations.len() as f64, 2);
        let stats = WordStats {
            jd_words: jd_words.len(),
            resume_words: resume_words.len(),
            common_words: common.len(),
        };

        WordComparison {
            iterations,
            average,
            common_words: common.into_iter().take(TOP_COMMON_WORDS).collect(),
            stats,
        }
    }
}

fn frequencies(words: &[String]) -> HashMap<&str, usize> {
    let mut freq = HashMap::new();
    for word in words {
        *freq.entry(word.as_str()).or_insert(0) += 1;
    }
    freq
}

/// Convenience wrapper using a fresh analyzer.
pub fn word_comparison_score<R: Rng + ?Sized>(jd_text: &str, resume_text: &str, rng: &mut R) -> WordComparison {
    WordOverlapAnalyzer::new().compare(jd_text, resume_text, rng)
}

const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on", "with",
    "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say", "her",
    "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so", "up",
    "out", "if", "about", "who", "get", "which", "go", "me", "when", "make", "can", "like", "time",
    "no", "just", "him", "know", "take", "people", "into", "year", "your", "good", "some", "could",
    "them", "see", "other", "than", "then", "now", "look", "only", "come", "its", "over", "think",
    "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way", "even",
    "new", "want", "because", "any", "these", "give", "day", "most", "us", "is", "was", "are",
    "been", "has", "had", "were", "said", "did", "having", "may", "should", "am", "being", "such",
    "through", "where", "much", "before", "right", "too", "does", "very", "off", "need", "three",
    "must", "more", "own", "while", "here", "each", "both", "between", "under", "those", "during",
    "without", "however", "per", "within", "including", "using", "based", "across", "around",
    "along", "among", "toward", "towards", "upon",
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_text_yields_zero_iterations() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = word_comparison_score("", "anything at all here", &mut rng);

        assert_eq!(result.iterations, vec![0.0; 10]);
        assert_eq!(result.average, 0.0);
        assert!(result.common_words.is_empty());
        assert_eq!(result.stats, WordStats::default());
    }

    #[test]
    fn test_only_stop_words_counts_as_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = word_comparison_score("the and with", "python developer", &mut rng);
        assert_eq!(result.iterations, vec![0.0; 10]);
    }

    #[test]
    fn test_extract_words_keeps_tech_punctuation() {
        let analyzer = WordOverlapAnalyzer::new();
        let words = analyzer.extract_words("C# and C++ with Node.js, CI/CD (AWS) 2024 ab");

        assert!(words.contains(&"node.js".to_string()));
        assert!(words.contains(&"c++".to_string()));
        assert!(words.contains(&"aws".to_string()));
        // Too short, numeric only, or stop word.
        assert!(!words.contains(&"c#".to_string()));
        assert!(!words.contains(&"2024".to_string()));
        assert!(!words.contains(&"and".to_string()));
        assert!(!words.contains(&"ab".to_string()));
    }

    #[test]
    fn test_common_words_sorted_by_total_then_jd_order() {
        let analyzer = WordOverlapAnalyzer::new();
        let jd = analyzer.extract_words("python django python kafka");
        let resume = analyzer.extract_words("kafka django python");
        let common = analyzer.find_common_words(&jd, &resume);

        let words: Vec<&str> = common.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["python", "django", "kafka"]);
        assert_eq!(common[0].jd_count, 2);
        assert_eq!(common[0].resume_count, 1);
        assert_eq!(common[0].total, 3);
    }

    #[test]
    fn test_identical_texts_score_high_and_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let text = "python django postgres kafka docker kubernetes terraform";
        let result = word_comparison_score(text, text, &mut rng);

        assert_eq!(result.iterations.len(), 10);
        for score in &result.iterations {
            assert!(*score >= 1.0 && *score <= 10.0);
            assert!(*score > 9.0);
        }
        assert_eq!(result.stats.common_words, 7);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let jd = "Senior python engineer building data pipelines with airflow";
        let resume = "Engineer with python, pandas and airflow pipelines";

        let a = word_comparison_score(jd, resume, &mut StdRng::seed_from_u64(9));
        let b = word_comparison_score(jd, resume, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
