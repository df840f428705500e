//! Output formatters for screening reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ScreenerError};
use crate::output::report::{BatchReport, ScreeningReport};
use crate::screener::Decision;
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

/// Common words listed in detailed output.
const DETAILED_WORD_LIMIT: usize = 15;

pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn format_batch(&self, report: &BatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn write_err(e: std::fmt::Error) -> ScreenerError {
    ScreenerError::OutputFormatting(e.to_string())
}

fn badge(score: f64) -> (&'static str, Color) {
    match score {
        s if s >= 9.0 => ("EXCELLENT", Color::Green),
        s if s >= 8.0 => ("STRONG", Color::BrightGreen),
        s if s >= 6.5 => ("FAIR", Color::Yellow),
        s if s >= 5.0 => ("WEAK", Color::BrightYellow),
        _ => ("POOR", Color::Red),
    }
}

fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Accept => "ACCEPT",
        Decision::Reject => "REJECT",
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (label, color) = badge(score);
        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_decision(&self, decision: Decision) -> String {
        let color = match decision {
            Decision::Accept => Color::Green,
            Decision::Reject => Color::Red,
        };
        if self.use_colors {
            decision_label(decision).color(color).bold().to_string()
        } else {
            decision_label(decision).to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let outcome = &report.outcome;
        let card = &outcome.scorecard;
        let mut out = String::new();

        out.push_str(&self.format_header("RESUME SCREENING", 1));
        writeln!(
            out,
            "Generated: {} | Processing time: {}ms",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        )
        .map_err(write_err)?;
        if let Some(headline) = report.job.headline() {
            writeln!(out, "Job: {}", headline).map_err(write_err)?;
        }
        if let Some(location) = &report.job.location {
            writeln!(out, "Location: {}", location).map_err(write_err)?;
        }

        out.push_str(&self.format_header("Decision", 2));
        writeln!(
            out,
            "Final score: {:.1}/10 {}",
            card.final_score,
            self.format_score_badge(card.final_score)
        )
        .map_err(write_err)?;
        writeln!(out, "Decision: {}", self.format_decision(outcome.decision)).map_err(write_err)?;
        writeln!(out, "Verdict: {}", self.colorize(&report.verdict, Color::Cyan)).map_err(write_err)?;
        if let (Some(stability), Some(stable)) = (&card.stability, outcome.stable) {
            writeln!(
                out,
                "Stability: re-evaluated {:.2} (delta {:.2}) {}",
                stability.reeval_score,
                stability.delta,
                if stable { "stable" } else { "unstable" }
            )
            .map_err(write_err)?;
        }

        if outcome.stop.triggered {
            out.push_str(&self.format_header("Stop Conditions", 2));
            for reason in &outcome.stop.reasons {
                writeln!(out, "  {} {}", self.colorize("✗", Color::Red), reason).map_err(write_err)?;
            }
            if let Some(found) = &outcome.stop.details.stop_keywords_found {
                writeln!(out, "  Keywords found: {}", found.join(", ")).map_err(write_err)?;
            }
        }

        out.push_str(&self.format_header("Requirements", 2));
        for term in &outcome.keywords.matched {
            writeln!(out, "  {} {}", self.colorize("✓", Color::Green), term).map_err(write_err)?;
        }
        for term in &outcome.keywords.missing {
            writeln!(out, "  {} {}", self.colorize("✗", Color::Red), term).map_err(write_err)?;
        }
        if outcome.keywords.matched.is_empty() && outcome.keywords.missing.is_empty() {
            writeln!(out, "  (no structured requirements)").map_err(write_err)?;
        }

        writeln!(
            out,
            "\nWord overlap: {:.2}/10 average over {} iterations",
            card.word_comparison.average,
            card.word_comparison.iterations.len()
        )
        .map_err(write_err)?;

        if self.detailed {
            out.push_str(&self.format_header("Weight Passes", 3));
            for (label, score) in card.labels.iter().zip(&card.iterations) {
                writeln!(out, "  {:<28} {:>6.2}", label, score).map_err(write_err)?;
            }

            let details = &outcome.stop.details;
            out.push_str(&self.format_header("Stop Details", 3));
            writeln!(
                out,
                "  Required years: {} (stop at {})",
                details.years.required.map_or("-".to_string(), |y| y.to_string()),
                details.years.threshold
            )
            .map_err(write_err)?;
            writeln!(
                out,
                "  Direct reports: {} (stop at {})",
                details.management.required.map_or("-".to_string(), |n| n.to_string()),
                details.management.threshold
            )
            .map_err(write_err)?;
            writeln!(
                out,
                "  Onsite days: {} (stop at {}), CA/NY: {}, no remote: {}",
                details.onsite.days.map_or("-".to_string(), |d| d.to_string()),
                details.onsite.threshold,
                details.onsite.ca_or_ny,
                details.onsite.no_remote
            )
            .map_err(write_err)?;

            let words = &card.word_comparison;
            if !words.common_words.is_empty() {
                out.push_str(&self.format_header("Common Words", 3));
                for word in words.common_words.iter().take(DETAILED_WORD_LIMIT) {
                    writeln!(
                        out,
                        "  {:<20} jd {:>3} | resume {:>3}",
                        word.word, word.jd_count, word.resume_count
                    )
                    .map_err(write_err)?;
                }
                writeln!(
                    out,
                    "  {} shared of {} JD / {} resume words",
                    words.stats.common_words, words.stats.jd_words, words.stats.resume_words
                )
                .map_err(write_err)?;
            }
        }

        Ok(out)
    }

    fn format_batch(&self, report: &BatchReport) -> Result<String> {
        let mut out = String::new();

        out.push_str(&self.format_header("CANDIDATE RANKING", 1));
        writeln!(
            out,
            "Job: {} | {} accepted of {}",
            report.job.headline().unwrap_or_else(|| file_name(&report.job_file)),
            report.accepted(),
            report.ranking.len()
        )
        .map_err(write_err)?;
        out.push('\n');

        for entry in &report.ranking {
            writeln!(
                out,
                "{:>3}. {:<32} {:>5.1} {} {}",
                entry.rank,
                file_name(&entry.candidate_file),
                entry.final_score,
                self.format_decision(entry.decision),
                entry.reasons.join(", ")
            )
            .map_err(write_err)?;
        }

        for (file, error) in &report.skipped {
            writeln!(out, "{} {}: {}", self.colorize("skipped", Color::Yellow), file_name(file), error)
                .map_err(write_err)?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_batch(&self, report: &BatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let outcome = &report.outcome;
        let card = &outcome.scorecard;
        let mut out = String::from("# Resume Screening Report\n\n");

        if self.include_metadata {
            writeln!(
                out,
                "**Generated:** {} | **Processing Time:** {}ms",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            )
            .map_err(write_err)?;
            writeln!(
                out,
                "**Resume:** `{}` | **Job:** `{}`\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_file)
            )
            .map_err(write_err)?;
        }
        if let Some(headline) = report.job.headline() {
            writeln!(out, "**Position:** {}\n", headline).map_err(write_err)?;
        }

        out.push_str("## Decision\n\n");
        writeln!(
            out,
            "**Final Score:** {:.1}/10 `{}`\n",
            card.final_score,
            badge(card.final_score).0
        )
        .map_err(write_err)?;
        writeln!(out, "**Decision:** {}\n", decision_label(outcome.decision)).map_err(write_err)?;
        writeln!(out, "**Verdict:** {}\n", report.verdict).map_err(write_err)?;
        if let Some(stability) = &card.stability {
            writeln!(
                out,
                "**Stability:** re-evaluated {:.2}, delta {:.2}\n",
                stability.reeval_score, stability.delta
            )
            .map_err(write_err)?;
        }

        if outcome.stop.triggered {
            out.push_str("## Stop Conditions\n\n");
            for reason in &outcome.stop.reasons {
                writeln!(out, "- `{}`", reason).map_err(write_err)?;
            }
            out.push('\n');
        }

        out.push_str("## Requirements\n\n| Requirement | Evidenced |\n|-------------|-----------|\n");
        for term in &outcome.keywords.matched {
            writeln!(out, "| {} | yes |", term).map_err(write_err)?;
        }
        for term in &outcome.keywords.missing {
            writeln!(out, "| {} | no |", term).map_err(write_err)?;
        }
        out.push('\n');

        if self.detailed {
            out.push_str("## Weight Passes\n\n| Pass | Score |\n|------|-------|\n");
            for (label, score) in card.labels.iter().zip(&card.iterations) {
                writeln!(out, "| {} | {:.2} |", label, score).map_err(write_err)?;
            }
            out.push('\n');
        }

        writeln!(
            out,
            "**Word Overlap:** {:.2}/10 ({} shared words)",
            card.word_comparison.average, card.word_comparison.stats.common_words
        )
        .map_err(write_err)?;

        Ok(out)
    }

    fn format_batch(&self, report: &BatchReport) -> Result<String> {
        let mut out = String::from("# Candidate Ranking\n\n");

        if self.include_metadata {
            writeln!(
                out,
                "**Generated:** {} | **Job:** `{}`\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                file_name(&report.job_file)
            )
            .map_err(write_err)?;
        }

        out.push_str("| Rank | Candidate | Score | Decision | Reasons |\n");
        out.push_str("|------|-----------|-------|----------|---------|\n");
        for entry in &report.ranking {
            writeln!(
                out,
                "| {} | {} | {:.1} | {} | {} |",
                entry.rank,
                file_name(&entry.candidate_file),
                entry.final_score,
                decision_label(entry.decision),
                entry.reasons.join(", ")
            )
            .map_err(write_err)?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_batch(&self, report: &BatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_batch(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::records::{JobDescription, Requirements};
    use crate::output::report::ReportMetadata;
    use crate::screener::Screener;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_report() -> ScreeningReport {
        let jd = JobDescription {
            title: Some("Backend Engineer".into()),
            company: Some("Acme".into()),
            requirements: Requirements {
                must_have: vec!["python".into(), "rust".into()],
                nice_to_have: Vec::new(),
            },
            full_text: "Backend engineer, Python and Rust, plant operations".into(),
            ..JobDescription::default()
        };
        let candidate = crate::input::records::Candidate::from_text("Python developer");
        let outcome = Screener::new(Config::default()).screen(&jd, &candidate, &mut StdRng::seed_from_u64(1));
        ScreeningReport::new(outcome, &jd, ReportMetadata::new("jd.json", "resume.txt", 4))
    }

    #[test]
    fn test_console_without_colors() {
        let text = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(text.contains("Job: Backend Engineer at Acme"));
        assert!(text.contains("Decision: REJECT"));
        assert!(text.contains("jd_disqualify_keywords"));
        assert!(text.contains("✓ python"));
        assert!(text.contains("✗ rust"));
        assert!(text.contains("Weight Passes"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_json_is_parseable() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"]["decision"], "reject");
        assert_eq!(value["job"]["company"], "Acme");
        assert_eq!(value["metadata"]["resume_file"], "resume.txt");
        assert!(value["outcome"]["stop"]["details"]["min_score"]["final"].is_number());
    }

    #[test]
    fn test_markdown_sections() {
        let md = MarkdownFormatter::new(true, false).format_report(&sample_report()).unwrap();

        assert!(md.starts_with("# Resume Screening Report"));
        assert!(md.contains("**Resume:** `resume.txt` | **Job:** `jd.json`"));
        assert!(md.contains("| rust | no |"));
        assert!(md.contains("- `jd_disqualify_keywords`"));
        assert!(!md.contains("## Weight Passes"));
    }

    #[test]
    fn test_batch_ranking_order() {
        let report = sample_report();
        let jd = JobDescription::default();
        let mut batch = BatchReport::new("jd.json", &jd);

        let mut low = report.outcome.clone();
        low.scorecard.final_score = 2.0;
        let mut high = report.outcome.clone();
        high.scorecard.final_score = 7.5;
        batch.add("a/low.txt", &low);
        batch.add("a/high.txt", &high);
        batch.rank();

        assert_eq!(batch.ranking[0].candidate_file, "a/high.txt");
        assert_eq!(batch.ranking[0].rank, 1);
        assert_eq!(batch.ranking[1].rank, 2);

        let md = ReportGenerator::with_options(false, false, true, false)
            .generate_batch(&batch, OutputFormat::Markdown)
            .unwrap();
        assert!(md.contains("| 1 | high.txt | 7.5 | REJECT |"));
    }
}
