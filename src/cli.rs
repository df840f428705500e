//! CLI interface for the resume screener

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for job descriptions, resumes and cover letters.
pub const RECORD_EXTENSIONS: &[&str] = &["json", "txt", "md", "markdown"];
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Fit scoring and disqualification screening of candidates against job descriptions")]
#[command(
    long_about = "Score a candidate against a job description over ten weighting passes, check hard stop conditions, and decide accept or reject"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Screen one candidate against a job description
    Score {
        /// Path to job description file (JSON, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Path to resume file (JSON, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Cover letter appended to the resume text (TXT, MD)
        #[arg(long)]
        cover_letter: Option<PathBuf>,

        /// Pass threshold on the 1-10 scale
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Seed for the randomized checks
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include per-pass scores, stop details and common words
        #[arg(short, long)]
        detailed: bool,
    },

    /// Rank every candidate file in a directory against one job description
    Batch {
        /// Path to job description file (JSON, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Directory of candidate files
        #[arg(long)]
        candidates: PathBuf,

        /// Pass threshold on the 1-10 scale
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Seed for the randomized checks
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_score_command() {
        let cli = Cli::parse_from([
            "resume-screener",
            "score",
            "--job",
            "jd.json",
            "--resume",
            "cv.md",
            "--seed",
            "7",
            "--threshold",
            "7.5",
            "-v",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Score { job, seed, threshold, cover_letter, .. } => {
                assert_eq!(job, PathBuf::from("jd.json"));
                assert_eq!(seed, Some(7));
                assert_eq!(threshold, Some(7.5));
                assert!(cover_letter.is_none());
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("jd.JSON"), RECORD_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("letter.json"), TEXT_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("resume"), RECORD_EXTENSIONS).is_err());
    }
}
