//! Resume screener: fit scoring and disqualification screening

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::input::{FileType, InputManager};
use resume_screener::output::formatter::{save_report_to_file, ReportGenerator};
use resume_screener::output::report::{BatchReport, ReportMetadata, ScreeningReport};
use resume_screener::screener::Screener;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run_command(cli).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.context("Failed to load configuration")
}

/// Apply command-line overrides on top of the loaded configuration.
fn resolve_settings(
    mut config: Config,
    threshold: Option<f64>,
    seed: Option<u64>,
    output: Option<&str>,
) -> Result<(Config, StdRng, OutputFormat)> {
    if let Some(threshold) = threshold {
        if !(1.0..=10.0).contains(&threshold) {
            bail!("Threshold must be between 1 and 10, got {}", threshold);
        }
        config = config.with_pass_threshold(threshold);
    }

    let format = match output {
        Some(output) => cli::parse_output_format(output).map_err(anyhow::Error::msg)?,
        None => config.output.format,
    };

    let rng = match seed.or(config.scoring.seed) {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    Ok((config, rng, format))
}

fn emit(content: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(content, path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

async fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Score {
            job,
            resume,
            cover_letter,
            threshold,
            seed,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&job, cli::RECORD_EXTENSIONS)
                .map_err(anyhow::Error::msg)
                .context("Job description file")?;
            cli::validate_file_extension(&resume, cli::RECORD_EXTENSIONS)
                .map_err(anyhow::Error::msg)
                .context("Resume file")?;
            if let Some(letter) = &cover_letter {
                cli::validate_file_extension(letter, cli::TEXT_EXTENSIONS)
                    .map_err(anyhow::Error::msg)
                    .context("Cover letter file")?;
            }

            let config = load_config(cli.config.as_deref())?;
            let (mut config, mut rng, format) =
                resolve_settings(config, threshold, seed, output.as_deref())?;
            config.output.detailed |= detailed;

            let started = Instant::now();
            let mut input_manager = InputManager::new();
            let jd = input_manager
                .load_job(&job)
                .await
                .with_context(|| format!("Failed to load job description {}", job.display()))?;
            let candidate = input_manager
                .load_candidate(&resume, cover_letter.as_deref())
                .await
                .with_context(|| format!("Failed to load resume {}", resume.display()))?;

            info!("Screening {} against {}", resume.display(), job.display());
            let screener = Screener::new(config);
            let outcome = screener.screen(&jd, &candidate, &mut rng);

            let metadata = ReportMetadata::new(
                &job.to_string_lossy(),
                &resume.to_string_lossy(),
                started.elapsed().as_millis() as u64,
            );
            let report = ScreeningReport::new(outcome, &jd, metadata);

            let generator = ReportGenerator::from_config(&screener.config().output);
            let content = generator.generate_report(&report, format)?;
            emit(&content, save.as_deref())?;
        }

        Commands::Batch {
            job,
            candidates,
            threshold,
            seed,
            output,
        } => {
            cli::validate_file_extension(&job, cli::RECORD_EXTENSIONS)
                .map_err(anyhow::Error::msg)
                .context("Job description file")?;
            if !candidates.is_dir() {
                bail!("Not a directory: {}", candidates.display());
            }

            let config = load_config(cli.config.as_deref())?;
            let (config, mut rng, format) = resolve_settings(config, threshold, seed, output.as_deref())?;

            let mut input_manager = InputManager::new();
            let jd = input_manager
                .load_job(&job)
                .await
                .with_context(|| format!("Failed to load job description {}", job.display()))?;

            let files = candidate_files(&candidates, &job).await?;
            if files.is_empty() {
                bail!("No candidate files found in {}", candidates.display());
            }
            info!("Ranking {} candidates against {}", files.len(), job.display());

            let progress = ProgressBar::new(files.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let screener = Screener::new(config);
            let mut batch = BatchReport::new(&job.to_string_lossy(), &jd);
            for file in &files {
                let name = file.to_string_lossy();
                progress.set_message(name.to_string());

                match input_manager.load_candidate(file, None).await {
                    Ok(candidate) => {
                        let outcome = screener.screen(&jd, &candidate, &mut rng);
                        batch.add(&name, &outcome);
                    }
                    Err(e) => {
                        warn!("Skipping {}: {}", file.display(), e);
                        batch.skip(&name, &e.to_string());
                    }
                }
                progress.inc(1);
            }
            progress.finish_and_clear();
            batch.rank();

            let generator = ReportGenerator::from_config(&screener.config().output);
            println!("{}", generator.generate_batch(&batch, format)?);
        }

        Commands::Config { action } => {
            let path = cli.config.clone().unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let config = load_config(cli.config.as_deref())?;
                    println!("# {}", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }

                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Configuration reset to defaults at {}", path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

/// Supported files in `dir`, sorted by name, excluding the job file itself.
async fn candidate_files(dir: &Path, job: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read {}", dir.display()))?;
    let job = job.canonicalize().ok();

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() || path.canonicalize().ok() == job {
            continue;
        }
        match FileType::from_path(&path) {
            Ok(file_type) if file_type.is_supported() => files.push(path),
            _ => info!("Ignoring {}", path.display()),
        }
    }

    files.sort();
    Ok(files)
}
