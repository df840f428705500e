//! Input manager: loads job descriptions and candidates from disk

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::records::{Candidate, JobDescription};
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a job description. JSON files are structured records; text and
    /// Markdown files fill only `full_text`.
    pub async fn load_job(&mut self, path: &Path) -> Result<JobDescription> {
        match self.load_content(path).await? {
            (FileType::Json, content) => parse_record(path, &content),
            (_, content) => Ok(JobDescription::from_text(content)),
        }
    }

    /// Load a candidate, optionally appending a cover letter to its text.
    pub async fn load_candidate(
        &mut self,
        resume: &Path,
        cover_letter: Option<&Path>,
    ) -> Result<Candidate> {
        let candidate = match self.load_content(resume).await? {
            (FileType::Json, content) => parse_record(resume, &content)?,
            (_, content) => Candidate::from_text(content),
        };

        let Some(letter_path) = cover_letter else {
            return Ok(candidate);
        };
        match self.load_content(letter_path).await? {
            (FileType::Json, _) => Err(ScreenerError::UnsupportedFormat(format!(
                "Cover letter must be text or Markdown: {}",
                letter_path.display()
            ))),
            (_, letter) => Ok(candidate.with_cover_letter(&letter)),
        }
    }

    /// File type and raw content (Markdown already reduced to text).
    async fn load_content(&mut self, path: &Path) -> Result<(FileType, String)> {
        let file_type = FileType::from_path(path)?;

        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached content for: {}", path.display());
                return Ok((file_type, cached.clone()));
            }
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = match file_type {
            FileType::Json | FileType::Text => {
                info!("Reading {:?} file: {}", file_type, path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), content.clone());
        }
        Ok((file_type, content))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn parse_record<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| {
        ScreenerError::InvalidInput(format!("Malformed record in {}: {}", path.display(), e))
    })
}
