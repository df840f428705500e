//! Resume screener library
//!
//! Scores a candidate against a job description over ten weighting passes,
//! checks hard stop conditions, and combines both into an accept/reject
//! decision.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod scoring;
pub mod screener;
pub mod stop;

pub use config::Config;
pub use error::{Result, ScreenerError};
pub use input::records::{Candidate, JobDescription};
pub use scoring::{run_all, ScoreCard};
pub use screener::{Decision, Screener, ScreeningOutcome};
pub use stop::{stop_conditions, StopResult};
