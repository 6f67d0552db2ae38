//! statlab: classical parametric hypothesis tests from the command line.
//!
//! This crate is the thin presentation layer: argument parsing, config
//! loading and numeric input tokenization. All statistics live in
//! `statlab-core`.

pub mod cli;
pub mod config;
pub mod input;

// Re-export core types for convenience
pub use statlab_core::advisory::{AdvisoryService, KeywordAdvisor};
pub use statlab_core::report::{Reporter, TerminalReporter, TestReport};
pub use statlab_core::stats::{Tail, TestOutcome, TestParameters, TestResult};

// Re-export main types from this crate
pub use cli::{Cli, Command};
pub use config::Config;
pub use input::{parse_values, read_values, InputError};
