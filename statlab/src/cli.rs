//! Command-line interface for statlab.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use statlab_core::stats::Tail;

use crate::config::Config;
use crate::input::{self, InputError};

#[derive(Debug, Parser)]
#[command(name = "statlab")]
#[command(about = "Classical parametric hypothesis tests on numeric samples")]
#[command(version)]
pub struct Cli {
    /// Significance level (overrides the config file)
    #[arg(long, global = true)]
    pub alpha: Option<f64>,

    /// Tail direction of the rejection region (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub tail: Option<TailArg>,

    /// Path to config file
    #[arg(long, global = true, default_value = ".statlab.toml")]
    pub config: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TailArg {
    Two,
    Left,
    Right,
}

impl From<TailArg> for Tail {
    fn from(tail: TailArg) -> Self {
        match tail {
            TailArg::Two => Tail::TwoSided,
            TailArg::Left => Tail::Left,
            TailArg::Right => Tail::Right,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One-sample Z-test for a proportion
    Prop1 {
        /// Number of successes (X)
        #[arg(long)]
        successes: u64,
        /// Number of trials (n)
        #[arg(long)]
        trials: u64,
        /// Hypothesized proportion (pi0)
        #[arg(long)]
        pi0: f64,
    },
    /// Two-sample Z-test for the difference between proportions
    Prop2 {
        #[arg(long)]
        successes1: u64,
        #[arg(long)]
        trials1: u64,
        #[arg(long)]
        successes2: u64,
        #[arg(long)]
        trials2: u64,
    },
    /// One-sample Z-test for the mean (population sigma known)
    Ztest {
        /// Hypothesized mean (mu0)
        #[arg(long)]
        mu0: f64,
        /// Known population standard deviation
        #[arg(long)]
        sigma: f64,
        #[command(flatten)]
        sample: SampleArg,
    },
    /// One-sample t-test for the mean (sigma unknown)
    Ttest {
        /// Hypothesized mean (mu0)
        #[arg(long)]
        mu0: f64,
        #[command(flatten)]
        sample: SampleArg,
    },
    /// Pooled-variance two-sample t-test (assumes equal variances)
    Pooled {
        #[command(flatten)]
        samples: TwoSampleArgs,
    },
    /// Welch separate-variance two-sample t-test
    Welch {
        #[command(flatten)]
        samples: TwoSampleArgs,
    },
    /// Paired t-test on before/after measurements (sample 1 = before)
    Paired {
        #[command(flatten)]
        samples: TwoSampleArgs,
    },
    /// F-test for the ratio of two sample variances (two-sided)
    Ftest {
        #[command(flatten)]
        samples: TwoSampleArgs,
    },
    /// Recommend a test for a free-text problem description
    Advise {
        /// Description of the study or research question
        description: Vec<String>,
    },
}

/// One sample, inline or from a file.
#[derive(Debug, Args)]
pub struct SampleArg {
    /// Inline sample values (comma/space separated)
    #[arg(long, required_unless_present = "file")]
    pub data: Option<String>,

    /// Read sample values from a text file
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
}

impl SampleArg {
    pub fn resolve(&self) -> Result<Vec<f64>, InputError> {
        match (&self.data, &self.file) {
            (Some(text), _) => input::parse_values(text),
            (None, Some(path)) => input::read_values(path),
            (None, None) => Err(InputError::NoValues),
        }
    }
}

/// Two samples, each inline or from a file.
#[derive(Debug, Args)]
pub struct TwoSampleArgs {
    /// Inline values for sample 1 (comma/space separated)
    #[arg(long, required_unless_present = "file1")]
    pub data1: Option<String>,

    /// Read sample 1 from a text file
    #[arg(long, conflicts_with = "data1")]
    pub file1: Option<PathBuf>,

    /// Inline values for sample 2 (comma/space separated)
    #[arg(long, required_unless_present = "file2")]
    pub data2: Option<String>,

    /// Read sample 2 from a text file
    #[arg(long, conflicts_with = "data2")]
    pub file2: Option<PathBuf>,
}

impl TwoSampleArgs {
    pub fn resolve(&self) -> Result<(Vec<f64>, Vec<f64>), InputError> {
        let first = match (&self.data1, &self.file1) {
            (Some(text), _) => input::parse_values(text)?,
            (None, Some(path)) => input::read_values(path)?,
            (None, None) => return Err(InputError::NoValues),
        };
        let second = match (&self.data2, &self.file2) {
            (Some(text), _) => input::parse_values(text)?,
            (None, Some(path)) => input::read_values(path)?,
            (None, None) => return Err(InputError::NoValues),
        };
        Ok((first, second))
    }
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(alpha) = self.alpha {
            config.test.alpha = alpha;
        }

        if let Some(tail) = self.tail {
            config.test.tail = tail.into();
        }

        if self.no_color {
            config.report.colors = false;
        }
    }
}
