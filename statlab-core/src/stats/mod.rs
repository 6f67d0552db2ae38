use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of the rejection region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tail {
    #[default]
    TwoSided,
    Left,
    Right,
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tail::TwoSided => write!(f, "two-sided"),
            Tail::Left => write!(f, "left-sided"),
            Tail::Right => write!(f, "right-sided"),
        }
    }
}

/// Reference distribution family a test statistic was compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    Normal,
    StudentsT,
    FisherSnedecor,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Normal => write!(f, "standard normal"),
            Distribution::StudentsT => write!(f, "Student's t"),
            Distribution::FisherSnedecor => write!(f, "F"),
        }
    }
}

/// Degrees of freedom of the reference distribution.
///
/// Welch's t-test produces a real-valued (non-integer) df, so the single
/// variant carries an `f64` rather than an integer count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DegreesOfFreedom {
    Single(f64),
    Ratio { numerator: f64, denominator: f64 },
}

impl fmt::Display for DegreesOfFreedom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreesOfFreedom::Single(df) => write!(f, "{df:.2}"),
            DegreesOfFreedom::Ratio {
                numerator,
                denominator,
            } => write!(f, "({numerator:.0}, {denominator:.0})"),
        }
    }
}

/// Significance level and tail direction shared by every test.
///
/// Hypothesized values (μ0, σ, π0) are arguments of the individual test
/// functions; this struct only carries what the decision rule needs.
/// The significance level is validated on construction, so a value held
/// here is always strictly inside (0, 1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TestParameters {
    alpha: f64,
    tail: Tail,
}

impl Default for TestParameters {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            tail: Tail::TwoSided,
        }
    }
}

impl TestParameters {
    /// Create test parameters with the given significance level and tail.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::InvalidAlpha`] unless `alpha` is strictly
    /// between 0 and 1.
    pub fn new(alpha: f64, tail: Tail) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TestError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha, tail })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tail(&self) -> Tail {
        self.tail
    }
}

/// The immutable record produced by a single test invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Value of the standardized test statistic (Z, t or F).
    pub statistic: f64,
    /// Quantile of the reference distribution bounding the rejection region.
    pub critical_value: f64,
    /// Probability of a statistic at least as extreme under the null.
    pub p_value: f64,
    /// Degrees of freedom, when the reference distribution has any.
    pub df: Option<DegreesOfFreedom>,
    /// Whether the null hypothesis is rejected. Always equals `p_value < alpha`.
    pub reject_null: bool,
    /// Reference distribution family used for critical value and p-value.
    pub distribution: Distribution,
    /// Significance level the decision was made at.
    pub alpha: f64,
    /// Tail direction of the rejection region.
    pub tail: Tail,
}

/// Advisory diagnostics that accompany a result without blocking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// nπ0 < 5 or n(1-π0) < 5: the normal approximation to the binomial
    /// may be poor.
    SmallExpectedCount {
        expected_successes: f64,
        expected_failures: f64,
    },
    /// The normality pre-check rejected at the 0.05 level.
    NormalityViolated {
        label: String,
        w: f64,
        p_value: f64,
    },
    /// Fewer than 3 observations: the normality pre-check cannot run and
    /// the assumption is treated as holding by default.
    NormalitySkipped { label: String, n: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SmallExpectedCount {
                expected_successes,
                expected_failures,
            } => write!(
                f,
                "expected counts n*pi0={expected_successes:.1}, n*(1-pi0)={expected_failures:.1} \
                 fall below 5; the normal approximation may be unreliable"
            ),
            Warning::NormalityViolated { label, w, p_value } => write!(
                f,
                "normality assumption violated for {label} (W={w:.4}, p={p_value:.4}); \
                 results may be biased for small samples"
            ),
            Warning::NormalitySkipped { label, n } => write!(
                f,
                "{label} has only {n} observations; normality check skipped and \
                 the assumption treated as holding by default"
            ),
        }
    }
}

/// Result plus any advisory warnings, produced once per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    pub result: TestResult,
    pub warnings: Vec<Warning>,
    /// Extra estimates (confidence interval, effect size); populated by the
    /// pooled-variance two-sample t-test only.
    pub estimates: Option<MeanDifferenceEstimates>,
}

impl TestOutcome {
    fn new(result: TestResult) -> Self {
        Self {
            result,
            warnings: Vec::new(),
            estimates: None,
        }
    }
}

/// Errors that abort a test with no partial result.
#[derive(Debug, Error)]
pub enum TestError {
    #[error("sample is empty")]
    EmptySample,
    #[error("at least {needed} observations required, got {got}")]
    TooFewObservations { needed: usize, got: usize },
    #[error("paired samples differ in length: {pre} vs {post}")]
    LengthMismatch { pre: usize, post: usize },
    #[error("alpha must be strictly between 0 and 1, got {0}")]
    InvalidAlpha(f64),
    #[error("hypothesized proportion must be strictly between 0 and 1, got {0}")]
    InvalidProportion(f64),
    #[error("successes ({successes}) exceed trials ({trials})")]
    MoreSuccessesThanTrials { successes: u64, trials: u64 },
    #[error("trials must be at least 1")]
    NoTrials,
    #[error("population standard deviation must be positive, got {0}")]
    InvalidSigma(f64),
    #[error("{context} has zero variance; the test statistic is undefined")]
    ZeroVariance { context: &'static str },
    #[error("pooled proportion is {0}; the standard error is zero")]
    DegenerateProportion(f64),
    #[error("failed to construct reference distribution: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, TestError>;

mod decision;
mod describe;
mod mean;
mod normality;
mod proportion;
mod two_sample;
mod variance;

pub use describe::{mean, sample_std_dev, sample_variance};
pub use mean::{paired_t_test, t_test, z_test};
pub use normality::{check_normality, shapiro_wilk, NormalityCheck, ShapiroWilk};
pub use proportion::{one_sample_proportion, two_sample_proportion, ProportionSample};
pub use two_sample::{
    cohens_d, pooled_t_test, welch_t_test, EffectMagnitude, MeanDifferenceEstimates,
};
pub use variance::f_test;
