//! Core hypothesis-test engine for statlab.
//!
//! A collection of independent, pure computations: each test function takes
//! validated numeric samples plus [`stats::TestParameters`] and returns a
//! [`stats::TestOutcome`] (statistic, critical value, p-value, verdict and
//! advisory warnings). Nothing here holds state; every invocation is
//! deterministic and side-effect free.

pub mod advisory;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use advisory::{AdvisoryError, AdvisoryService, KeywordAdvisor};
pub use report::{ReportError, Reporter, TerminalReporter, TestReport};
pub use stats::{
    DegreesOfFreedom, Distribution, EffectMagnitude, MeanDifferenceEstimates, NormalityCheck,
    ProportionSample, ShapiroWilk, Tail, TestError, TestOutcome, TestParameters, TestResult,
    Warning,
};
