//! Independent two-sample t-tests: pooled variance and Welch.

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::decision::decide;
use super::describe::{mean, sample_variance};
use super::normality;
use super::{
    DegreesOfFreedom, Distribution, Result, TestError, TestOutcome, TestParameters, TestResult,
    Warning,
};

/// Magnitude classification of Cohen's d by absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    pub fn classify(d: f64) -> Self {
        let d = d.abs();
        if d < 0.2 {
            EffectMagnitude::Negligible
        } else if d < 0.5 {
            EffectMagnitude::Small
        } else if d < 0.8 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectMagnitude::Negligible => write!(f, "negligible"),
            EffectMagnitude::Small => write!(f, "small"),
            EffectMagnitude::Medium => write!(f, "medium"),
            EffectMagnitude::Large => write!(f, "large"),
        }
    }
}

/// Supplementary estimates produced by the pooled-variance t-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanDifferenceEstimates {
    /// Observed difference of sample means (x_bar1 - x_bar2).
    pub mean_difference: f64,
    /// 95% confidence interval for the mean difference. Always two-sided
    /// at the 95% level, independent of the test's alpha and tail.
    pub confidence_interval: (f64, f64),
    /// Cohen's d from the pooled standard deviation; defined as 0 when the
    /// pooled variance is exactly zero.
    pub cohens_d: f64,
    pub magnitude: EffectMagnitude,
}

/// Cohen's d standardized mean difference using the pooled variance.
///
/// Defined as 0 when the pooled standard deviation is exactly zero, rather
/// than propagating a division fault.
///
/// # Errors
///
/// Both samples need at least 2 observations.
pub fn cohens_d(sample1: &[f64], sample2: &[f64]) -> Result<f64> {
    let (n1, n2) = validated_sizes(sample1, sample2)?;
    let sp = pooled_variance(sample1, sample2, n1, n2).sqrt();
    if sp == 0.0 {
        return Ok(0.0);
    }
    Ok((mean(sample1) - mean(sample2)) / sp)
}

/// Pooled-variance two-sample t-test, assuming equal population variances.
///
/// `Sp^2 = ((n1-1)s1^2 + (n2-1)s2^2) / (n1+n2-2)`, `df = n1+n2-2`. Beyond
/// the verdict, the outcome carries a 95% confidence interval for the mean
/// difference and Cohen's d from the same pooled variance.
pub fn pooled_t_test(
    sample1: &[f64],
    sample2: &[f64],
    params: &TestParameters,
) -> Result<TestOutcome> {
    let (n1, n2) = validated_sizes(sample1, sample2)?;
    let mut warnings = Vec::new();
    advise_groups(sample1, sample2, &mut warnings);

    let df = (sample1.len() + sample2.len() - 2) as f64;
    let sp2 = pooled_variance(sample1, sample2, n1, n2);
    let standard_error = (sp2 * (1.0 / n1 + 1.0 / n2)).sqrt();
    if standard_error == 0.0 {
        return Err(TestError::ZeroVariance {
            context: "pooled samples",
        });
    }

    let mean_difference = mean(sample1) - mean(sample2);
    let statistic = mean_difference / standard_error;

    let t_dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| TestError::Distribution(e.to_string()))?;
    let decision = decide(&t_dist, statistic, params.alpha(), params.tail());

    // The interval stays two-sided 95% regardless of the test's alpha/tail.
    let margin = t_dist.inverse_cdf(0.975) * standard_error;
    let d = cohens_d(sample1, sample2)?;

    Ok(TestOutcome {
        result: TestResult {
            statistic,
            critical_value: decision.critical_value,
            p_value: decision.p_value,
            df: Some(DegreesOfFreedom::Single(df)),
            reject_null: decision.reject_null,
            distribution: Distribution::StudentsT,
            alpha: params.alpha(),
            tail: params.tail(),
        },
        warnings,
        estimates: Some(MeanDifferenceEstimates {
            mean_difference,
            confidence_interval: (mean_difference - margin, mean_difference + margin),
            cohens_d: d,
            magnitude: EffectMagnitude::classify(d),
        }),
    })
}

/// Welch separate-variance two-sample t-test.
///
/// No equal-variance assumption; the Satterthwaite approximation yields a
/// real-valued degrees of freedom used directly in the t-distribution
/// lookups.
pub fn welch_t_test(
    sample1: &[f64],
    sample2: &[f64],
    params: &TestParameters,
) -> Result<TestOutcome> {
    let (n1, n2) = validated_sizes(sample1, sample2)?;
    let mut warnings = Vec::new();
    advise_groups(sample1, sample2, &mut warnings);

    let v1 = sample_variance(sample1);
    let v2 = sample_variance(sample2);
    let standard_error = (v1 / n1 + v2 / n2).sqrt();
    if standard_error == 0.0 {
        return Err(TestError::ZeroVariance {
            context: "both samples",
        });
    }

    let statistic = (mean(sample1) - mean(sample2)) / standard_error;

    // Welch-Satterthwaite: the denominator is positive because at least one
    // variance is nonzero here.
    let numerator = (v1 / n1 + v2 / n2).powi(2);
    let denominator = (v1 / n1).powi(2) / (n1 - 1.0) + (v2 / n2).powi(2) / (n2 - 1.0);
    let df = numerator / denominator;

    let t_dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| TestError::Distribution(e.to_string()))?;
    let decision = decide(&t_dist, statistic, params.alpha(), params.tail());

    Ok(TestOutcome {
        result: TestResult {
            statistic,
            critical_value: decision.critical_value,
            p_value: decision.p_value,
            df: Some(DegreesOfFreedom::Single(df)),
            reject_null: decision.reject_null,
            distribution: Distribution::StudentsT,
            alpha: params.alpha(),
            tail: params.tail(),
        },
        warnings,
        estimates: None,
    })
}

fn validated_sizes(sample1: &[f64], sample2: &[f64]) -> Result<(f64, f64)> {
    for sample in [sample1, sample2] {
        if sample.len() < 2 {
            return Err(TestError::TooFewObservations {
                needed: 2,
                got: sample.len(),
            });
        }
    }
    Ok((sample1.len() as f64, sample2.len() as f64))
}

fn pooled_variance(sample1: &[f64], sample2: &[f64], n1: f64, n2: f64) -> f64 {
    ((n1 - 1.0) * sample_variance(sample1) + (n2 - 1.0) * sample_variance(sample2))
        / (n1 + n2 - 2.0)
}

fn advise_groups(sample1: &[f64], sample2: &[f64], warnings: &mut Vec<Warning>) {
    normality::advise(sample1, "group 1", warnings);
    normality::advise(sample2, "group 2", warnings);
}
