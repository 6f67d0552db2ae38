//! One-sample tests for the mean: Z (sigma known), t (sigma unknown) and
//! the paired t-test, which reuses the one-sample t machinery on the
//! elementwise differences.

use statrs::distribution::{Normal, StudentsT};

use super::decision::decide;
use super::describe::{mean, sample_std_dev};
use super::normality;
use super::{
    DegreesOfFreedom, Distribution, Result, TestError, TestOutcome, TestParameters, TestResult,
};

/// One-sample Z-test for the mean with known population standard deviation.
///
/// `Z = (x_bar - mu0) / (sigma / sqrt(n))`. The caller must supply `sigma`;
/// it is never estimated from the sample.
pub fn z_test(sample: &[f64], mu0: f64, sigma: f64, params: &TestParameters) -> Result<TestOutcome> {
    if sample.is_empty() {
        return Err(TestError::EmptySample);
    }
    if !(sigma > 0.0) {
        return Err(TestError::InvalidSigma(sigma));
    }

    let n = sample.len() as f64;
    let statistic = (mean(sample) - mu0) / (sigma / n.sqrt());

    let normal = Normal::new(0.0, 1.0).map_err(|e| TestError::Distribution(e.to_string()))?;
    let decision = decide(&normal, statistic, params.alpha(), params.tail());

    Ok(TestOutcome {
        result: TestResult {
            statistic,
            critical_value: decision.critical_value,
            p_value: decision.p_value,
            df: None,
            reject_null: decision.reject_null,
            distribution: Distribution::Normal,
            alpha: params.alpha(),
            tail: params.tail(),
        },
        warnings: Vec::new(),
        estimates: None,
    })
}

/// One-sample t-test for the mean with unknown population variance.
///
/// `t = (x_bar - mu0) / (s / sqrt(n))` with Bessel-corrected `s` and
/// `df = n - 1`. The normality pre-check runs first and reports through a
/// warning; it never blocks the computation.
pub fn t_test(sample: &[f64], mu0: f64, params: &TestParameters) -> Result<TestOutcome> {
    t_test_labeled(sample, mu0, params, "sample")
}

/// Paired t-test on before/after measurements.
///
/// Fails when the samples differ in length. Runs the one-sample t-test on
/// the differences `D_i = pre_i - post_i` against `mu0 = 0`; the normality
/// check applies to the differences, not the raw samples.
pub fn paired_t_test(pre: &[f64], post: &[f64], params: &TestParameters) -> Result<TestOutcome> {
    if pre.len() != post.len() {
        return Err(TestError::LengthMismatch {
            pre: pre.len(),
            post: post.len(),
        });
    }

    let differences: Vec<f64> = pre.iter().zip(post).map(|(&a, &b)| a - b).collect();
    t_test_labeled(&differences, 0.0, params, "differences")
}

fn t_test_labeled(
    sample: &[f64],
    mu0: f64,
    params: &TestParameters,
    label: &str,
) -> Result<TestOutcome> {
    let n = sample.len();
    if n < 2 {
        return Err(TestError::TooFewObservations { needed: 2, got: n });
    }

    let mut warnings = Vec::new();
    normality::advise(sample, label, &mut warnings);

    let s = sample_std_dev(sample);
    if s == 0.0 {
        return Err(TestError::ZeroVariance { context: "sample" });
    }

    let df = (n - 1) as f64;
    let statistic = (mean(sample) - mu0) / (s / (n as f64).sqrt());

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
