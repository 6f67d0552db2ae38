//! Z-tests for one and two population proportions.

use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use super::decision::decide;
use super::{
    Distribution, Result, TestError, TestOutcome, TestParameters, TestResult, Warning,
};

/// Success/trial counts for one group of a proportion test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionSample {
    successes: u64,
    trials: u64,
}

impl ProportionSample {
    /// # Errors
    ///
    /// Returns an error when `trials` is zero or `successes` exceeds it.
    pub fn new(successes: u64, trials: u64) -> Result<Self> {
        if trials == 0 {
            return Err(TestError::NoTrials);
        }
        if successes > trials {
            return Err(TestError::MoreSuccessesThanTrials { successes, trials });
        }
        Ok(Self { successes, trials })
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Observed proportion of successes.
    pub fn proportion(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }
}

/// One-sample Z-test for a proportion.
///
/// Computes `Z = (p_hat - pi0) / sqrt(pi0 (1 - pi0) / n)` and evaluates it
/// against the standard normal distribution. A warning (never an error) is
/// attached when `n*pi0 < 5` or `n*(1-pi0) < 5`, where the normal
/// approximation to the binomial becomes unreliable.
pub fn one_sample_proportion(
    successes: u64,
    trials: u64,
    pi0: f64,
    params: &TestParameters,
) -> Result<TestOutcome> {
    let sample = ProportionSample::new(successes, trials)?;
    if !(pi0 > 0.0 && pi0 < 1.0) {
        return Err(TestError::InvalidProportion(pi0));
    }

    let n = sample.trials() as f64;
    let p_hat = sample.proportion();
    let standard_error = (pi0 * (1.0 - pi0) / n).sqrt();
    let statistic = (p_hat - pi0) / standard_error;

    let mut outcome = z_outcome(statistic, params)?;

    let expected_successes = n * pi0;
    let expected_failures = n * (1.0 - pi0);
    if expected_successes < 5.0 || expected_failures < 5.0 {
        outcome.warnings.push(Warning::SmallExpectedCount {
            expected_successes,
            expected_failures,
        });
    }

    Ok(outcome)
}

/// Two-sample Z-test for the difference between proportions.
///
/// Uses the pooled proportion `p_bar = (X1 + X2) / (n1 + n2)` in the
/// standard error. A degenerate pool (all successes or all failures across
/// both groups) makes the standard error zero and is rejected as an error.
pub fn two_sample_proportion(
    group1: ProportionSample,
    group2: ProportionSample,
    params: &TestParameters,
) -> Result<TestOutcome> {
    let n1 = group1.trials() as f64;
    let n2 = group2.trials() as f64;

    let pooled =
        (group1.successes() + group2.successes()) as f64 / (group1.trials() + group2.trials()) as f64;
    let standard_error = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();
    if standard_error == 0.0 {
        return Err(TestError::DegenerateProportion(pooled));
    }

    let statistic = (group1.proportion() - group2.proportion()) / standard_error;
    z_outcome(statistic, params)
}

fn z_outcome(statistic: f64, params: &TestParameters) -> Result<TestOutcome> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| TestError::Distribution(e.to_string()))?;
    let decision = decide(&normal, statistic, params.alpha(), params.tail());

    Ok(TestOutcome::new(TestResult {
        statistic,
        critical_value: decision.critical_value,
        p_value: decision.p_value,
        df: None,
        reject_null: decision.reject_null,
        distribution: Distribution::Normal,
        alpha: params.alpha(),
        tail: params.tail(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Tail;

    #[test]
    fn test_textbook_example() {
        // X=40, n=100, pi0=0.5, alpha=0.05, two-sided.
        let params = TestParameters::default();
        let outcome = one_sample_proportion(40, 100, 0.5, &params).unwrap();

        assert!((outcome.result.statistic + 2.0).abs() < 1e-12);
        assert!((outcome.result.p_value - 0.0455).abs() < 1e-4);
        assert!(outcome.result.reject_null);
        assert_eq!(outcome.result.distribution, Distribution::Normal);
        assert!(outcome.result.df.is_none());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_small_expected_count_warns_but_completes() {
        let params = TestParameters::default();
        let outcome = one_sample_proportion(2, 8, 0.5, &params).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            outcome.warnings[0],
            Warning::SmallExpectedCount { .. }
        ));
        assert!(outcome.result.p_value > 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let params = TestParameters::default();
        assert!(matches!(
            one_sample_proportion(5, 0, 0.5, &params),
            Err(TestError::NoTrials)
        ));
        assert!(matches!(
            one_sample_proportion(11, 10, 0.5, &params),
            Err(TestError::MoreSuccessesThanTrials { .. })
        ));
        assert!(matches!(
            one_sample_proportion(5, 10, 0.0, &params),
            Err(TestError::InvalidProportion(_))
        ));
        assert!(matches!(
            one_sample_proportion(5, 10, 1.0, &params),
            Err(TestError::InvalidProportion(_))
        ));
    }

    #[test]
    fn test_two_sample_proportions() {
        let params = TestParameters::default();
        let g1 = ProportionSample::new(150, 200).unwrap();
        let g2 = ProportionSample::new(162, 300).unwrap();
        let outcome = two_sample_proportion(g1, g2, &params).unwrap();

        // p1=0.75, p2=0.54, pooled=312/500=0.624.
        let se = (0.624_f64 * 0.376 * (1.0 / 200.0 + 1.0 / 300.0)).sqrt();
        let expected = (0.75 - 0.54) / se;
        assert!((outcome.result.statistic - expected).abs() < 1e-12);
        assert!(outcome.result.reject_null);
    }

    #[test]
    fn test_two_sample_degenerate_pool() {
        let params = TestParameters::default();
        let g1 = ProportionSample::new(0, 50).unwrap();
        let g2 = ProportionSample::new(0, 60).unwrap();
        assert!(matches!(
            two_sample_proportion(g1, g2, &params),
            Err(TestError::DegenerateProportion(_))
        ));

        let g1 = ProportionSample::new(50, 50).unwrap();
        let g2 = ProportionSample::new(60, 60).unwrap();
        assert!(matches!(
            two_sample_proportion(g1, g2, &params),
            Err(TestError::DegenerateProportion(_))
        ));
    }

    #[test]
    fn test_left_tail_rejects_low_proportion() {
        let params = TestParameters::new(0.05, Tail::Left).unwrap();
        let outcome = one_sample_proportion(30, 100, 0.5, &params).unwrap();
        assert!(outcome.result.statistic < 0.0);
        assert!(outcome.result.critical_value < 0.0);
        assert!(outcome.result.reject_null);
    }

    #[test]
    fn test_reject_equals_p_below_alpha() {
        for &(x, n) in &[(40u64, 100u64), (48, 100), (55, 100)] {
            for &tail in &[Tail::TwoSided, Tail::Left, Tail::Right] {
                let params = TestParameters::new(0.05, tail).unwrap();
                let outcome = one_sample_proportion(x, n, 0.5, &params).unwrap();
                assert_eq!(
                    outcome.result.reject_null,
                    outcome.result.p_value < 0.05
                );
            }
        }
    }
}
