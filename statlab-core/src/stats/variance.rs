//! F-test for the ratio of two sample variances.

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use super::describe::sample_variance;
use super::{
    DegreesOfFreedom, Distribution, Result, Tail, TestError, TestOutcome, TestParameters,
    TestResult,
};

/// F-test for equality of two population variances. Two-sided only; there
/// is no tail selection.
///
/// The larger sample variance always goes in the numerator, so `F >= 1`
/// and the degrees-of-freedom pair follows the same ordering regardless of
/// which sample is passed first. Swapping the inputs changes nothing.
/// `p = 2 * (1 - F_cdf(F_stat))`, critical value at the `1 - alpha/2`
/// quantile.
pub fn f_test(sample1: &[f64], sample2: &[f64], alpha: f64) -> Result<TestOutcome> {
    // Reuse the shared alpha validation; the F-test has no tail to choose.
    let params = TestParameters::new(alpha, Tail::TwoSided)?;

    for sample in [sample1, sample2] {
        if sample.len() < 2 {
            return Err(TestError::TooFewObservations {
                needed: 2,
                got: sample.len(),
            });
        }
    }

    let v1 = sample_variance(sample1);
    let v2 = sample_variance(sample2);
    if v1 == 0.0 && v2 == 0.0 {
        return Err(TestError::ZeroVariance {
            context: "both samples",
        });
    }
    if v1.min(v2) == 0.0 {
        return Err(TestError::ZeroVariance {
            context: "the less dispersed sample",
        });
    }

    let (statistic, df_numerator, df_denominator) = if v1 >= v2 {
        (v1 / v2, (sample1.len() - 1) as f64, (sample2.len() - 1) as f64)
    } else {
        (v2 / v1, (sample2.len() - 1) as f64, (sample1.len() - 1) as f64)
    };

    let f_dist = FisherSnedecor::new(df_numerator, df_denominator)
        .map_err(|e| TestError::Distribution(e.to_string()))?;
    let critical_value = f_dist.inverse_cdf(1.0 - alpha / 2.0);
    let p_value = 2.0 * (1.0 - f_dist.cdf(statistic));

    Ok(TestOutcome {
        result: TestResult {
            statistic,
            critical_value,
            p_value,
            df: Some(DegreesOfFreedom::Ratio {
                numerator: df_numerator,
                denominator: df_denominator,
            }),
            reject_null: p_value < alpha,
            distribution: Distribution::FisherSnedecor,
            alpha: params.alpha(),
            tail: params.tail(),
        },
        warnings: Vec::new(),
        estimates: None,
    })
}
