//! Tail-dependent decision rule shared by the Z and t tests.

use statrs::distribution::ContinuousCDF;

use super::Tail;

/// Critical value, p-value and verdict for a standardized statistic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decision {
    pub critical_value: f64,
    pub p_value: f64,
    pub reject_null: bool,
}

/// Apply the one-/two-sided decision rule against a reference distribution.
///
/// The verdict is derived from the p-value (`p < alpha`), which agrees with
/// the statistic-vs-critical-value comparison for the chosen tail up to
/// floating-point tolerance. The F-test does not go through here: its
/// rejection region is one-sided by construction.
pub(crate) fn decide<D>(dist: &D, statistic: f64, alpha: f64, tail: Tail) -> Decision
where
    D: ContinuousCDF<f64, f64>,
{
    let (critical_value, p_value) = match tail {
        Tail::TwoSided => (
            dist.inverse_cdf(1.0 - alpha / 2.0),
            2.0 * (1.0 - dist.cdf(statistic.abs())),
        ),
        Tail::Right => (dist.inverse_cdf(1.0 - alpha), 1.0 - dist.cdf(statistic)),
        Tail::Left => (dist.inverse_cdf(alpha), dist.cdf(statistic)),
    };

    Decision {
        critical_value,
        p_value,
        reject_null: p_value < alpha,
    }
}
