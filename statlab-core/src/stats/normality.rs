//! Shapiro-Wilk-style normality pre-check.
//!
//! Order statistics are weighted with normalized Blom scores and the
//! p-value comes from Royston's normal approximation of the W statistic.
//! The check is advisory only: downstream tests proceed regardless of the
//! outcome, and with fewer than 3 observations it is skipped and the
//! assumption treated as holding by default.

use statrs::distribution::{ContinuousCDF, Normal};

use super::{Result, TestError, Warning};

/// Significance level the advisory check is evaluated at. The original
/// decision rule uses a fixed 0.05 regardless of the downstream test's alpha.
const CHECK_ALPHA: f64 = 0.05;

/// Minimum sample size the W statistic is defined for.
const MIN_OBSERVATIONS: usize = 3;

/// W statistic and p-value of the normality test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// W in [0, 1]; values near 1 indicate data close to normal.
    pub w: f64,
    /// Upper-tail probability of observing data this far from normal.
    pub p_value: f64,
}

/// Outcome of the advisory pre-check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalityCheck {
    /// Fewer than 3 observations; the assumption holds by default.
    Skipped { n: usize },
    /// p > 0.05: no evidence against normality.
    Passed(ShapiroWilk),
    /// p <= 0.05: the normality assumption looks violated.
    Violated(ShapiroWilk),
}

/// Compute the W statistic and its approximate p-value.
///
/// # Errors
///
/// Returns an error for samples with fewer than 3 observations or with
/// zero variance, where W is undefined.
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk> {
    let n = sample.len();
    if n < MIN_OBSERVATIONS {
        return Err(TestError::TooFewObservations {
            needed: MIN_OBSERVATIONS,
            got: n,
        });
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let ssq: f64 = sorted
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum();
    if ssq == 0.0 {
        return Err(TestError::ZeroVariance { context: "sample" });
    }

    let normal = standard_normal()?;

    // Blom scores m_i = Phi^-1((i - 0.375) / (n + 0.25)), normalized to
    // unit length. The scores are antisymmetric, so sum(a) = 0 and the
    // weighted sum of the order statistics needs no centering.
    let scores: Vec<f64> = (1..=n)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (n as f64 + 0.25)))
        .collect();
    let norm = scores.iter().map(|m| m * m).sum::<f64>().sqrt();

    let weighted_sum: f64 = scores
        .iter()
        .zip(&sorted)
        .map(|(m, &x)| (m / norm) * x)
        .sum();
    let w = (weighted_sum * weighted_sum / ssq).min(1.0);

    Ok(ShapiroWilk {
        w,
        p_value: royston_p_value(w, n, &normal),
    })
}

/// Run the advisory pre-check, treating small samples as holding by default.
pub fn check_normality(sample: &[f64]) -> NormalityCheck {
    let n = sample.len();
    if n < MIN_OBSERVATIONS {
        return NormalityCheck::Skipped { n };
    }

    match shapiro_wilk(sample) {
        Ok(sw) if sw.p_value > CHECK_ALPHA => NormalityCheck::Passed(sw),
        Ok(sw) => NormalityCheck::Violated(sw),
        // A constant sample is as far from normal as data gets.
        Err(_) => NormalityCheck::Violated(ShapiroWilk { w: 0.0, p_value: 0.0 }),
    }
}

/// Run the pre-check for a test and record any advisory warning.
pub(crate) fn advise(sample: &[f64], label: &str, warnings: &mut Vec<Warning>) {
    match check_normality(sample) {
        NormalityCheck::Skipped { n } => warnings.push(Warning::NormalitySkipped {
            label: label.to_string(),
            n,
        }),
        NormalityCheck::Violated(sw) => warnings.push(Warning::NormalityViolated {
            label: label.to_string(),
            w: sw.w,
            p_value: sw.p_value,
        }),
        NormalityCheck::Passed(_) => {}
    }
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| TestError::Distribution(e.to_string()))
}

/// Royston (1992) normal approximation for the distribution of W.
fn royston_p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    let one_minus_w = 1.0 - w;
    if one_minus_w <= 0.0 {
        return 1.0;
    }

    if n == 3 {
        // Exact for n = 3.
        let p = (6.0 / std::f64::consts::PI)
            * (w.sqrt().asin() - 0.75f64.sqrt().asin());
        return p.clamp(0.0, 1.0);
    }

    let nf = n as f64;
    let (z, valid) = if n <= 11 {
        let gamma = -2.273 + 0.459 * nf;
        let shifted = gamma - one_minus_w.ln();
        if shifted <= 0.0 {
            (f64::INFINITY, false)
        } else {
            let y = -shifted.ln();
            let mu = 0.5440 - 0.39978 * nf + 0.025054 * nf * nf - 0.0006714 * nf * nf * nf;
            let sigma =
                (1.3822 - 0.77857 * nf + 0.062767 * nf * nf - 0.0020322 * nf * nf * nf).exp();
            ((y - mu) / sigma, true)
        }
    } else {
        let u = nf.ln();
        let y = one_minus_w.ln();
        let mu = -1.5861 - 0.31082 * u - 0.083751 * u * u + 0.0038915 * u * u * u;
        let sigma = (-0.4803 - 0.082676 * u + 0.0030302 * u * u).exp();
        ((y - mu) / sigma, true)
    };

    if !valid {
        return 0.0;
    }
    (1.0 - normal.cdf(z)).clamp(0.0, 1.0)
}
