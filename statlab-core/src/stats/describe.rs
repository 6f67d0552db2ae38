//! Descriptive statistics shared by the test implementations.

/// Arithmetic mean of a sample. Returns 0.0 for an empty slice.
pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Sample variance with Bessel's correction (n-1 denominator).
/// Returns 0.0 for samples with fewer than 2 observations.
pub fn sample_variance(sample: &[f64]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let m = mean(sample);
    let sum_sq_diff: f64 = sample
        .iter()
        .map(|&x| {
            let diff = x - m;
            diff * diff
        })
        .sum();
    sum_sq_diff / (sample.len() - 1) as f64
}

/// Bessel-corrected sample standard deviation.
pub fn sample_std_dev(sample: &[f64]) -> f64 {
    sample_variance(sample).sqrt()
}
