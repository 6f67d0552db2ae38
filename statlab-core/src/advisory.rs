//! Pluggable test-recommendation service.
//!
//! Maps a free-text description of a study to the name of a suitable test.
//! This is a text-in/text-out seam with no bearing on the numeric engine:
//! implementations may call out to anything (including a generative model),
//! and the built-in [`KeywordAdvisor`] works offline from keyword rules.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("empty problem description")]
    EmptyDescription,
    #[error("advisory backend failed: {0}")]
    Backend(String),
}

/// Text-in/text-out recommendation seam.
pub trait AdvisoryService: Send + Sync {
    /// Recommend a test for a free-text problem description.
    fn recommend(&self, description: &str) -> Result<String, AdvisoryError>;
}

/// The eight test families the engine implements.
const CATALOG: [&str; 8] = [
    "one-sample proportion Z-test",
    "two-sample proportion Z-test",
    "one-sample Z-test for the mean (sigma known)",
    "one-sample t-test for the mean",
    "pooled-variance two-sample t-test",
    "Welch two-sample t-test",
    "paired t-test",
    "F-test for equality of variances",
];

/// Offline advisor driven by deterministic keyword rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAdvisor;

impl KeywordAdvisor {
    pub fn new() -> Self {
        Self
    }

    fn pick(description: &str) -> (&'static str, &'static str) {
        let text = description.to_lowercase();
        let contains = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

        let two_groups = contains(&[
            "two group",
            "two sample",
            "both group",
            "two populations",
            "group a",
            "between",
            "compare",
            "versus",
            " vs ",
        ]);
        let proportions = contains(&[
            "proportion",
            "percentage",
            "percent",
            "rate of",
            "success rate",
            "fraction",
        ]);
        let paired = contains(&[
            "paired",
            "before and after",
            "before/after",
            "pre-test",
            "post-test",
            "pre test",
            "post test",
            "same subjects",
            "same people",
            "repeated measure",
        ]);
        let variances = contains(&[
            "variance",
            "variability",
            "spread",
            "dispersion",
            "homogeneity",
            "consistency",
        ]);
        let means = contains(&["mean", "average", "score"]);
        let sigma_known = contains(&[
            "known standard deviation",
            "standard deviation is known",
            "sigma known",
            "known sigma",
            "known variance",
            "population standard deviation",
        ]);
        let unequal_variances = contains(&[
            "unequal variance",
            "different variance",
            "variances differ",
            "unequal spread",
            "heteroscedastic",
        ]);

        if paired {
            (
                CATALOG[6],
                "the same subjects are measured twice, so the samples are dependent",
            )
        } else if proportions {
            if two_groups {
                (
                    CATALOG[1],
                    "two independent groups are compared on a success proportion",
                )
            } else {
                (
                    CATALOG[0],
                    "one observed proportion is compared against a hypothesized value",
                )
            }
        } else if variances && two_groups && !means {
            (
                CATALOG[7],
                "the question is about equality of spread, not of means",
            )
        } else if two_groups {
            if unequal_variances {
                (
                    CATALOG[5],
                    "two independent means with no equal-variance assumption",
                )
            } else {
                (
                    CATALOG[4],
                    "two independent means under an equal-variance assumption",
                )
            }
        } else if sigma_known {
            (
                CATALOG[2],
                "a single mean with the population standard deviation supplied",
            )
        } else {
            (
                CATALOG[3],
                "a single mean with the population standard deviation unknown",
            )
        }
    }
}

impl AdvisoryService for KeywordAdvisor {
    fn recommend(&self, description: &str) -> Result<String, AdvisoryError> {
        if description.trim().is_empty() {
            return Err(AdvisoryError::EmptyDescription);
        }
        let (test, reason) = Self::pick(description);
        Ok(format!("Recommended test: {test}\nReason: {reason}"))
    }
}
