use std::io::{self, Write};

use colored::Colorize;
use statrs::distribution::{Continuous, FisherSnedecor, Normal, StudentsT};

use super::{ReportError, Reporter, TestReport};
use crate::stats::{DegreesOfFreedom, Distribution, TestResult, Warning};

const PLOT_WIDTH: usize = 64;
const PLOT_HEIGHT: usize = 8;

/// Renders a test report to the terminal: metrics, an ASCII decision-region
/// plot of the reference distribution, the verdict and any warnings.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn paint(&self, text: &str, color: fn(&str) -> colored::ColoredString) -> String {
        if self.use_colors {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn print_header(&self, writer: &mut impl Write, report: &TestReport) -> io::Result<()> {
        writeln!(writer)?;
        let title = format!("=== {} ===", report.title);
        if self.use_colors {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        for note in &report.notes {
            writeln!(writer, "{}", note)?;
        }
        Ok(())
    }

    fn print_metrics(&self, writer: &mut impl Write, result: &TestResult) -> io::Result<()> {
        writeln!(writer, "statistic      = {:.4}", result.statistic)?;
        writeln!(writer, "critical value = {:.4}", result.critical_value)?;
        writeln!(writer, "p-value        = {:.5}", result.p_value)?;
        if let Some(df) = result.df {
            writeln!(writer, "df             = {}", df)?;
        }
        writeln!(
            writer,
            "distribution: {}, {}, alpha = {}",
            result.distribution, result.tail, result.alpha
        )?;
        Ok(())
    }

    /// Decision-region visualization: a density strip of the reference
    /// distribution with the rejection region and the observed statistic
    /// marked on the axis.
    fn print_region(&self, writer: &mut impl Write, result: &TestResult) -> io::Result<()> {
        let Some(pdf) = ReferencePdf::from_result(result) else {
            return Ok(());
        };

        let (x_min, x_max) = plot_range(result);
        let step = (x_max - x_min) / PLOT_WIDTH as f64;
        let heights: Vec<f64> = (0..PLOT_WIDTH)
            .map(|col| pdf.density(x_min + (col as f64 + 0.5) * step))
            .collect();
        let peak = heights.iter().cloned().fold(0.0, f64::max);
        if peak <= 0.0 {
            return Ok(());
        }

        let statistic_col = ((result.statistic - x_min) / step) as usize;
        let levels: Vec<usize> = heights
            .iter()
            .map(|h| (h / peak * PLOT_HEIGHT as f64).round() as usize)
            .collect();

        writeln!(writer)?;
        for row in (1..=PLOT_HEIGHT).rev() {
            let mut line = String::new();
            for (col, &level) in levels.iter().enumerate() {
                if level < row {
                    line.push(' ');
                    continue;
                }
                let x = x_min + (col as f64 + 0.5) * step;
                if in_rejection_region(result, x) {
                    line.push_str(&self.paint("█", |s| s.red()));
                } else {
                    line.push_str(&self.paint("█", |s| s.blue()));
                }
            }
            writeln!(writer, "{}", line)?;
        }

        let mut axis = String::new();
        for col in 0..PLOT_WIDTH {
            let x = x_min + (col as f64 + 0.5) * step;
            if col == statistic_col.min(PLOT_WIDTH - 1) {
                axis.push_str(&self.paint("▲", |s| s.green()));
            } else if in_rejection_region(result, x) {
                axis.push_str(&self.paint("═", |s| s.red()));
            } else {
                axis.push('─');
            }
        }
        writeln!(writer, "{}", axis)?;
        writeln!(
            writer,
            "rejection region {}   observed statistic {}",
            self.paint("═", |s| s.red()),
            self.paint("▲", |s| s.green()),
        )?;
        Ok(())
    }

    fn print_conclusion(&self, writer: &mut impl Write, result: &TestResult) -> io::Result<()> {
        writeln!(writer)?;
        if result.reject_null {
            writeln!(
                writer,
                "{}",
                self.paint("Decision: reject H0 (significant)", |s| s.red())
            )?;
            writeln!(
                writer,
                "p-value ({:.5}) < alpha ({}): sufficient evidence to reject the null hypothesis.",
                result.p_value, result.alpha
            )?;
        } else {
            writeln!(
                writer,
                "{}",
                self.paint("Decision: fail to reject H0 (not significant)", |s| s.green())
            )?;
            writeln!(
                writer,
                "p-value ({:.5}) >= alpha ({}): insufficient evidence against the null hypothesis.",
                result.p_value, result.alpha
            )?;
        }
        Ok(())
    }

    fn print_warnings(&self, writer: &mut impl Write, warnings: &[Warning]) -> io::Result<()> {
        for warning in warnings {
            let line = format!("warning: {}", warning);
            writeln!(writer, "{}", self.paint(&line, |s| s.yellow()))?;
        }
        Ok(())
    }

    fn print_estimates(&self, writer: &mut impl Write, report: &TestReport) -> io::Result<()> {
        let Some(estimates) = &report.outcome.estimates else {
            return Ok(());
        };
        writeln!(writer)?;
        writeln!(
            writer,
            "mean difference     = {:.4}",
            estimates.mean_difference
        )?;
        writeln!(
            writer,
            "95% CI              = [{:.4}, {:.4}]",
            estimates.confidence_interval.0, estimates.confidence_interval.1
        )?;
        writeln!(
            writer,
            "Cohen's d           = {:.4} ({})",
            estimates.cohens_d, estimates.magnitude
        )?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, report: &TestReport) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();

        self.print_header(&mut writer, report)?;
        self.print_metrics(&mut writer, &report.outcome.result)?;
        self.print_region(&mut writer, &report.outcome.result)?;
        self.print_conclusion(&mut writer, &report.outcome.result)?;
        self.print_estimates(&mut writer, report)?;
        self.print_warnings(&mut writer, &report.outcome.warnings)?;

        Ok(())
    }
}

enum ReferencePdf {
    Normal(Normal),
    StudentsT(StudentsT),
    FisherSnedecor(FisherSnedecor),
}

impl ReferencePdf {
    /// Rebuild the reference distribution from the result record. Returns
    /// None if the parameters cannot be reconstructed; the plot is then
    /// skipped rather than failing the report.
    fn from_result(result: &TestResult) -> Option<Self> {
        match (result.distribution, result.df) {
            (Distribution::Normal, _) => Normal::new(0.0, 1.0).ok().map(ReferencePdf::Normal),
            (Distribution::StudentsT, Some(DegreesOfFreedom::Single(df))) => {
                StudentsT::new(0.0, 1.0, df).ok().map(ReferencePdf::StudentsT)
            }
            (
                Distribution::FisherSnedecor,
                Some(DegreesOfFreedom::Ratio {
                    numerator,
                    denominator,
                }),
            ) => FisherSnedecor::new(numerator, denominator)
                .ok()
                .map(ReferencePdf::FisherSnedecor),
            _ => None,
        }
    }

    fn density(&self, x: f64) -> f64 {
        match self {
            ReferencePdf::Normal(d) => d.pdf(x),
            ReferencePdf::StudentsT(d) => d.pdf(x),
            ReferencePdf::FisherSnedecor(d) => {
                if x <= 0.0 {
                    0.0
                } else {
                    d.pdf(x)
                }
            }
        }
    }
}

fn plot_range(result: &TestResult) -> (f64, f64) {
    match result.distribution {
        Distribution::FisherSnedecor => {
            let limit = 5.0_f64
                .max(result.statistic + 2.0)
                .max(result.critical_value + 2.0);
            (0.0, limit)
        }
        _ => {
            let limit = 4.0_f64
                .max(result.statistic.abs() + 1.0)
                .max(result.critical_value.abs() + 1.0);
            (-limit, limit)
        }
    }
}

fn in_rejection_region(result: &TestResult, x: f64) -> bool {
    use crate::stats::Tail;

    match result.distribution {
        Distribution::FisherSnedecor => x >= result.critical_value,
        _ => match result.tail {
            Tail::TwoSided => x.abs() >= result.critical_value.abs(),
            Tail::Right => x >= result.critical_value,
            Tail::Left => x <= result.critical_value,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Tail, TestOutcome};

    fn normal_result(statistic: f64, tail: Tail) -> TestResult {
        TestResult {
            statistic,
            critical_value: match tail {
                Tail::TwoSided => 1.96,
                Tail::Right => 1.645,
                Tail::Left => -1.645,
            },
            p_value: 0.0455,
            df: None,
            reject_null: true,
            distribution: Distribution::Normal,
            alpha: 0.05,
            tail,
        }
    }

    fn report_for(result: TestResult) -> TestReport {
        TestReport::new(
            "One-sample Z-test",
            TestOutcome {
                result,
                warnings: Vec::new(),
                estimates: None,
            },
        )
        .with_note("sample mean: 0.4000")
    }

    fn render(report: &TestReport) -> String {
        let reporter = TerminalReporter::without_colors();
        let mut buffer = Vec::new();
        reporter.print_header(&mut buffer, report).unwrap();
        reporter
            .print_metrics(&mut buffer, &report.outcome.result)
            .unwrap();
        reporter
            .print_region(&mut buffer, &report.outcome.result)
            .unwrap();
        reporter
            .print_conclusion(&mut buffer, &report.outcome.result)
            .unwrap();
        reporter.print_estimates(&mut buffer, report).unwrap();
        reporter
            .print_warnings(&mut buffer, &report.outcome.warnings)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_report_contains_metrics_and_verdict() {
        let output = render(&report_for(normal_result(-2.0, Tail::TwoSided)));

        assert!(output.contains("One-sample Z-test"));
        assert!(output.contains("statistic      = -2.0000"));
        assert!(output.contains("critical value = 1.9600"));
        assert!(output.contains("p-value        = 0.04550"));
        assert!(output.contains("sample mean: 0.4000"));
        assert!(output.contains("reject H0 (significant)"));
    }

    #[test]
    fn test_report_marks_statistic_and_region() {
        let output = render(&report_for(normal_result(-2.0, Tail::TwoSided)));
        assert!(output.contains('▲'));
        assert!(output.contains('═'));
        assert!(output.contains('█'));
    }

    #[test]
    fn test_fail_to_reject_wording() {
        let mut result = normal_result(1.0, Tail::TwoSided);
        result.p_value = 0.3173;
        result.reject_null = false;
        let output = render(&report_for(result));
        assert!(output.contains("fail to reject H0"));
        assert!(output.contains("insufficient evidence"));
    }

    #[test]
    fn test_rejection_region_two_sided() {
        let result = normal_result(-2.0, Tail::TwoSided);
        assert!(in_rejection_region(&result, 2.5));
        assert!(in_rejection_region(&result, -2.5));
        assert!(!in_rejection_region(&result, 0.0));
    }

    #[test]
    fn test_rejection_region_left() {
        let result = normal_result(-2.0, Tail::Left);
        assert!(in_rejection_region(&result, -2.0));
        assert!(!in_rejection_region(&result, 2.0));
    }

    #[test]
    fn test_f_distribution_plot_range_starts_at_zero() {
        let result = TestResult {
            statistic: 6.14,
            critical_value: 9.6,
            p_value: 0.09,
            df: Some(DegreesOfFreedom::Ratio {
                numerator: 4.0,
                denominator: 4.0,
            }),
            reject_null: false,
            distribution: Distribution::FisherSnedecor,
            alpha: 0.05,
            tail: Tail::TwoSided,
        };
        let (lo, hi) = plot_range(&result);
        assert_eq!(lo, 0.0);
        assert!(hi >= 11.6);

        let output = render(&report_for(result));
        assert!(output.contains("df             = (4, 4)"));
    }

    #[test]
    fn test_estimates_block() {
        use crate::stats::{EffectMagnitude, MeanDifferenceEstimates};

        let mut report = report_for(normal_result(-2.0, Tail::TwoSided));
        report.outcome.estimates = Some(MeanDifferenceEstimates {
            mean_difference: -2.4,
            confidence_interval: (-4.41, -0.39),
            cohens_d: -1.7411,
            magnitude: EffectMagnitude::Large,
        });
        let output = render(&report);
        assert!(output.contains("95% CI"));
        assert!(output.contains("Cohen's d           = -1.7411 (large)"));
    }

    #[test]
    fn test_warning_lines() {
        let mut report = report_for(normal_result(-2.0, Tail::TwoSided));
        report.outcome.warnings.push(Warning::NormalitySkipped {
            label: "sample".to_string(),
            n: 2,
        });
        let output = render(&report);
        assert!(output.contains("warning: sample has only 2 observations"));
    }
}
