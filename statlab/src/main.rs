use anyhow::{Context, Result};
use clap::Parser;
use statlab::{AdvisoryService, Cli, Command, Config, KeywordAdvisor, Reporter, TerminalReporter, TestReport};
use statlab_core::stats::{
    f_test, mean, one_sample_proportion, paired_t_test, pooled_t_test, sample_std_dev, t_test,
    welch_t_test, z_test, ProportionSample, TestParameters,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config and apply CLI overrides
    let mut config = Config::load_from(&cli.config)?;
    cli.apply_to_config(&mut config);

    // The advisory command has no numeric contract; handle it before
    // building test parameters.
    if let Command::Advise { description } = &cli.command {
        let text = description.join(" ");
        let recommendation = KeywordAdvisor::new()
            .recommend(&text)
            .context("Failed to produce a recommendation")?;
        println!("{recommendation}");
        return Ok(());
    }

    let params = TestParameters::new(config.test.alpha, config.test.tail)
        .context("Invalid significance level")?;

    let report = run_test(&cli.command, &params, config.test.alpha)?;

    let reporter = if config.report.colors {
        TerminalReporter::new()
    } else {
        TerminalReporter::without_colors()
    };
    reporter.report(&report).context("Failed to render report")?;

    Ok(())
}

fn run_test(command: &Command, params: &TestParameters, alpha: f64) -> Result<TestReport> {
    let report = match command {
        Command::Prop1 {
            successes,
            trials,
            pi0,
        } => {
            let outcome = one_sample_proportion(*successes, *trials, *pi0, params)
                .context("One-sample proportion test failed")?;
            TestReport::new("One-sample proportion Z-test", outcome).with_note(format!(
                "sample proportion = {:.4}",
                *successes as f64 / *trials as f64
            ))
        }
        Command::Prop2 {
            successes1,
            trials1,
            successes2,
            trials2,
        } => {
            let group1 = ProportionSample::new(*successes1, *trials1)?;
            let group2 = ProportionSample::new(*successes2, *trials2)?;
            let difference = group1.proportion() - group2.proportion();
            let outcome = statlab_core::stats::two_sample_proportion(group1, group2, params)
                .context("Two-sample proportion test failed")?;
            TestReport::new("Two-sample proportion Z-test", outcome)
                .with_note(format!("proportion difference = {difference:.4}"))
        }
        Command::Ztest { mu0, sigma, sample } => {
            let values = sample.resolve()?;
            let outcome =
                z_test(&values, *mu0, *sigma, params).context("One-sample Z-test failed")?;
            TestReport::new("One-sample Z-test (sigma known)", outcome)
                .with_note(format!("sample mean = {:.4} (n = {})", mean(&values), values.len()))
        }
        Command::Ttest { mu0, sample } => {
            let values = sample.resolve()?;
            let outcome = t_test(&values, *mu0, params).context("One-sample t-test failed")?;
            TestReport::new("One-sample t-test", outcome).with_note(format!(
                "sample mean = {:.4}, std dev = {:.4} (n = {})",
                mean(&values),
                sample_std_dev(&values),
                values.len()
            ))
        }
        Command::Pooled { samples } => {
            let (s1, s2) = samples.resolve()?;
            let outcome =
                pooled_t_test(&s1, &s2, params).context("Pooled two-sample t-test failed")?;
            TestReport::new("Pooled-variance two-sample t-test", outcome)
                .with_note(group_summary(&s1, &s2))
        }
        Command::Welch { samples } => {
            let (s1, s2) = samples.resolve()?;
            let outcome = welch_t_test(&s1, &s2, params).context("Welch t-test failed")?;
            TestReport::new("Welch two-sample t-test", outcome).with_note(group_summary(&s1, &s2))
        }
        Command::Paired { samples } => {
            let (pre, post) = samples.resolve()?;
            let outcome = paired_t_test(&pre, &post, params).context("Paired t-test failed")?;
            let mean_diff = mean(&pre) - mean(&post);
            TestReport::new("Paired t-test", outcome)
                .with_note(format!("mean difference = {mean_diff:.4} (n = {})", pre.len()))
        }
        Command::Ftest { samples } => {
            let (s1, s2) = samples.resolve()?;
            // The F-test is two-sided by construction; the tail setting
            // does not apply.
            let outcome = f_test(&s1, &s2, alpha).context("F-test failed")?;
            TestReport::new("F-test for equality of variances", outcome)
                .with_note(group_summary(&s1, &s2))
        }
        Command::Advise { .. } => unreachable!("handled before dispatch"),
    };
    Ok(report)
}

fn group_summary(sample1: &[f64], sample2: &[f64]) -> String {
    format!(
        "group 1: mean = {:.4}, std dev = {:.4} (n = {}); group 2: mean = {:.4}, std dev = {:.4} (n = {})",
        mean(sample1),
        sample_std_dev(sample1),
        sample1.len(),
        mean(sample2),
        sample_std_dev(sample2),
        sample2.len()
    )
}
