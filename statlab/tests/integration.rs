//! End-to-end flow: CLI parsing, config precedence, input tokenization and
//! the engine wired together the way the binary does it.

use std::io::Write;

use clap::Parser;
use statlab::{AdvisoryService, Cli, Command, Config, KeywordAdvisor, TestParameters};
use statlab_core::stats::{pooled_t_test, t_test, Tail};
use tempfile::NamedTempFile;

#[test]
fn cli_overrides_config_file() {
    let toml_content = r#"
[test]
alpha = 0.10
tail = "left"
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(toml_content.as_bytes()).unwrap();

    let cli = Cli::parse_from([
        "statlab",
        "ttest",
        "--mu0",
        "50",
        "--data",
        "52 55 49",
        "--alpha",
        "0.01",
    ]);

    let mut config = Config::load(file.path()).unwrap();
    cli.apply_to_config(&mut config);

    // CLI alpha wins; config tail survives untouched.
    assert_eq!(config.test.alpha, 0.01);
    assert_eq!(config.test.tail, Tail::Left);
}

#[test]
fn inline_data_flows_into_the_engine() {
    let cli = Cli::parse_from([
        "statlab",
        "pooled",
        "--data1",
        "10, 12, 11, 14, 13",
        "--data2",
        "14, 13, 15, 16, 14",
    ]);

    let Command::Pooled { samples } = cli.command else {
        panic!("expected pooled subcommand");
    };
    let (s1, s2) = samples.resolve().unwrap();
    let outcome = pooled_t_test(&s1, &s2, &TestParameters::default()).unwrap();

    assert!((outcome.result.statistic + 2.7530).abs() < 1e-4);
    assert!(outcome.result.reject_null);
    assert!(outcome.estimates.is_some());
}

#[test]
fn file_data_flows_into_the_engine() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"weight\n52\n55\n49\n58\n54\n51\n").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let cli = Cli::parse_from(["statlab", "ttest", "--mu0", "50", "--file", &path]);

    let Command::Ttest { mu0, sample } = cli.command else {
        panic!("expected ttest subcommand");
    };
    let values = sample.resolve().unwrap();
    assert_eq!(values.len(), 6);

    let outcome = t_test(&values, mu0, &TestParameters::default()).unwrap();
    assert!(outcome.result.statistic > 0.0);
    assert_eq!(outcome.result.reject_null, outcome.result.p_value < 0.05);
}

#[test]
fn advise_subcommand_maps_to_a_recommendation() {
    let cli = Cli::parse_from([
        "statlab", "advise", "same", "patients", "before", "and", "after", "therapy",
    ]);

    let Command::Advise { description } = cli.command else {
        panic!("expected advise subcommand");
    };
    let recommendation = KeywordAdvisor::new()
        .recommend(&description.join(" "))
        .unwrap();
    assert!(recommendation.contains("paired t-test"));
}

#[test]
fn invalid_alpha_from_cli_is_rejected_downstream() {
    let cli = Cli::parse_from([
        "statlab", "ttest", "--mu0", "0", "--data", "1 2 3", "--alpha", "1.5",
    ]);

    let mut config = Config::default();
    cli.apply_to_config(&mut config);

    assert!(TestParameters::new(config.test.alpha, config.test.tail).is_err());
}
