/// CLI integration tests for cadence
///
/// These tests run the binary as a black box with "today" pinned through
/// the environment, covering each command, JSON output and error reporting.
use predicates::prelude::*;
use rstest::rstest;

mod helpers;
use helpers::{assertions, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("repeating tasks"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("cadence"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[rstest]
#[case("23.07.2024", "d 3", "23.07.2024", "26.07.2024")]
#[case("29.02.2024", "y", "01.01.2025", "01.03.2025")]
#[case("10.07.2024", "w 1,3", "10.07.2024", "15.07.2024")]
#[case("01.01.2024", "m -1", "05.02.2024", "29.02.2024")]
fn test_next_scenarios(
    #[case] date: &str,
    #[case] repeat: &str,
    #[case] now: &str,
    #[case] expected: &str,
) {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["next", "--date", date, "--repeat", repeat, "--now", now])
        .stdout(assertions::prints_line(expected));
}

#[test]
fn test_next_defaults_to_today() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["next", "--date", "01.10.2026", "--repeat", "d 7"])
        .stdout(assertions::prints_line("22.10.2026"));
}

#[test]
fn test_relative_now_counts_from_pinned_today() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["next", "--date", "19.10.2026", "--repeat", "d 1", "--now", "tomorrow"])
        .stdout(assertions::prints_line("21.10.2026"));
}

#[test]
fn test_next_json_output() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&[
            "--json", "next", "--date", "23.07.2024", "--repeat", "d 3", "--now", "23.07.2024",
        ])
        .stdout(assertions::prints_line(r#"{"date":"26.07.2024"}"#));
}

#[rstest]
#[case("d 401", "day interval '401' is out of range (1 to 400)")]
#[case("x", "unsupported repeat format: 'x'")]
#[case("", "unsupported repeat format: ''")]
#[case("w 8", "weekday '8' is out of range (1 to 7)")]
fn test_next_reports_rule_errors(#[case] repeat: &str, #[case] message: &str) {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["next", "--date", "01.01.2024", "--repeat", repeat])
        .stderr(assertions::has_error())
        .stderr(predicate::str::contains(message))
        .stderr(predicate::str::contains("Repeat rules look like"));

    harness
        .run_failure(&["--json", "next", "--date", "01.01.2024", "--repeat", repeat])
        .stdout(predicate::str::contains(format!(r#"{{"error":"{message}"}}"#)));
}

#[test]
fn test_next_reports_bad_dates() {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["next", "--date", "2024-01-01", "--repeat", "d 1"])
        .stderr(predicate::str::contains(
            "invalid date '2024-01-01': expected DD.MM.YYYY",
        ));

    harness
        .run_failure(&["next", "--date", "01.01.2024", "--repeat", "d 1", "--now", "someday maybe"])
        .stderr(assertions::has_error());
}

#[test]
fn test_parse_command() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["parse", "w 5,1,1"])
        .stdout(predicate::str::contains("w 1,5"))
        .stdout(predicate::str::contains("every week on Mon, Fri"));

    harness
        .run_success(&["--json", "parse", "m -1 2"])
        .stdout(predicate::str::contains(r#""kind":"monthly""#))
        .stdout(predicate::str::contains(r#""rule":"m -1 2""#));

    harness
        .run_failure(&["parse", "m 31 4,6,9,11"])
        .stderr(predicate::str::contains("never occur"));
}

#[test]
fn test_preview_command() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["preview", "--date", "19.10.2026", "--repeat", "w 1,3", "--count", "3"])
        .stdout(predicate::str::contains("21.10.2026"))
        .stdout(predicate::str::contains("26.10.2026"))
        .stdout(predicate::str::contains("28.10.2026"))
        .stdout(predicate::str::contains("02.11.2026").not());

    harness
        .run_success(&["--json", "preview", "--date", "01.01.2024", "--repeat", "m -1", "--now", "01.01.2024", "--count", "2"])
        .stdout(assertions::prints_line(r#"{"dates":["31.01.2024","29.02.2024"]}"#));
}

#[test]
fn test_preview_count_from_config() {
    let harness = CliTestHarness::new();
    harness.write_config("[preview]\ncount = 2\n");
    harness
        .run_success(&["--json", "preview", "--date", "19.10.2026", "--repeat", "d 1"])
        .stdout(assertions::prints_line(r#"{"dates":["20.10.2026","21.10.2026"]}"#));
}

#[test]
fn test_horizon_from_config() {
    let harness = CliTestHarness::new();
    harness.write_config("[engine]\nhorizon_years = 2\n");
    harness
        .run_failure(&["next", "--date", "01.03.2097", "--repeat", "m 29 2", "--now", "01.03.2097"])
        .stderr(predicate::str::contains("no date within 2 years"));

    harness
        .command()
        .env("CADENCE_ENGINE__HORIZON_YEARS", "10")
        .args(["next", "--date", "01.03.2097", "--repeat", "m 29 2", "--now", "01.03.2097"])
        .assert()
        .success()
        .stdout(assertions::prints_line("29.02.2104"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let harness = CliTestHarness::new();
    harness
        .run_failure(&["--config", "nope.toml", "parse", "y"])
        .stderr(predicate::str::contains("configuration file 'nope.toml' not found"));
}

#[rstest]
#[case(&["plan"], "19.10.2026")]
#[case(&["plan", "--date", "01.10.2026"], "19.10.2026")]
#[case(&["plan", "--date", "01.10.2026", "--repeat", "d 7"], "22.10.2026")]
#[case(&["plan", "--date", "24.12.2026", "--repeat", "y"], "24.12.2026")]
fn test_plan_command(#[case] args: &[&str], #[case] expected: &str) {
    let harness = CliTestHarness::new();
    harness
        .run_success(args)
        .stdout(assertions::prints_line(expected));
}

#[test]
fn test_done_command() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["done", "--date", "19.10.2026"])
        .stdout(assertions::prints_line("remove"));

    harness
        .run_success(&["done", "--date", "01.10.2026", "--repeat", "d 7"])
        .stdout(assertions::prints_line("22.10.2026"));

    harness
        .run_success(&["--json", "done", "--date", "01.10.2026", "--repeat", "d 7"])
        .stdout(assertions::prints_line(r#"{"action":"reschedule","date":"22.10.2026"}"#));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let harness = CliTestHarness::new();
    harness
        .run_success(&["--verbose", "next", "--date", "23.07.2024", "--repeat", "d 3", "--now", "23.07.2024"])
        .stdout(assertions::prints_line("26.07.2024"))
        .stderr(predicate::str::contains("computed next due date"));
}
