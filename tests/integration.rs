use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn test_dir(name: &str) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(&test_dir).expect("failed to create test directory");
    test_dir
}

fn write_input(dir: &Path, metric_data: &str) -> PathBuf {
    let input_path = dir.join("input.json");
    let contents = format!(r#"{{"data":[{{"metricData":{metric_data}}}]}}"#);
    fs::write(&input_path, contents).expect("failed to write input file");
    input_path
}

fn run_bin(args: &[&str]) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_metrics-analyser"));
    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command")
}

fn run_bin_ok(args: &[&str]) -> String {
    let output = run_bin(args);

    let stdout_str =
        std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
    let stderr_str =
        std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );

    stdout_str.to_string()
}

#[test]
fn text_report() {
    let test_dir = test_dir("text_report");
    let input = write_input(
        &test_dir,
        r#"[
            {"dtime":"t0","metricValue":1250000},
            {"dtime":"t1","metricValue":1250000},
            {"dtime":"t2","metricValue":250000},
            {"dtime":"t3","metricValue":250000},
            {"dtime":"t4","metricValue":1250000}
        ]"#,
    );
    let input = input.to_str().expect("failed to convert input path to string");

    let stdout = run_bin_ok(&["analyse-metrics", "--input", input]);

    assert!(stdout.contains("From: t0"), "{stdout}");
    assert!(stdout.contains("To:   t4"), "{stdout}");
    assert!(stdout.contains("Average: 6.8"), "{stdout}");
    assert!(stdout.contains("Min: 2\n"), "{stdout}");
    assert!(stdout.contains("Max: 10\n"), "{stdout}");
    assert!(stdout.contains("Median: 10\n"), "{stdout}");
    assert!(stdout.contains("between t2 and t3"), "{stdout}");
    assert_eq!(stdout.matches("was under-performing").count(), 1);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn json_report() {
    let test_dir = test_dir("json_report");
    let input = write_input(
        &test_dir,
        r#"[{"dtime":"A","metricValue":125000},{"dtime":"B","metricValue":250000}]"#,
    );
    let input = input.to_str().expect("failed to convert input path to string");

    let stdout = run_bin_ok(&["analyse-metrics", "--input", input, "--format", "json"]);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("failed to parse json output");

    assert_eq!(result["from"], "A");
    assert_eq!(result["to"], "B");
    assert_eq!(result["min"], 1.0);
    assert_eq!(result["max"], 2.0);
    assert_eq!(result["average"], 1.5);
    assert_eq!(result["median"], 1.5);
    assert_eq!(result["underperform_periods"], serde_json::json!([]));

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn custom_config() {
    let test_dir = test_dir("custom_config");
    let input = write_input(
        &test_dir,
        r#"[{"dtime":1,"metricValue":3000},{"dtime":2,"metricValue":1000}]"#,
    );
    let input = input.to_str().expect("failed to convert input path to string");

    fs::write(test_dir.join("summary.txt"), "{{From}}-{{To}} {{Min}}/{{Max}}\n")
        .expect("failed to write summary template");
    fs::write(test_dir.join("period.txt"), "slow {{From}}..{{To}}\n")
        .expect("failed to write period template");

    let config_path = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[units]\n"
        + "divisor = 1000.0\n"
        + "precision = 1\n"
        + "\n"
        + "[templates]\n"
        + "summary = \"summary.txt\"\n"
        + "period = \"period.txt\"\n";
    fs::write(&config_path, config_contents).expect("failed to write config file");
    let config_path = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let stdout = run_bin_ok(&["--config", config_path, "analyse-metrics", "--input", input]);

    // The single drop boundary has no partner and is not reported.
    assert_eq!(stdout, "1-2 1/3\n\n");

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn invalid_inputs_fail() {
    let test_dir = test_dir("invalid_inputs_fail");

    let empty = write_input(&test_dir, "[]");
    let empty = empty.to_str().expect("failed to convert input path to string");
    let output = run_bin(&["analyse-metrics", "--input", empty]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let malformed = test_dir.join("malformed.json");
    fs::write(&malformed, r#"{"data":[{"metricData":[{"dtime":"A"}]}]}"#)
        .expect("failed to write malformed file");
    let malformed = malformed
        .to_str()
        .expect("failed to convert input path to string");
    assert!(!run_bin(&["analyse-metrics", "--input", malformed]).status.success());

    let missing = test_dir.join("missing.json");
    let missing = missing.to_str().expect("failed to convert input path to string");
    assert!(!run_bin(&["analyse-metrics", "--input", missing]).status.success());

    assert!(!run_bin(&["analyse-metrics"]).status.success());

    fs::remove_dir_all(&test_dir).ok();
}
