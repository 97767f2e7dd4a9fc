use std::process::Command;

fn stallsim() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stallsim"))
}

#[test]
fn evaluate_stdout_is_only_the_report() {
    let output = stallsim()
        .args(["evaluate", "--episodes", "2", "--seed", "5"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["episodes"], 2);
    assert_eq!(report["recovered"], 2);

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("evaluation complete"), "{logs}");
}

#[test]
fn inspect_prints_parseable_scenario() {
    let output = stallsim().arg("inspect").output().unwrap();
    assert!(output.status.success());
    let scenario: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dt = scenario["dt"].as_f64().unwrap();
    assert!((dt - 0.1).abs() < 1e-6, "dt {dt}");
    assert!(scenario["max_episode_steps"].is_null());
}
