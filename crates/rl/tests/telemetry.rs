use physics::AircraftState;
use rl::{run_episode, FlightLog, FlightStatus, NoseDownPolicy, StallRecoveryEnv};

fn at(alpha: f32, altitude: f32) -> AircraftState {
    AircraftState {
        alpha,
        altitude,
        speed: 45.0,
        throttle: 50.0,
        ..Default::default()
    }
}

#[test]
fn records_derive_rates_and_status() {
    let mut log = FlightLog::start(0.1, 15.0, &at(16.0, 100.0));
    log.record(&at(16.0, 101.0));
    log.record(&at(14.0, 100.5));

    let first = log.records[0];
    assert_eq!(first.time, 0.0);
    assert!((first.vertical_speed - 10.0).abs() < 1e-3, "vs {}", first.vertical_speed);
    assert_eq!(first.stall_margin, -1.0);
    assert_eq!(first.status, FlightStatus::Stall);

    let second = log.records[1];
    assert!((second.time - 0.1).abs() < 1e-6);
    assert!((second.vertical_speed + 5.0).abs() < 1e-3);
    assert_eq!(second.stall_margin, 1.0);
    assert_eq!(second.status, FlightStatus::Normal);
}

#[test]
fn analysis_summarises_stalled_records() {
    let mut log = FlightLog::start(0.1, 15.0, &at(16.0, 100.0));
    log.record(&at(16.0, 101.0));
    log.record(&at(14.0, 100.5));
    log.record(&at(17.0, 99.0));

    let analysis = log.analyze();
    assert_eq!(analysis.stall_records, 2);
    assert_eq!(analysis.mean_stall_altitude_change, Some(0.0));
    assert_eq!(analysis.min_stall_margin, Some(-2.0));
    assert_eq!(analysis.max_altitude_loss, 1.0);
    assert_eq!(log.stalls().count(), 2);
}

#[test]
fn analysis_without_stalls() {
    let mut log = FlightLog::start(0.1, 15.0, &at(12.0, 100.0));
    log.record(&at(11.0, 100.5));
    let analysis = log.analyze();
    assert_eq!(analysis.stall_records, 0);
    assert_eq!(analysis.mean_stall_altitude_change, None);
    assert_eq!(analysis.min_stall_margin, None);
    assert_eq!(analysis.max_altitude_loss, 0.0);
}

#[test]
fn episode_log_survives_json() {
    let mut env = StallRecoveryEnv::new();
    let summary = run_episode(&mut env, &mut NoseDownPolicy::default(), Some(4), 100).unwrap();

    let mut buffer = Vec::new();
    summary.log.write_json(&mut buffer).unwrap();
    let json = String::from_utf8(buffer).unwrap();
    assert!(json.contains("\"status\": \"stall\"") || json.contains("\"status\": \"normal\""));

    let parsed = FlightLog::from_json(&json).unwrap();
    assert_eq!(parsed.len(), summary.log.len());
    for (a, b) in parsed.records.iter().zip(&summary.log.records) {
        assert_eq!(a.status, b.status);
        assert!((a.altitude - b.altitude).abs() < 1e-3);
        assert!((a.alpha - b.alpha).abs() < 1e-5);
    }
}
