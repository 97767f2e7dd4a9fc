use physics::{ControlInput, SimplifiedDynamics};
use rl::{
    evaluate, run_episode, ConstantPolicy, EnvConfig, EvaluationReport, NoseDownPolicy, Policy,
    StallRecoveryEnv, TerminationCause, ZeroPolicy,
};

#[test]
fn nose_down_policy_recovers_within_horizon() {
    let mut env = StallRecoveryEnv::new();
    let mut policy = NoseDownPolicy::default();

    for seed in 0..25 {
        let summary = run_episode(&mut env, &mut policy, Some(seed), 200).unwrap();
        assert!(summary.terminated, "seed {seed} did not finish");
        assert_eq!(summary.cause, Some(TerminationCause::Recovered), "seed {seed}");
        assert!(summary.steps <= 40, "seed {seed} took {} steps", summary.steps);
        assert_eq!(summary.log.len(), summary.steps as usize);
        assert!(summary.final_observation[0] < 10.0);
    }
}

#[test]
fn zero_policy_never_recovers_on_its_own() {
    // Neutral elevator leaves alpha where reset put it, above the safe angle.
    let mut env = StallRecoveryEnv::new();
    let summary = run_episode(&mut env, &mut ZeroPolicy, Some(8), 300).unwrap();
    assert!(!summary.done());
    assert_eq!(summary.cause, None);
    assert_eq!(summary.steps, 300);
}

#[test]
fn zero_policy_is_truncated_by_a_time_limit() {
    let config = EnvConfig {
        max_episode_steps: Some(50),
        ..Default::default()
    };
    let mut env = StallRecoveryEnv::with_backend(SimplifiedDynamics::default(), config);
    let summary = run_episode(&mut env, &mut ZeroPolicy, Some(8), 1_000).unwrap();
    assert!(summary.truncated);
    assert!(!summary.terminated);
    assert_eq!(summary.cause, Some(TerminationCause::TimeLimit));
    assert_eq!(summary.steps, 50);
}

#[test]
fn rollout_reward_matches_manual_stepping() {
    let mut policy = ConstantPolicy(ControlInput::new(-0.5, 0.2));

    let mut env = StallRecoveryEnv::new();
    let summary = run_episode(&mut env, &mut policy, Some(11), 30).unwrap();

    let mut env = StallRecoveryEnv::new();
    let mut obs = env.reset_state(Some(11)).to_observation();
    let mut total = 0.0;
    for _ in 0..summary.steps {
        let step = env.step_control(policy.act(&obs)).unwrap();
        total += step.reward;
        obs = step.observation;
    }
    assert_eq!(summary.total_reward, total);
    assert_eq!(summary.final_observation, obs);
}

#[test]
fn closures_act_as_policies() {
    let mut env = StallRecoveryEnv::new();
    let mut calls = 0;
    let mut policy = |obs: &[f32]| {
        calls += 1;
        ControlInput::new(if obs[0] > 5.0 { -1.0 } else { 0.0 }, 0.5)
    };
    let summary = run_episode(&mut env, &mut policy, Some(2), 100).unwrap();
    assert_eq!(summary.cause, Some(TerminationCause::Recovered));
    assert_eq!(calls, summary.steps);
}

#[test]
fn non_finite_policy_output_is_an_error() {
    let mut env = StallRecoveryEnv::new();
    let mut policy = ConstantPolicy(ControlInput::new(f32::NAN, 0.0));
    assert!(run_episode(&mut env, &mut policy, Some(0), 10).is_err());
}

#[test]
fn evaluation_report_counts_outcomes() {
    let mut env = StallRecoveryEnv::new();
    let summaries = evaluate(&mut env, &mut NoseDownPolicy::default(), 6, 100, 200).unwrap();
    let report = EvaluationReport::from_summaries(&summaries);

    assert_eq!(report.episodes, 6);
    assert_eq!(report.recovered, 6);
    assert_eq!(report.crashed, 0);
    assert_eq!(report.unfinished, 0);
    assert!(report.mean_steps > 10.0);

    // Episode i is seeded with seed + i.
    let again = run_episode(&mut env, &mut NoseDownPolicy::default(), Some(103), 200).unwrap();
    assert_eq!(again.total_reward, summaries[3].total_reward);

    assert_eq!(EvaluationReport::from_summaries(&[]), EvaluationReport::default());
}
