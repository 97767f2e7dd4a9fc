use physics::{AircraftState, ControlError, ControlInput};

#[test]
fn action_slice_parses() -> anyhow::Result<()> {
    let control = ControlInput::try_from([-0.5_f32, 0.25].as_slice())?;
    assert_eq!(control, ControlInput::new(-0.5, 0.25));
    assert_eq!(control.to_array(), [-0.5, 0.25]);
    Ok(())
}

#[test]
fn wrong_arity_is_rejected() {
    let err = ControlInput::try_from([1.0_f32].as_slice()).unwrap_err();
    assert_eq!(err, ControlError::Arity { expected: 2, actual: 1 });

    let err = ControlInput::try_from([1.0_f32, 0.0, 0.0].as_slice()).unwrap_err();
    assert_eq!(err, ControlError::Arity { expected: 2, actual: 3 });
}

#[test]
fn non_finite_components_are_rejected() {
    let err = ControlInput::try_from([f32::NAN, 0.0].as_slice()).unwrap_err();
    assert!(matches!(err, ControlError::NonFinite { index: 0, .. }));

    let err = ControlInput::new(0.0, f32::INFINITY).validated().unwrap_err();
    assert!(matches!(err, ControlError::NonFinite { index: 1, .. }));
}

#[test]
fn state_casts_to_observation_order() {
    let state = AircraftState {
        alpha: 1.0,
        speed: 2.0,
        pitch_rate: 3.0,
        pitch_angle: 4.0,
        altitude: 5.0,
        throttle: 6.0,
        roll: 7.0,
    };
    assert_eq!(state.to_observation(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(AircraftState::from_array(*state.as_array()), state);
    assert!(state.is_finite());
}
