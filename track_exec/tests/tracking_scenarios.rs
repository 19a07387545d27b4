//! End to end tracking scenarios, driven through the message interface.

use std::convert::TryFrom;
use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use comms_if::msg::{Msg, PathMsg};
use nalgebra::Point2;
use track_lib::{
    loc::RobotState,
    shared::SharedTrackCtrl,
    track_ctrl::{ControllerGains, Params, PathPoints, PidController, TrackCtrl, TrackCtrlError},
};

const PARAMS_TOML: &str = r#"
    sample_interval_s = 0.1
    min_speed_dem_ms = -1.0
    max_speed_dem_ms = 1.0

    [gains]
    target_speed_ms = 0.5
    speed_k_p = 1.0
    speed_k_i = 0.0
    speed_k_d = 0.0
    yaw_k_p = 1.0
    lookahead_m = 3.0
"#;

fn tracker() -> SharedTrackCtrl {
    let params: Params = util::params::parse(PARAMS_TOML).unwrap();
    SharedTrackCtrl::new(TrackCtrl::new(params).unwrap())
}

/// Feed a JSON message to the tracker, returning the command for paths.
fn feed(tc: &SharedTrackCtrl, json: &str) -> Result<Option<(f64, f64)>, TrackCtrlError> {
    match Msg::from_json(json).unwrap() {
        Msg::Pose(p) => {
            tc.on_pose(RobotState::try_from(&p).unwrap());
            Ok(None)
        }
        Msg::Gains(g) => tc.apply_gains(ControllerGains::from(g)).map(|_| None),
        Msg::Path(p) => tc
            .on_path(&PathPoints::from(&p))
            .map(|(cmd, _)| Some((cmd.linear_ms, cmd.angular_rads))),
    }
}

#[test]
fn straight_path_ahead() {
    let tc = tracker();

    feed(&tc, r#"{"type": "POSE", "payload": {
        "position_m": [0.0, 0.0],
        "orientation": {"Yaw": {"yaw_rad": 0.0}},
        "velocity_ms": [0.0, 0.0, 0.0]
    }}"#).unwrap();

    let (linear, angular) = feed(
        &tc, 
        r#"{"type": "PATH", "payload": {"points_m": [[1.0, 0.0], [5.0, 0.0], [10.0, 0.0]]}}"#
    ).unwrap().unwrap();

    assert_abs_diff_eq!(angular, 0.0);
    assert_abs_diff_eq!(linear, 0.5, epsilon = 1e-12);

    let report = tc.with(|t| *t.report());
    assert_eq!(report.goal_point_m, Point2::new(5.0, 0.0));
    assert_abs_diff_eq!(report.desired_heading_rad, 0.0);
}

#[test]
fn single_point_path_is_goal() {
    let tc = tracker();

    // Facing +Y as a quarter turn quaternion about Z
    let s = (FRAC_PI_2 / 2.0).sin();
    let c = (FRAC_PI_2 / 2.0).cos();
    feed(&tc, r#"{"type": "GAINS", "payload": {
        "target_speed_ms": 0.5, "speed_k_p": 1.0, "speed_k_i": 0.0, "speed_k_d": 0.0,
        "yaw_k_p": 1.0, "lookahead_m": 1.0
    }}"#).unwrap();
    feed(&tc, &format!(r#"{{"type": "POSE", "payload": {{
        "position_m": [0.0, 0.0],
        "orientation": {{"Quaternion": {{"x": 0.0, "y": 0.0, "z": {}, "w": {}}}}},
        "velocity_ms": [0.0, 0.0, 0.0]
    }}}}"#, s, c)).unwrap();

    let (_, angular) = feed(
        &tc, 
        r#"{"type": "PATH", "payload": {"points_m": [[0.0, 3.0]]}}"#
    ).unwrap().unwrap();

    let report = tc.with(|t| *t.report());
    assert_eq!(report.goal_point_m, Point2::new(0.0, 3.0));
    assert_abs_diff_eq!(report.desired_heading_rad, FRAC_PI_2);
    assert_abs_diff_eq!(angular, 0.0, epsilon = 1e-9);
}

#[test]
fn path_before_pose_is_rejected() {
    let tc = tracker();

    match feed(&tc, r#"{"type": "PATH", "payload": {"points_m": [[1.0, 0.0]]}}"#) {
        Err(TrackCtrlError::UninitializedState) => (),
        r => panic!("Expected UninitializedState, got {:?}", r)
    }

    // Recovers once a pose arrives
    tc.on_pose(RobotState::new(Point2::origin(), 0.0, 0.0));
    assert!(feed(&tc, r#"{"type": "PATH", "payload": {"points_m": [[1.0, 0.0]]}}"#).is_ok());
}

#[test]
fn empty_path_is_rejected_without_side_effects() {
    let tc = tracker();
    tc.on_pose(RobotState::new(Point2::new(2.0, -1.0), 0.7, 0.1));

    let before = tc.with(|t| t.clone());

    match tc.on_path(&PathPoints::from(&PathMsg::default())) {
        Err(TrackCtrlError::EmptyPath) => (),
        r => panic!("Expected EmptyPath, got {:?}", r)
    }

    tc.with(|t| {
        assert_eq!(t.robot_state(), before.robot_state());
        assert_eq!(t.report(), before.report());
        assert_eq!(t.speed_ctrl().integral(), before.speed_ctrl().integral());
        assert_eq!(t.speed_ctrl().prev_error(), before.speed_ctrl().prev_error());
    });
}

#[test]
fn invalid_lookahead_is_rejected() {
    let tc = tracker();

    let res = feed(&tc, r#"{"type": "GAINS", "payload": {
        "target_speed_ms": 0.5, "speed_k_p": 1.0, "speed_k_i": 0.0, "speed_k_d": 0.0,
        "yaw_k_p": 1.0, "lookahead_m": 0.0
    }}"#);

    assert!(matches!(res, Err(TrackCtrlError::InvalidConfiguration(_))));
    assert!(!tc.with(|t| t.has_pending_gains()));
}

#[test]
fn heading_error_wraps_across_pi() {
    let tc = tracker();

    // Facing just above -X, path just below -X
    tc.on_pose(RobotState::new(Point2::origin(), PI - 0.05, 0.0));

    let (_, angular) = tc
        .on_path(&PathPoints::new(vec![Point2::new(-5.0, -0.25)]))
        .unwrap()
        .0
        .into_tuple();

    assert!(angular > 0.0 && angular < 0.2, "Unexpected yaw rate {}", angular);
}

#[test]
fn pid_saturates() {
    let mut pid = PidController::new(1.0, 0.0, 0.0, 0.1, -1.0, 1.0).unwrap();
    assert_eq!(pid.calculate(2.0, 0.5), 1.0);
}

/// Small helper so commands read as tuples in the assertions above.
trait IntoTuple {
    fn into_tuple(self) -> (f64, f64);
}

impl IntoTuple for comms_if::cmd::VelCmd {
    fn into_tuple(self) -> (f64, f64) {
        (self.linear_ms, self.angular_rads)
    }
}
