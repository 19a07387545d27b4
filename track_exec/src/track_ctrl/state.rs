//! Path tracking module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use nalgebra::Point2;
use serde::Serialize;

// Internal
use super::*;
use crate::loc::RobotState;
use comms_if::cmd::VelCmd;
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The path tracker.
///
/// Holds the latest robot state and the gains between cycles. A cycle is run
/// for each new path by calling `proc`.
#[derive(Debug, Clone)]
pub struct TrackCtrl {
    params: Params,

    /// Gains in use by the current cycle
    gains: ControllerGains,

    /// Gains received since the last cycle, applied at the start of the next
    pending_gains: Option<ControllerGains>,

    /// Most recent robot state, `None` until the first pose arrives
    robot_state: Option<RobotState>,

    /// Speed loop controller
    speed_ctrl: PidController,

    report: StatusReport
}

/// The status report of a single cycle, giving the intermediate quantities
/// behind the command.
#[derive(Debug, Copy, Clone, Serialize, PartialEq)]
pub struct StatusReport {
    /// The point on the path being steered towards
    pub goal_point_m: Point2<f64>,

    /// Direction from the robot to the goal point
    pub desired_heading_rad: f64,

    /// Shortest signed angle from the robot heading to the desired heading
    pub head_error_rad: f64,

    /// Speed of the robot used by the speed loop
    pub measured_speed_ms: f64,

    /// Target speed minus measured speed
    pub speed_error_ms: f64,

    /// True if staged gains were applied at the start of this cycle
    pub gains_applied: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        StatusReport {
            goal_point_m: Point2::origin(),
            desired_heading_rad: 0.0,
            head_error_rad: 0.0,
            measured_speed_ms: 0.0,
            speed_error_ms: 0.0,
            gains_applied: false
        }
    }
}

impl TrackCtrl {
    /// Intiailise the tracker from a parameter file.
    ///
    /// The path is relative to the parameters directory.
    pub fn init(params_path: &str) -> Result<Self, TrackCtrlError> {
        let params: Params = params::load(params_path)
            .map_err(TrackCtrlError::ParamLoad)?;

        Self::new(params)
    }

    /// Create a new tracker from the given parameters.
    ///
    /// The tracker starts with no robot state, so `proc` will fail until
    /// `on_pose` has been called.
    pub fn new(params: Params) -> Result<Self, TrackCtrlError> {
        params.gains.validate()?;

        let speed_ctrl = PidController::new(
            params.gains.speed_k_p,
            params.gains.speed_k_i,
            params.gains.speed_k_d,
            params.sample_interval_s,
            params.min_speed_dem_ms,
            params.max_speed_dem_ms
        )?;

        Ok(Self {
            gains: params.gains,
            params,
            pending_gains: None,
            robot_state: None,
            speed_ctrl,
            report: StatusReport::default()
        })
    }

    /// Store a new robot state, replacing the previous one.
    ///
    /// No command is produced.
    pub fn on_pose(&mut self, state: RobotState) {
        self.robot_state = Some(state);
    }

    /// Stage new gains to be applied at the start of the next cycle.
    ///
    /// Invalid gains are rejected and leave any previously staged gains in
    /// place. If gains are staged more than once between cycles only the last
    /// set is applied.
    pub fn apply_gains(&mut self, gains: ControllerGains) -> Result<(), TrackCtrlError> {
        gains.validate()?;

        debug!("Gains staged: {:?}", gains);
        self.pending_gains = Some(gains);

        Ok(())
    }

    /// Run one control cycle for a newly received path.
    ///
    /// Processing involves:
    ///  1. Applying any staged gains
    ///  1. Finding the goal point on the path
    ///  1. Calculating the yaw rate towards the goal point
    ///  1. Calculating the speed demand from the speed controller
    ///
    /// If there is no robot state yet, or the path is empty, an error is
    /// returned before anything is modified.
    pub fn proc(
        &mut self,
        path: &PathPoints
    ) -> Result<(VelCmd, StatusReport), TrackCtrlError> {

        // Validate the inputs before touching any state
        let state = match self.robot_state {
            Some(s) => s,
            None => return Err(TrackCtrlError::UninitializedState)
        };
        if path.is_empty() {
            return Err(TrackCtrlError::EmptyPath)
        }

        self.report = StatusReport::default();

        // ---- GAIN UPDATE ----

        if let Some(gains) = self.pending_gains.take() {
            self.speed_ctrl.update_settings(
                gains.speed_k_p,
                gains.speed_k_i,
                gains.speed_k_d
            );
            self.gains = gains;
            self.report.gains_applied = true;

            info!("New gains applied: {:?}", gains);
        }

        // ---- STEERING ----

        let goal_m = find_goal_point(
            &state.position_m, 
            path.points(), 
            self.gains.lookahead_m
        )?;

        let angular_rads = compute_yaw_rate(
            &state.position_m,
            state.yaw_rad,
            &goal_m,
            self.gains.yaw_k_p
        );

        self.report.goal_point_m = goal_m;
        self.report.desired_heading_rad = steering::desired_heading(&state.position_m, &goal_m);
        self.report.head_error_rad = steering::heading_error(
            &state.position_m, state.yaw_rad, &goal_m
        );

        // ---- SPEED ----

        let linear_ms = self.speed_ctrl.calculate(
            self.gains.target_speed_ms, 
            state.speed_ms
        );

        self.report.measured_speed_ms = state.speed_ms;
        self.report.speed_error_ms = self.gains.target_speed_ms - state.speed_ms;

        let cmd = VelCmd {
            linear_ms,
            angular_rads
        };

        debug!(
            "TrackCtrl output: {:?}\n    goal: ({:.3}, {:.3}), head_err: {:.4} rad", 
            cmd,
            goal_m.x,
            goal_m.y,
            self.report.head_error_rad
        );

        Ok((cmd, self.report))
    }

    /// Get the gains in use, not including any staged gains.
    pub fn gains(&self) -> &ControllerGains {
        &self.gains
    }

    /// Returns true if gains have been staged but not yet applied.
    pub fn has_pending_gains(&self) -> bool {
        self.pending_gains.is_some()
    }

    /// Get the most recent robot state, if any.
    pub fn robot_state(&self) -> Option<&RobotState> {
        self.robot_state.as_ref()
    }

    /// Get the speed controller.
    pub fn speed_ctrl(&self) -> &PidController {
        &self.speed_ctrl
    }

    /// Get the parameters the tracker was created with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Get the status report of the last successful cycle.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
