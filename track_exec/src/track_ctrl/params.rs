//! Path tracking parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::msg::GainsMsg;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for path tracking, loaded once at startup.
#[derive(Deserialize, Debug, Clone)]
pub struct Params {

    /// The interval between speed controller samples. Used to integrate and
    /// differentiate the speed error.
    ///
    /// Units: seconds
    pub sample_interval_s: f64,

    /// Speed demand minimum limit
    ///
    /// Units: meters/second
    pub min_speed_dem_ms: f64,

    /// Speed demand maximum limit
    ///
    /// Units: meters/second
    pub max_speed_dem_ms: f64,

    /// Gains in use at startup, until the first reconfiguration.
    pub gains: ControllerGains
}

/// The live-reloadable gains of the tracker.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq)]
pub struct ControllerGains {

    /// Setpoint of the speed controller
    ///
    /// Units: meters/second
    pub target_speed_ms: f64,

    /// Speed controller proportional gain
    pub speed_k_p: f64,

    /// Speed controller integral gain
    pub speed_k_i: f64,

    /// Speed controller derivative gain
    pub speed_k_d: f64,

    /// Heading error to yaw rate gain
    pub yaw_k_p: f64,

    /// Minimum distance from the robot at which a goal point is picked
    ///
    /// Units: meters
    pub lookahead_m: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Ways in which parameters or gains can be invalid. These are never clamped
/// into range, the offending configuration is rejected instead.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Sample interval must be positive, found {0} s")]
    NonPositiveSampleInterval(f64),

    #[error("Output bounds are malformed, min ({0}) is greater than max ({1})")]
    InvalidOutputBounds(f64, f64),

    #[error("Lookahead distance must be positive, found {0} m")]
    NonPositiveLookahead(f64),

    #[error("Value of {0} is not finite")]
    NonFinite(&'static str)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControllerGains {

    /// Check that these gains can be used by the tracker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("target_speed_ms", self.target_speed_ms),
            ("speed_k_p", self.speed_k_p),
            ("speed_k_i", self.speed_k_i),
            ("speed_k_d", self.speed_k_d),
            ("yaw_k_p", self.yaw_k_p),
            ("lookahead_m", self.lookahead_m)
        ];
        for &(name, val) in fields.iter() {
            if !val.is_finite() {
                return Err(ConfigError::NonFinite(name))
            }
        }

        if self.lookahead_m <= 0.0 {
            return Err(ConfigError::NonPositiveLookahead(self.lookahead_m))
        }

        Ok(())
    }
}

impl From<GainsMsg> for ControllerGains {
    fn from(msg: GainsMsg) -> Self {
        Self {
            target_speed_ms: msg.target_speed_ms,
            speed_k_p: msg.speed_k_p,
            speed_k_i: msg.speed_k_i,
            speed_k_d: msg.speed_k_d,
            yaw_k_p: msg.yaw_k_p,
            lookahead_m: msg.lookahead_m
        }
    }
}
