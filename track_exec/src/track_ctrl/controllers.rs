//! # Path tracking controllers module
//!
//! This module provides the PID controller used for the speed loop of path
//! tracking.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::ConfigError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A discrete PID controller with a fixed sample interval and saturated
/// output.
///
/// Only the output is saturated, the integral keeps accumulating while the
/// output is at a limit. Retuned gains therefore act on the full error
/// history.
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Dervative gain
    k_d: f64,

    /// Interval between calls to `calculate`, seconds
    sample_interval_s: f64,

    /// Lower output limit
    output_min: f64,

    /// Upper output limit
    output_max: f64,

    /// Error passed in on the previous call, zero before the first call
    prev_error: f64,

    /// The integral accumulation, sum of error * dt
    integral: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {

    /// Create a new controller with the given gains, sample interval and
    /// output bounds.
    ///
    /// The interval must be positive and `output_min` must not be greater
    /// than `output_max`.
    pub fn new(
        k_p: f64,
        k_i: f64,
        k_d: f64,
        sample_interval_s: f64,
        output_min: f64,
        output_max: f64
    ) -> Result<Self, ConfigError> {
        if !(sample_interval_s > 0.0) || !sample_interval_s.is_finite() {
            return Err(ConfigError::NonPositiveSampleInterval(sample_interval_s))
        }

        if !(output_min <= output_max) {
            return Err(ConfigError::InvalidOutputBounds(output_min, output_max))
        }

        Ok(Self {
            k_p, k_i, k_d,
            sample_interval_s,
            output_min,
            output_max,
            prev_error: 0f64,
            integral: 0f64
        })
    }

    /// Get the saturated controller output driving `measured_value` towards
    /// `setpoint`.
    pub fn calculate(&mut self, setpoint: f64, measured_value: f64) -> f64 {
        let error = setpoint - measured_value;

        // Accumulate the integral term
        self.integral += error * self.sample_interval_s;

        let deriv = (error - self.prev_error) / self.sample_interval_s;

        let out = 
            self.k_p * error 
            + self.k_i * self.integral 
            + self.k_d * deriv;

        self.prev_error = error;

        out.clamp(self.output_min, self.output_max)
    }

    /// Replace the gains of the controller.
    ///
    /// The integral and previous error are kept, so only the weighting of the
    /// error history changes.
    pub fn update_settings(&mut self, k_p: f64, k_i: f64, k_d: f64) {
        self.k_p = k_p;
        self.k_i = k_i;
        self.k_d = k_d;
    }

    /// Get the current `(k_p, k_i, k_d)` gains.
    pub fn gains(&self) -> (f64, f64, f64) {
        (self.k_p, self.k_i, self.k_d)
    }

    /// Get the accumulated integral of the error.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Get the error passed in on the previous call.
    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_proportional_saturates() {
        let mut pid = PidController::new(1.0, 0.0, 0.0, 0.1, -1.0, 1.0).unwrap();

        assert_eq!(pid.calculate(2.0, 0.5), 1.0);
        assert_eq!(pid.calculate(-2.0, 0.5), -1.0);
        assert_abs_diff_eq!(pid.calculate(0.8, 0.5), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_integral_and_derivative() {
        let mut pid = PidController::new(0.0, 1.0, 0.0, 0.5, -10.0, 10.0).unwrap();

        // Integral accumulates error * dt
        assert_abs_diff_eq!(pid.calculate(1.0, 0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pid.calculate(1.0, 0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pid.integral(), 1.0, epsilon = 1e-12);

        // Derivative of the error from a zero initial error
        let mut pid = PidController::new(0.0, 0.0, 1.0, 0.5, -10.0, 10.0).unwrap();
        assert_abs_diff_eq!(pid.calculate(1.0, 0.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pid.calculate(1.0, 0.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pid.calculate(1.0, 0.5), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pid.prev_error(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_integral_winds_up_past_saturation() {
        let mut pid = PidController::new(0.0, 1.0, 0.0, 1.0, -1.0, 1.0).unwrap();

        for _ in 0..5 {
            assert_eq!(pid.calculate(1.0, 0.0), 1.0);
        }
        assert_abs_diff_eq!(pid.integral(), 5.0, epsilon = 1e-12);

        // The wound up integral holds the output at the limit after the error
        // changes sign
        assert_eq!(pid.calculate(0.0, 1.0), 1.0);
    }

    #[test]
    fn test_output_always_within_bounds() {
        let mut pid = PidController::new(3.0, 2.0, 0.7, 0.05, -0.4, 0.6).unwrap();

        let mut x = 0.37f64;
        for i in 0..500 {
            // Deterministic pseudo-random sequence of inputs
            x = (x * 3.9 * (1.0 - x)).max(0.0).min(1.0);
            let out = pid.calculate(4.0 * x - 2.0, (i % 7) as f64 - 3.0);
            assert!(out >= -0.4 && out <= 0.6, "Output {} out of bounds", out);
        }
    }

    #[test]
    fn test_deterministic() {
        let inputs = [(1.0, 0.0), (1.0, 0.2), (0.5, 0.9), (0.0, -0.3)];

        let mut a = PidController::new(0.8, 0.3, 0.1, 0.1, -1.0, 1.0).unwrap();
        let mut b = a.clone();

        for &(sp, mv) in inputs.iter() {
            assert_eq!(a.calculate(sp, mv), b.calculate(sp, mv));
        }
    }

    #[test]
    fn test_update_settings_keeps_history() {
        let inputs = [(1.0, 0.0), (1.0, 0.2), (0.5, 0.9), (0.0, -0.3), (0.7, 0.7)];

        let mut reference = PidController::new(0.8, 0.3, 0.1, 0.1, -1.0, 1.0).unwrap();
        let mut retuned = reference.clone();

        for (i, &(sp, mv)) in inputs.iter().enumerate() {
            if i == 2 {
                // Reapplying the current gains changes nothing
                let (k_p, k_i, k_d) = retuned.gains();
                retuned.update_settings(k_p, k_i, k_d);
            }
            assert_eq!(reference.calculate(sp, mv), retuned.calculate(sp, mv));
        }

        // New gains keep the integral and previous error
        let integral = retuned.integral();
        let prev_error = retuned.prev_error();
        retuned.update_settings(2.0, 0.0, 0.0);
        assert_eq!(retuned.gains(), (2.0, 0.0, 0.0));
        assert_eq!(retuned.integral(), integral);
        assert_eq!(retuned.prev_error(), prev_error);
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(
            PidController::new(1.0, 0.0, 0.0, 0.0, -1.0, 1.0).unwrap_err(),
            ConfigError::NonPositiveSampleInterval(0.0)
        );
        assert_eq!(
            PidController::new(1.0, 0.0, 0.0, -0.1, -1.0, 1.0).unwrap_err(),
            ConfigError::NonPositiveSampleInterval(-0.1)
        );
        assert_eq!(
            PidController::new(1.0, 0.0, 0.0, 0.1, 1.0, -1.0).unwrap_err(),
            ConfigError::InvalidOutputBounds(1.0, -1.0)
        );

        // Equal bounds are allowed, they pin the output
        let mut pid = PidController::new(1.0, 0.0, 0.0, 0.1, 0.2, 0.2).unwrap();
        assert_eq!(pid.calculate(5.0, 0.0), 0.2);
    }
}
