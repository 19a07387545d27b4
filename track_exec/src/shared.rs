//! # Shared tracker handle
//!
//! When pose, gain and path callbacks can be delivered on different threads
//! the tracker is shared through a `SharedTrackCtrl`. Every operation holds a
//! single lock for its whole duration, so a pose update or gain change can
//! never land part way through a control cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::{Arc, Mutex, MutexGuard};

use comms_if::cmd::VelCmd;
use log::warn;

use crate::loc::RobotState;
use crate::track_ctrl::{ControllerGains, PathPoints, StatusReport, TrackCtrl, TrackCtrlError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A cloneable, thread safe handle to a `TrackCtrl`.
#[derive(Clone)]
pub struct SharedTrackCtrl {
    inner: Arc<Mutex<TrackCtrl>>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SharedTrackCtrl {
    pub fn new(track_ctrl: TrackCtrl) -> Self {
        Self {
            inner: Arc::new(Mutex::new(track_ctrl))
        }
    }

    /// Store a new robot state.
    pub fn on_pose(&self, state: RobotState) {
        self.lock().on_pose(state)
    }

    /// Stage new gains for the next cycle.
    pub fn apply_gains(&self, gains: ControllerGains) -> Result<(), TrackCtrlError> {
        self.lock().apply_gains(gains)
    }

    /// Run one control cycle for a newly received path.
    pub fn on_path(&self, path: &PathPoints) -> Result<(VelCmd, StatusReport), TrackCtrlError> {
        self.lock().proc(path)
    }

    /// Run a closure with exclusive access to the tracker.
    pub fn with<R, F: FnOnce(&mut TrackCtrl) -> R>(&self, f: F) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<TrackCtrl> {
        // The tracker is left consistent by every operation, even one which
        // panicked in a different thread, so a poisoned lock is still usable.
        match self.inner.lock() {
            Ok(g) => g,
            Err(e) => {
                warn!("TrackCtrl lock was poisoned, recovering");
                e.into_inner()
            }
        }
    }
}
