//! # Path tracker library.
//!
//! This library allows other crates in the workspace to access items defined inside the tracker
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Localisation module - the tracker's view of where the robot is
pub mod loc;

/// Path tracking control module - steers the robot along the path at the target speed
pub mod track_ctrl;

/// Thread safe handle to the tracker for multi-threaded callback delivery
pub mod shared;
