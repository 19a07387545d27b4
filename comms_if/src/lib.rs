//! # Communications interface crate.
//!
//! Provides the messages exchanged between the path tracker and the systems
//! around it: pose estimates and paths coming in, velocity commands going out,
//! and gain updates from the reconfiguration channel.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Input messages consumed by the tracker
pub mod msg;

/// Velocity command produced by the tracker
pub mod cmd;
