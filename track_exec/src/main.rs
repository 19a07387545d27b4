//! Path tracker executable entry point.
//!
//! # Architecture
//!
//! The executable stands in for the live collaborators of the tracker by
//! replaying a timed message script. The general execution methodology
//! consists of:
//!
//!     - Initialise the session, logging and the tracker
//!     - Main loop:
//!         - Collect the messages due from the script
//!         - Dispatch each message in order:
//!             - Pose: update the stored robot state
//!             - Gains: stage new gains for the next cycle
//!             - Path: run one control cycle and emit the command
//!
//! Commands are only produced when a path arrives, the loop period only sets
//! how often the script is polled.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, error, info, warn};
use std::convert::TryFrom;
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use comms_if::msg::Msg;
use track_lib::{
    loc::RobotState,
    shared::SharedTrackCtrl,
    track_ctrl::{ControllerGains, PathPoints, TrackCtrl, TrackCtrlError},
};
use util::{
    logger::{logger_init, LevelFilter},
    script_interpreter::{PendingMsgs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Period at which the script is polled for new messages.
const POLL_PERIOD_S: f64 = 0.01;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("track_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Path Tracker Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // The only argument is the script path
    if args.len() != 2 {
        return Err(eyre!("Expected path to message script as only argument"));
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut script_interpreter =
        ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} messages\n",
        script_interpreter.get_duration(),
        script_interpreter.get_num_msgs()
    );

    // ---- MODULE INIT ----

    let track_ctrl = SharedTrackCtrl::new(
        TrackCtrl::init("path_tracker.toml").wrap_err("Failed to initialise TrackCtrl")?,
    );
    info!("TrackCtrl init complete");
    track_ctrl.with(|tc| debug!("TrackCtrl params: {:?}", tc.params()));

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut num_cmds: u64 = 0;
    let mut num_rejected: u64 = 0;

    loop {
        let cycle_start_instant = Instant::now();

        match script_interpreter.get_pending_msgs() {
            PendingMsgs::None => (),
            PendingMsgs::Some(msgs) => {
                for msg in msgs.iter() {
                    match dispatch(&track_ctrl, msg) {
                        Ok(true) => num_cmds += 1,
                        Ok(false) => (),
                        Err(e) => {
                            num_rejected += 1;
                            warn!("{} message rejected: {}", msg.type_str(), e)
                        }
                    }
                }
            }
            PendingMsgs::EndOfScript => {
                info!("End of message script reached, stopping");
                break;
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        if let Some(d) = Duration::from_secs_f64(POLL_PERIOD_S).checked_sub(cycle_dur) {
            thread::sleep(d);
        }
    }

    // ---- SHUTDOWN ----

    info!(
        "End of execution, {} commands emitted, {} messages rejected",
        num_cmds, num_rejected
    );

    Ok(())
}

/// Pass a message on to the tracker.
///
/// Returns `Ok(true)` if a command was emitted.
fn dispatch(track_ctrl: &SharedTrackCtrl, msg: &Msg) -> Result<bool> {
    match msg {
        Msg::Pose(p) => {
            let state = RobotState::try_from(p).wrap_err("Invalid pose")?;
            track_ctrl.on_pose(state);
            Ok(false)
        }
        Msg::Gains(g) => {
            if let Err(e) = track_ctrl.apply_gains(ControllerGains::from(*g)) {
                error!("Gain reconfiguration refused: {}", e);
                return Err(e.into());
            }
            info!("New gains will be applied on the next cycle");
            Ok(false)
        }
        Msg::Path(p) => match track_ctrl.on_path(&PathPoints::from(p)) {
            Ok((cmd, _)) => {
                info!(
                    "Command: linear {:+.3} m/s, angular {:+.3} rad/s",
                    cmd.linear_ms, cmd.angular_rads
                );
                Ok(true)
            }
            Err(TrackCtrlError::UninitializedState) => {
                Err(eyre!("No pose received yet, cycle skipped"))
            }
            Err(e) => Err(e.into()),
        },
    }
}
