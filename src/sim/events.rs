//! Controller Events
//!
//! Per-tick notifications derived from state-machine transitions, for
//! diagnostic rendering, animation triggers, and replay logs.

use serde::{Deserialize, Serialize};

use crate::sim::machine::Mode;

/// Event payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerEventData {
    /// Movement mode changed this tick
    ModeChanged {
        /// Mode before the tick
        from: Mode,
        /// Mode after the tick
        to: Mode,
    },

    /// Airborne-to-grounded edge
    Landed,

    /// A jump impulse was applied
    Jumped {
        /// Budget left after this jump
        jumps_remaining: u32,
    },

    /// A dash began
    DashStarted {
        /// +1 or -1
        facing_sign: i32,
    },

    /// A dash's timer expired
    DashEnded,
}

/// A controller event with the tick it occurred on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerEvent {
    /// Tick when the event occurred
    pub tick: u64,
    /// Event payload
    pub data: ControllerEventData,
}

impl ControllerEvent {
    /// Create a mode change event.
    pub fn mode_changed(tick: u64, from: Mode, to: Mode) -> Self {
        Self {
            tick,
            data: ControllerEventData::ModeChanged { from, to },
        }
    }

    /// Create a landed event.
    pub fn landed(tick: u64) -> Self {
        Self {
            tick,
            data: ControllerEventData::Landed,
        }
    }

    /// Create a jumped event.
    pub fn jumped(tick: u64, jumps_remaining: u32) -> Self {
        Self {
            tick,
            data: ControllerEventData::Jumped { jumps_remaining },
        }
    }

    /// Create a dash started event.
    pub fn dash_started(tick: u64, facing_sign: i32) -> Self {
        Self {
            tick,
            data: ControllerEventData::DashStarted { facing_sign },
        }
    }

    /// Create a dash ended event.
    pub fn dash_ended(tick: u64) -> Self {
        Self {
            tick,
            data: ControllerEventData::DashEnded,
        }
    }
}
