//! Player Intent Capture and Latching
//!
//! Normalizes raw per-frame input into the snapshot the state machine
//! consumes once per fixed tick. Uses a lookup table (AXIS_LUT) for exact
//! i8 to Fixed conversion.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;

// =============================================================================
// AXIS LOOKUP TABLE (Critical for Determinism)
// =============================================================================

/// Lookup table for converting an i8 move axis to Fixed.
///
/// Converting i8 [-127..+127] to Fixed [-1.0..+1.0] requires
/// `(value * 65536) / 127`, which is not an integer scale factor, so all
/// 256 possible values are precomputed with floor division.
///
/// Index 128 (-128 as i8) represents "no input" and maps to 0.
pub static AXIS_LUT: [Fixed; 256] = {
    let mut lut = [0i32; 256];
    let mut i = 0i32;
    while i < 256 {
        // Treat as signed: 0..127 = positive, 128..255 = negative (-128..-1)
        let signed = if i < 128 { i } else { i - 256 };

        // -128 is reserved for "no input" -> map to 0
        if signed == -128 {
            lut[i as usize] = 0;
        } else {
            lut[i as usize] = (signed * 65536) / 127;
        }
        i += 1;
    }
    lut
};

/// Convert an i8 move axis to Fixed using the lookup table.
#[inline]
pub fn axis_to_fixed(input: i8) -> Fixed {
    AXIS_LUT[(input as u8) as usize]
}

// =============================================================================
// INTENT TYPES
// =============================================================================

/// Raw intent for a single sampled frame.
///
/// Produced once per rendered frame by the input-binding layer; the
/// controller may receive zero or more of these between fixed ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct IntentFrame {
    /// Horizontal move axis: -127 (left) to +127 (right).
    /// -128 = axis released / no input
    pub move_x: i8,

    /// Action flags (packed bits):
    /// - Bit 0: Jump started this frame (edge)
    /// - Bit 1: Dash started this frame (edge)
    /// - Bit 2: Glide held this frame (level)
    /// - Bit 3-7: Reserved
    pub flags: u8,
}

impl IntentFrame {
    /// Special value indicating a released axis
    pub const NO_INPUT: i8 = -128;

    /// Jump edge flag bit
    pub const FLAG_JUMP: u8 = 0x01;

    /// Dash edge flag bit
    pub const FLAG_DASH: u8 = 0x02;

    /// Glide hold flag bit
    pub const FLAG_GLIDE: u8 = 0x04;

    /// Create a new empty intent frame.
    pub const fn new() -> Self {
        Self {
            move_x: Self::NO_INPUT,
            flags: 0,
        }
    }

    /// Create an intent with a move axis value.
    pub const fn with_axis(move_x: i8) -> Self {
        Self { move_x, flags: 0 }
    }

    /// Get the move axis as Fixed in [-1, +1].
    #[inline]
    pub fn move_axis(&self) -> Fixed {
        axis_to_fixed(self.move_x)
    }

    /// Check if jump started this frame.
    #[inline]
    pub fn jump_edge(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Check if dash started this frame.
    #[inline]
    pub fn dash_edge(&self) -> bool {
        self.flags & Self::FLAG_DASH != 0
    }

    /// Check if glide is held this frame.
    #[inline]
    pub fn glide_held(&self) -> bool {
        self.flags & Self::FLAG_GLIDE != 0
    }

    /// Set the jump edge flag.
    #[inline]
    pub fn set_jump(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_JUMP;
        } else {
            self.flags &= !Self::FLAG_JUMP;
        }
    }

    /// Set the dash edge flag.
    #[inline]
    pub fn set_dash(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_DASH;
        } else {
            self.flags &= !Self::FLAG_DASH;
        }
    }

    /// Set the glide hold flag.
    #[inline]
    pub fn set_glide(&mut self, held: bool) {
        if held {
            self.flags |= Self::FLAG_GLIDE;
        } else {
            self.flags &= !Self::FLAG_GLIDE;
        }
    }
}

/// Intent snapshot consumed by one tick of the state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickIntent {
    /// Move axis in Fixed [-1, +1]
    pub move_axis: Fixed,
    /// A jump edge occurred since the last tick
    pub jump: bool,
    /// A dash edge occurred since the last tick
    pub dash: bool,
    /// Glide was held on the most recent sampled frame
    pub glide: bool,
}

// =============================================================================
// INTENT LATCH
// =============================================================================

/// Latches sampled frames between fixed ticks.
///
/// Frames arrive at render rate, ticks at simulation rate. Edge actions
/// (jump, dash) are sticky until drained so a press between ticks is never
/// lost; draining clears them, so each edge is delivered at most once.
/// Repeated edges within one tick window collapse to a single action.
/// Level state (move axis, glide hold) keeps the latest sampled value.
#[derive(Clone, Debug, Default)]
pub struct IntentLatch {
    move_x: i8,
    jump_pending: bool,
    dash_pending: bool,
    glide_held: bool,
}

impl IntentLatch {
    /// Create an empty latch.
    pub fn new() -> Self {
        Self {
            move_x: IntentFrame::NO_INPUT,
            jump_pending: false,
            dash_pending: false,
            glide_held: false,
        }
    }

    /// Record one sampled frame.
    pub fn record(&mut self, frame: IntentFrame) {
        self.move_x = frame.move_x;
        self.jump_pending |= frame.jump_edge();
        self.dash_pending |= frame.dash_edge();
        self.glide_held = frame.glide_held();
    }

    /// Drain the latch into a tick snapshot, consuming pending edges.
    pub fn take(&mut self) -> TickIntent {
        let intent = TickIntent {
            move_axis: axis_to_fixed(self.move_x),
            jump: self.jump_pending,
            dash: self.dash_pending,
            glide: self.glide_held,
        };
        self.jump_pending = false;
        self.dash_pending = false;
        intent
    }
}

// =============================================================================
// TESTS
// =============================================================================
