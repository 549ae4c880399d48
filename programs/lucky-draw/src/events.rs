// Events are the fire-and-forget side of the sequencer: the presentation
// layer subscribes and runs confetti/sound/animation off-chain. Nothing
// here feeds back into the state machine.

use anchor_lang::prelude::*;

/// A prize has been selected and marked drawn.
#[event]
pub struct PrizeDrawn {
    pub generation: u64,
    pub prize_id: u32,
    pub label: String,
    pub undrawn_remaining: u32,
    pub slot: u64,
}

/// A spin settled against an exhausted pool; the session backed out to Idle.
#[event]
pub struct DrawFailed {
    pub generation: u64,
    pub slot: u64,
}

/// Celebration payload emitted when the drawn card moves to the front.
/// Origins are percentages of the viewport; the sound cue is best-effort
/// and any playback failure stays on the subscriber's side.
#[event]
pub struct CelebrationTriggered {
    pub generation: u64,
    pub prize_id: u32,
    pub particle_count: u32,
    pub spread_degrees: u32,
    pub ticks: u32,
    pub origin_left_x_pct: u8,
    pub origin_right_x_pct: u8,
    pub origin_y_pct: u8,
    pub sound: String,
}

/// The prize pool was replaced through the settings view.
#[event]
pub struct PoolSaved {
    pub entry_count: u32,
    pub slot: u64,
}

/// A shuffle began; packets scatter, then converge, then reorder.
#[event]
pub struct ShuffleStarted {
    pub generation: u64,
    pub sound: String,
    pub slot: u64,
}

/// The shuffle finished and the pool order was permuted.
#[event]
pub struct PoolShuffled {
    pub generation: u64,
    pub slot: u64,
}

/// The child lock was toggled.
#[event]
pub struct ChildLockChanged {
    pub locked: bool,
}
