use anchor_lang::prelude::*;

/// PDA seed of the configuration account.
#[constant]
pub const DRAW_CONFIG_SEED: &[u8] = b"draw_config";

/// PDA seed of the prize pool account.
#[constant]
pub const PRIZE_POOL_SEED: &[u8] = b"prize_pool";

/// PDA seed of the draw session account.
#[constant]
pub const DRAW_SESSION_SEED: &[u8] = b"draw_session";

/// Fixed unlock code used by the red-packet variant.
#[constant]
pub const FIXED_LOCK_CODE: u32 = 1234;

/// Cover image shown on unopened red packets until the settings replace it.
#[constant]
pub const DEFAULT_COVER_IMAGE: &str = "/images/red-packet-cover.png";

pub const MAX_PRIZES: usize = 32;
pub const MAX_LABEL_LEN: usize = 64;
pub const MAX_COLOR_LEN: usize = 16;
pub const MAX_COVER_LEN: usize = 200;

// Phase durations in slots. At ~400ms per slot these approximate the
// original timings: 3s spin, 500ms return, 500ms reveal delay, 3s until
// the label fades, 800ms scatter and 800ms converge for the shuffle.
pub const DEFAULT_SPIN_DURATION: u64 = 8;
pub const DEFAULT_RETURN_DURATION: u64 = 2;
pub const DEFAULT_REVEAL_DELAY: u64 = 2;
pub const DEFAULT_FADE_DELAY: u64 = 8;
pub const DEFAULT_SCATTER_DURATION: u64 = 2;
pub const DEFAULT_CONVERGE_DURATION: u64 = 2;

/// Stock prize list seeded at initialization, matching the defaults the
/// card view ships with. Colors are "R, G, B" strings consumed verbatim
/// by the presentation layer.
pub const DEFAULT_PRIZES: [(&str, &str); 7] = [
    ("Copy an essay", "255, 183, 197"),
    ("Independent practice", "173, 216, 230"),
    ("Math workbook", "255, 218, 185"),
    ("Mental math drills", "221, 160, 221"),
    ("English test paper", "176, 224, 230"),
    ("Chinese test paper", "255, 192, 203"),
    ("Five minute break", "255, 215, 0"),
];

// Confetti parameters forwarded to the presentation layer when a prize
// settles. Bursts start high (y 20%) from the center and from the two
// side origins, mirrored at x 20% and 80%.
pub const CONFETTI_PARTICLE_COUNT: u32 = 25;
pub const CONFETTI_SPREAD_DEGREES: u32 = 90;
pub const CONFETTI_TICKS: u32 = 400;
pub const CONFETTI_ORIGIN_LEFT_X_PCT: u8 = 20;
pub const CONFETTI_ORIGIN_RIGHT_X_PCT: u8 = 80;
pub const CONFETTI_ORIGIN_Y_PCT: u8 = 20;

/// Sound cue names, resolved to assets by the presentation layer.
pub const SOUND_WIN: &str = "win.mp3";
pub const SOUND_CLICK: &str = "click.mp3";
