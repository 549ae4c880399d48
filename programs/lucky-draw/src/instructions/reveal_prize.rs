use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::CelebrationTriggered;
use crate::state::{DrawConfig, DrawSession};

/// Accounts required to run the reveal crank (card moves to the front).
#[derive(Accounts)]
pub struct RevealPrize<'info> {
    pub payer: Signer<'info>,

    #[account(
        seeds = [DRAW_CONFIG_SEED],
        bump = draw_config.bump,
    )]
    pub draw_config: Account<'info, DrawConfig>,

    #[account(
        mut,
        seeds = [DRAW_SESSION_SEED],
        bump = draw_session.bump,
    )]
    pub draw_session: Account<'info, DrawSession>,
}

/// Accounts required to run the fade crank (displayed label fades out).
#[derive(Accounts)]
pub struct FadePrize<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [DRAW_SESSION_SEED],
        bump = draw_session.bump,
    )]
    pub draw_session: Account<'info, DrawSession>,
}

/// Moves the drawn card to the front and fires the celebration: confetti
/// parameters plus a win sound cue, all fire-and-forget for subscribers.
pub fn process_reveal_prize(ctx: Context<RevealPrize>, generation: u64) -> Result<()> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.draw_config;
    let session = &mut ctx.accounts.draw_session;

    let prize_id = session.reveal(generation, clock.slot, config.fade_delay)?;

    emit!(CelebrationTriggered {
        generation: session.generation,
        prize_id,
        particle_count: CONFETTI_PARTICLE_COUNT,
        spread_degrees: CONFETTI_SPREAD_DEGREES,
        ticks: CONFETTI_TICKS,
        origin_left_x_pct: CONFETTI_ORIGIN_LEFT_X_PCT,
        origin_right_x_pct: CONFETTI_ORIGIN_RIGHT_X_PCT,
        origin_y_pct: CONFETTI_ORIGIN_Y_PCT,
        sound: SOUND_WIN.to_string(),
    });
    msg!("Prize {} revealed, fade due at slot {}", prize_id, session.deadline_slot);
    Ok(())
}

/// Fades the displayed label. No pool mutation; the entry stays drawn.
pub fn process_fade_prize(ctx: Context<FadePrize>, generation: u64) -> Result<()> {
    let clock = Clock::get()?;
    let session = &mut ctx.accounts.draw_session;
    session.fade(generation, clock.slot)?;
    msg!("Prize label faded");
    Ok(())
}
