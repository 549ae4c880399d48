use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{DrawSession, PrizePool};

/// Accounts required to reset the game.
#[derive(Accounts)]
pub struct ResetDraw<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [PRIZE_POOL_SEED],
        bump = prize_pool.bump,
    )]
    pub prize_pool: Account<'info, PrizePool>,

    #[account(
        mut,
        seeds = [DRAW_SESSION_SEED],
        bump = draw_session.bump,
    )]
    pub draw_session: Account<'info, DrawSession>,
}

/// Clears every drawn flag and the current selection. Pool identity and
/// order are untouched. Blocked while a spin, return or shuffle runs.
pub fn process_reset_draw(ctx: Context<ResetDraw>) -> Result<()> {
    let pool = &mut ctx.accounts.prize_pool;
    let session = &mut ctx.accounts.draw_session;
    session.reset(pool)?;
    msg!(
        "Draw reset: {} prizes back in the pool, generation {}",
        pool.entries.len(),
        session.generation
    );
    Ok(())
}
