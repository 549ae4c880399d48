use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{DrawConfig, DrawSession, PrizePool, TriggerAction};

/// Accounts required to press the draw button.
///
/// The trigger is permissionless: anyone tapping the deck can spin. Phase
/// guards in the session keep concurrent taps from overlapping.
#[derive(Accounts)]
pub struct TriggerDraw<'info> {
    pub payer: Signer<'info>,

    #[account(
        seeds = [DRAW_CONFIG_SEED],
        bump = draw_config.bump,
    )]
    pub draw_config: Account<'info, DrawConfig>,

    #[account(
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

/// Starts a spin, or the return transition when a previous result is still
/// on display. A trigger mid-spin or mid-shuffle fails and changes nothing.
pub fn process_trigger_draw(ctx: Context<TriggerDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.draw_config;
    let session = &mut ctx.accounts.draw_session;

    let action = session.trigger(
        &ctx.accounts.prize_pool,
        clock.slot,
        config.spin_duration,
        config.return_duration,
    )?;

    match action {
        TriggerAction::SpinStarted => {
            msg!(
                "Spin started: generation {}, settles at slot {}",
                session.generation,
                session.deadline_slot
            );
        }
        TriggerAction::ReturnStarted => {
            msg!(
                "Previous card returning, due at slot {}",
                session.deadline_slot
            );
        }
    }
    Ok(())
}
