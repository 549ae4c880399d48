use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::state::{DrawConfig, DrawPhase, DrawSession};

/// Accounts required to commit a randomness account for the in-flight spin
/// or shuffle.
///
/// Ensures:
/// 1. Only the authority can commit the randomness.
/// 2. The randomness account is fresh and has not been revealed previously.
#[derive(Accounts)]
pub struct CommitRandomness<'info> {
    /// The account paying transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [DRAW_CONFIG_SEED],
        bump = draw_config.bump,
    )]
    pub draw_config: Account<'info, DrawConfig>,

    #[account(
        seeds = [DRAW_SESSION_SEED],
        bump = draw_session.bump,
    )]
    pub draw_session: Account<'info, DrawSession>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_commit_randomness(ctx: Context<CommitRandomness>) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.draw_config;
    let session = &ctx.accounts.draw_session;

    if ctx.accounts.payer.key() != config.authority {
        return Err(ErrorCode::Unauthorized.into());
    }

    // Randomness only matters while a spin or shuffle is waiting to settle.
    if session.phase != DrawPhase::Spinning && !session.phase.is_shuffling() {
        return Err(ErrorCode::InvalidPhase.into());
    }

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::IncorrectRandomnessAccount)?;
    if randomness_data.seed_slot != clock.slot - 1 {
        return Err(ErrorCode::RandomnessAlreadyRevealed.into());
    }

    config.randomness_account = ctx.accounts.randomness_account_data.key();
    Ok(())
}
