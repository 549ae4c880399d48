use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{PoolShuffled, ShuffleStarted};
use crate::state::{DrawConfig, DrawSession, PrizePool};

/// Accounts required to kick off the three-phase red-packet shuffle.
#[derive(Accounts)]
pub struct StartShuffle<'info> {
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

/// Accounts required to advance a scatter into the converge phase.
#[derive(Accounts)]
pub struct ConvergeShuffle<'info> {
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

/// Accounts required to apply the final permutation to the pool.
#[derive(Accounts)]
pub struct FinishShuffle<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [DRAW_CONFIG_SEED],
        bump = draw_config.bump,
    )]
    pub draw_config: Account<'info, DrawConfig>,

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

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_start_shuffle(ctx: Context<StartShuffle>) -> Result<()> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.draw_config;
    let session = &mut ctx.accounts.draw_session;

    session.start_shuffle(clock.slot, config.scatter_duration)?;

    msg!(
        "Shuffle started, scatter until slot {}",
        session.deadline_slot
    );
    emit!(ShuffleStarted {
        generation: session.generation,
        sound: SOUND_CLICK.to_string(),
        slot: clock.slot,
    });
    Ok(())
}

/// The scatter timeout: packets turn around and head back to center.
pub fn process_converge_shuffle(ctx: Context<ConvergeShuffle>, generation: u64) -> Result<()> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.draw_config;
    let session = &mut ctx.accounts.draw_session;

    session.converge_shuffle(generation, clock.slot, config.converge_duration)?;

    msg!("Shuffle converging until slot {}", session.deadline_slot);
    Ok(())
}

/// The converge timeout: the pool order is permuted with oracle randomness
/// and the session settles back to Idle.
pub fn process_finish_shuffle(ctx: Context<FinishShuffle>, generation: u64) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.draw_config;
    let pool = &mut ctx.accounts.prize_pool;
    let session = &mut ctx.accounts.draw_session;

    config.consume_committed_randomness(ctx.accounts.randomness_account_data.key())?;

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::IncorrectRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| ErrorCode::RandomnessNotResolved)?;

    session.finish_shuffle(pool, generation, clock.slot, &revealed_random_value)?;

    msg!("Pool shuffled, {} entries reordered", pool.entries.len());
    emit!(PoolShuffled {
        generation,
        slot: clock.slot,
    });
    Ok(())
}
