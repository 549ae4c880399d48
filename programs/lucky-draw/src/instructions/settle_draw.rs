use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{DrawFailed, PrizeDrawn};
use crate::state::{DrawConfig, DrawSession, PrizePool};

/// Accounts required to settle a spin once its deadline has passed.
///
/// This ensures that:
/// 1. The randomness account provided matches the committed one, which is
///    consumed here so a later spin cannot reuse the same reveal.
/// 2. The spin duration has elapsed.
/// 3. The crank belongs to the current session generation.
#[derive(Accounts)]
pub struct SettleDraw<'info> {
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

/// The spin timeout: picks one undrawn entry uniformly, marks it drawn and
/// arms the reveal. An exhausted pool is a user notice, not a failure; the
/// session just returns to Idle.
pub fn process_settle_draw(ctx: Context<SettleDraw>, generation: u64) -> Result<()> {
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

    match session.settle(
        pool,
        generation,
        clock.slot,
        &revealed_random_value,
        config.reveal_delay,
    )? {
        Some(entry) => {
            msg!("Drawn: {} (id {})", entry.label, entry.id);
            emit!(PrizeDrawn {
                generation: session.generation,
                prize_id: entry.id,
                label: entry.label,
                undrawn_remaining: pool.undrawn_count() as u32,
                slot: clock.slot,
            });
        }
        None => {
            msg!("All prizes already drawn, nothing to select");
            emit!(DrawFailed {
                generation,
                slot: clock.slot,
            });
        }
    }
    Ok(())
}
