use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{DrawConfig, DrawPhase, DrawSession, LockMode, PrizePool};

/// Accounts required to initialize the lucky draw.
/// Creates the config, prize pool and draw session PDAs in one shot.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Configuration: authority, child lock, cover image, phase durations.
    #[account(
        init,
        payer = payer,
        space = 8 + DrawConfig::INIT_SPACE,
        seeds = [DRAW_CONFIG_SEED],
        bump
    )]
    pub draw_config: Box<Account<'info, DrawConfig>>,

    /// The prize pool, seeded with the stock list.
    #[account(
        init,
        payer = payer,
        space = 8 + PrizePool::INIT_SPACE,
        seeds = [PRIZE_POOL_SEED],
        bump
    )]
    pub prize_pool: Box<Account<'info, PrizePool>>,

    /// The draw session, starting Idle at generation zero.
    #[account(
        init,
        payer = payer,
        space = 8 + DrawSession::INIT_SPACE,
        seeds = [DRAW_SESSION_SEED],
        bump
    )]
    pub draw_session: Box<Account<'info, DrawSession>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the config, pool and session. Zero durations fall back to
/// the defaults, letting the client pass only what it wants to override.
#[allow(clippy::too_many_arguments)]
pub fn process_initialize(
    ctx: Context<Initialize>,
    lock_mode: LockMode,
    spin_duration: u64,
    return_duration: u64,
    reveal_delay: u64,
    fade_delay: u64,
    scatter_duration: u64,
    converge_duration: u64,
) -> Result<()> {
    fn or_default(value: u64, default: u64) -> u64 {
        if value == 0 {
            default
        } else {
            value
        }
    }

    let config = &mut ctx.accounts.draw_config;
    config.bump = ctx.bumps.draw_config;
    config.authority = ctx.accounts.payer.key();
    config.randomness_account = Pubkey::default();
    config.child_locked = false;
    config.lock_mode = lock_mode;
    config.cover_image = DEFAULT_COVER_IMAGE.to_string();
    config.spin_duration = or_default(spin_duration, DEFAULT_SPIN_DURATION);
    config.return_duration = or_default(return_duration, DEFAULT_RETURN_DURATION);
    config.reveal_delay = or_default(reveal_delay, DEFAULT_REVEAL_DELAY);
    config.fade_delay = or_default(fade_delay, DEFAULT_FADE_DELAY);
    config.scatter_duration = or_default(scatter_duration, DEFAULT_SCATTER_DURATION);
    config.converge_duration = or_default(converge_duration, DEFAULT_CONVERGE_DURATION);

    let pool = &mut ctx.accounts.prize_pool;
    pool.bump = ctx.bumps.prize_pool;
    pool.entries = PrizePool::default_entries();

    let session = &mut ctx.accounts.draw_session;
    session.bump = ctx.bumps.draw_session;
    session.phase = DrawPhase::Idle;
    session.generation = 0;
    session.deadline_slot = 0;
    session.selected_id = None;

    msg!("Lucky draw initialized with {} prizes", pool.entries.len());
    Ok(())
}
