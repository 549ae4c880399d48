use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::ErrorCode;
use crate::events::{ChildLockChanged, PoolSaved};
use crate::state::{DrawConfig, PrizeEntry, PrizePool};

/// Accounts required to replace the prize pool from the settings view.
#[derive(Accounts)]
pub struct SavePool<'info> {
    pub payer: Signer<'info>,

    #[account(
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
}

/// Accounts required to change the red-packet cover image.
#[derive(Accounts)]
pub struct SetCoverImage<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [DRAW_CONFIG_SEED],
        bump = draw_config.bump,
    )]
    pub draw_config: Account<'info, DrawConfig>,
}

/// Accounts required to toggle the child lock.
#[derive(Accounts)]
pub struct SetChildLock<'info> {
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [DRAW_CONFIG_SEED],
        bump = draw_config.bump,
    )]
    pub draw_config: Account<'info, DrawConfig>,
}

/// Replaces the pool wholesale. The replacement is validated against the
/// entry schema before it is accepted; drawn flags come in as provided so
/// settings edits mid-game keep already-drawn prizes consumed.
pub fn process_save_pool(
    ctx: Context<SavePool>,
    entries: Vec<PrizeEntry>,
    unlock_code: Option<u32>,
) -> Result<()> {
    let clock = Clock::get()?;
    let config = &ctx.accounts.draw_config;
    if ctx.accounts.payer.key() != config.authority {
        return Err(ErrorCode::Unauthorized.into());
    }
    config.ensure_settings_access(unlock_code, clock.unix_timestamp)?;

    PrizePool::validate_entries(&entries)?;
    let pool = &mut ctx.accounts.prize_pool;
    pool.entries = entries;

    msg!("Prize pool saved: {} entries", pool.entries.len());
    emit!(PoolSaved {
        entry_count: pool.entries.len() as u32,
        slot: clock.slot,
    });
    Ok(())
}

pub fn process_set_cover_image(
    ctx: Context<SetCoverImage>,
    uri: String,
    unlock_code: Option<u32>,
) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.draw_config;
    if ctx.accounts.payer.key() != config.authority {
        return Err(ErrorCode::Unauthorized.into());
    }
    config.ensure_settings_access(unlock_code, clock.unix_timestamp)?;

    if uri.len() > MAX_COVER_LEN {
        return Err(ErrorCode::InvalidCoverImage.into());
    }
    config.cover_image = uri;
    msg!("Cover image updated");
    Ok(())
}

/// Toggles the child lock. Both directions require the unlock code, the
/// same way the app prompts for the password when locking and unlocking.
pub fn process_set_child_lock(
    ctx: Context<SetChildLock>,
    unlock_code: u32,
    locked: bool,
) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.draw_config;
    if ctx.accounts.payer.key() != config.authority {
        return Err(ErrorCode::Unauthorized.into());
    }
    config.verify_code(unlock_code, clock.unix_timestamp)?;

    config.child_locked = locked;
    msg!("Child lock set to {}", locked);
    emit!(ChildLockChanged { locked });
    Ok(())
}
