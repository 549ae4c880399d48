use anchor_lang::prelude::*;
use instructions::*;

mod constants;
mod error;
mod events;
mod instructions;
mod state;
mod utils;

use state::{LockMode, PrizeEntry};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod lucky_draw {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        ctx: Context<Initialize>,
        lock_mode: LockMode,
        spin_duration: u64,
        return_duration: u64,
        reveal_delay: u64,
        fade_delay: u64,
        scatter_duration: u64,
        converge_duration: u64,
    ) -> Result<()> {
        process_initialize(
            ctx,
            lock_mode,
            spin_duration,
            return_duration,
            reveal_delay,
            fade_delay,
            scatter_duration,
            converge_duration,
        )
    }

    pub fn trigger_draw(ctx: Context<TriggerDraw>) -> Result<()> {
        process_trigger_draw(ctx)
    }

    pub fn commit_randomness(ctx: Context<CommitRandomness>) -> Result<()> {
        process_commit_randomness(ctx)
    }

    pub fn settle_draw(ctx: Context<SettleDraw>, generation: u64) -> Result<()> {
        process_settle_draw(ctx, generation)
    }

    pub fn reveal_prize(ctx: Context<RevealPrize>, generation: u64) -> Result<()> {
        process_reveal_prize(ctx, generation)
    }

    pub fn fade_prize(ctx: Context<FadePrize>, generation: u64) -> Result<()> {
        process_fade_prize(ctx, generation)
    }

    pub fn reset_draw(ctx: Context<ResetDraw>) -> Result<()> {
        process_reset_draw(ctx)
    }

    pub fn start_shuffle(ctx: Context<StartShuffle>) -> Result<()> {
        process_start_shuffle(ctx)
    }

    pub fn converge_shuffle(ctx: Context<ConvergeShuffle>, generation: u64) -> Result<()> {
        process_converge_shuffle(ctx, generation)
    }

    pub fn finish_shuffle(ctx: Context<FinishShuffle>, generation: u64) -> Result<()> {
        process_finish_shuffle(ctx, generation)
    }

    pub fn save_pool(
        ctx: Context<SavePool>,
        entries: Vec<PrizeEntry>,
        unlock_code: Option<u32>,
    ) -> Result<()> {
        process_save_pool(ctx, entries, unlock_code)
    }

    pub fn set_cover_image(
        ctx: Context<SetCoverImage>,
        uri: String,
        unlock_code: Option<u32>,
    ) -> Result<()> {
        process_set_cover_image(ctx, uri, unlock_code)
    }

    pub fn set_child_lock(ctx: Context<SetChildLock>, unlock_code: u32, locked: bool) -> Result<()> {
        process_set_child_lock(ctx, unlock_code, locked)
    }
}
