use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("All prizes have been drawn")]
    EmptyPool,
    #[msg("A spin is already in progress")]
    SpinInProgress,
    #[msg("The previous card is still returning")]
    ReturnInProgress,
    #[msg("A shuffle is in progress")]
    ShuffleInProgress,
    #[msg("Operation is not valid in the current phase")]
    InvalidPhase,
    #[msg("The scheduled transition is not due yet")]
    DeadlineNotReached,
    #[msg("Stale session generation")]
    StaleGeneration,
    #[msg("Not authorized")]
    Unauthorized,
    #[msg("Settings are locked")]
    SettingsLocked,
    #[msg("Wrong unlock code")]
    LockCodeMismatch,
    #[msg("Incorrect randomness account")]
    IncorrectRandomnessAccount,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
    #[msg("Too many prizes")]
    PoolTooLarge,
    #[msg("Duplicate prize id")]
    DuplicatePrizeId,
    #[msg("Invalid prize label")]
    InvalidPrizeLabel,
    #[msg("Invalid prize color")]
    InvalidPrizeColor,
    #[msg("Cover image URI is too long")]
    InvalidCoverImage,
}
