//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum StakeError {
    #[msg("Amount must be greater than 0")]
    InvalidAmount,
    #[msg("Unauthorized: caller is not the stake account owner")]
    Unauthorized,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Invalid timestamp: clock moved backwards")]
    InvalidTimestamp,
    #[msg("Arithmetic underflow")]
    Underflow,
    #[msg("Insufficient staked amount")]
    InsufficientStake,
    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,
    #[msg("Stake account already exists")]
    AlreadyExists,
    #[msg("Stake account not found")]
    NotFound,
    #[msg("Caller balance cannot cover the transfer")]
    InsufficientFunds,
}
