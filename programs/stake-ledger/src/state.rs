//! State definitions for staking accounts

use anchor_lang::prelude::*;

use crate::error::StakeError;

/// Per-owner staking record, addressed by `[STAKE_SEED, owner]`.
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct StakeAccount {
    /// Owner of the stake, immutable after creation
    pub owner: Pubkey,
    /// Lamports logically staked; never more than the vault custodies
    pub staked_amount: u64,
    /// Accrued micro-points
    pub total_points: u64,
    /// Unix timestamp of the last accrual
    pub last_update_time: i64,
    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl StakeAccount {
    pub fn open(owner: Pubkey, bump: u8, now: i64) -> Self {
        Self {
            owner,
            staked_amount: 0,
            total_points: 0,
            last_update_time: now,
            bump,
        }
    }

    /// A zeroed record is one the runtime allocated but nobody initialized.
    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, StakeError::Unauthorized);
        Ok(())
    }

    /// Add `amount` to the logical balance.
    pub fn record_stake(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, StakeError::InvalidAmount);

        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;
        Ok(())
    }

    /// Remove `amount` from the logical balance. `custodied` is what the vault
    /// physically holds and is checked on its own, not inferred from the
    /// logical balance.
    pub fn record_unstake(&mut self, amount: u64, custodied: u64) -> Result<()> {
        require!(amount > 0, StakeError::InvalidAmount);
        require!(self.staked_amount >= amount, StakeError::InsufficientStake);
        require!(custodied >= amount, StakeError::InsufficientVaultBalance);

        self.staked_amount = self
            .staked_amount
            .checked_sub(amount)
            .ok_or(StakeError::Underflow)?;
        Ok(())
    }

    /// Consume the accrued points, returning what was claimed.
    pub fn claim(&mut self) -> u64 {
        std::mem::take(&mut self.total_points)
    }
}
