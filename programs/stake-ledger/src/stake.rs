use anchor_lang::prelude::*;

use crate::accrual::{accrue, AccrualRate};
use crate::constants::{STAKE_SEED, VAULT_SEED};
use crate::error::StakeError;
use crate::events::Staked;
use crate::state::StakeAccount;
use crate::vault;

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Seeds come from the stored owner, so a foreign record passes the seeds
    /// check and is rejected by the ownership constraint.
    #[account(
        mut,
        seeds = [STAKE_SEED, stake_data.owner.as_ref()],
        bump = stake_data.bump,
        constraint = stake_data.owner == signer.key() @ StakeError::Unauthorized
    )]
    pub stake_data: Account<'info, StakeAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, stake_data.owner.as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> Stake<'info> {
    pub fn stake(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, StakeError::InvalidAmount);
        let wallet_reserve = Rent::get()?.minimum_balance(self.signer.data_len());
        vault::ensure_spendable(self.signer.lamports(), wallet_reserve, amount)?;

        let now = Clock::get()?.unix_timestamp;
        accrue(&mut self.stake_data, now, &AccrualRate::DEFAULT)?;
        self.stake_data.record_stake(amount)?;

        vault::deposit(
            &self.system_program,
            self.signer.to_account_info(),
            self.vault.to_account_info(),
            amount,
        )?;

        let custodied = vault::custodied_balance(self.vault.lamports(), vault::rent_reserve()?);
        vault::ensure_covers(self.stake_data.staked_amount, custodied)?;

        emit!(Staked {
            owner: self.stake_data.owner,
            amount,
            staked_amount: self.stake_data.staked_amount,
            total_points: self.stake_data.total_points,
        });
        msg!("Staked {} lamports", amount);
        Ok(())
    }
}
