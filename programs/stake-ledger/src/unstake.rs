use anchor_lang::prelude::*;

use crate::accrual::{accrue, AccrualRate};
use crate::constants::{STAKE_SEED, VAULT_SEED};
use crate::error::StakeError;
use crate::events::Unstaked;
use crate::state::StakeAccount;
use crate::vault;

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

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

impl<'info> Unstake<'info> {
    pub fn unstake(&mut self, bumps: &UnstakeBumps, amount: u64) -> Result<()> {
        require!(amount > 0, StakeError::InvalidAmount);

        let now = Clock::get()?.unix_timestamp;
        accrue(&mut self.stake_data, now, &AccrualRate::DEFAULT)?;

        let reserve = vault::rent_reserve()?;
        let custodied = vault::custodied_balance(self.vault.lamports(), reserve);
        self.stake_data.record_unstake(amount, custodied)?;

        let owner = self.stake_data.owner;
        vault::release(
            &self.system_program,
            self.vault.to_account_info(),
            self.signer.to_account_info(),
            &owner,
            bumps.vault,
            amount,
        )?;

        let custodied = vault::custodied_balance(self.vault.lamports(), reserve);
        vault::ensure_covers(self.stake_data.staked_amount, custodied)?;

        emit!(Unstaked {
            owner,
            amount,
            staked_amount: self.stake_data.staked_amount,
            total_points: self.stake_data.total_points,
        });
        msg!("Unstaked {} lamports", amount);
        Ok(())
    }
}
