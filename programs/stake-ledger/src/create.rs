//! Account creation
//!
//! Creates the caller's stake record and tops their vault up to its rent
//! reserve. A vault that was pre-funded by someone else only receives the
//! shortfall, so sending lamports to a predictable vault address cannot
//! block creation.

use anchor_lang::prelude::*;

use crate::constants::{STAKE_SEED, VAULT_SEED};
use crate::error::StakeError;
use crate::events::StakeAccountCreated;
use crate::state::StakeAccount;
use crate::vault;

#[derive(Accounts)]
pub struct CreateStakeAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// `init_if_needed` so a second call reaches the `AlreadyExists` check
    /// instead of failing inside the system program.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + StakeAccount::INIT_SPACE,
        seeds = [STAKE_SEED, payer.key().as_ref()],
        bump
    )]
    pub stake_data: Account<'info, StakeAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, payer.key().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateStakeAccount<'info> {
    pub fn create_account(&mut self, bumps: &CreateStakeAccountBumps) -> Result<()> {
        require!(
            !self.stake_data.is_initialized(),
            StakeError::AlreadyExists
        );

        let now = Clock::get()?.unix_timestamp;
        let owner = self.payer.key();
        self.stake_data
            .set_inner(StakeAccount::open(owner, bumps.stake_data, now));

        let shortfall = vault::reserve_shortfall(self.vault.lamports(), vault::rent_reserve()?);
        if shortfall > 0 {
            vault::deposit(
                &self.system_program,
                self.payer.to_account_info(),
                self.vault.to_account_info(),
                shortfall,
            )?;
        }

        emit!(StakeAccountCreated {
            owner,
            stake_account: self.stake_data.key(),
            vault: self.vault.key(),
            timestamp: now,
        });
        msg!("Created stake account + vault for {}", owner);
        Ok(())
    }
}
