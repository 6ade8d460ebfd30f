//! Custody vault rules
//!
//! A vault is a data-less, system-owned PDA. Its lamports are the rent
//! reserve funded at creation plus the custodied stake. Only the custodied
//! part is ever compared against `staked_amount` or released.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::VAULT_SEED;
use crate::error::StakeError;

/// Lamports a zero-data vault must keep to stay rent exempt.
pub fn rent_reserve() -> Result<u64> {
    Ok(Rent::get()?.minimum_balance(0))
}

pub fn custodied_balance(lamports: u64, reserve: u64) -> u64 {
    lamports.saturating_sub(reserve)
}

/// Lamports still needed to bring the vault up to its reserve.
pub fn reserve_shortfall(lamports: u64, reserve: u64) -> u64 {
    reserve.saturating_sub(lamports)
}

/// The physical balance must always cover the logical one.
pub fn ensure_covers(staked: u64, custodied: u64) -> Result<()> {
    require!(custodied >= staked, StakeError::InsufficientVaultBalance);
    Ok(())
}

/// A paying wallet must keep its own rent reserve after parting with `amount`.
pub fn ensure_spendable(lamports: u64, reserve: u64, amount: u64) -> Result<()> {
    require!(
        lamports.saturating_sub(reserve) >= amount,
        StakeError::InsufficientFunds
    );
    Ok(())
}

/// Transfer `amount` lamports from a signing wallet into the vault.
pub fn deposit<'info>(
    system_program: &Program<'info, System>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    transfer(
        CpiContext::new(
            system_program.to_account_info(),
            Transfer { from, to: vault },
        ),
        amount,
    )
}

/// Transfer `amount` lamports out of `owner`'s vault, signing with its seeds.
pub fn release<'info>(
    system_program: &Program<'info, System>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    owner: &Pubkey,
    bump: u8,
    amount: u64,
) -> Result<()> {
    let seeds = &[VAULT_SEED, owner.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    transfer(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Transfer { from: vault, to },
            signer_seeds,
        ),
        amount,
    )
}
