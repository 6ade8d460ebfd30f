//! Stake Ledger - Anchor Program
//!
//! Custodies lamports for many independent owners. Each owner gets two
//! program derived addresses: a `StakeAccount` record holding the logical
//! balance and accrued points, and a system-owned vault holding the lamports
//! themselves. Points accrue lazily on every touching instruction.
//!
//! The [`ledger`] module runs the same accounting rules off-chain against an
//! in-memory store.

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod accrual;
pub mod constants;
pub mod create;
pub mod derive;
pub mod error;
pub mod events;
pub mod ledger;
pub mod points;
pub mod stake;
pub mod state;
pub mod unstake;
pub mod vault;

use create::*;
use points::*;
use stake::*;
use unstake::*;

declare_id!("GiSpyqsUFLfHZ3Vshoshg21AmuFzm814xQ2vFuF7GDuJ");

#[program]
pub mod stake_ledger {
    use super::*;

    /// Create the caller's stake record and fund its vault's rent reserve.
    pub fn create_account(ctx: Context<CreateStakeAccount>) -> Result<()> {
        ctx.accounts.create_account(&ctx.bumps)
    }

    /// Move `amount` lamports from the signer into their vault.
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        ctx.accounts.stake(amount)
    }

    /// Release `amount` lamports from the vault back to the signer.
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        ctx.accounts.unstake(&ctx.bumps, amount)
    }

    /// Bring accrual up to date and return the accrued micro-points.
    pub fn get_points(ctx: Context<RefreshPoints>) -> Result<u64> {
        ctx.accounts.get_points()
    }

    /// Bring accrual up to date, reset the total, and return what was claimed.
    pub fn claim_points(ctx: Context<RefreshPoints>) -> Result<u64> {
        ctx.accounts.claim_points()
    }
}
