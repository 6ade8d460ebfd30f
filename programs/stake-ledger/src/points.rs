//! Points refresh and claim
//!
//! Both instructions accrue and persist. Claiming only resets the counter;
//! issuing whatever reward the points stand for is left to the caller.

use anchor_lang::prelude::*;

use crate::accrual::{accrue, AccrualRate};
use crate::constants::{POINTS_PRECISION, STAKE_SEED};
use crate::error::StakeError;
use crate::events::{PointsClaimed, PointsRefreshed};
use crate::state::StakeAccount;

#[derive(Accounts)]
pub struct RefreshPoints<'info> {
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKE_SEED, stake_data.owner.as_ref()],
        bump = stake_data.bump,
        constraint = stake_data.owner == signer.key() @ StakeError::Unauthorized
    )]
    pub stake_data: Account<'info, StakeAccount>,
}

impl<'info> RefreshPoints<'info> {
    pub fn get_points(&mut self) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        let earned = accrue(&mut self.stake_data, now, &AccrualRate::DEFAULT)?;
        let total_points = self.stake_data.total_points;

        emit!(PointsRefreshed {
            owner: self.stake_data.owner,
            earned,
            total_points,
        });
        msg!("Total points: {}", total_points / POINTS_PRECISION);
        Ok(total_points)
    }

    pub fn claim_points(&mut self) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        accrue(&mut self.stake_data, now, &AccrualRate::DEFAULT)?;
        let points = self.stake_data.claim();

        emit!(PointsClaimed {
            owner: self.stake_data.owner,
            points,
        });
        msg!("Claimed points: {}", points / POINTS_PRECISION);
        Ok(points)
    }
}
