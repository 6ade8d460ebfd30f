//! Points accrual
//!
//! Points grow linearly with both stake size and elapsed time. Accrual is
//! lazy: every instruction that reads or changes `staked_amount` or
//! `total_points` calls [`accrue`] first, so the balance that earned the
//! points is always the one that was staked during the elapsed interval.
//!
//! Products are taken in u128 and the result must fit back into u64.

use anchor_lang::prelude::*;

use crate::constants::{LAMPORTS_PER_SOL, POINTS_PER_SOL_PER_DAY, SECONDS_PER_DAY};
use crate::error::StakeError;
use crate::state::StakeAccount;

/// Accrual policy: micro-points earned per SOL staked per day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccrualRate {
    pub points_per_sol_per_day: u64,
}

impl AccrualRate {
    pub const DEFAULT: Self = Self {
        points_per_sol_per_day: POINTS_PER_SOL_PER_DAY,
    };

    pub fn new(points_per_sol_per_day: u64) -> Self {
        Self {
            points_per_sol_per_day,
        }
    }

    /// Points earned by `staked` lamports over `elapsed` seconds.
    pub fn points_earned(&self, staked: u64, elapsed: u64) -> Result<u64> {
        let points = (staked as u128)
            .checked_mul(elapsed as u128)
            .ok_or(StakeError::Overflow)?
            .checked_mul(self.points_per_sol_per_day as u128)
            .ok_or(StakeError::Overflow)?
            .checked_div(LAMPORTS_PER_SOL as u128)
            .ok_or(StakeError::Overflow)?
            .checked_div(SECONDS_PER_DAY as u128)
            .ok_or(StakeError::Overflow)?;

        u64::try_from(points).map_err(|_| error!(StakeError::Overflow))
    }
}

impl Default for AccrualRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bring `account` up to `now`, returning the points earned since the last
/// update. Nothing is written unless every step succeeds.
pub fn accrue(account: &mut StakeAccount, now: i64, rate: &AccrualRate) -> Result<u64> {
    let elapsed = now
        .checked_sub(account.last_update_time)
        .ok_or(StakeError::InvalidTimestamp)?;
    require!(elapsed >= 0, StakeError::InvalidTimestamp);

    let earned = if elapsed > 0 && account.staked_amount > 0 {
        rate.points_earned(account.staked_amount, elapsed as u64)?
    } else {
        0
    };

    let total_points = account
        .total_points
        .checked_add(earned)
        .ok_or(StakeError::Overflow)?;

    account.total_points = total_points;
    account.last_update_time = now;
    Ok(earned)
}
