//! Seed labels and accrual policy constants

/// Seed label of the per-owner `StakeAccount` record.
pub const STAKE_SEED: &[u8] = b"stake_data";

/// Seed label of the per-owner custody vault.
pub const VAULT_SEED: &[u8] = b"vault";

/// Micro-points accrued per SOL staked per day.
pub const POINTS_PER_SOL_PER_DAY: u64 = 1_000_000;

/// Micro-points per display point.
pub const POINTS_PRECISION: u64 = 1_000_000;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SECONDS_PER_DAY: u64 = 86_400;
