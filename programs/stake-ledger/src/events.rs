use anchor_lang::prelude::*;

#[event]
pub struct StakeAccountCreated {
    pub owner: Pubkey,
    pub stake_account: Pubkey,
    pub vault: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub total_points: u64,
}

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub total_points: u64,
}

#[event]
pub struct PointsRefreshed {
    pub owner: Pubkey,
    pub earned: u64,
    pub total_points: u64,
}

#[event]
pub struct PointsClaimed {
    pub owner: Pubkey,
    pub points: u64,
}
