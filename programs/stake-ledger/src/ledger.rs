//! Host-independent ledger
//!
//! [`StakeLedger`] replays the program's instructions against any store that
//! can hold stake records and lamport balances. It uses the same record
//! methods, accrual and vault checks as the on-chain handlers, in the same
//! order, and fails with the same errors.
//!
//! Every operation builds its complete post-state on copies and writes the
//! record and balances only after all checks pass, which is the guarantee a
//! transaction gives on-chain.
//!
//! Vaults and wallets keep a rent reserve like their on-chain counterparts.
//! It defaults to zero; [`StakeLedger::with_rent_reserve`] sets it.

use std::collections::BTreeMap;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::accrual::{accrue, AccrualRate};
use crate::constants::STAKE_SEED;
use crate::derive::{rederive, stake_account_address, vault_address};
use crate::error::StakeError;
use crate::state::StakeAccount;
use crate::vault;

/// Keyed storage of stake records.
pub trait StakeStore {
    /// Fails with `NotFound` when nothing lives at `address`.
    fn get(&self, address: &Pubkey) -> Result<StakeAccount>;

    /// Fails with `AlreadyExists` and leaves the stored record alone when
    /// `address` is taken.
    fn create(&mut self, address: Pubkey, account: StakeAccount) -> Result<StakeAccount>;

    fn save(&mut self, address: Pubkey, account: StakeAccount);
}

/// Lamport balances of wallets and vaults.
pub trait LamportBank {
    fn lamports(&self, address: &Pubkey) -> u64;

    fn set_lamports(&mut self, address: Pubkey, lamports: u64);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<Pubkey, StakeAccount>,
    balances: BTreeMap<Pubkey, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl StakeStore for MemoryStore {
    fn get(&self, address: &Pubkey) -> Result<StakeAccount> {
        self.records
            .get(address)
            .cloned()
            .ok_or_else(|| error!(StakeError::NotFound))
    }

    fn create(&mut self, address: Pubkey, account: StakeAccount) -> Result<StakeAccount> {
        require!(
            !self.records.contains_key(&address),
            StakeError::AlreadyExists
        );
        self.records.insert(address, account.clone());
        Ok(account)
    }

    fn save(&mut self, address: Pubkey, account: StakeAccount) {
        self.records.insert(address, account);
    }
}

impl LamportBank for MemoryStore {
    fn lamports(&self, address: &Pubkey) -> u64 {
        self.balances.get(address).copied().unwrap_or_default()
    }

    fn set_lamports(&mut self, address: Pubkey, lamports: u64) {
        self.balances.insert(address, lamports);
    }
}

/// The two derived addresses belonging to one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerAddresses {
    pub stake_account: Pubkey,
    pub stake_bump: u8,
    pub vault: Pubkey,
    pub vault_bump: u8,
}

pub struct StakeLedger<S> {
    program_id: Pubkey,
    rate: AccrualRate,
    rent_reserve: u64,
    store: S,
}

impl<S: StakeStore + LamportBank> StakeLedger<S> {
    pub fn new(program_id: Pubkey, rate: AccrualRate, store: S) -> Self {
        Self {
            program_id,
            rate,
            rent_reserve: 0,
            store,
        }
    }

    /// Lamports every vault and paying wallet must keep, as
    /// `Rent::minimum_balance(0)` does on-chain.
    pub fn with_rent_reserve(mut self, reserve: u64) -> Self {
        self.rent_reserve = reserve;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn addresses(&self, owner: &Pubkey) -> OwnerAddresses {
        let (stake_account, stake_bump) = stake_account_address(owner, &self.program_id);
        let (vault, vault_bump) = vault_address(owner, &self.program_id);
        OwnerAddresses {
            stake_account,
            stake_bump,
            vault,
            vault_bump,
        }
    }

    pub fn account(&self, owner: &Pubkey) -> Result<StakeAccount> {
        self.store.get(&self.addresses(owner).stake_account)
    }

    /// Custodied balance of `owner`'s vault, excluding its rent reserve.
    pub fn vault_balance(&self, owner: &Pubkey) -> u64 {
        let lamports = self.store.lamports(&self.addresses(owner).vault);
        vault::custodied_balance(lamports, self.rent_reserve)
    }

    /// Open `caller`'s record and top the vault up to its rent reserve. A
    /// vault that already holds lamports only receives the shortfall.
    pub fn create_account(&mut self, caller: &Pubkey, now: i64) -> Result<StakeAccount> {
        let addresses = self.addresses(caller);
        require!(
            self.store.get(&addresses.stake_account).is_err(),
            StakeError::AlreadyExists
        );

        let vault_lamports = self.store.lamports(&addresses.vault);
        let shortfall = vault::reserve_shortfall(vault_lamports, self.rent_reserve);
        let wallet = self
            .store
            .lamports(caller)
            .checked_sub(shortfall)
            .ok_or(StakeError::InsufficientFunds)?;
        let vault_lamports = vault_lamports
            .checked_add(shortfall)
            .ok_or(StakeError::Overflow)?;

        let account = StakeAccount::open(*caller, addresses.stake_bump, now);
        let account = self.store.create(addresses.stake_account, account)?;
        self.store.set_lamports(*caller, wallet);
        self.store.set_lamports(addresses.vault, vault_lamports);
        Ok(account)
    }

    pub fn stake(
        &mut self,
        caller: &Pubkey,
        owner: &Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<StakeAccount> {
        let addresses = self.addresses(owner);
        let mut account = self.load(&addresses, caller)?;

        require!(amount > 0, StakeError::InvalidAmount);
        let wallet = self.store.lamports(caller);
        vault::ensure_spendable(wallet, self.rent_reserve, amount)?;

        accrue(&mut account, now, &self.rate)?;
        account.record_stake(amount)?;

        let wallet = wallet.checked_sub(amount).ok_or(StakeError::Underflow)?;
        let vault_lamports = self
            .store
            .lamports(&addresses.vault)
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;
        vault::ensure_covers(
            account.staked_amount,
            vault::custodied_balance(vault_lamports, self.rent_reserve),
        )?;

        self.store.set_lamports(*caller, wallet);
        self.store.set_lamports(addresses.vault, vault_lamports);
        self.store.save(addresses.stake_account, account.clone());
        Ok(account)
    }

    pub fn unstake(
        &mut self,
        caller: &Pubkey,
        owner: &Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<StakeAccount> {
        let addresses = self.addresses(owner);
        let mut account = self.load(&addresses, caller)?;

        require!(amount > 0, StakeError::InvalidAmount);
        accrue(&mut account, now, &self.rate)?;

        let vault_lamports = self.store.lamports(&addresses.vault);
        let custodied = vault::custodied_balance(vault_lamports, self.rent_reserve);
        account.record_unstake(amount, custodied)?;

        let vault_lamports = vault_lamports
            .checked_sub(amount)
            .ok_or(StakeError::Underflow)?;
        let wallet = self
            .store
            .lamports(caller)
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;
        vault::ensure_covers(
            account.staked_amount,
            vault::custodied_balance(vault_lamports, self.rent_reserve),
        )?;

        self.store.set_lamports(addresses.vault, vault_lamports);
        self.store.set_lamports(*caller, wallet);
        self.store.save(addresses.stake_account, account.clone());
        Ok(account)
    }

    pub fn get_points(&mut self, caller: &Pubkey, owner: &Pubkey, now: i64) -> Result<StakeAccount> {
        let addresses = self.addresses(owner);
        let mut account = self.load(&addresses, caller)?;

        accrue(&mut account, now, &self.rate)?;

        self.store.save(addresses.stake_account, account.clone());
        Ok(account)
    }

    /// Returns the claimed points.
    pub fn claim_points(&mut self, caller: &Pubkey, owner: &Pubkey, now: i64) -> Result<u64> {
        let addresses = self.addresses(owner);
        let mut account = self.load(&addresses, caller)?;

        accrue(&mut account, now, &self.rate)?;
        let points = account.claim();

        self.store.save(addresses.stake_account, account);
        Ok(points)
    }

    /// Load the record at `addresses`, check that its stored bump still
    /// derives the same address, and that `caller` owns it.
    fn load(&self, addresses: &OwnerAddresses, caller: &Pubkey) -> Result<StakeAccount> {
        let account = self.store.get(&addresses.stake_account)?;

        let rederived = rederive(STAKE_SEED, &account.owner, account.bump, &self.program_id)?;
        require_keys_eq!(
            rederived,
            addresses.stake_account,
            ErrorCode::ConstraintSeeds
        );

        account.ensure_owner(caller)?;
        Ok(account)
    }
}
