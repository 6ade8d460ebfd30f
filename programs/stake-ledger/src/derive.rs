//! Deterministic address derivation for stake records and vaults
//!
//! Both addresses are program derived from a fixed seed label and the owner's
//! key, so any party can recompute them without consulting storage. The
//! program id is always an argument; nothing here reads `crate::ID`.

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::constants::{STAKE_SEED, VAULT_SEED};

/// Derive the address and bump for `seed` + `owner` under `program_id`.
///
/// Panics if no valid bump exists, which `find_program_address` treats as
/// unrecoverable.
pub fn derive_address(seed: &[u8], owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed, owner.as_ref()], program_id)
}

pub fn stake_account_address(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    derive_address(STAKE_SEED, owner, program_id)
}

pub fn vault_address(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    derive_address(VAULT_SEED, owner, program_id)
}

/// Re-derive an address from a stored bump without searching.
pub fn rederive(seed: &[u8], owner: &Pubkey, bump: u8, program_id: &Pubkey) -> Result<Pubkey> {
    Pubkey::create_program_address(&[seed, owner.as_ref(), &[bump]], program_id)
        .map_err(|_| error!(ErrorCode::ConstraintSeeds))
}
