use std::path::PathBuf;
use std::str::FromStr;

use borsh::BorshDeserialize;
use litesvm::types::TransactionResult;
use litesvm::LiteSVM;
use sha2::{Digest, Sha256};
use solana_clock::Clock;
use solana_instruction::error::InstructionError;
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_message::Message;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;
use solana_transaction_error::TransactionError;

pub const PROGRAM_ID: &str = "GiSpyqsUFLfHZ3Vshoshg21AmuFzm814xQ2vFuF7GDuJ";

pub const STAKE_SEED: &[u8] = b"stake_data";
pub const VAULT_SEED: &[u8] = b"vault";

/// Custom error numbers of `StakeError`, in declaration order from 6000.
pub mod codes {
    pub const INVALID_AMOUNT: u32 = 6000;
    pub const UNAUTHORIZED: u32 = 6001;
    pub const OVERFLOW: u32 = 6002;
    pub const INVALID_TIMESTAMP: u32 = 6003;
    pub const UNDERFLOW: u32 = 6004;
    pub const INSUFFICIENT_STAKE: u32 = 6005;
    pub const INSUFFICIENT_VAULT_BALANCE: u32 = 6006;
    pub const ALREADY_EXISTS: u32 = 6007;
    pub const NOT_FOUND: u32 = 6008;
    pub const INSUFFICIENT_FUNDS: u32 = 6009;

    /// Anchor's `ConstraintSeeds`.
    pub const CONSTRAINT_SEEDS: u32 = 2006;
}

pub fn program_id() -> Pubkey {
    Pubkey::from_str(PROGRAM_ID).expect("valid program id")
}

/// The program built by `anchor build`. Panics when it is missing so the
/// suite never passes without running it.
pub fn read_program() -> Vec<u8> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("target");
    path.push("deploy");
    path.push("stake_ledger.so");
    std::fs::read(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to read program at {}: {} (run `anchor build` first)",
            path.display(),
            e
        )
    })
}

fn discriminator(preimage: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    let result = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&result[..8]);
    disc
}

pub fn instruction_data(name: &str, args: &[u8]) -> Vec<u8> {
    let mut data = discriminator(&format!("global:{}", name)).to_vec();
    data.extend_from_slice(args);
    data
}

/// Borsh mirror of the on-chain `StakeAccount`.
#[derive(BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct StakeRecord {
    pub owner: [u8; 32],
    pub staked_amount: u64,
    pub total_points: u64,
    pub last_update_time: i64,
    pub bump: u8,
}

impl StakeRecord {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < 8 || data[..8] != discriminator("account:StakeAccount") {
            return None;
        }
        Self::deserialize(&mut &data[8..]).ok()
    }

    pub fn owner(&self) -> Pubkey {
        Pubkey::new_from_array(self.owner)
    }
}

/// Custom program error number of a failed transaction, if any.
pub fn custom_error(result: &TransactionResult) -> Option<u32> {
    match result {
        Err(failed) => match &failed.err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
            _ => None,
        },
        Ok(_) => None,
    }
}

pub struct TestEnv {
    pub svm: LiteSVM,
    pub program_id: Pubkey,
}

impl TestEnv {
    pub fn new() -> Self {
        let program_id = program_id();
        let mut svm = LiteSVM::new();
        svm.add_program(program_id, &read_program());
        Self { svm, program_id }
    }

    pub fn funded_keypair(&mut self, lamports: u64) -> Keypair {
        let keypair = Keypair::new();
        self.svm
            .airdrop(&keypair.pubkey(), lamports)
            .expect("Airdrop failed");
        keypair
    }

    pub fn stake_pda(&self, owner: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[STAKE_SEED, owner.as_ref()], &self.program_id)
    }

    pub fn vault_pda(&self, owner: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[VAULT_SEED, owner.as_ref()], &self.program_id)
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.svm
            .get_account(address)
            .map(|account| account.lamports)
            .unwrap_or_default()
    }

    pub fn rent_reserve(&self) -> u64 {
        self.svm.minimum_balance_for_rent_exemption(0)
    }

    /// Vault lamports above its rent reserve.
    pub fn custodied(&self, owner: &Pubkey) -> u64 {
        let vault = self.vault_pda(owner).0;
        self.lamports(&vault).saturating_sub(self.rent_reserve())
    }

    pub fn record(&self, owner: &Pubkey) -> Option<StakeRecord> {
        let account = self.svm.get_account(&self.stake_pda(owner).0)?;
        StakeRecord::decode(&account.data)
    }

    pub fn now(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }

    pub fn warp(&mut self, seconds: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp += seconds;
        self.svm.set_sysvar::<Clock>(&clock);
    }

    fn send(&mut self, ix: Instruction, signer: &Keypair) -> TransactionResult {
        self.svm.expire_blockhash();
        let msg = Message::new(&[ix], Some(&signer.pubkey()));
        let tx = Transaction::new(&[signer], msg, self.svm.latest_blockhash());
        self.svm.send_transaction(tx)
    }

    pub fn create_account(&mut self, payer: &Keypair) -> TransactionResult {
        let owner = payer.pubkey();
        let ix = Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(owner, true),
                AccountMeta::new(self.stake_pda(&owner).0, false),
                AccountMeta::new(self.vault_pda(&owner).0, false),
                AccountMeta::new_readonly(solana_sdk_ids::system_program::ID, false),
            ],
            data: instruction_data("create_account", &[]),
        };
        self.send(ix, payer)
    }

    /// `stake` against `owner`'s accounts, signed by `signer`.
    pub fn stake(&mut self, signer: &Keypair, owner: &Pubkey, amount: u64) -> TransactionResult {
        let ix = self.transfer_ix("stake", signer, owner, owner, amount);
        self.send(ix, signer)
    }

    pub fn unstake(&mut self, signer: &Keypair, owner: &Pubkey, amount: u64) -> TransactionResult {
        let ix = self.transfer_ix("unstake", signer, owner, owner, amount);
        self.send(ix, signer)
    }

    /// `unstake` with the record and vault chosen independently.
    pub fn unstake_mixed(
        &mut self,
        signer: &Keypair,
        record_owner: &Pubkey,
        vault_owner: &Pubkey,
        amount: u64,
    ) -> TransactionResult {
        let ix = self.transfer_ix("unstake", signer, record_owner, vault_owner, amount);
        self.send(ix, signer)
    }

    pub fn get_points(&mut self, signer: &Keypair, owner: &Pubkey) -> TransactionResult {
        let ix = self.points_ix("get_points", signer, owner);
        self.send(ix, signer)
    }

    pub fn claim_points(&mut self, signer: &Keypair, owner: &Pubkey) -> TransactionResult {
        let ix = self.points_ix("claim_points", signer, owner);
        self.send(ix, signer)
    }

    fn transfer_ix(
        &self,
        name: &str,
        signer: &Keypair,
        record_owner: &Pubkey,
        vault_owner: &Pubkey,
        amount: u64,
    ) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(signer.pubkey(), true),
                AccountMeta::new(self.stake_pda(record_owner).0, false),
                AccountMeta::new(self.vault_pda(vault_owner).0, false),
                AccountMeta::new_readonly(solana_sdk_ids::system_program::ID, false),
            ],
            data: instruction_data(name, &amount.to_le_bytes()),
        }
    }

    fn points_ix(&self, name: &str, signer: &Keypair, owner: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(signer.pubkey(), true),
                AccountMeta::new(self.stake_pda(owner).0, false),
            ],
            data: instruction_data(name, &[]),
        }
    }
}
