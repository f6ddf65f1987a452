//! Deterministic account address derivation
//!
//! Every ledger-backed entity lives at an address that is a pure function
//! of fixed seed tags and key inputs, so two independent derivations for
//! the same inputs always agree. That determinism is what makes the
//! ownership handshake and idempotent re-reads possible.

use crate::core::{ClientError, Result};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

pub const PET_SEED: &[u8] = b"pet";
pub const OWNERSHIP_REQUEST_SEED: &[u8] = b"ownership_request";

/// Derive the pet account address for an owner. One pet per owner is
/// enforced by this derivation, not by client logic.
pub fn pet_address(owner: &Pubkey, program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[PET_SEED, owner.as_ref()], program_id).0
}

/// Derive the ownership request address for a (from, to) pair.
///
/// Seed order is significant: requester before recipient. Swapping the
/// roles yields a different address, which is what lets the two parties
/// address distinct requests between the same keys.
pub fn ownership_request_address(from: &Pubkey, to: &Pubkey, program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[OWNERSHIP_REQUEST_SEED, from.as_ref(), to.as_ref()],
        program_id,
    )
    .0
}

/// Associated token account holding the reward coin balance for an owner
pub fn coin_holding_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}

/// Parse caller-supplied key text (e.g. a counterparty entered by hand)
pub fn parse_key(raw: &str) -> Result<Pubkey> {
    Pubkey::from_str(raw.trim()).map_err(|_| ClientError::InvalidKey(raw.to_string()))
}
