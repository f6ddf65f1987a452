//! On-ledger account layouts and decoding
//!
//! Accounts follow the Anchor convention: an 8-byte discriminator
//! (`sha256("account:<Name>")[..8]`) followed by the fields. Decoding is
//! strict — a discriminator or length mismatch means the client and the
//! deployed program disagree on the schema, which is surfaced as a fatal
//! `Decode` error rather than papered over.

use crate::core::{ClientError, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

pub const DISCRIMINATOR_LEN: usize = 8;

/// Anchor account discriminator for a named account type
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("account:{name}").as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

/// Anchor global instruction discriminator for a named instruction
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{name}").as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

fn read_pubkey(data: &[u8], offset: usize, what: &str) -> Result<Pubkey> {
    let bytes: [u8; 32] = data
        .get(offset..offset + 32)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| ClientError::Decode(format!("{what}: truncated key field")))?;
    Ok(Pubkey::new_from_array(bytes))
}

fn check_discriminator(data: &[u8], name: &str) -> Result<()> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(ClientError::Decode(format!("{name}: account too short")));
    }
    if data[..DISCRIMINATOR_LEN] != account_discriminator(name) {
        return Err(ClientError::Decode(format!(
            "{name}: discriminator mismatch"
        )));
    }
    Ok(())
}

// ================================
// Pet
// ================================

/// Decoded pet account. Health and happiness are authoritative remote
/// state; the client never advances them speculatively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PetRecord {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub health: u8,
    pub happiness: u8,
}

impl PetRecord {
    pub const ACCOUNT_NAME: &'static str = "Pet";
    const LEN: usize = DISCRIMINATOR_LEN + 32 + 1 + 1;

    pub fn decode(address: Pubkey, data: &[u8]) -> Result<Self> {
        check_discriminator(data, Self::ACCOUNT_NAME)?;
        if data.len() < Self::LEN {
            return Err(ClientError::Decode("Pet: account too short".into()));
        }
        Ok(Self {
            address,
            owner: read_pubkey(data, DISCRIMINATOR_LEN, "Pet.owner")?,
            health: data[DISCRIMINATOR_LEN + 32],
            happiness: data[DISCRIMINATOR_LEN + 33],
        })
    }

    /// Raw account bytes for this record, used to seed ledger doubles
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&account_discriminator(Self::ACCOUNT_NAME));
        data.extend_from_slice(self.owner.as_ref());
        data.push(self.health);
        data.push(self.happiness);
        data
    }
}

// ================================
// Ownership request
// ================================

/// Handshake status as recorded on the ledger. Transitions are
/// externally authoritative — the client only ever observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    fn decode(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Accepted),
            2 => Ok(Self::Rejected),
            other => Err(ClientError::Decode(format!(
                "OwnershipRequest: unknown status tag {other}"
            ))),
        }
    }

    fn encode(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Rejected => 2,
        }
    }
}

/// Decoded ownership request account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipRequest {
    pub address: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub pet: Pubkey,
    pub status: RequestStatus,
}

impl OwnershipRequest {
    pub const ACCOUNT_NAME: &'static str = "OwnershipRequest";
    const LEN: usize = DISCRIMINATOR_LEN + 32 * 3 + 1;

    /// Byte offset of the `to` field, used for program-account scans
    pub const TO_OFFSET: usize = DISCRIMINATOR_LEN + 32;

    pub fn decode(address: Pubkey, data: &[u8]) -> Result<Self> {
        check_discriminator(data, Self::ACCOUNT_NAME)?;
        if data.len() < Self::LEN {
            return Err(ClientError::Decode(
                "OwnershipRequest: account too short".into(),
            ));
        }
        Ok(Self {
            address,
            from: read_pubkey(data, DISCRIMINATOR_LEN, "OwnershipRequest.from")?,
            to: read_pubkey(data, DISCRIMINATOR_LEN + 32, "OwnershipRequest.to")?,
            pet: read_pubkey(data, DISCRIMINATOR_LEN + 64, "OwnershipRequest.pet")?,
            status: RequestStatus::decode(data[DISCRIMINATOR_LEN + 96])?,
        })
    }

    /// Raw account bytes for this record, used to seed ledger doubles
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&account_discriminator(Self::ACCOUNT_NAME));
        data.extend_from_slice(self.from.as_ref());
        data.extend_from_slice(self.to.as_ref());
        data.extend_from_slice(self.pet.as_ref());
        data.push(self.status.encode());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pet() -> PetRecord {
        PetRecord {
            address: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            health: 100,
            happiness: 100,
        }
    }

    #[test]
    fn pet_decode_round_trips() {
        let pet = sample_pet();
        let decoded = PetRecord::decode(pet.address, &pet.encode()).unwrap();
        assert_eq!(decoded, pet);
    }

    #[test]
    fn decode_is_idempotent_on_unchanged_bytes() {
        let pet = sample_pet();
        let data = pet.encode();
        let first = PetRecord::decode(pet.address, &data).unwrap();
        let second = PetRecord::decode(pet.address, &data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wrong_discriminator_is_a_decode_error() {
        let pet = sample_pet();
        let mut data = pet.encode();
        data[0] ^= 0xff;
        assert!(matches!(
            PetRecord::decode(pet.address, &data),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn truncated_account_is_a_decode_error() {
        let pet = sample_pet();
        let data = pet.encode();
        assert!(matches!(
            PetRecord::decode(pet.address, &data[..data.len() - 1]),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn request_decode_round_trips() {
        let request = OwnershipRequest {
            address: Pubkey::new_unique(),
            from: Pubkey::new_unique(),
            to: Pubkey::new_unique(),
            pet: Pubkey::new_unique(),
            status: RequestStatus::Pending,
        };
        let decoded = OwnershipRequest::decode(request.address, &request.encode()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn unknown_status_tag_is_a_decode_error() {
        let request = OwnershipRequest {
            address: Pubkey::new_unique(),
            from: Pubkey::new_unique(),
            to: Pubkey::new_unique(),
            pet: Pubkey::new_unique(),
            status: RequestStatus::Rejected,
        };
        let mut data = request.encode();
        let last = data.len() - 1;
        data[last] = 9;
        assert!(matches!(
            OwnershipRequest::decode(request.address, &data),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn discriminators_differ_per_name() {
        assert_ne!(
            account_discriminator("Pet"),
            account_discriminator("OwnershipRequest")
        );
        assert_ne!(
            instruction_discriminator("feed_pet"),
            instruction_discriminator("play_with_pet")
        );
    }
}
