//! Program interface descriptor
//!
//! The descriptor is the schema document the remote program publishes: its
//! on-ledger address plus the instruction table with fixed account ordering.
//! The client never guesses account order — instruction wiring is checked
//! against this table before a session binds.

use crate::core::{ClientError, Result};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;

/// Instruction names the client orchestrates. Binding refuses descriptors
/// that do not carry all of them.
pub const REQUIRED_INSTRUCTIONS: [&str; 6] = [
    "initialize_pet",
    "request_ownership",
    "respond_to_request",
    "feed_pet",
    "play_with_pet",
    "earn_coins",
];

const BUNDLED: &str = include_str!("../descriptor/virtual_pet.json");

/// Parsed interface descriptor for the virtual pet program
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramDescriptor {
    pub address: String,
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub instructions: Vec<InstructionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstructionEntry {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountEntry {
    pub name: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub signer: bool,
}

impl ProgramDescriptor {
    /// The descriptor shipped with this crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(raw)
            .map_err(|e| ClientError::Descriptor(format!("malformed json: {e}")))?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::Descriptor(format!(
                "unreadable descriptor {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Check the invariants the client depends on: a parseable non-empty
    /// program address, a metadata object, and an entry for every
    /// orchestrated instruction. Failure here is a configuration-class
    /// fault and is never retried.
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(ClientError::Descriptor("empty program address".into()));
        }
        Pubkey::from_str(self.address.trim()).map_err(|_| {
            ClientError::Descriptor(format!("unparseable program address: {}", self.address))
        })?;
        if !self.metadata.is_object() {
            return Err(ClientError::Descriptor(
                "metadata field missing or not an object".into(),
            ));
        }
        for name in REQUIRED_INSTRUCTIONS {
            if !self.instructions.iter().any(|ix| ix.name == name) {
                return Err(ClientError::Descriptor(format!(
                    "instruction {name} missing from descriptor"
                )));
            }
        }
        Ok(())
    }

    /// Program address as a typed key. `validate` has already proven this
    /// parses, so failures are surfaced as descriptor faults, not panics.
    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(self.address.trim()).map_err(|_| {
            ClientError::Descriptor(format!("unparseable program address: {}", self.address))
        })
    }

    pub fn instruction(&self, name: &str) -> Result<&InstructionEntry> {
        self.instructions
            .iter()
            .find(|ix| ix.name == name)
            .ok_or_else(|| {
                ClientError::Descriptor(format!("instruction {name} missing from descriptor"))
            })
    }
}
