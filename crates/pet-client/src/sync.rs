//! Read-after-write state synchronization
//!
//! After any orchestration step the affected accounts are re-read and
//! republished as one atomic [`Snapshot`]. Authoritative fields (health,
//! happiness, balance, request status) are only ever taken from the last
//! successful re-read — never advanced speculatively on the client.

use crate::core::{ClientConfig, Result};
use crate::reader::AccountReader;
use crate::shop::{self, Item};
use crate::state::{OwnershipRequest, PetRecord};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::{debug, warn};

/// Consistent view of all ledger state relevant to one owner. A value
/// object: produced whole, never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub pet: Option<PetRecord>,
    pub coin_balance: u64,
    pub items: Vec<Item>,
    pub pending_requests: Vec<OwnershipRequest>,
}

pub struct StateSynchronizer {
    reader: Arc<AccountReader>,
    coin_mint: Option<Pubkey>,
}

impl StateSynchronizer {
    pub fn new(reader: Arc<AccountReader>, config: &ClientConfig) -> Self {
        Self {
            reader,
            coin_mint: config.coin_mint,
        }
    }

    /// Re-read everything the owner can display and publish it as one
    /// snapshot. Purely a read path: a missing holding account reads as a
    /// zero balance and is never provisioned from here.
    pub async fn refresh(&self, owner: &Pubkey) -> Result<Snapshot> {
        let pet = self.reader.pet(owner).await?;

        let coin_balance = match &self.coin_mint {
            Some(mint) => self.reader.coin_balance(owner, mint).await?,
            None => {
                // Coin operations fail loudly with ConfigMissing; display
                // degrades to a zero balance instead.
                warn!("reward mint unconfigured, balance shown as 0");
                0
            }
        };

        let pending_requests = self.reader.pending_requests_for(owner).await?;

        debug!(
            owner = %owner,
            has_pet = pet.is_some(),
            coin_balance,
            pending = pending_requests.len(),
            "snapshot refreshed"
        );

        Ok(Snapshot {
            pet,
            coin_balance,
            items: shop::catalog(),
            pending_requests,
        })
    }
}
