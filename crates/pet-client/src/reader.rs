//! Typed account reads
//!
//! Pure read layer over [`LedgerRpc`]: fetch raw bytes at a derived
//! address and decode them into the typed records of [`crate::state`].
//! An absent account is a normal outcome (`Ok(None)`), decode failures
//! are fatal and logged prominently.

use crate::core::Result;
use crate::ledger::{ByteFilter, LedgerRpc};
use crate::pda;
use crate::state::{OwnershipRequest, PetRecord, RequestStatus, account_discriminator};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::error;

pub struct AccountReader {
    ledger: Arc<dyn LedgerRpc>,
    program_id: Pubkey,
}

impl AccountReader {
    pub fn new(ledger: Arc<dyn LedgerRpc>, program_id: Pubkey) -> Self {
        Self { ledger, program_id }
    }

    /// The owner's pet record, if one has been initialized
    pub async fn pet(&self, owner: &Pubkey) -> Result<Option<PetRecord>> {
        let address = pda::pet_address(owner, &self.program_id);
        match self.ledger.account_data(&address).await? {
            None => Ok(None),
            Some(data) => PetRecord::decode(address, &data)
                .map(Some)
                .inspect_err(|e| error!(account = %address, "pet decode failed: {e}")),
        }
    }

    /// The ownership request between a (from, to) pair, if one exists
    pub async fn ownership_request(
        &self,
        from: &Pubkey,
        to: &Pubkey,
    ) -> Result<Option<OwnershipRequest>> {
        let address = pda::ownership_request_address(from, to, &self.program_id);
        match self.ledger.account_data(&address).await? {
            None => Ok(None),
            Some(data) => OwnershipRequest::decode(address, &data)
                .map(Some)
                .inspect_err(|e| error!(account = %address, "request decode failed: {e}")),
        }
    }

    /// Reward coin balance held by the owner. A missing holding account
    /// reads as zero; the read path never provisions accounts.
    pub async fn coin_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        let holding = pda::coin_holding_address(owner, mint);
        Ok(self.ledger.token_balance(&holding).await?.unwrap_or(0))
    }

    /// All pending ownership requests addressed to the owner, found via a
    /// discriminator + `to`-field scan over the program's accounts
    pub async fn pending_requests_for(&self, owner: &Pubkey) -> Result<Vec<OwnershipRequest>> {
        let filters = vec![
            ByteFilter {
                offset: 0,
                bytes: account_discriminator(OwnershipRequest::ACCOUNT_NAME).to_vec(),
            },
            ByteFilter {
                offset: OwnershipRequest::TO_OFFSET,
                bytes: owner.to_bytes().to_vec(),
            },
        ];
        let accounts = self
            .ledger
            .scan_program_accounts(&self.program_id, filters)
            .await?;

        let mut requests = Vec::new();
        for (address, data) in accounts {
            let request = OwnershipRequest::decode(address, &data)
                .inspect_err(|e| error!(account = %address, "request decode failed: {e}"))?;
            if request.status == RequestStatus::Pending {
                requests.push(request);
            }
        }
        Ok(requests)
    }
}
