//! Ownership transfer handshake
//!
//! Two-party protocol layered on the orchestrator:
//! NoRequest → Pending → {Accepted, Rejected}. Terminal states are never
//! revisited by this client; because the request address is derived from
//! the (from, to) pair, a repeat request lands on the terminal account and
//! is rejected remotely, which the client surfaces unchanged.

use crate::core::Result;
use crate::orchestrator::Orchestrator;
use crate::reader::AccountReader;
use crate::state::{OwnershipRequest, RequestStatus};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::sync::Arc;

/// Client-side view of the handshake between one (from, to) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    NoRequest,
    Pending,
    Accepted,
    Rejected,
}

impl HandshakeState {
    /// Map a re-read request account onto the protocol state. Only ever
    /// derived from ledger state, never assumed after a submission.
    pub fn from_account(request: Option<&OwnershipRequest>) -> Self {
        match request.map(|r| r.status) {
            None => Self::NoRequest,
            Some(RequestStatus::Pending) => Self::Pending,
            Some(RequestStatus::Accepted) => Self::Accepted,
            Some(RequestStatus::Rejected) => Self::Rejected,
        }
    }
}

pub struct OwnershipHandshake {
    orchestrator: Arc<Orchestrator>,
    reader: Arc<AccountReader>,
}

impl OwnershipHandshake {
    pub fn new(orchestrator: Arc<Orchestrator>, reader: Arc<AccountReader>) -> Self {
        Self {
            orchestrator,
            reader,
        }
    }

    /// Requester side: open a request towards `to`
    pub async fn request(&self, to: &str) -> Result<Signature> {
        self.orchestrator.request_ownership(to).await
    }

    /// Recipient side: resolve an inbound request
    pub async fn respond(&self, request: &OwnershipRequest, accept: bool) -> Result<Signature> {
        self.orchestrator.respond_to_request(request, accept).await
    }

    /// Observe the current protocol state between a (from, to) pair
    pub async fn state(&self, from: &Pubkey, to: &Pubkey) -> Result<HandshakeState> {
        let request = self.reader.ownership_request(from, to).await?;
        Ok(HandshakeState::from_account(request.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(status: RequestStatus) -> OwnershipRequest {
        OwnershipRequest {
            address: Pubkey::new_unique(),
            from: Pubkey::new_unique(),
            to: Pubkey::new_unique(),
            pet: Pubkey::new_unique(),
            status,
        }
    }

    #[test]
    fn state_maps_directly_from_account_status() {
        assert_eq!(HandshakeState::from_account(None), HandshakeState::NoRequest);
        assert_eq!(
            HandshakeState::from_account(Some(&request_with(RequestStatus::Pending))),
            HandshakeState::Pending
        );
        assert_eq!(
            HandshakeState::from_account(Some(&request_with(RequestStatus::Accepted))),
            HandshakeState::Accepted
        );
        assert_eq!(
            HandshakeState::from_account(Some(&request_with(RequestStatus::Rejected))),
            HandshakeState::Rejected
        );
    }
}
