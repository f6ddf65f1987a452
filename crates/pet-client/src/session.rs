//! Session lifecycle
//!
//! A session is the bound, signing-capable connection between this client
//! and one wallet identity. It is the only shared mutable state in the
//! client and is replaced wholesale on connect and disconnect, never
//! partially mutated.

use crate::core::{ClientError, Result};
use crate::descriptor::ProgramDescriptor;
use crate::wallet::WalletConnector;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// An authenticated, signing-capable session
#[derive(Clone)]
pub struct Session {
    pub owner: Pubkey,
    pub program_id: Pubkey,
    pub wallet: Arc<dyn WalletConnector>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("owner", &self.owner)
            .field("program_id", &self.program_id)
            .finish_non_exhaustive()
    }
}

/// Owns the session slot and the validated program descriptor
pub struct SessionManager {
    descriptor: ProgramDescriptor,
    program_id: Pubkey,
    slot: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Build a manager around a descriptor. The descriptor is validated
    /// here — an unusable one is a fatal configuration condition, refused
    /// before any wallet is considered.
    pub fn new(descriptor: ProgramDescriptor) -> Result<Self> {
        descriptor.validate()?;
        let program_id = descriptor.program_id()?;
        Ok(Self {
            descriptor,
            program_id,
            slot: RwLock::new(None),
        })
    }

    pub fn descriptor(&self) -> &ProgramDescriptor {
        &self.descriptor
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Bind to a connected wallet.
    ///
    /// Requires connectedness, a public key, and both signing
    /// capabilities; anything short of that is `Unready`, which callers
    /// treat as "no session" rather than a fault.
    pub async fn bind(&self, wallet: Arc<dyn WalletConnector>) -> Result<Session> {
        if !wallet.is_connected() || !wallet.can_sign() || !wallet.can_sign_batch() {
            warn!("wallet not ready for binding");
            return Err(ClientError::Unready);
        }
        let Some(owner) = wallet.pubkey() else {
            warn!("connected wallet exposes no public key");
            return Err(ClientError::Unready);
        };

        let session = Session {
            owner,
            program_id: self.program_id,
            wallet,
        };
        *self.slot.write().await = Some(session.clone());
        info!(owner = %owner, "session bound");
        Ok(session)
    }

    /// Currently bound session, if any
    pub async fn current(&self) -> Option<Session> {
        self.slot.read().await.clone()
    }

    /// Invalidate the session on wallet disconnect. Cached entity state is
    /// keyed off the session, so dropping it here guarantees no stale
    /// display survives a disconnect.
    pub async fn disconnect(&self) {
        if self.slot.write().await.take().is_some() {
            info!("session invalidated");
        }
    }
}
