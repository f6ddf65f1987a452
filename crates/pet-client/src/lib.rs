//! Virtual Pet Client
//!
//! Off-chain client for the on-ledger virtual pet program: deterministic
//! address derivation, typed account reads, session management against a
//! wallet connector, transaction orchestration for the pet operations,
//! the ownership-transfer handshake, and read-after-write state
//! synchronization. Game rules live in the remote program; this crate
//! only assembles signed instructions and re-reads resulting state.

// ================================
// Module Declarations
// ================================

pub mod core;
pub mod descriptor;
pub mod handshake;
pub mod ledger;
pub mod orchestrator;
pub mod pda;
pub mod reader;
pub mod session;
pub mod shop;
pub mod state;
pub mod sync;
pub mod wallet;

// ================================
// Public API Re-exports
// ================================

pub use core::{ClientConfig, ClientError, Result};
pub use descriptor::ProgramDescriptor;
pub use handshake::{HandshakeState, OwnershipHandshake};
pub use ledger::{ByteFilter, LedgerRpc, SolanaLedger};
pub use orchestrator::Orchestrator;
pub use reader::AccountReader;
pub use session::{Session, SessionManager};
pub use shop::{Item, SimulatedPurchase, SimulatedShop};
pub use state::{OwnershipRequest, PetRecord, RequestStatus};
pub use sync::{Snapshot, StateSynchronizer};
pub use wallet::{KeypairWallet, WalletConnector};

// ================================
// Main Client Implementation
// ================================

use std::sync::Arc;
use tracing::info;

/// Everything wired together: the session slot, the orchestrator, the
/// synchronizer and the handshake, sharing one ledger connection
pub struct PetClient {
    sessions: Arc<SessionManager>,
    orchestrator: Arc<Orchestrator>,
    synchronizer: StateSynchronizer,
    handshake: OwnershipHandshake,
    reader: Arc<AccountReader>,
}

impl PetClient {
    /// Build a client over a ledger connection. The descriptor is
    /// validated here; an unusable one refuses construction.
    pub fn new(
        config: ClientConfig,
        descriptor: ProgramDescriptor,
        ledger: Arc<dyn LedgerRpc>,
    ) -> Result<Self> {
        let sessions = Arc::new(SessionManager::new(descriptor)?);
        let reader = Arc::new(AccountReader::new(ledger.clone(), sessions.program_id()));
        let orchestrator = Arc::new(Orchestrator::new(
            ledger,
            sessions.clone(),
            reader.clone(),
            config.clone(),
        ));
        let synchronizer = StateSynchronizer::new(reader.clone(), &config);
        let handshake = OwnershipHandshake::new(orchestrator.clone(), reader.clone());

        info!(program = %sessions.program_id(), "pet client initialized");
        Ok(Self {
            sessions,
            orchestrator,
            synchronizer,
            handshake,
            reader,
        })
    }

    /// Client over a real RPC node
    pub fn connect(config: ClientConfig, descriptor: ProgramDescriptor) -> Result<Self> {
        let ledger: Arc<dyn LedgerRpc> = Arc::new(SolanaLedger::new(&config));
        Self::new(config, descriptor, ledger)
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    pub fn synchronizer(&self) -> &StateSynchronizer {
        &self.synchronizer
    }

    pub fn handshake(&self) -> &OwnershipHandshake {
        &self.handshake
    }

    pub fn reader(&self) -> &Arc<AccountReader> {
        &self.reader
    }
}
