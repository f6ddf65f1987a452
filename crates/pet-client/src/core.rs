//! Core client types: configuration and error handling

use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// ================================
// Configuration Types
// ================================

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Commitment level for RPC queries
    pub commitment: CommitmentConfig,

    /// Reward coin mint address. Required for any coin operation; there is
    /// deliberately no default — absence surfaces as `ConfigMissing` at the
    /// first coin-related call, never as a silently substituted address.
    pub coin_mint: Option<Pubkey>,

    /// Maximum time to await a submission's network confirmation
    pub confirmation_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8899".to_string(),
            commitment: CommitmentConfig::confirmed(),
            coin_mint: None,
            confirmation_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment.
    ///
    /// `RPC_URL` and `CONFIRMATION_TIMEOUT_SECS` fall back to defaults;
    /// `PET_COIN_MINT` does not — when unset it is recorded as absent and
    /// coin operations fail with [`ClientError::ConfigMissing`].
    pub fn from_env() -> Result<Self> {
        let coin_mint = match std::env::var("PET_COIN_MINT") {
            Ok(raw) => Some(
                Pubkey::from_str(raw.trim())
                    .map_err(|_| ClientError::InvalidKey(raw.clone()))?,
            ),
            Err(_) => None,
        };

        let confirmation_timeout = std::env::var("CONFIRMATION_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        Ok(Self {
            rpc_url: std::env::var("RPC_URL")
                .unwrap_or_else(|_| "http://localhost:8899".to_string()),
            commitment: CommitmentConfig::confirmed(),
            coin_mint,
            confirmation_timeout,
        })
    }

    /// Reward coin mint, or `ConfigMissing` if the environment never
    /// supplied one. Called before any account is resolved so that a
    /// misconfigured client fails without touching the network.
    pub fn coin_mint(&self) -> Result<Pubkey> {
        self.coin_mint
            .ok_or(ClientError::ConfigMissing("PET_COIN_MINT"))
    }
}

// ================================
// Error Types
// ================================

#[derive(Debug, Error)]
pub enum ClientError {
    /// Session preconditions unmet (wallet absent or missing a signing
    /// capability). Expected and non-fatal: callers show an idle state.
    #[error("session not ready")]
    Unready,

    /// Entity absent on the ledger. A normal outcome — drives "create" flows.
    #[error("{0} not found")]
    NotFound(String),

    /// Account bytes did not match the expected layout. Fatal: indicates a
    /// schema mismatch between this client and the deployed program.
    #[error("account decode failed: {0}")]
    Decode(String),

    /// Caller-supplied key text failed to parse
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Remote rejection or transport failure during orchestration.
    /// Surfaced as-is, never retried automatically.
    #[error("operation failed: {0}")]
    Failed(String),

    /// Required environment setting absent
    #[error("missing configuration: {0}")]
    ConfigMissing(&'static str),

    /// Program interface descriptor unusable
    #[error("program descriptor invalid: {0}")]
    Descriptor(String),

    #[error("rpc error: {0}")]
    Rpc(Box<solana_client::client_error::ClientError>),

    /// Confirmation wait exceeded the configured timeout
    #[error("confirmation wait timed out during {0}")]
    TimedOut(&'static str),
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

impl From<solana_sdk::signer::SignerError> for ClientError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        Self::Failed(format!("signing failed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
