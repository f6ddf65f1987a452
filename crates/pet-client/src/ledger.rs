//! Ledger RPC seam
//!
//! [`LedgerRpc`] is the narrow async interface the rest of the client is
//! written against. Production code talks to a real Solana RPC node
//! through [`SolanaLedger`]; tests substitute a recording double to assert
//! submission ordering without a network.

use crate::core::{ClientConfig, ClientError, Result};
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use tracing::debug;

/// Byte-offset filter for program account scans
#[derive(Debug, Clone)]
pub struct ByteFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

/// Minimal ledger connection surface used by the client
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Raw account data, or `None` when no account exists at the address.
    /// Absence is a normal outcome, not an error.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;

    /// Token balance of a holding account, or `None` when the holding
    /// account has not been provisioned yet
    async fn token_balance(&self, holding_account: &Pubkey) -> Result<Option<u64>>;

    /// All accounts owned by a program whose data matches every filter
    async fn scan_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<ByteFilter>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>>;

    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Broadcast a signed transaction and await network confirmation
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature>;
}

/// [`LedgerRpc`] backed by a Solana RPC node
pub struct SolanaLedger {
    rpc: RpcClient,
    commitment: solana_sdk::commitment_config::CommitmentConfig,
}

impl SolanaLedger {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment),
            commitment: config.commitment,
        }
    }
}

#[async_trait]
impl LedgerRpc for SolanaLedger {
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn token_balance(&self, holding_account: &Pubkey) -> Result<Option<u64>> {
        // The balance query errors on absent accounts, so existence is
        // checked first and absence reported as None.
        if self.account_data(holding_account).await?.is_none() {
            return Ok(None);
        }
        let balance = self.rpc.get_token_account_balance(holding_account).await?;
        let amount = balance.amount.parse::<u64>().map_err(|_| {
            ClientError::Decode(format!("unparseable token amount: {}", balance.amount))
        })?;
        Ok(Some(amount))
    }

    async fn scan_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<ByteFilter>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>> {
        let rpc_filters = filters
            .into_iter()
            .map(|f| RpcFilterType::Memcmp(Memcmp::new_base58_encoded(f.offset, &f.bytes)))
            .collect();
        let config = RpcProgramAccountsConfig {
            filters: Some(rpc_filters),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .rpc
            .get_program_accounts_with_config(program_id, config)
            .await?;
        debug!(program = %program_id, count = accounts.len(), "program account scan");
        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature> {
        Ok(self.rpc.send_and_confirm_transaction(transaction).await?)
    }
}
