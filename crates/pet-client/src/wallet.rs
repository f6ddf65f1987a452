//! Wallet connector seam
//!
//! Mirrors the wallet-adapter surface the client binds to: connectedness,
//! an optional public key, and single- plus batch-transaction signing.
//! Capabilities are reported individually because session binding refuses
//! a wallet that lacks any of them.

use crate::core::Result;
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey, signature::Keypair, signer::Signer, transaction::Transaction,
};

#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn is_connected(&self) -> bool;

    fn pubkey(&self) -> Option<Pubkey>;

    fn can_sign(&self) -> bool;

    fn can_sign_batch(&self) -> bool;

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction>;

    async fn sign_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>>;
}

/// Connector backed by a local keypair. Used by the console binary and by
/// tests; a browser-style external wallet would implement the same trait.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let keypair = Keypair::from_bytes(bytes).map_err(|e| {
            crate::core::ClientError::Failed(format!("unusable wallet keypair: {e}"))
        })?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl WalletConnector for KeypairWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    fn can_sign(&self) -> bool {
        true
    }

    fn can_sign_batch(&self) -> bool {
        true
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction> {
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_sign(&[&self.keypair], blockhash)?;
        Ok(transaction)
    }

    async fn sign_all_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<Vec<Transaction>> {
        let mut signed = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            signed.push(self.sign_transaction(transaction).await?);
        }
        Ok(signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{message::Message, system_instruction};

    #[tokio::test]
    async fn keypair_wallet_signs_for_its_own_key() {
        let wallet = KeypairWallet::new(Keypair::new());
        let owner = wallet.pubkey().unwrap();

        let instruction = system_instruction::transfer(&owner, &Pubkey::new_unique(), 1);
        let message = Message::new_with_blockhash(
            &[instruction],
            Some(&owner),
            &solana_sdk::hash::Hash::new_unique(),
        );
        let signed = wallet
            .sign_transaction(Transaction::new_unsigned(message))
            .await
            .unwrap();
        assert!(signed.is_signed());
    }

    #[tokio::test]
    async fn keypair_wallet_reports_full_capability() {
        let wallet = KeypairWallet::new(Keypair::new());
        assert!(wallet.is_connected());
        assert!(wallet.can_sign());
        assert!(wallet.can_sign_batch());
        assert!(wallet.pubkey().is_some());
    }
}
