//! Transaction orchestration
//!
//! One entry point per user action. Every operation follows the same
//! shape: check the session, resolve the derived addresses, provision any
//! prerequisite account, build the instruction with its fixed account
//! list, sign through the wallet connector, broadcast and await
//! confirmation under a timeout. A failure at any step aborts the rest of
//! the call and is surfaced as-is — no automatic retry, and no side
//! effect is assumed complete without a later re-read.

use crate::core::{ClientConfig, ClientError, Result};
use crate::ledger::LedgerRpc;
use crate::pda;
use crate::reader::AccountReader;
use crate::session::{Session, SessionManager};
use crate::shop;
use crate::state::{OwnershipRequest, instruction_discriminator};
use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    message::Message,
    signature::Signature,
    system_program,
    transaction::Transaction,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{error, info};

pub struct Orchestrator {
    ledger: Arc<dyn LedgerRpc>,
    sessions: Arc<SessionManager>,
    reader: Arc<AccountReader>,
    config: ClientConfig,
}

impl Orchestrator {
    pub fn new(
        ledger: Arc<dyn LedgerRpc>,
        sessions: Arc<SessionManager>,
        reader: Arc<AccountReader>,
        config: ClientConfig,
    ) -> Self {
        Self {
            ledger,
            sessions,
            reader,
            config,
        }
    }

    // ================================
    // Operations
    // ================================

    /// Create the owner's pet account
    pub async fn initialize_pet(&self) -> Result<Signature> {
        let session = self.session().await?;
        let pet = pda::pet_address(&session.owner, &session.program_id);
        let instruction = self.instruction(
            "initialize_pet",
            vec![
                AccountMeta::new(pet, false),
                AccountMeta::new(session.owner, true),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &[],
        )?;
        self.sign_and_submit(&session, vec![instruction], "initialize_pet")
            .await
    }

    /// Ask the holder identified by `to` for ownership of their pet.
    /// `to` arrives as caller-entered text and is validated locally.
    pub async fn request_ownership(&self, to: &str) -> Result<Signature> {
        let session = self.session().await?;
        let to = pda::parse_key(to)?;
        let request = pda::ownership_request_address(&session.owner, &to, &session.program_id);
        let instruction = self.instruction(
            "request_ownership",
            vec![
                AccountMeta::new(request, false),
                AccountMeta::new(session.owner, true),
                AccountMeta::new_readonly(to, false),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &[],
        )?;
        self.sign_and_submit(&session, vec![instruction], "request_ownership")
            .await
    }

    /// Resolve an inbound ownership request. Only the recipient may call
    /// this; the remote program enforces the authority check, and a
    /// request already in a terminal state is rejected remotely — the
    /// client surfaces whatever the program reports.
    pub async fn respond_to_request(
        &self,
        request: &OwnershipRequest,
        accept: bool,
    ) -> Result<Signature> {
        let session = self.session().await?;
        let args = accept
            .try_to_vec()
            .map_err(|e| ClientError::Failed(format!("argument encoding failed: {e}")))?;
        let instruction = self.instruction(
            "respond_to_request",
            vec![
                AccountMeta::new(request.address, false),
                AccountMeta::new(request.pet, false),
                AccountMeta::new_readonly(session.owner, true),
            ],
            &args,
        )?;
        self.sign_and_submit(&session, vec![instruction], "respond_to_request")
            .await
    }

    /// Feed the pet with a catalog item
    pub async fn feed_pet(&self, item_id: u8) -> Result<Signature> {
        let session = self.session().await?;
        shop::find_item(item_id)
            .ok_or_else(|| ClientError::NotFound(format!("item {item_id}")))?;
        let pet = self.require_pet(&session).await?;
        let args = item_id
            .try_to_vec()
            .map_err(|e| ClientError::Failed(format!("argument encoding failed: {e}")))?;
        let instruction = self.instruction(
            "feed_pet",
            vec![
                AccountMeta::new(pet, false),
                AccountMeta::new(session.owner, true),
                AccountMeta::new_readonly(session.owner, true),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &args,
        )?;
        self.sign_and_submit(&session, vec![instruction], "feed_pet")
            .await
    }

    /// Play with the pet
    pub async fn play_with_pet(&self) -> Result<Signature> {
        let session = self.session().await?;
        let pet = self.require_pet(&session).await?;
        let instruction = self.instruction(
            "play_with_pet",
            vec![
                AccountMeta::new(pet, false),
                AccountMeta::new_readonly(session.owner, true),
            ],
            &[],
        )?;
        self.sign_and_submit(&session, vec![instruction], "play_with_pet")
            .await
    }

    /// Earn reward coins into the owner's holding account, provisioning
    /// the holding account first when it does not exist yet. The creation
    /// must confirm before the earn instruction is submitted — the remote
    /// program rejects a mint into a non-existent account.
    pub async fn earn_coins(&self) -> Result<Signature> {
        let session = self.session().await?;
        // Resolved before any network traffic so a missing mint setting
        // halts the operation outright.
        let mint = self.config.coin_mint()?;
        let pet = self.require_pet(&session).await?;

        let holding = pda::coin_holding_address(&session.owner, &mint);
        if self.ledger.account_data(&holding).await?.is_none() {
            info!(holding = %holding, "provisioning coin holding account");
            let create = spl_associated_token_account::instruction::create_associated_token_account(
                &session.owner,
                &session.owner,
                &mint,
                &spl_token::id(),
            );
            self.sign_and_submit(&session, vec![create], "provision_holding_account")
                .await?;
        }

        let instruction = self.instruction(
            "earn_coins",
            vec![
                AccountMeta::new(pet, false),
                AccountMeta::new(session.owner, true),
                AccountMeta::new(mint, false),
                AccountMeta::new(holding, false),
                AccountMeta::new_readonly(session.owner, true),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &[],
        )?;
        self.sign_and_submit(&session, vec![instruction], "earn_coins")
            .await
    }

    // ================================
    // Shared steps
    // ================================

    async fn session(&self) -> Result<Session> {
        self.sessions.current().await.ok_or(ClientError::Unready)
    }

    /// Feed, play and earn all require an existing pet
    async fn require_pet(&self, session: &Session) -> Result<solana_sdk::pubkey::Pubkey> {
        let pet = self
            .reader
            .pet(&session.owner)
            .await?
            .ok_or_else(|| ClientError::NotFound("pet".into()))?;
        Ok(pet.address)
    }

    /// Build an instruction with Anchor-style data, cross-checked against
    /// the descriptor's fixed account list for that instruction
    fn instruction(
        &self,
        name: &'static str,
        accounts: Vec<AccountMeta>,
        args: &[u8],
    ) -> Result<Instruction> {
        let entry = self.sessions.descriptor().instruction(name)?;
        if entry.accounts.len() != accounts.len() {
            return Err(ClientError::Descriptor(format!(
                "{name}: descriptor lists {} accounts, client wired {}",
                entry.accounts.len(),
                accounts.len()
            )));
        }
        let mut data = instruction_discriminator(name).to_vec();
        data.extend_from_slice(args);
        Ok(Instruction {
            program_id: self.sessions.program_id(),
            accounts,
            data,
        })
    }

    async fn sign_and_submit(
        &self,
        session: &Session,
        instructions: Vec<Instruction>,
        op: &'static str,
    ) -> Result<Signature> {
        let blockhash = self.ledger.latest_blockhash().await?;
        let message = Message::new_with_blockhash(&instructions, Some(&session.owner), &blockhash);
        let transaction = session
            .wallet
            .sign_transaction(Transaction::new_unsigned(message))
            .await?;

        info!(op, owner = %session.owner, "submitting transaction");
        match timeout(
            self.config.confirmation_timeout,
            self.ledger.send_and_confirm(&transaction),
        )
        .await
        {
            Ok(result) => result.inspect_err(|e| error!(op, "submission failed: {e}")),
            Err(_) => {
                error!(op, "confirmation wait timed out");
                Err(ClientError::TimedOut(op))
            }
        }
    }
}
