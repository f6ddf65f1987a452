//! Virtual Pet Console
//!
//! Thin command-line consumer of the pet-client library: binds a session
//! from a local keypair wallet, runs one action, and prints the refreshed
//! snapshot. All orchestration logic lives in the library.

use anyhow::{Context, Result, bail};
use pet_client::{ClientConfig, KeypairWallet, PetClient, ProgramDescriptor};
use solana_sdk::signature::Keypair;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: pet-console <command>\n\
    commands:\n\
      status                 print the current snapshot\n\
      init                   create your pet\n\
      feed <item-id>         feed the pet a catalog item\n\
      play                   play with the pet\n\
      earn                   earn reward coins\n\
      buy <item-id>          simulated shop purchase (no settlement)\n\
      request <pubkey>       request ownership of another holder's pet\n\
      accept <from-pubkey>   accept an inbound ownership request\n\
      reject <from-pubkey>   reject an inbound ownership request";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        bail!("{USAGE}");
    };

    let config = ClientConfig::from_env()?;
    let descriptor = match std::env::var("PET_PROGRAM_DESCRIPTOR") {
        Ok(path) => ProgramDescriptor::from_path(&path)?,
        Err(_) => ProgramDescriptor::bundled()?,
    };

    let client = PetClient::connect(config, descriptor)?;
    let wallet = Arc::new(load_wallet()?);
    let session = client.sessions().bind(wallet).await?;
    info!(owner = %session.owner, "wallet bound");

    match (command, args.get(1)) {
        ("status", _) => {}
        ("init", _) => {
            let signature = client.orchestrator().initialize_pet().await?;
            info!(%signature, "pet initialized");
        }
        ("feed", Some(raw)) => {
            let item_id = raw.parse().context("item id must be a small integer")?;
            let signature = client.orchestrator().feed_pet(item_id).await?;
            info!(%signature, "pet fed");
        }
        ("play", _) => {
            let signature = client.orchestrator().play_with_pet().await?;
            info!(%signature, "played with pet");
        }
        ("earn", _) => {
            let signature = client.orchestrator().earn_coins().await?;
            info!(%signature, "coins earned");
        }
        ("buy", Some(raw)) => {
            let item_id = raw.parse().context("item id must be a small integer")?;
            let snapshot = client.synchronizer().refresh(&session.owner).await?;
            let receipt = pet_client::SimulatedShop::buy(item_id, &snapshot)?;
            info!(item = receipt.item.name, price = receipt.price, "simulated purchase");
        }
        ("request", Some(to)) => {
            let signature = client.handshake().request(to).await?;
            info!(%signature, "ownership requested");
        }
        ("accept" | "reject", Some(raw)) => {
            let from = pet_client::pda::parse_key(raw)?;
            let request = client
                .reader()
                .ownership_request(&from, &session.owner)
                .await?
                .context("no ownership request from that key")?;
            let accept = command == "accept";
            let signature = client.handshake().respond(&request, accept).await?;
            info!(%signature, accept, "request resolved");
        }
        _ => bail!("{USAGE}"),
    }

    let snapshot = client.synchronizer().refresh(&session.owner).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Load the signing wallet from `WALLET_PATH` (a Solana CLI style JSON
/// byte-array keyfile)
fn load_wallet() -> Result<KeypairWallet> {
    let path = std::env::var("WALLET_PATH")
        .unwrap_or_else(|_| "~/.config/solana/id.json".to_string());
    let path = shellexpand::tilde(&path).to_string();
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read wallet keyfile {path}"))?;
    let bytes: Vec<u8> = serde_json::from_str(&raw).context("wallet keyfile is not a JSON byte array")?;
    let keypair = Keypair::from_bytes(&bytes).context("wallet keyfile holds no valid keypair")?;
    Ok(KeypairWallet::new(keypair))
}
