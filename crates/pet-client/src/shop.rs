//! Item catalog and simulated shop
//!
//! The item catalog is client-local and purchases do not settle on the
//! ledger. Whether purchases are meant to be on-chain is an unresolved
//! question upstream, so the whole surface lives behind this explicitly
//! simulated boundary: `buy` validates against the latest snapshot
//! balance and reports a simulated receipt, and nothing here ever
//! submits a transaction. Feeding a pet does go through the
//! orchestrator; only the purchase side is simulated.

use crate::core::{ClientError, Result};
use crate::sync::Snapshot;
use serde::Serialize;
use tracing::warn;

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: u8,
    pub name: &'static str,
    pub health_effect: u8,
    pub happiness_effect: u8,
    pub price: u64,
}

/// The static catalog
pub fn catalog() -> Vec<Item> {
    vec![
        Item {
            id: 1,
            name: "Healthy Food",
            health_effect: 20,
            happiness_effect: 5,
            price: 10,
        },
        Item {
            id: 2,
            name: "Treat",
            health_effect: 5,
            happiness_effect: 15,
            price: 8,
        },
        Item {
            id: 3,
            name: "Toy",
            health_effect: 0,
            happiness_effect: 25,
            price: 15,
        },
    ]
}

pub fn find_item(id: u8) -> Option<Item> {
    catalog().into_iter().find(|item| item.id == id)
}

/// Receipt for a simulated purchase. Carries no settlement guarantee.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedPurchase {
    pub item: Item,
    pub price: u64,
}

/// The simulation boundary for the purchase flow
pub struct SimulatedShop;

impl SimulatedShop {
    /// Validate a purchase against the latest snapshot. No ledger
    /// transaction is built or submitted.
    pub fn buy(item_id: u8, snapshot: &Snapshot) -> Result<SimulatedPurchase> {
        let item =
            find_item(item_id).ok_or_else(|| ClientError::NotFound(format!("item {item_id}")))?;
        if snapshot.coin_balance < item.price {
            return Err(ClientError::Failed(format!(
                "insufficient coin balance: have {}, item costs {}",
                snapshot.coin_balance, item.price
            )));
        }
        warn!(
            item = item.name,
            price = item.price,
            "simulated purchase only, no ledger settlement was performed"
        );
        Ok(SimulatedPurchase {
            price: item.price,
            item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_balance(coin_balance: u64) -> Snapshot {
        Snapshot {
            pet: None,
            coin_balance,
            items: catalog(),
            pending_requests: Vec::new(),
        }
    }

    #[test]
    fn unknown_item_is_not_found() {
        let err = SimulatedShop::buy(99, &snapshot_with_balance(1000)).unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[test]
    fn purchase_requires_sufficient_balance() {
        let err = SimulatedShop::buy(3, &snapshot_with_balance(14)).unwrap_err();
        assert!(matches!(err, ClientError::Failed(_)));

        let receipt = SimulatedShop::buy(3, &snapshot_with_balance(15)).unwrap();
        assert_eq!(receipt.item.name, "Toy");
        assert_eq!(receipt.price, 15);
    }
}
