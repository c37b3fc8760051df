//! Blockchain interaction module

pub mod address;
pub mod api;
mod http;
pub mod proxy;
pub mod transaction;

pub use address::{Address, PUBKEY_LEN};
pub use api::ApiProvider;
pub use http::REQUEST_TIMEOUT;
pub use proxy::{NetworkConfig, ProxyProvider};
pub use transaction::*;

use async_trait::async_trait;

use crate::snapshot::Candidate;
use crate::Result;

/// Paginated source of asset holders
#[async_trait]
pub trait HolderSource: Send + Sync {
    /// Decimal precision of a fungible token
    async fn token_decimals(&self, token_id: &str) -> Result<u32>;

    /// One page of fungible-token holders starting at offset `from`
    async fn token_holders(&self, token_id: &str, from: usize, size: usize) -> Result<Vec<Candidate>>;

    /// One page of semi-fungible-token holders, flagged accounts included
    async fn sft_holders(&self, sft_id: &str, from: usize, size: usize) -> Result<Vec<Candidate>>;
}

/// On-chain account lookups
#[async_trait]
pub trait AccountSource: Send + Sync {
    async fn account_nonce(&self, address: &Address) -> Result<u64>;
}

/// Network parameters and transaction broadcast
#[async_trait]
pub trait NetworkGateway: Send + Sync {
    async fn network_config(&self) -> Result<NetworkConfig>;

    /// Broadcast a signed transaction, returning its hash
    async fn send_transaction(&self, tx: &transaction::Transaction) -> Result<String>;
}
