//! Read-only client for the indexing API (holders, token definitions, accounts)

use async_trait::async_trait;
use serde::Deserialize;

use super::http::HttpClient;
use super::{AccountSource, Address, HolderSource};
use crate::snapshot::Candidate;
use crate::utils::error::Result;

/// Subset of the token definition the snapshot needs
#[derive(Debug, Clone, Deserialize)]
pub struct TokenDefinition {
    pub identifier: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct AccountOnNetwork {
    nonce: u64,
}

/// Client for the REST API
#[derive(Debug, Clone)]
pub struct ApiProvider {
    http: HttpClient,
}

impl ApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self { http: HttpClient::new(base_url)? })
    }

    pub async fn token_definition(&self, token_id: &str) -> Result<TokenDefinition> {
        self.http.get_json(&format!("tokens/{}", token_id)).await
    }
}

#[async_trait]
impl HolderSource for ApiProvider {
    async fn token_decimals(&self, token_id: &str) -> Result<u32> {
        Ok(self.token_definition(token_id).await?.decimals)
    }

    async fn token_holders(&self, token_id: &str, from: usize, size: usize) -> Result<Vec<Candidate>> {
        self.http
            .get_json(&format!("tokens/{}/accounts?from={}&size={}", token_id, from, size))
            .await
    }

    async fn sft_holders(&self, sft_id: &str, from: usize, size: usize) -> Result<Vec<Candidate>> {
        self.http
            .get_json(&format!(
                "nfts/{}/accounts?includeFlagged=true&from={}&size={}",
                sft_id, from, size
            ))
            .await
    }
}

#[async_trait]
impl AccountSource for ApiProvider {
    async fn account_nonce(&self, address: &Address) -> Result<u64> {
        let account: AccountOnNetwork =
            self.http.get_json(&format!("accounts/{}", address)).await?;
        Ok(account.nonce)
    }
}
