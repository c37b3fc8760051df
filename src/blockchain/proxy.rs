//! Write-capable gateway client (network parameters and broadcast)

use async_trait::async_trait;
use serde::Deserialize;

use super::http::HttpClient;
use super::transaction::Transaction;
use super::NetworkGateway;
use crate::utils::error::{Error, Result};

const SUCCESS_CODE: &str = "successful";

/// Chain parameters used to build transactions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    #[serde(rename = "erd_chain_id")]
    pub chain_id: String,
    #[serde(rename = "erd_gas_per_data_byte")]
    pub gas_per_data_byte: u64,
    #[serde(rename = "erd_min_gas_price")]
    pub min_gas_price: u64,
    #[serde(rename = "erd_min_transaction_version", default = "default_tx_version")]
    pub min_transaction_version: u32,
}

fn default_tx_version() -> u32 {
    1
}

/// Envelope every gateway response is wrapped in
#[derive(Debug, Deserialize)]
struct GatewayResponse<T> {
    data: Option<T>,
    #[serde(default)]
    error: String,
    #[serde(default)]
    code: String,
}

impl<T> GatewayResponse<T> {
    fn into_data(self, what: &str) -> Result<T> {
        if self.code != SUCCESS_CODE {
            return Err(Error::ApiError(format!("{} failed ({}): {}", what, self.code, self.error)));
        }
        self.data
            .ok_or_else(|| Error::ApiError(format!("{} returned no data", what)))
    }
}

#[derive(Debug, Deserialize)]
struct NetworkConfigData {
    config: NetworkConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendTransactionData {
    tx_hash: String,
}

/// Client for the proxy/gateway
#[derive(Debug, Clone)]
pub struct ProxyProvider {
    http: HttpClient,
}

impl ProxyProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self { http: HttpClient::new(base_url)? })
    }
}

#[async_trait]
impl NetworkGateway for ProxyProvider {
    async fn network_config(&self) -> Result<NetworkConfig> {
        let resp: GatewayResponse<NetworkConfigData> = self.http.get_json("network/config").await?;
        Ok(resp.into_data("network config")?.config)
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<String> {
        if tx.signature.is_none() {
            return Err(Error::WalletError("refusing to broadcast an unsigned transaction".into()));
        }
        let resp: GatewayResponse<SendTransactionData> =
            self.http.post_json("transaction/send", tx).await?;
        Ok(resp.into_data("transaction send")?.tx_hash)
    }
}
