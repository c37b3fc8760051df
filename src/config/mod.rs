//! Environment configuration loaded from the mxpy data-storage file

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::blockchain::Address;
use crate::utils::error::{Error, Result};
use crate::utils::read_file;

/// Default location of the configuration store
pub const DEFAULT_CONFIG_PATH: &str = "mxpy.data-storage.json";

/// One environment section as it appears in the file. Other keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawEnvironment {
    api: Option<String>,
    proxy: Option<String>,
    #[serde(rename = "itheum-tokenid")]
    token_id: Option<String>,
    #[serde(rename = "itheum-min-hold-amount")]
    min_hold_amount: Option<Value>,
    #[serde(rename = "trailblazer-nftid")]
    sft_id: Option<String>,
    #[serde(rename = "contract-address")]
    contract_address: Option<String>,
}

/// Validated settings for one snapshot run
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotConfig {
    /// Name of the selected environment section
    pub env: String,
    /// API base URL (holder and account queries)
    pub api_url: String,
    /// Proxy base URL (network config and broadcast)
    pub proxy_url: String,
    /// Fungible token identifier
    pub token_id: String,
    /// Minimum human-readable token balance for inclusion
    pub min_hold_amount: Decimal,
    /// Semi-fungible token identifier
    pub sft_id: String,
    /// Membership contract receiving the batches
    pub contract_address: Address,
}

impl SnapshotConfig {
    /// Load the `env` section from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P, env: &str) -> Result<Self> {
        let content = read_file(path)?;
        Self::from_json_str(&content, env)
    }

    pub fn from_json_str(content: &str, env: &str) -> Result<Self> {
        if env.trim().is_empty() {
            return Err(Error::ConfigError("no environment given".into()));
        }
        let mut sections: HashMap<String, Value> = serde_json::from_str(content)?;
        let section = sections
            .remove(env)
            .ok_or_else(|| Error::ConfigError(format!("environment '{}' not found", env)))?;
        let raw: RawEnvironment = serde_json::from_value(section)
            .map_err(|e| Error::ConfigError(format!("malformed section: {}", e)))?;

        let min_hold_amount = raw
            .min_hold_amount
            .as_ref()
            .ok_or_else(|| missing("itheum-min-hold-amount"))
            .and_then(parse_amount)?;
        let contract = required(raw.contract_address, "contract-address")?;
        let contract_address = Address::from_bech32(&contract)
            .map_err(|e| Error::ConfigError(format!("contract-address: {}", e)))?;

        Ok(Self {
            env: env.to_string(),
            api_url: required(raw.api, "api")?,
            proxy_url: required(raw.proxy, "proxy")?,
            token_id: required(raw.token_id, "itheum-tokenid")?,
            min_hold_amount,
            sft_id: required(raw.sft_id, "trailblazer-nftid")?,
            contract_address,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::ConfigError(format!("missing '{}'", field))
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        | Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        | _ => Err(missing(field)),
    }
}

/// Accepts a JSON number or a numeric string
fn parse_amount(value: &Value) -> Result<Decimal> {
    let text = match value {
        | Value::Number(n) => n.to_string(),
        | Value::String(s) => s.trim().to_string(),
        | other => {
            return Err(Error::ConfigError(format!(
                "itheum-min-hold-amount must be a number, got {}",
                other
            )))
        }
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| Error::ConfigError(format!("itheum-min-hold-amount '{}': {}", text, e)))
}
