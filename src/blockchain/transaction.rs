use base64::{engine::general_purpose::STANDARD, Engine as _};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::proxy::NetworkConfig;
use super::Address;
use crate::utils::error::{Error, Result};

/// Upper bound on the gas a single transaction may consume
pub const MAX_BLOCK_GAS_LIMIT: u64 = 600_000_000;
/// Fixed gas budget for executing the contract call
pub const BASE_CALL_GAS: u64 = 20_000_000;
/// Execution gas per payload byte, on top of the network's data-byte cost
pub const EXTRA_GAS_PER_DATA_BYTE: u64 = 20_000;

/// `min(MAX_BLOCK_GAS_LIMIT, BASE_CALL_GAS + (gas_per_data_byte + EXTRA_GAS_PER_DATA_BYTE) * payload_len)`
pub fn compute_gas_limit(gas_per_data_byte: u64, payload_len: usize) -> u64 {
    let per_byte = gas_per_data_byte.saturating_add(EXTRA_GAS_PER_DATA_BYTE);
    BASE_CALL_GAS
        .saturating_add(per_byte.saturating_mul(payload_len as u64))
        .min(MAX_BLOCK_GAS_LIMIT)
}

/// Builder for `function@arg@arg...` contract-call payloads
#[derive(Debug, Clone)]
pub struct ContractCallBuilder {
    function: String,
    args: Vec<String>,
}

impl ContractCallBuilder {
    pub fn new(function: impl Into<String>) -> Self {
        Self { function: function.into(), args: Vec::new() }
    }

    pub fn add_address(mut self, address: &Address) -> Self {
        self.args.push(address.to_hex());
        self
    }

    /// Minimal big-endian hex; zero is the empty argument
    pub fn add_biguint(mut self, value: &BigUint) -> Self {
        let arg = if value.bits() == 0 { String::new() } else { hex::encode(value.to_bytes_be()) };
        self.args.push(arg);
        self
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = self.function;
        for arg in &self.args {
            data.push('@');
            data.push_str(arg);
        }
        data.into_bytes()
    }
}

/// A transaction in the gateway's JSON shape. Field order is the signing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub nonce: u64,
    pub value: String,
    pub receiver: String,
    pub sender: String,
    pub gas_price: u64,
    pub gas_limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Transaction {
    /// Canonical bytes the sender signs: the JSON form without the signature
    pub fn serialize_for_signing(&self) -> Result<Vec<u8>> {
        let unsigned = Transaction { signature: None, ..self.clone() };
        Ok(serde_json::to_vec(&unsigned)?)
    }

    pub fn apply_signature(&mut self, signature: &[u8]) {
        self.signature = Some(hex::encode(signature));
    }

    /// Decoded payload bytes
    pub fn data_bytes(&self) -> Result<Vec<u8>> {
        match &self.data {
            | Some(encoded) => STANDARD
                .decode(encoded)
                .map_err(|e| Error::DataError(format!("transaction data is not base64: {}", e))),
            | None => Ok(Vec::new()),
        }
    }
}

/// Builder for transactions
pub struct TransactionBuilder {
    sender: Address,
    receiver: Address,
    data: Vec<u8>,
    nonce: u64,
    gas_limit: Option<u64>,
    gas_price: u64,
    chain_id: Option<String>,
    version: u32,
}

impl TransactionBuilder {
    /// Create a new zero-value transaction builder
    pub fn new(sender: Address, receiver: Address) -> Self {
        Self {
            sender,
            receiver,
            data: Vec::new(),
            nonce: 0,
            gas_limit: None,
            gas_price: 1_000_000_000,
            chain_id: None,
            version: 1,
        }
    }

    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Take chain id, gas price and version from the network configuration
    pub fn network(mut self, config: &NetworkConfig) -> Self {
        self.chain_id = Some(config.chain_id.clone());
        self.gas_price = config.min_gas_price;
        self.version = config.min_transaction_version;
        self
    }

    /// Build the unsigned transaction
    pub fn build(self) -> Result<Transaction> {
        let chain_id = self
            .chain_id
            .ok_or_else(|| Error::Other("No chain id provided".into()))?;
        let gas_limit = self
            .gas_limit
            .ok_or_else(|| Error::Other("No gas limit provided".into()))?;
        let data = if self.data.is_empty() { None } else { Some(STANDARD.encode(&self.data)) };

        Ok(Transaction {
            nonce: self.nonce,
            value: "0".to_string(),
            receiver: self.receiver.to_string(),
            sender: self.sender.to_string(),
            gas_price: self.gas_price,
            gas_limit,
            data,
            chain_id,
            version: self.version,
            signature: None,
        })
    }
}
