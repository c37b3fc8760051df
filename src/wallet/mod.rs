//! Administrative signing key and the account it controls

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer, SigningKey};

use crate::blockchain::{Address, Transaction, PUBKEY_LEN};
use crate::utils::error::{Error, Result};
use crate::utils::read_file;

/// Default location of the administrative key, relative to the working directory
pub const DEFAULT_PEM_PATH: &str = "wallets/admin.pem";

/// ed25519 signer loaded from a wallet PEM file
pub struct AdminSigner {
    signing_key: SigningKey,
    address: Address,
}

impl AdminSigner {
    pub fn from_pem_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = read_file(path)?;
        Self::from_pem(&contents)
    }

    /// Parse the first key block of a wallet PEM. The block body is base64 of
    /// the hex-encoded seed, optionally followed by the hex public key.
    pub fn from_pem(contents: &str) -> Result<Self> {
        let body: String = contents
            .lines()
            .map(str::trim)
            .skip_while(|line| !line.starts_with("-----BEGIN"))
            .skip(1)
            .take_while(|line| !line.starts_with("-----END"))
            .collect();
        if body.is_empty() {
            return Err(Error::WalletError("no key block found in PEM".into()));
        }

        let hex_key = STANDARD
            .decode(body.as_bytes())
            .map_err(|e| Error::WalletError(format!("PEM body is not base64: {}", e)))?;
        let key = hex::decode(&hex_key)
            .map_err(|e| Error::WalletError(format!("PEM key is not hex: {}", e)))?;
        if key.len() != PUBKEY_LEN && key.len() != 2 * PUBKEY_LEN {
            return Err(Error::WalletError(format!("unexpected key length {}", key.len())));
        }

        let mut seed = [0u8; PUBKEY_LEN];
        seed.copy_from_slice(&key[..PUBKEY_LEN]);
        let signing_key = SigningKey::from_bytes(&seed);
        let pubkey = signing_key.verifying_key().to_bytes();
        if key.len() == 2 * PUBKEY_LEN && key[PUBKEY_LEN..] != pubkey[..] {
            return Err(Error::WalletError("public key does not match secret key".into()));
        }

        Ok(Self { signing_key, address: Address::from_pubkey(pubkey)? })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Sign the canonical encoding and attach the signature
    pub fn sign_transaction(&self, tx: &mut Transaction) -> Result<()> {
        if tx.sender != self.address.as_bech32() {
            return Err(Error::WalletError(format!(
                "transaction sender {} is not the signer {}",
                tx.sender, self.address
            )));
        }
        let signature = self.sign(&tx.serialize_for_signing()?);
        tx.apply_signature(&signature);
        Ok(())
    }
}

/// Local view of an account's sequence number
#[derive(Debug, Clone)]
pub struct Account {
    address: Address,
    nonce: u64,
}

impl Account {
    pub fn new(address: Address, nonce: u64) -> Self {
        Self { address, nonce }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Current nonce, advancing the local counter
    pub fn nonce_then_increment(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce += 1;
        nonce
    }
}
