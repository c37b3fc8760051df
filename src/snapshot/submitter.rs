use std::time::Duration;

use tokio::time::sleep;

use super::batcher::batches;
use super::Member;
use crate::blockchain::{compute_gas_limit, Address, ContractCallBuilder, NetworkGateway, TransactionBuilder};
use crate::utils::error::Result;
use crate::wallet::{Account, AdminSigner};

/// Contract endpoint taking `(address, weight)` pairs
pub const REGISTER_FUNCTION: &str = "registerMembersSnapshotBatch";
/// Pause after each broadcast
pub const BATCH_PAUSE: Duration = Duration::from_millis(500);

/// `registerMembersSnapshotBatch@<pubkey>@<weight>...` for one batch
pub fn build_register_payload(members: &[Member]) -> Result<Vec<u8>> {
    let mut builder = ContractCallBuilder::new(REGISTER_FUNCTION);
    for member in members {
        let address = Address::from_bech32(&member.address)?;
        builder = builder.add_address(&address).add_biguint(&member.weight);
    }
    log::trace!("{} payload carries {} arguments", REGISTER_FUNCTION, builder.arg_count());
    Ok(builder.build())
}

/// Signs and broadcasts registration batches to the membership contract
pub struct SnapshotSubmitter<'a> {
    gateway: &'a dyn NetworkGateway,
    signer: &'a AdminSigner,
    contract: Address,
    pause: Duration,
}

impl<'a> SnapshotSubmitter<'a> {
    pub fn new(gateway: &'a dyn NetworkGateway, signer: &'a AdminSigner, contract: Address) -> Self {
        Self { gateway, signer, contract, pause: BATCH_PAUSE }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Register `members` in chunks of `batch_size`, in order. Stops at the
    /// first failure; earlier batches stay on chain.
    pub async fn submit_all(
        &self,
        account: &mut Account,
        members: &[Member],
        batch_size: usize,
    ) -> Result<Vec<String>> {
        let chunks: Vec<&[Member]> = batches(members, batch_size).collect();
        let total = chunks.len();
        let mut hashes = Vec::with_capacity(total);

        for (i, chunk) in chunks.into_iter().enumerate() {
            log::info!("Registering members batch {} of {} ...", i + 1, total);
            let hash = self.register_batch(account, chunk).await?;
            log::info!("Batch {} sent: {}", i + 1, hash);
            hashes.push(hash);
            sleep(self.pause).await;
        }
        Ok(hashes)
    }

    /// Build, sign and broadcast one batch using the account's next nonce
    pub async fn register_batch(&self, account: &mut Account, members: &[Member]) -> Result<String> {
        let network = self.gateway.network_config().await?;
        let payload = build_register_payload(members)?;
        let gas_limit = compute_gas_limit(network.gas_per_data_byte, payload.len());
        log::debug!(
            "batch of {} members: {} payload bytes, gas limit {}",
            members.len(),
            payload.len(),
            gas_limit
        );

        let mut tx = TransactionBuilder::new(account.address().clone(), self.contract.clone())
            .data(payload)
            .gas_limit(gas_limit)
            .network(&network)
            .nonce(account.nonce_then_increment())
            .build()?;
        self.signer.sign_transaction(&mut tx)?;

        self.gateway.send_transaction(&tx).await
    }
}
