//! Holder snapshot: data model and the scan pipeline

pub mod batcher;
pub mod export;
pub mod scanner;
pub mod submitter;

pub use batcher::{batches, BATCH_SIZE};
pub use scanner::{HolderScanner, MinimumBalance, ScanOptions};
pub use submitter::{SnapshotSubmitter, REGISTER_FUNCTION};

use std::collections::HashSet;

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer};

use crate::blockchain::HolderSource;
use crate::config::SnapshotConfig;
use crate::utils::error::{Error, Result};

/// Raw holder record returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    pub address: String,
    #[serde(deserialize_with = "string_or_number")]
    pub balance: String,
}

impl Candidate {
    pub fn into_member(self) -> Result<Member> {
        let weight = self.balance.trim().parse::<BigUint>().map_err(|e| {
            Error::DataError(format!("balance '{}' of {}: {}", self.balance, self.address, e))
        })?;
        Ok(Member { address: self.address, weight })
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Balance {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Balance::deserialize(deserializer)? {
        | Balance::Text(s) => s,
        | Balance::Number(n) => n.to_string(),
    })
}

/// An address eligible for registration and its snapshot weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub address: String,
    pub weight: BigUint,
}

/// Insertion-ordered members, unique by address
#[derive(Debug, Default)]
pub struct MembershipSet {
    members: Vec<Member>,
    seen: HashSet<String>,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the member unless its address was already seen
    pub fn insert(&mut self, member: Member) -> bool {
        if !self.seen.insert(member.address.clone()) {
            return false;
        }
        self.members.push(member);
        true
    }

    pub fn contains(&self, address: &str) -> bool {
        self.seen.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Member> {
        self.members
    }
}

/// Scan token holders above the threshold, then every SFT holder.
pub async fn take_snapshot(
    source: &dyn HolderSource,
    config: &SnapshotConfig,
    options: ScanOptions,
) -> Result<MembershipSet> {
    let decimals = source.token_decimals(&config.token_id).await?;
    let minimum = MinimumBalance::new(config.min_hold_amount, decimals);
    let scanner = HolderScanner::new(source, options);
    let mut members = MembershipSet::new();

    log::info!(
        "Scanning {} token holders with minimum {} (decimals {}) ...",
        config.token_id,
        config.min_hold_amount,
        decimals
    );
    let added = scanner.scan_token_holders(&config.token_id, &minimum, &mut members).await?;
    log::info!("{} token snapshot completed ({} holders)", config.token_id, added);

    log::info!("Scanning {} SFT holders ...", config.sft_id);
    let added = scanner.scan_sft_holders(&config.sft_id, &mut members).await?;
    log::info!("{} SFT snapshot completed ({} new holders)", config.sft_id, added);

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(address: &str, weight: u64) -> Member {
        Member { address: address.to_string(), weight: BigUint::from(weight) }
    }

    #[test]
    fn test_candidate_from_api_json() {
        let records: Vec<Candidate> = serde_json::from_str(
            r#"[{"address":"erd1a","balance":"1000000000000000000000000000"},{"address":"erd1b","balance":3}]"#,
        )
        .unwrap();
        assert_eq!(records[1].balance, "3");

        let big = records[0].clone().into_member().unwrap();
        assert_eq!(big.weight, "1000000000000000000000000000".parse::<BigUint>().unwrap());
    }

    #[test]
    fn test_candidate_with_bad_balance() {
        let candidate = Candidate { address: "erd1a".into(), balance: "-5".into() };
        assert!(matches!(candidate.into_member(), Err(Error::DataError(_))));
    }

    #[test]
    fn test_membership_set_first_insert_wins() {
        let mut set = MembershipSet::new();
        assert!(set.insert(member("erd1a", 100)));
        assert!(set.insert(member("erd1b", 5)));
        assert!(!set.insert(member("erd1a", 1)));

        assert_eq!(set.len(), 2);
        assert!(set.contains("erd1a"));
        assert_eq!(set.members()[0], member("erd1a", 100));
        assert_eq!(set.into_members(), vec![member("erd1a", 100), member("erd1b", 5)]);
    }
}
