use std::time::Duration;

use num_bigint::BigUint;
use rust_decimal::Decimal;
use tokio::time::sleep;

use super::{Candidate, MembershipSet};
use crate::blockchain::HolderSource;
use crate::utils::error::Result;

/// Holders requested per page
pub const PAGE_SIZE: usize = 1000;
/// Hard cap on pages fetched per asset
pub const MAX_PAGES: usize = 10;
/// Pause after each non-empty page
pub const PAGE_PAUSE: Duration = Duration::from_millis(500);

/// Pagination settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub page_size: usize,
    pub max_pages: usize,
    pub pause: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE, max_pages: MAX_PAGES, pause: PAGE_PAUSE }
    }
}

/// `raw / 10^decimals >= minimum`, compared exactly as
/// `raw * 10^scale >= mantissa * 10^decimals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumBalance {
    raw_factor: BigUint,
    threshold: BigUint,
    always: bool,
}

impl MinimumBalance {
    pub fn new(minimum: Decimal, decimals: u32) -> Self {
        if minimum <= Decimal::ZERO {
            return Self { raw_factor: BigUint::from(1u32), threshold: BigUint::default(), always: true };
        }
        let ten = BigUint::from(10u32);
        let mantissa = BigUint::from(minimum.mantissa().unsigned_abs());
        Self {
            raw_factor: ten.pow(minimum.scale()),
            threshold: mantissa * ten.pow(decimals),
            always: false,
        }
    }

    pub fn is_met_by(&self, raw_balance: &BigUint) -> bool {
        self.always || raw_balance * &self.raw_factor >= self.threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetKind {
    Token,
    Sft,
}

/// Pages through holder endpoints and feeds a [`MembershipSet`]
pub struct HolderScanner<'a> {
    source: &'a dyn HolderSource,
    options: ScanOptions,
}

impl<'a> HolderScanner<'a> {
    pub fn new(source: &'a dyn HolderSource, options: ScanOptions) -> Self {
        Self { source, options }
    }

    /// Adds fungible-token holders meeting `minimum`; returns how many were new.
    pub async fn scan_token_holders(
        &self,
        token_id: &str,
        minimum: &MinimumBalance,
        members: &mut MembershipSet,
    ) -> Result<usize> {
        self.scan(AssetKind::Token, token_id, Some(minimum), members).await
    }

    /// Adds every semi-fungible-token holder; returns how many were new.
    pub async fn scan_sft_holders(&self, sft_id: &str, members: &mut MembershipSet) -> Result<usize> {
        self.scan(AssetKind::Sft, sft_id, None, members).await
    }

    async fn scan(
        &self,
        kind: AssetKind,
        asset_id: &str,
        minimum: Option<&MinimumBalance>,
        members: &mut MembershipSet,
    ) -> Result<usize> {
        let mut added = 0;
        for page in 1..=self.options.max_pages {
            let from = (page - 1) * self.options.page_size;
            let candidates = self.fetch_page(kind, asset_id, from).await?;
            if candidates.is_empty() {
                break;
            }
            log::debug!("{} page {}: {} holders", asset_id, page, candidates.len());

            for candidate in candidates {
                let member = candidate.into_member()?;
                if minimum.map_or(true, |min| min.is_met_by(&member.weight)) && members.insert(member) {
                    added += 1;
                }
            }

            sleep(self.options.pause).await;
        }
        Ok(added)
    }

    async fn fetch_page(&self, kind: AssetKind, asset_id: &str, from: usize) -> Result<Vec<Candidate>> {
        match kind {
            | AssetKind::Token => self.source.token_holders(asset_id, from, self.options.page_size).await,
            | AssetKind::Sft => self.source.sft_holders(asset_id, from, self.options.page_size).await,
        }
    }
}
