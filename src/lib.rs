//! # Snapshot registrar
//! Snapshots fungible-token and SFT holders and registers them, in signed
//! batches, with a membership contract.

pub use crate::utils::error::{Error, Result};

pub mod blockchain;
pub mod config;
pub mod snapshot;
pub mod utils;
pub mod wallet;
