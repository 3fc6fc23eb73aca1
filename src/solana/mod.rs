//! # Solana Integration Module
//!
//! RPC access and transaction construction:
//! - `client`: the `ChainRpc` seam and its JSON-RPC implementation
//! - `transaction`: transfer building and unit conversion

pub mod client;
pub mod transaction;

pub use client::{AsyncRpcClient, ChainRpc, Confirmation};
pub use transaction::*;
