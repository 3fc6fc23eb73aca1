use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::{fmt, str::FromStr};

use crate::{
    error::Error,
    solana::transaction::{checked_sol_to_lamports, lamports_to_sol, sol_to_lamports},
};

/// Every donation settles to this account unless configuration overrides it.
pub const DEFAULT_RECIPIENT: &str = "DfLZXdQ5bPnxgnU8EvdG5pWfuEFBUBWxV8GJqKvqPUvZ";

/// Amounts offered on the first donation step, in SOL.
pub const PRESET_AMOUNTS: [f64; 4] = [5.0, 10.0, 25.0, 50.0];

/// Flat fee shown on the confirmation step (one signature).
pub const NETWORK_FEE_LAMPORTS: u64 = 5_000;

/// Size of a single devnet faucet grant.
pub const AIRDROP_LAMPORTS: u64 = 2 * solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Network configuration for donation operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SolanaNetwork {
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
    #[default]
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "testnet")]
    Testnet,
}

impl SolanaNetwork {
    /// Get the RPC URL for the network
    pub fn rpc_url(&self) -> &'static str {
        match self {
            SolanaNetwork::MainnetBeta => "https://api.mainnet-beta.solana.com",
            SolanaNetwork::Devnet => "https://api.devnet.solana.com",
            SolanaNetwork::Testnet => "https://api.testnet.solana.com",
        }
    }

    pub fn supports_airdrop(&self) -> bool {
        !matches!(self, SolanaNetwork::MainnetBeta)
    }
}

impl fmt::Display for SolanaNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolanaNetwork::MainnetBeta => "mainnet-beta",
            SolanaNetwork::Devnet => "devnet",
            SolanaNetwork::Testnet => "testnet",
        };
        f.write_str(name)
    }
}

impl FromStr for SolanaNetwork {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(SolanaNetwork::MainnetBeta),
            "devnet" => Ok(SolanaNetwork::Devnet),
            "testnet" => Ok(SolanaNetwork::Testnet),
            other => Err(Error::Config(format!("unknown network '{}'", other))),
        }
    }
}

/// A donation amount in SOL that is known to be positive.
///
/// The donation flow only accepts this type, so a transfer can never be
/// built from zero, a negative number or a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DonationAmount(f64);

impl DonationAmount {
    pub fn new(sol: f64) -> Result<Self, Error> {
        if !sol.is_finite() || sol <= 0.0 {
            return Err(Error::InvalidAmount(sol));
        }
        match checked_sol_to_lamports(sol) {
            // Below one lamport; the transfer would move nothing.
            Some(0) => Err(Error::InvalidAmount(sol)),
            Some(_) => Ok(Self(sol)),
            None => Err(Error::InvalidInput(format!(
                "{} SOL exceeds the largest transferable amount",
                sol
            ))),
        }
    }

    pub fn sol(&self) -> f64 {
        self.0
    }

    pub fn lamports(&self) -> u64 {
        sol_to_lamports(self.0)
    }
}

impl FromStr for DonationAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sol: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", s)))?;
        Self::new(sol)
    }
}

/// What the confirmation step shows before the wallet is asked to sign.
#[derive(Debug, Clone, Serialize)]
pub struct DonationQuote {
    pub amount: f64,
    pub network_fee: f64,
    pub total: f64,
}

impl DonationQuote {
    pub fn new(amount: DonationAmount) -> Result<Self, Error> {
        let total_lamports = amount
            .lamports()
            .checked_add(NETWORK_FEE_LAMPORTS)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "{} SOL plus the network fee exceeds the largest transferable amount",
                    amount.sol()
                ))
            })?;
        Ok(Self {
            amount: amount.sol(),
            network_fee: lamports_to_sol(NETWORK_FEE_LAMPORTS),
            total: lamports_to_sol(total_lamports),
        })
    }
}

/// A single transfer attempt. Built fresh for every donation, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub lamports: u64,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonationReceipt {
    #[serde(with = "display_string")]
    pub signature: Signature,
    #[serde(with = "display_string")]
    pub donor: Pubkey,
    #[serde(with = "display_string")]
    pub recipient: Pubkey,
    pub amount: f64,
    pub memo: Option<String>,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirdropReceipt {
    #[serde(with = "display_string")]
    pub signature: Signature,
    #[serde(with = "display_string")]
    pub account: Pubkey,
    pub amount: f64,
    pub network: SolanaNetwork,
    pub confirmed_at: DateTime<Utc>,
}

mod display_string {
    use serde::Serializer;
    use std::fmt::Display;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}
