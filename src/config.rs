use solana_sdk::pubkey::Pubkey;
use std::{env, path::PathBuf, time::Duration};

use crate::{
    error::Error,
    solana::transaction::validate_public_key,
    types::{SolanaNetwork, DEFAULT_RECIPIENT},
};

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub network: SolanaNetwork,
    pub rpc_url: String,
    pub recipient: Pubkey,
    pub keypair_path: PathBuf,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network = match lookup("DONATION_NETWORK") {
            Some(value) => value.parse()?,
            None => SolanaNetwork::default(),
        };

        let rpc_url = lookup("DONATION_RPC_URL").unwrap_or_else(|| network.rpc_url().to_string());

        let recipient = validate_public_key(
            &lookup("DONATION_RECIPIENT").unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
        )
        .map_err(|e| Error::Config(format!("DONATION_RECIPIENT: {}", e)))?;

        let keypair_path = lookup("DONATION_KEYPAIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_keypair_path(lookup("HOME")));

        let poll_interval = match lookup("DONATION_POLL_INTERVAL_MS") {
            Some(ms) => Duration::from_millis(ms.trim().parse().map_err(|_| {
                Error::Config(format!("DONATION_POLL_INTERVAL_MS: '{}' is not a number", ms))
            })?),
            None => Duration::from_millis(500),
        };

        Ok(Self {
            network,
            rpc_url,
            recipient,
            keypair_path,
            poll_interval,
        })
    }
}

fn default_keypair_path(home: Option<String>) -> PathBuf {
    let mut path = home.map(PathBuf::from).unwrap_or_default();
    path.push(".config/solana/id.json");
    path
}
