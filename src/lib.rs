//! # Donation Client
//!
//! Client-side flows for a Solana devnet donation site:
//! - Donation submission: a SOL transfer to the donation account, signed by
//!   the caller's wallet session and confirmed against its blockhash expiry
//! - Balance query for a connected account
//! - Devnet airdrop of test funds
//!
//! Every flow takes its RPC handle and wallet session as arguments and
//! returns a single `Result`.
//!
//! ```no_run
//! use donation_client::{flows, AsyncRpcClient, DonationAmount, KeypairWallet, DEFAULT_RECIPIENT};
//!
//! # async fn run() -> Result<(), donation_client::Error> {
//! let rpc = AsyncRpcClient::new("https://api.devnet.solana.com".to_string());
//! let wallet = KeypairWallet::from_file("id.json")?;
//! let recipient = donation_client::validate_public_key(DEFAULT_RECIPIENT)?;
//!
//! let receipt =
//!     flows::send_donation(&rpc, &wallet, &recipient, DonationAmount::new(0.5)?, None).await?;
//! println!("donated: {}", receipt.signature);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod flows;
pub mod solana;
pub mod types;
pub mod wallet;


pub use cli::DonationCli;
pub use config::Config;
pub use error::Error;
pub use solana::{
    client::{AsyncRpcClient, ChainRpc, Confirmation},
    transaction::{
        create_transfer_tx, format_balance, lamports_to_sol, sol_to_lamports, validate_public_key,
    },
};
pub use types::{
    AirdropReceipt, DonationAmount, DonationQuote, DonationReceipt, SolanaNetwork, TransferRequest,
    AIRDROP_LAMPORTS, DEFAULT_RECIPIENT, NETWORK_FEE_LAMPORTS, PRESET_AMOUNTS,
};
pub use wallet::{KeypairWallet, WalletSession};

pub use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};
