//! # Wallet Sessions
//!
//! A wallet session is the authority that approves transfers for a user's
//! account. Flows receive it as an argument; nothing here is global.

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
    transaction::Transaction,
};
use std::path::Path;
use tracing::info;

use crate::error::Error;

#[async_trait]
pub trait WalletSession: Send + Sync {
    /// The connected account, if any.
    fn public_key(&self) -> Option<Pubkey>;

    /// Sign `transaction` as its fee payer. Implementations may prompt the
    /// user, and a refusal is reported as [`Error::SigningRejected`].
    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction, Error>;
}

/// A session backed by a local Solana keypair.
#[derive(Default)]
pub struct KeypairWallet {
    keypair: Option<Keypair>,
}

impl KeypairWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a Solana CLI keypair file and connect it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            Error::Config(format!("failed to read keypair {}: {}", path.display(), e))
        })?;
        let mut wallet = Self::new();
        wallet.connect(keypair);
        Ok(wallet)
    }

    pub fn connect(&mut self, keypair: Keypair) {
        info!("Wallet connected: {}", keypair.pubkey());
        self.keypair = Some(keypair);
    }

    pub fn disconnect(&mut self) {
        if let Some(keypair) = self.keypair.take() {
            info!("Wallet disconnected: {}", keypair.pubkey());
        }
    }

    pub fn is_connected(&self) -> bool {
        self.keypair.is_some()
    }
}

#[async_trait]
impl WalletSession for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(|k| k.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction, Error> {
        let keypair = self.keypair.as_ref().ok_or(Error::WalletNotConnected)?;
        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_sign(&[keypair], blockhash)
            .map_err(|e| Error::SigningRejected {
                reason: e.to_string(),
            })?;
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::transaction::create_transfer_tx;
    use crate::types::TransferRequest;
    use solana_sdk::hash::Hash;

    #[test]
    fn test_connect_disconnect_lifecycle() {
        let mut wallet = KeypairWallet::new();
        assert!(wallet.public_key().is_none());

        let keypair = Keypair::new();
        let expected = keypair.pubkey();
        wallet.connect(keypair);
        assert_eq!(wallet.public_key(), Some(expected));

        wallet.disconnect();
        assert!(!wallet.is_connected());
        assert!(wallet.public_key().is_none());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let keypair = Keypair::new();
        let file = tempfile::NamedTempFile::new().unwrap();
        solana_sdk::signature::write_keypair_file(&keypair, file.path()).unwrap();

        let wallet = KeypairWallet::from_file(file.path()).unwrap();
        assert_eq!(wallet.public_key(), Some(keypair.pubkey()));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            KeypairWallet::from_file("/nonexistent/id.json"),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_transfer() {
        let mut wallet = KeypairWallet::new();
        wallet.connect(Keypair::new());
        let sender = wallet.public_key().unwrap();

        let tx = create_transfer_tx(
            &TransferRequest {
                sender,
                recipient: Pubkey::new_unique(),
                lamports: 1,
                memo: None,
            },
            Hash::new_unique(),
        );

        let signed = wallet.sign_transaction(tx).await.unwrap();
        assert!(signed.is_signed());
        assert!(signed.verify().is_ok());
    }

    #[tokio::test]
    async fn test_foreign_fee_payer_is_rejected() {
        let mut wallet = KeypairWallet::new();
        wallet.connect(Keypair::new());

        let tx = create_transfer_tx(
            &TransferRequest {
                sender: Pubkey::new_unique(),
                recipient: Pubkey::new_unique(),
                lamports: 1,
                memo: None,
            },
            Hash::new_unique(),
        );

        assert!(matches!(
            wallet.sign_transaction(tx).await,
            Err(Error::SigningRejected { .. })
        ));
    }
}
