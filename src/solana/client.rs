use async_trait::async_trait;
use solana_client::{client_error::ClientError, nonblocking::rpc_client::RpcClient};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// Terminal state of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    /// Landed in a block but the runtime rejected it.
    Failed(TransactionError),
    /// The blockhash it was built on expired before it landed.
    Expired,
}

/// The node operations the donation flows depend on.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ClientError>;

    /// Latest blockhash and the last block height at which it is still valid.
    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), ClientError>;

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError>;

    /// Wait until `signature` reaches a terminal state or the chain passes
    /// `last_valid_block_height`.
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
    ) -> Result<Confirmation, ClientError>;

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature, ClientError>;
}

#[async_trait]
impl<T: ChainRpc + ?Sized> ChainRpc for Arc<T> {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ClientError> {
        (**self).get_balance(pubkey).await
    }

    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), ClientError> {
        (**self).get_latest_blockhash().await
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError> {
        (**self).send_transaction(transaction).await
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
    ) -> Result<Confirmation, ClientError> {
        (**self)
            .confirm_transaction(signature, last_valid_block_height)
            .await
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature, ClientError> {
        (**self).request_airdrop(pubkey, lamports).await
    }
}

/// Solana JSON-RPC client used by the flows.
pub struct AsyncRpcClient {
    client: RpcClient,
    poll_interval: Duration,
}

impl AsyncRpcClient {
    pub fn new(url: String) -> Self {
        Self::with_poll_interval(url, Duration::from_millis(500))
    }

    pub fn with_poll_interval(url: String, poll_interval: Duration) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url, CommitmentConfig::confirmed()),
            poll_interval,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

#[async_trait]
impl ChainRpc for AsyncRpcClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ClientError> {
        self.client.get_balance(pubkey).await
    }

    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), ClientError> {
        self.client
            .get_latest_blockhash_with_commitment(self.client.commitment())
            .await
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError> {
        self.client.send_transaction(transaction).await
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
    ) -> Result<Confirmation, ClientError> {
        let commitment = self.client.commitment();
        loop {
            if let Some(status) = self
                .client
                .get_signature_status_with_commitment(signature, commitment)
                .await?
            {
                return Ok(match status {
                    Ok(()) => Confirmation::Confirmed,
                    Err(err) => Confirmation::Failed(err),
                });
            }

            let block_height = self.client.get_block_height_with_commitment(commitment).await?;
            if block_height > last_valid_block_height {
                return Ok(Confirmation::Expired);
            }

            debug!(
                "Waiting for {} at block height {} (valid until {})",
                signature, block_height, last_valid_block_height
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> Result<Signature, ClientError> {
        self.client.request_airdrop(pubkey, lamports).await
    }
}
