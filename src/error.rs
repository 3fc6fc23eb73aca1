use solana_client::client_error::ClientError;
use solana_sdk::transaction::TransactionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Amount must be greater than 0")]
    InvalidAmount(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid base58: {0}")]
    BadBase58(#[from] bs58::decode::Error),

    #[error("{0}")]
    WrongNetwork(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The wallet refused or was unable to sign. The reason is kept for logs
    /// but never shown to the user.
    #[error("Transaction failed")]
    SigningRejected { reason: String },

    #[error("Failed to get recent blockhash: {0}")]
    RecentHashFailed(#[source] ClientError),

    #[error("{0}")]
    SendTransactionFailed(#[source] ClientError),

    #[error("{0}")]
    AirdropFailed(#[source] ClientError),

    #[error("{0}")]
    ConfirmingTransactionFailed(#[source] ClientError),

    #[error("Transaction expired: block height exceeded {last_valid_block_height}")]
    BlockhashExpired { last_valid_block_height: u64 },

    /// Included in a block but rejected by the runtime.
    #[error("Transaction failed")]
    TransactionFailed(TransactionError),

    #[error("Failed to fetch wallet balance")]
    BalanceFailed(#[source] ClientError),
}

impl Error {
    /// Precondition failures are reported before any network call is made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::WalletNotConnected
                | Self::InvalidAmount(_)
                | Self::InvalidInput(_)
                | Self::BadBase58(_)
                | Self::WrongNetwork(_)
                | Self::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::client_error::ClientErrorKind;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(Error::WalletNotConnected.to_string(), "Wallet not connected");
        assert_eq!(
            Error::TransactionFailed(TransactionError::AccountNotFound).to_string(),
            "Transaction failed"
        );
        assert_eq!(
            Error::SigningRejected {
                reason: "User rejected the request".to_string()
            }
            .to_string(),
            "Transaction failed"
        );
        assert_eq!(Error::InvalidAmount(0.0).to_string(), "Amount must be greater than 0");
    }

    #[test]
    fn test_balance_error_hides_transport_detail() {
        let err = Error::BalanceFailed(ClientError::from(ClientErrorKind::Custom(
            "connection refused".to_string(),
        )));
        assert_eq!(err.to_string(), "Failed to fetch wallet balance");
    }

    #[test]
    fn test_send_error_keeps_underlying_message() {
        let err = Error::SendTransactionFailed(ClientError::from(ClientErrorKind::Custom(
            "insufficient funds for rent".to_string(),
        )));
        assert!(err.to_string().contains("insufficient funds for rent"));
        assert!(!err.is_precondition());
    }
}
