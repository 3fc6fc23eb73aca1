use chrono::Utc;
use solana_sdk::pubkey::Pubkey;
use tracing::{error, info};

use crate::{
    error::Error,
    solana::{client::ChainRpc, transaction::create_transfer_tx, Confirmation},
    types::{DonationAmount, DonationReceipt, TransferRequest},
    wallet::WalletSession,
};

/// Transfer `amount` from the connected wallet to `recipient` and wait for
/// the network to settle it.
///
/// Nothing is validated beyond the connected account: solvency and any other
/// transfer rules are left to the network.
pub async fn send_donation(
    rpc: &dyn ChainRpc,
    wallet: &dyn WalletSession,
    recipient: &Pubkey,
    amount: DonationAmount,
    memo: Option<String>,
) -> Result<DonationReceipt, Error> {
    let result = submit(rpc, wallet, recipient, amount, memo).await;
    if let Err(e) = &result {
        match e {
            Error::SigningRejected { reason } => error!("Transaction error: signing rejected: {}", reason),
            Error::TransactionFailed(tx_err) => error!("Transaction error: {}", tx_err),
            other => error!("Transaction error: {}", other),
        }
    }
    result
}

async fn submit(
    rpc: &dyn ChainRpc,
    wallet: &dyn WalletSession,
    recipient: &Pubkey,
    amount: DonationAmount,
    memo: Option<String>,
) -> Result<DonationReceipt, Error> {
    let donor = wallet.public_key().ok_or(Error::WalletNotConnected)?;

    // Fetched right before signing so the blockhash has the longest life left.
    let (blockhash, last_valid_block_height) = rpc
        .get_latest_blockhash()
        .await
        .map_err(Error::RecentHashFailed)?;

    let request = TransferRequest {
        sender: donor,
        recipient: *recipient,
        lamports: amount.lamports(),
        memo,
    };
    let transaction = create_transfer_tx(&request, blockhash);

    let signed = wallet.sign_transaction(transaction).await?;

    let signature = rpc
        .send_transaction(&signed)
        .await
        .map_err(Error::SendTransactionFailed)?;
    info!(
        "Donation of {} lamports submitted: {} -> {} ({})",
        request.lamports, donor, recipient, signature
    );

    match rpc
        .confirm_transaction(&signature, last_valid_block_height)
        .await
        .map_err(Error::ConfirmingTransactionFailed)?
    {
        Confirmation::Confirmed => {
            info!("Donation confirmed: {}", signature);
            Ok(DonationReceipt {
                signature,
                donor,
                recipient: *recipient,
                amount: amount.sol(),
                memo: request.memo,
                confirmed_at: Utc::now(),
            })
        }
        Confirmation::Failed(err) => Err(Error::TransactionFailed(err)),
        Confirmation::Expired => Err(Error::BlockhashExpired {
            last_valid_block_height,
        }),
    }
}
