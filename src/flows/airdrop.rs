use chrono::Utc;
use solana_sdk::pubkey::Pubkey;
use tracing::{error, info};

use crate::{
    error::Error,
    solana::{client::ChainRpc, transaction::lamports_to_sol, Confirmation},
    types::{AirdropReceipt, SolanaNetwork, AIRDROP_LAMPORTS},
};

/// Request one faucet grant of [`AIRDROP_LAMPORTS`] for `account` and wait
/// for it to land. A failed attempt is not retried.
pub async fn request_airdrop(
    rpc: &dyn ChainRpc,
    network: SolanaNetwork,
    account: &Pubkey,
) -> Result<AirdropReceipt, Error> {
    if !network.supports_airdrop() {
        return Err(Error::WrongNetwork(format!(
            "Airdrop not available on {}",
            network
        )));
    }

    let result = grant(rpc, network, account).await;
    if let Err(e) = &result {
        error!("Airdrop error: {}", e);
    }
    result
}

async fn grant(
    rpc: &dyn ChainRpc,
    network: SolanaNetwork,
    account: &Pubkey,
) -> Result<AirdropReceipt, Error> {
    let (_, last_valid_block_height) = rpc
        .get_latest_blockhash()
        .await
        .map_err(Error::RecentHashFailed)?;

    let signature = rpc
        .request_airdrop(account, AIRDROP_LAMPORTS)
        .await
        .map_err(Error::AirdropFailed)?;
    info!("Airdrop requested for {}: {}", account, signature);

    match rpc
        .confirm_transaction(&signature, last_valid_block_height)
        .await
        .map_err(Error::ConfirmingTransactionFailed)?
    {
        Confirmation::Confirmed => Ok(AirdropReceipt {
            signature,
            account: *account,
            amount: lamports_to_sol(AIRDROP_LAMPORTS),
            network,
            confirmed_at: Utc::now(),
        }),
        Confirmation::Failed(err) => Err(Error::TransactionFailed(err)),
        Confirmation::Expired => Err(Error::BlockhashExpired {
            last_valid_block_height,
        }),
    }
}
