use solana_sdk::pubkey::Pubkey;
use tracing::{debug, error};

use crate::{error::Error, solana::client::ChainRpc, solana::transaction::lamports_to_sol};

/// Spendable balance of `account` in SOL.
pub async fn get_balance(rpc: &dyn ChainRpc, account: &Pubkey) -> Result<f64, Error> {
    match rpc.get_balance(account).await {
        Ok(lamports) => {
            debug!("Balance for {}: {} lamports", account, lamports);
            Ok(lamports_to_sol(lamports))
        }
        Err(e) => {
            error!("Error getting balance for {}: {}", account, e);
            Err(Error::BalanceFailed(e))
        }
    }
}
