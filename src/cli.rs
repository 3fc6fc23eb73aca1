use solana_sdk::{hash::Hash, pubkey::Pubkey};
use tracing::warn;

use crate::{
    config::Config,
    error::Error,
    flows,
    solana::{
        client::{AsyncRpcClient, ChainRpc},
        transaction::{validate_public_key, MAX_MEMO_BYTES},
    },
    types::{AirdropReceipt, DonationAmount, DonationQuote, DonationReceipt, SolanaNetwork, PRESET_AMOUNTS},
    wallet::{KeypairWallet, WalletSession},
};

/// Command front end over the donation flows.
pub struct DonationCli {
    rpc: Box<dyn ChainRpc>,
    wallet: Box<dyn WalletSession>,
    network: SolanaNetwork,
    recipient: Pubkey,
}

impl DonationCli {
    pub fn new(
        rpc: Box<dyn ChainRpc>,
        wallet: Box<dyn WalletSession>,
        network: SolanaNetwork,
        recipient: Pubkey,
    ) -> Self {
        Self {
            rpc,
            wallet,
            network,
            recipient,
        }
    }

    /// Wire up the JSON-RPC client and the keypair wallet described by `config`.
    ///
    /// A missing or unreadable keypair leaves the wallet disconnected rather
    /// than failing, so read-only commands still work.
    pub fn from_config(config: &Config) -> Self {
        let rpc = AsyncRpcClient::with_poll_interval(config.rpc_url.clone(), config.poll_interval);
        let wallet = KeypairWallet::from_file(&config.keypair_path).unwrap_or_else(|e| {
            warn!("{}; continuing without a connected wallet", e);
            KeypairWallet::new()
        });
        Self::new(Box::new(rpc), Box::new(wallet), config.network, config.recipient)
    }

    pub fn network(&self) -> SolanaNetwork {
        self.network
    }

    pub fn recipient(&self) -> &Pubkey {
        &self.recipient
    }

    /// Balance of `address`, or of the connected wallet when none is given.
    pub async fn balance(&self, address: Option<&str>) -> Result<(Pubkey, f64), Error> {
        let account = match address {
            Some(address) => validate_public_key(address)?,
            None => self.wallet.public_key().ok_or(Error::WalletNotConnected)?,
        };
        let balance = flows::get_balance(&*self.rpc, &account).await?;
        Ok((account, balance))
    }

    pub async fn airdrop(&self) -> Result<AirdropReceipt, Error> {
        let account = self.wallet.public_key().ok_or(Error::WalletNotConnected)?;
        flows::request_airdrop(&*self.rpc, self.network, &account).await
    }

    pub fn quote(&self, amount: &str) -> Result<DonationQuote, Error> {
        DonationQuote::new(amount.parse::<DonationAmount>()?)
    }

    pub async fn donate(&self, amount: &str, patient: Option<&str>) -> Result<DonationReceipt, Error> {
        let amount: DonationAmount = amount.parse()?;
        let memo = patient.map(patient_memo).transpose()?;
        flows::send_donation(
            &*self.rpc,
            &*self.wallet,
            &self.recipient,
            amount,
            memo,
        )
        .await
    }

    pub fn presets(&self) -> Vec<DonationQuote> {
        PRESET_AMOUNTS
            .iter()
            .filter_map(|sol| DonationAmount::new(*sol).ok())
            .filter_map(|amount| DonationQuote::new(amount).ok())
            .collect()
    }

    pub async fn recent_block_hash(&self) -> Result<(Hash, u64), Error> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(Error::RecentHashFailed)
    }
}

/// Memo recording which patient a donation supports. Checked here because an
/// oversized memo would otherwise only fail once the transaction is submitted.
fn patient_memo(name: &str) -> Result<String, Error> {
    let memo = format!("Supporting {}", name.trim());
    if memo.len() > MAX_MEMO_BYTES {
        return Err(Error::InvalidInput(format!(
            "patient name is too long ({} bytes, memo limit is {})",
            name.len(),
            MAX_MEMO_BYTES
        )));
    }
    Ok(memo)
}
