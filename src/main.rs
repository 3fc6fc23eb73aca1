use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use donation_client::{Config, DonationCli, DonationQuote};

#[derive(Parser)]
#[command(name = "donation-client", version, about = "Donate SOL and manage a devnet wallet")]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the balance of an account (defaults to the connected wallet)
    Balance {
        #[arg(long)]
        address: Option<String>,
    },
    /// Request 2 test SOL from the faucet
    Airdrop,
    /// Show amount, network fee and total for a donation
    Quote { amount: String },
    /// Send a donation
    Donate {
        amount: String,
        /// Patient the donation is made for, recorded as a memo
        #[arg(long)]
        patient: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the preset donation amounts
    Presets,
    /// Print a recent blockhash and its last valid block height
    Blockhash,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("donation_client=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("loading configuration")?;
    let cli = DonationCli::from_config(&config);

    match args.command {
        Command::Balance { address } => {
            let (account, balance) = cli.balance(address.as_deref()).await?;
            emit(args.json, &serde_json::json!({ "account": account.to_string(), "balance": balance }), || {
                format!("Balance of {}: ◎ {:.4}", account, balance)
            })?;
        }
        Command::Airdrop => {
            let receipt = cli.airdrop().await?;
            emit(args.json, &receipt, || {
                format!("Successfully received {} SOL ({})", receipt.amount, receipt.signature)
            })?;
        }
        Command::Quote { amount } => {
            let quote = cli.quote(&amount)?;
            emit(args.json, &quote, || describe_quote(&quote))?;
        }
        Command::Donate { amount, patient, yes } => {
            let quote = cli.quote(&amount)?;
            if !yes && !confirm(&quote, patient.as_deref())? {
                let (value, text) = cancelled();
                emit(args.json, &value, || text.to_string())?;
                return Ok(());
            }
            let receipt = cli.donate(&amount, patient.as_deref()).await?;
            emit(args.json, &receipt, || {
                format!(
                    "Thank you! Your donation of ◎ {} has been processed successfully ({})",
                    receipt.amount, receipt.signature
                )
            })?;
        }
        Command::Presets => {
            let presets = cli.presets();
            emit(args.json, &presets, || {
                presets
                    .iter()
                    .map(|q| format!("◎ {}", q.amount))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Blockhash => {
            let (hash, last_valid_block_height) = cli.recent_block_hash().await?;
            emit(
                args.json,
                &serde_json::json!({
                    "blockhash": hash.to_string(),
                    "last_valid_block_height": last_valid_block_height,
                }),
                || format!("{} (valid until block {})", hash, last_valid_block_height),
            )?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    println!("{}", render(json, value, text)?);
    Ok(())
}

fn render<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<String> {
    Ok(if json {
        serde_json::to_string_pretty(value)?
    } else {
        text()
    })
}

fn cancelled() -> (serde_json::Value, &'static str) {
    (serde_json::json!({ "cancelled": true }), "Donation cancelled")
}

fn describe_quote(quote: &DonationQuote) -> String {
    format!(
        "Amount       ◎ {}\nNetwork Fee  ◎ {}\nTotal        ◎ {}",
        quote.amount, quote.network_fee, quote.total
    )
}

/// The prompt goes to stderr so stdout only carries results.
fn confirm(quote: &DonationQuote, patient: Option<&str>) -> anyhow::Result<bool> {
    if let Some(name) = patient {
        eprintln!("Supporting {}", name);
    }
    eprintln!("{}", describe_quote(quote));
    eprint!("Confirm donation? [y/N] ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_output_respects_json_flag() {
        let (value, text) = cancelled();

        let json = render(true, &value, || text.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["cancelled"], true);
        assert!(!json.contains("Donation cancelled"));

        assert_eq!(render(false, &value, || text.to_string()).unwrap(), "Donation cancelled");
    }

    #[test]
    fn test_quote_text() {
        let quote = DonationQuote::new("5".parse().unwrap()).unwrap();
        let text = describe_quote(&quote);
        assert!(text.contains("◎ 5"));
        assert!(text.contains("◎ 5.000005"));
    }
}
