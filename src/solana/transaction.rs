use crate::{error::Error, types::TransferRequest};
use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey, system_instruction, transaction::Transaction,
};

/// SPL Memo program (v2).
pub const MEMO_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");

/// Build the unsigned transfer transaction for a donation.
///
/// The sender pays the fee. A memo, when present, rides along as a second
/// instruction so the donation can be attributed without changing where the
/// funds go.
pub fn create_transfer_tx(request: &TransferRequest, recent_blockhash: Hash) -> Transaction {
    let mut instructions = vec![system_instruction::transfer(
        &request.sender,
        &request.recipient,
        request.lamports,
    )];

    if let Some(memo) = request.memo.as_deref() {
        instructions.push(memo_instruction(memo));
    }

    let message = Message::new_with_blockhash(&instructions, Some(&request.sender), &recent_blockhash);
    Transaction::new_unsigned(message)
}

/// Largest memo that still fits a single-signer transfer in one packet.
pub const MAX_MEMO_BYTES: usize = 566;

fn memo_instruction(memo: &str) -> Instruction {
    Instruction {
        program_id: MEMO_PROGRAM_ID,
        accounts: vec![],
        data: memo.as_bytes().to_vec(),
    }
}

/// Convert SOL to lamports, rounding to the nearest lamport.
/// Saturates outside the `u64` range; use [`checked_sol_to_lamports`] for
/// untrusted input.
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}

/// Like [`sol_to_lamports`], but `None` when the result is negative,
/// non-finite or does not fit in a `u64`.
pub fn checked_sol_to_lamports(sol: f64) -> Option<u64> {
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    // u64::MAX as f64 rounds up to 2^64, which is itself out of range.
    if !lamports.is_finite() || lamports < 0.0 || lamports >= u64::MAX as f64 {
        return None;
    }
    Some(lamports as u64)
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Format balance for display
pub fn format_balance(lamports: u64) -> String {
    format!("◎ {:.4}", lamports_to_sol(lamports))
}

/// Parse and validate a base58 account address
pub fn validate_public_key(key_string: &str) -> Result<Pubkey, Error> {
    let bytes = bs58::decode(key_string.trim()).into_vec()?;
    Pubkey::try_from(bytes.as_slice()).map_err(|_| {
        Error::InvalidInput(format!(
            "public key must be 32 bytes, got {}",
            bytes.len()
        ))
    })
}
