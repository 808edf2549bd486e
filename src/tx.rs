//! Builds the outbound deposit transfer: one system transfer per selected
//! SOL row, one SPL transfer (plus destination ATA creation when needed) per
//! selected token row. The transaction leaves here unsigned; signing and
//! submission belong to the user's wallet.

use std::collections::HashSet;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction, message::Message, native_token::LAMPORTS_PER_SOL, pubkey::Pubkey,
    system_instruction, transaction::Transaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};

use crate::constants::NATIVE_MINT;
use crate::errors::TxError;
use crate::tokens::TokenRow;

/// Instruction list for the selected rows. Pure given an ATA-existence
/// oracle, so it can be exercised without a validator.
pub fn deposit_instructions(
    selected: &[TokenRow],
    wallet: &Pubkey,
    jackpot: &Pubkey,
    ata_exists: impl Fn(&Pubkey) -> bool,
) -> Result<Vec<Instruction>, TxError> {
    let mut ixs = Vec::new();

    for row in selected {
        let amount = row.selected_amount.unwrap_or(0.0);
        if amount <= 0.0 {
            continue;
        }

        if row.mint == NATIVE_MINT {
            let lamports = (amount * LAMPORTS_PER_SOL as f64).round() as u64;
            ixs.push(system_instruction::transfer(wallet, jackpot, lamports));
        } else {
            let mint: Pubkey = row.mint.parse()?;
            let from_ata = get_associated_token_address(wallet, &mint);
            let to_ata = get_associated_token_address(jackpot, &mint);

            if !ata_exists(&to_ata) {
                ixs.push(create_associated_token_account(
                    wallet,
                    jackpot,
                    &mint,
                    &spl_token::id(),
                ));
            }

            let raw = (amount * 10f64.powi(row.decimals as i32)).round() as u64;
            #[allow(deprecated)]
            let transfer =
                spl_token::instruction::transfer(&spl_token::id(), &from_ata, &to_ata, wallet, &[], raw)?;
            ixs.push(transfer);
        }
    }

    if ixs.is_empty() {
        return Err(TxError::NothingSelected);
    }
    Ok(ixs)
}

/// Resolves destination ATA existence and the recent blockhash over RPC and
/// returns the unsigned transaction, fee payer set to the wallet.
pub async fn build_deposit_transaction(
    rpc: &RpcClient,
    selected: &[TokenRow],
    wallet: &str,
    jackpot: &str,
) -> Result<Transaction, TxError> {
    if wallet.is_empty() {
        return Err(TxError::WalletNotConnected);
    }
    let wallet_pk: Pubkey = wallet.parse()?;
    let jackpot_pk: Pubkey = jackpot.parse()?;

    // One batched lookup for every destination ATA we might have to create.
    let mut candidates: HashSet<Pubkey> = HashSet::new();
    for row in selected {
        if row.selected_amount.unwrap_or(0.0) <= 0.0 || row.mint == NATIVE_MINT {
            continue;
        }
        let mint: Pubkey = row.mint.parse()?;
        candidates.insert(get_associated_token_address(&jackpot_pk, &mint));
    }

    let mut existing: HashSet<Pubkey> = HashSet::new();
    if !candidates.is_empty() {
        let atas: Vec<Pubkey> = candidates.into_iter().collect();
        let accounts = rpc.get_multiple_accounts(&atas).await?;
        for (ata, account) in atas.iter().zip(accounts) {
            if account.is_some() {
                existing.insert(*ata);
            }
        }
    }

    let ixs = deposit_instructions(selected, &wallet_pk, &jackpot_pk, |ata| {
        existing.contains(ata)
    })?;

    let blockhash = rpc.get_latest_blockhash().await?;
    let mut message = Message::new(&ixs, Some(&wallet_pk));
    message.recent_blockhash = blockhash;
    Ok(Transaction::new_unsigned(message))
}
