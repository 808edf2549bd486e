use thiserror::Error;

/// Failures surfaced by the round engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("round is not active")]
    RoundNotActive,
    #[error("deposit animation still in flight")]
    AnimationInFlight,
    #[error("deposit amount must be positive")]
    InvalidDepositAmount,
    #[error("round has no deposits yet")]
    NoDepositsYet,
    #[error("winner is not part of this round")]
    WinnerNotInRound,
    #[error("engine task has shut down")]
    EngineClosed,
}

/// Failures from the third-party balance/metadata/price feeds.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0} from {1}")]
    Status(u16, String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("rpc endpoint not configured")]
    MissingRpcEndpoint,
}

/// Failures while assembling the outbound deposit transaction.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("wallet not connected")]
    WalletNotConnected,
    #[error("no tokens selected for deposit")]
    NothingSelected,
    #[error("invalid pubkey: {0}")]
    InvalidPubkey(#[from] solana_sdk::pubkey::ParsePubkeyError),
    #[error("instruction build failed: {0}")]
    Instruction(#[from] solana_sdk::program_error::ProgramError),
    #[error("rpc error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
}
