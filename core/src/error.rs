use solana_program::pubkey::Pubkey;
use thiserror::Error;

use crate::constants::ANCHOR_ERROR_CODE_OFFSET;

/// Everything the client can report back to a caller.
///
/// `NotFound` is an outcome the caller branches on (e.g. "user not found"),
/// never something to retry. Only `NetworkFailure` is transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TipjarError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Account not found: {0}")]
    NotFound(Pubkey),
    #[error("Account data does not match the {account} layout: {reason}")]
    SchemaMismatch {
        account: &'static str,
        reason: String,
    },
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Request was already processed: {0}")]
    DuplicateRequest(String),
    #[error("Rejected by program (code {code}): {message}")]
    DomainRejected { code: u32, message: String },
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("{operation} is already in flight for {address}")]
    InFlight {
        operation: &'static str,
        address: Pubkey,
    },
    #[error("No keypair")]
    MissingKeypair,
    #[error("Failed to sign transaction: {0}")]
    SigningFailed(String),
}

impl TipjarError {
    /// Transport level failures are the only ones worth offering a retry for
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkFailure(_))
    }

    pub const fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_)
                | Self::InsufficientFunds(_)
                | Self::DomainRejected { .. }
                | Self::MissingKeypair
        )
    }
}

/// Rejection codes raised by the on-chain program
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TipjarProgramError {
    #[error("Username must be at least 3 characters long")]
    UsernameTooShort = 6000,
    #[error("Username must be at most 20 characters long")]
    UsernameTooLong = 6001,
    #[error("Username must contain only alphanumeric characters")]
    InvalidUsername = 6002,
    #[error("Display name is too long")]
    DisplayNameTooLong = 6003,
    #[error("Sender name is too long")]
    NameTooLong = 6004,
    #[error("Amount must be greater than zero")]
    InvalidAmount = 6005,
    #[error("Insufficient funds")]
    InsufficientFunds = 6006,
    #[error("Unauthorized")]
    Unauthorized = 6007,
    #[error("Fee percentage is too high")]
    FeeTooHigh = 6008,
}

impl TipjarProgramError {
    const ALL: [Self; 9] = [
        Self::UsernameTooShort,
        Self::UsernameTooLong,
        Self::InvalidUsername,
        Self::DisplayNameTooLong,
        Self::NameTooLong,
        Self::InvalidAmount,
        Self::InsufficientFunds,
        Self::Unauthorized,
        Self::FeeTooHigh,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        if code < ANCHOR_ERROR_CODE_OFFSET {
            return None;
        }
        Self::ALL.into_iter().find(|e| *e as u32 == code)
    }

    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl From<TipjarProgramError> for TipjarError {
    fn from(e: TipjarProgramError) -> Self {
        match e {
            TipjarProgramError::InsufficientFunds => Self::InsufficientFunds(e.to_string()),
            _ => Self::DomainRejected {
                code: e.code(),
                message: format!("{:?}: {}", e, e),
            },
        }
    }
}

impl From<TipjarProgramError> for u32 {
    fn from(e: TipjarProgramError) -> Self {
        e as Self
    }
}
