use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{native_token::lamports_to_sol, pubkey::Pubkey};

use crate::{account::TipjarAccount, constants::MAX_SENDER_NAME_LEN};

/// Record of a single tip, created at a fresh keypair address by the sender
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Tip {
    pub sender_name: String,
    /// Tip jar that received the tip
    pub receiver: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

impl TipjarAccount for Tip {
    const NAME: &'static str = "Tip";
    const SPACE: usize = 8 + (4 + MAX_SENDER_NAME_LEN) + 32 + 8 + 8;
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} SOL from {} to {} at {}",
            lamports_to_sol(self.amount),
            self.sender_name,
            self.receiver,
            self.timestamp
        )
    }
}
