use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{native_token::lamports_to_sol, pubkey::Pubkey};

use crate::{
    account::TipjarAccount, constants::MAX_USERNAME_LEN, identifier::Username,
    namespace::Namespace,
};

/// Running totals for a creator. Received tips sit in this account as lamports.
///
/// The totals are lifetime counters, not the withdrawable balance; that comes
/// from the account's lamports minus its rent-exempt minimum.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TipJar {
    pub authority: Pubkey,
    pub username: String,
    pub total_tips: u64,
    /// Lamports received after platform fees
    pub total_amount: u64,
    pub total_withdrawals: u64,
    pub platform_fees_paid: u64,
}

impl TipjarAccount for TipJar {
    const NAME: &'static str = "TipJar";
    const SPACE: usize = 8 + 32 + (4 + MAX_USERNAME_LEN) + 8 + 8 + 8 + 8;
}

impl TipJar {
    pub fn new(authority: Pubkey, username: &Username) -> Self {
        Self {
            authority,
            username: username.as_str().to_string(),
            total_tips: 0,
            total_amount: 0,
            total_withdrawals: 0,
            platform_fees_paid: 0,
        }
    }

    pub fn seeds(username: &Username) -> Vec<Vec<u8>> {
        Namespace::TipJar.seeds(Some(username))
    }

    pub fn find_program_address(
        program_id: &Pubkey,
        username: &Username,
    ) -> (Pubkey, u8, Vec<Vec<u8>>) {
        Namespace::TipJar.find_program_address(program_id, Some(username))
    }
}

#[rustfmt::skip]
impl fmt::Display for TipJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n\n----------- Tip Jar -------------")?;
        writeln!(f, "  Username:                     @{}", self.username)?;
        writeln!(f, "  Authority:                    {}", self.authority)?;
        writeln!(f, "  Total Tips:                   {}", self.total_tips)?;
        writeln!(f, "  Total Amount:                 {} SOL", lamports_to_sol(self.total_amount))?;
        writeln!(f, "  Total Withdrawals:            {} SOL", lamports_to_sol(self.total_withdrawals))?;
        writeln!(f, "  Platform Fees Paid:           {} SOL", lamports_to_sol(self.platform_fees_paid))?;
        Ok(())
    }
}
