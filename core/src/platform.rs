use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{native_token::lamports_to_sol, pubkey::Pubkey};

use crate::{account::TipjarAccount, namespace::Namespace};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Platform {
    /// The only wallet allowed to withdraw collected fees
    pub owner: Pubkey,
    /// Fee taken from every tip, in basis points
    pub fee_percentage: u64,
    /// Number of registered creators
    pub total_users: u64,
    /// Lifetime fees collected, in lamports
    pub total_revenue: u64,
}

impl TipjarAccount for Platform {
    const NAME: &'static str = "Platform";
    const SPACE: usize = 8 + 32 + 8 + 8 + 8;
}

impl Platform {
    pub const fn new(owner: Pubkey, fee_percentage: u64) -> Self {
        Self {
            owner,
            fee_percentage,
            total_users: 0,
            total_revenue: 0,
        }
    }

    pub fn seeds() -> Vec<Vec<u8>> {
        Namespace::Platform.seeds(None)
    }

    pub fn find_program_address(program_id: &Pubkey) -> (Pubkey, u8, Vec<Vec<u8>>) {
        Namespace::Platform.find_program_address(program_id, None)
    }

    /// Fee charged on `amount`, rounded down
    pub fn fee_for(&self, amount: u64) -> u64 {
        ((amount as u128 * self.fee_percentage as u128) / 10_000) as u64
    }
}

#[rustfmt::skip]
impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n\n----------- Platform -------------")?;
        writeln!(f, "  Owner:                        {}", self.owner)?;
        writeln!(f, "  Fee:                          {}%", self.fee_percentage as f64 / 100.0)?;
        writeln!(f, "  Total Users:                  {}", self.total_users)?;
        writeln!(f, "  Total Revenue:                {} SOL", lamports_to_sol(self.total_revenue))?;
        Ok(())
    }
}
