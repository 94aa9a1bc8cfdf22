use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{account::TipjarAccount, namespace::Namespace};

/// Holds collected platform fees as lamports on top of its rent-exempt minimum
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PlatformVault {
    pub total_fees: u64,
}

impl TipjarAccount for PlatformVault {
    const NAME: &'static str = "PlatformVault";
    const SPACE: usize = 8 + 8;
}

impl PlatformVault {
    pub fn seeds() -> Vec<Vec<u8>> {
        Namespace::PlatformVault.seeds(None)
    }

    pub fn find_program_address(program_id: &Pubkey) -> (Pubkey, u8, Vec<Vec<u8>>) {
        Namespace::PlatformVault.find_program_address(program_id, None)
    }
}
