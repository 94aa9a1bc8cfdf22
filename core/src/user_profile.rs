use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{
    account::TipjarAccount,
    constants::{MAX_DISPLAY_NAME_LEN, MAX_USERNAME_LEN},
    identifier::Username,
    namespace::Namespace,
};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
    /// Wallet that registered the username
    pub authority: Pubkey,
}

impl TipjarAccount for UserProfile {
    const NAME: &'static str = "UserProfile";
    const SPACE: usize = 8 + (4 + MAX_USERNAME_LEN) + (4 + MAX_DISPLAY_NAME_LEN) + 32;
}

impl UserProfile {
    pub fn new(username: &Username, display_name: &str, authority: Pubkey) -> Self {
        Self {
            username: username.as_str().to_string(),
            display_name: display_name.to_string(),
            authority,
        }
    }

    pub fn seeds(username: &Username) -> Vec<Vec<u8>> {
        Namespace::UserProfile.seeds(Some(username))
    }

    pub fn find_program_address(
        program_id: &Pubkey,
        username: &Username,
    ) -> (Pubkey, u8, Vec<Vec<u8>>) {
        Namespace::UserProfile.find_program_address(program_id, Some(username))
    }
}

#[rustfmt::skip]
impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n\n----------- User Profile -------------")?;
        writeln!(f, "  Username:                     @{}", self.username)?;
        writeln!(f, "  Display Name:                 {}", self.display_name)?;
        writeln!(f, "  Authority:                    {}", self.authority)?;
        Ok(())
    }
}
