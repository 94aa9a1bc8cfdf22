use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    discriminator::{account_discriminator, DISCRIMINATOR_LEN},
    error::TipjarError,
};

/// Accounts owned by the program: an 8 byte discriminator followed by Borsh fields.
///
/// Accounts are allocated at their maximum size, so bytes left over after the
/// fields are ignored when decoding.
pub trait TipjarAccount: BorshSerialize + BorshDeserialize + Sized {
    /// Struct name the discriminator is computed from
    const NAME: &'static str;

    /// Bytes allocated for the account, discriminator included
    const SPACE: usize;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        account_discriminator(Self::NAME)
    }

    fn try_from_account_data(data: &[u8]) -> Result<Self, TipjarError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(TipjarError::SchemaMismatch {
                account: Self::NAME,
                reason: format!("{} bytes is too short for a discriminator", data.len()),
            });
        }

        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != Self::discriminator() {
            return Err(TipjarError::SchemaMismatch {
                account: Self::NAME,
                reason: "discriminator mismatch".to_string(),
            });
        }

        Self::deserialize(&mut body).map_err(|e| TipjarError::SchemaMismatch {
            account: Self::NAME,
            reason: e.to_string(),
        })
    }

    /// Serializes the account padded with zeros to [`Self::SPACE`]
    fn to_account_data(&self) -> Vec<u8> {
        let mut data = Self::discriminator().to_vec();
        // Writing into a Vec cannot fail
        self.serialize(&mut data).ok();
        if data.len() < Self::SPACE {
            data.resize(Self::SPACE, 0);
        }
        data
    }
}
