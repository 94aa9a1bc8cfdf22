use core::fmt;
use std::str::FromStr;

use crate::{
    constants::{MAX_USERNAME_LEN, MIN_USERNAME_LEN},
    error::TipjarError,
};

/// A creator's username, checked against the same rules the program enforces.
///
/// Addresses are derived from the raw username bytes, so anything that would
/// be rejected on-chain must be rejected here first. Otherwise the derived
/// address is well formed but can never hold an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(username: &str) -> Result<Self, TipjarError> {
        let len = username.chars().count();
        if len < MIN_USERNAME_LEN {
            return Err(TipjarError::InvalidIdentifier(format!(
                "'{}' is shorter than {} characters",
                username, MIN_USERNAME_LEN
            )));
        }
        if len > MAX_USERNAME_LEN {
            return Err(TipjarError::InvalidIdentifier(format!(
                "'{}' is longer than {} characters",
                username, MAX_USERNAME_LEN
            )));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TipjarError::InvalidIdentifier(format!(
                "'{}' contains non-alphanumeric characters",
                username
            )));
        }

        Ok(Self(username.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for Username {
    type Err = TipjarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}
