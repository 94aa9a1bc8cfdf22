use core::fmt;
use std::str::FromStr;

use solana_program::pubkey::Pubkey;

use crate::{
    constants::{PLATFORM_SEED, PLATFORM_VAULT_SEED, TIP_JAR_SEED, USER_PROFILE_SEED},
    error::TipjarError,
    identifier::Username,
};

/// The closed set of account kinds the program derives addresses for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Platform singleton holding the owner and fee settings
    Platform,
    /// Platform singleton collecting fees
    PlatformVault,
    /// Per-username profile
    UserProfile,
    /// Per-username tip jar holding received tips
    TipJar,
}

impl Namespace {
    pub const ALL: [Self; 4] = [
        Self::Platform,
        Self::PlatformVault,
        Self::UserProfile,
        Self::TipJar,
    ];

    pub const fn seed(self) -> &'static [u8] {
        match self {
            Self::Platform => PLATFORM_SEED,
            Self::PlatformVault => PLATFORM_VAULT_SEED,
            Self::UserProfile => USER_PROFILE_SEED,
            Self::TipJar => TIP_JAR_SEED,
        }
    }

    pub const fn requires_identifier(self) -> bool {
        match self {
            Self::Platform | Self::PlatformVault => false,
            Self::UserProfile | Self::TipJar => true,
        }
    }

    pub(crate) fn seeds(self, username: Option<&Username>) -> Vec<Vec<u8>> {
        let mut seeds = vec![self.seed().to_vec()];
        if let Some(username) = username {
            seeds.push(username.as_bytes().to_vec());
        }
        seeds
    }

    pub(crate) fn find_program_address(
        self,
        program_id: &Pubkey,
        username: Option<&Username>,
    ) -> (Pubkey, u8, Vec<Vec<u8>>) {
        let seeds = self.seeds(username);
        let (address, bump) = Pubkey::find_program_address(
            &seeds.iter().map(|s| s.as_slice()).collect::<Vec<_>>(),
            program_id,
        );
        (address, bump, seeds)
    }
}

impl FromStr for Namespace {
    type Err = TipjarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform" => Ok(Self::Platform),
            "platform-vault" => Ok(Self::PlatformVault),
            "profile" => Ok(Self::UserProfile),
            "tipjar" => Ok(Self::TipJar),
            _ => Err(TipjarError::InvalidIdentifier(format!(
                "unknown namespace '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Platform => "platform",
            Self::PlatformVault => "platform-vault",
            Self::UserProfile => "profile",
            Self::TipJar => "tipjar",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derives the program address for `namespace` and an optional identifier.
///
/// The identifier is validated before anything is hashed: singletons must not
/// receive one, per-user namespaces must receive a valid [`Username`].
pub fn derive(
    namespace: Namespace,
    identifier: Option<&str>,
    program_id: &Pubkey,
) -> Result<DerivedAddress, TipjarError> {
    let username = match (namespace.requires_identifier(), identifier) {
        (true, Some(identifier)) => Some(Username::new(identifier)?),
        (true, None) => {
            return Err(TipjarError::InvalidIdentifier(format!(
                "{} requires an identifier",
                namespace
            )))
        }
        (false, None) => None,
        (false, Some(identifier)) => {
            return Err(TipjarError::InvalidIdentifier(format!(
                "{} does not take an identifier, got '{}'",
                namespace, identifier
            )))
        }
    };

    let (address, bump, _) = namespace.find_program_address(program_id, username.as_ref());
    Ok(DerivedAddress { address, bump })
}
