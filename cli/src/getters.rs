use std::fmt;

use crate::handler::CliHandler;
use log::{debug, warn};
use solana_sdk::{account::Account, pubkey::Pubkey, system_program};
use tipjar_core::{
    account::TipjarAccount,
    balance::{reconcile, ReconciledBalance, StorageMetadata},
    error::TipjarError,
    identifier::Username,
    platform::Platform,
    platform_vault::PlatformVault,
    tip::Tip,
    tip_jar::TipJar,
    user_profile::UserProfile,
};

/// Result of reading one address: the decoded record, or nothing there at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFetch<T> {
    Found {
        record: T,
        metadata: StorageMetadata,
    },
    NotFound,
}

impl<T> AccountFetch<T> {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub const fn record(&self) -> Option<&T> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    pub const fn metadata(&self) -> Option<&StorageMetadata> {
        match self {
            Self::Found { metadata, .. } => Some(metadata),
            Self::NotFound => None,
        }
    }

    pub fn into_record(self) -> Option<T> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    /// For callers that cannot proceed without the account
    pub fn found(self, address: &Pubkey) -> Result<(T, StorageMetadata), TipjarError> {
        match self {
            Self::Found { record, metadata } => Ok((record, metadata)),
            Self::NotFound => Err(TipjarError::NotFound(*address)),
        }
    }
}

// ---------------------- HELPERS ----------------------
pub async fn get_account(
    handler: &CliHandler,
    address: &Pubkey,
) -> Result<Option<Account>, TipjarError> {
    handler.ledger().get_account(address).await
}

fn decode_account<T: TipjarAccount>(
    program_id: &Pubkey,
    address: &Pubkey,
    account: Option<Account>,
) -> Result<AccountFetch<T>, TipjarError> {
    let Some(account) = account else {
        debug!("No {} account at {}", T::NAME, address);
        return Ok(AccountFetch::NotFound);
    };

    // Lamports sent to an address the program has not initialized yet
    if account.data.is_empty() || system_program::check_id(&account.owner) {
        debug!("Uninitialized {} account at {}", T::NAME, address);
        return Ok(AccountFetch::NotFound);
    }

    if account.owner != *program_id {
        warn!("Account {} is owned by {}", address, account.owner);
        return Err(TipjarError::SchemaMismatch {
            account: T::NAME,
            reason: format!("owned by {}, not the Tipjar program", account.owner),
        });
    }

    let metadata = StorageMetadata::new(account.lamports, account.data.len());
    let record = T::try_from_account_data(&account.data).inspect_err(|e| {
        warn!("Account {} could not be decoded: {}", address, e);
    })?;

    Ok(AccountFetch::Found { record, metadata })
}

/// Reads and decodes the account at `address` in a single round trip
pub async fn fetch_record<T: TipjarAccount>(
    handler: &CliHandler,
    address: &Pubkey,
) -> Result<AccountFetch<T>, TipjarError> {
    let account = get_account(handler, address).await?;
    decode_account(&handler.tipjar_program_id, address, account)
}

/// Same as [`fetch_record`] for many addresses, batched into one request
pub async fn fetch_records<T: TipjarAccount>(
    handler: &CliHandler,
    addresses: &[Pubkey],
) -> Result<Vec<AccountFetch<T>>, TipjarError> {
    let accounts = handler.ledger().get_multiple_accounts(addresses).await?;
    if accounts.len() != addresses.len() {
        return Err(TipjarError::NetworkFailure(format!(
            "requested {} accounts, received {}",
            addresses.len(),
            accounts.len()
        )));
    }

    addresses
        .iter()
        .zip(accounts)
        .map(|(address, account)| decode_account(&handler.tipjar_program_id, address, account))
        .collect()
}

pub async fn get_minimum_balance(
    handler: &CliHandler,
    data_len: usize,
) -> Result<u64, TipjarError> {
    handler
        .ledger()
        .get_minimum_balance_for_rent_exemption(data_len)
        .await
}

/// Withdrawable lamports of a fetched account.
///
/// The rent-exempt minimum is queried for the data length the account really
/// has on chain. A missing account has nothing to withdraw.
pub async fn reconciled_balance<T>(
    handler: &CliHandler,
    fetch: &AccountFetch<T>,
) -> Result<ReconciledBalance, TipjarError> {
    let Some(metadata) = fetch.metadata() else {
        return Ok(ReconciledBalance::zero());
    };

    let minimum_retained = get_minimum_balance(handler, metadata.data_len).await?;
    Ok(reconcile(metadata, minimum_retained))
}

pub async fn get_wallet_balance(handler: &CliHandler, wallet: &Pubkey) -> Result<u64, TipjarError> {
    handler.ledger().get_balance(wallet).await
}

// ---------------------- PLATFORM ----------------------
pub async fn get_platform(handler: &CliHandler) -> Result<AccountFetch<Platform>, TipjarError> {
    let (address, _, _) = Platform::find_program_address(&handler.tipjar_program_id);
    fetch_record(handler, &address).await
}

pub async fn get_platform_vault(
    handler: &CliHandler,
) -> Result<AccountFetch<PlatformVault>, TipjarError> {
    let (address, _, _) = PlatformVault::find_program_address(&handler.tipjar_program_id);
    fetch_record(handler, &address).await
}

/// The platform record and the fees its vault holds above rent, `None` before initialization
pub async fn get_platform_stats(
    handler: &CliHandler,
) -> Result<Option<(Platform, ReconciledBalance)>, TipjarError> {
    let (platform, vault) = futures::try_join!(get_platform(handler), get_platform_vault(handler))?;

    let Some(platform) = platform.into_record() else {
        return Ok(None);
    };
    let available_fees = reconciled_balance(handler, &vault).await?;

    Ok(Some((platform, available_fees)))
}

// ---------------------- CREATORS ----------------------
pub async fn get_user_profile(
    handler: &CliHandler,
    username: &Username,
) -> Result<AccountFetch<UserProfile>, TipjarError> {
    let (address, _, _) = UserProfile::find_program_address(&handler.tipjar_program_id, username);
    fetch_record(handler, &address).await
}

pub async fn get_tip_jar(
    handler: &CliHandler,
    username: &Username,
) -> Result<AccountFetch<TipJar>, TipjarError> {
    let (address, _, _) = TipJar::find_program_address(&handler.tipjar_program_id, username);
    fetch_record(handler, &address).await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipJarStats {
    pub tip_jar: TipJar,
    pub balance: ReconciledBalance,
}

impl fmt::Display for TipJarStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tip_jar, self.balance)
    }
}

pub async fn get_tip_jar_stats(
    handler: &CliHandler,
    username: &Username,
) -> Result<Option<TipJarStats>, TipjarError> {
    let fetch = get_tip_jar(handler, username).await?;
    let balance = reconciled_balance(handler, &fetch).await?;

    Ok(fetch
        .into_record()
        .map(|tip_jar| TipJarStats { tip_jar, balance }))
}

// ---------------------- TIPS ----------------------
/// The newest `limit` tips across all creators, newest first.
///
/// Tip accounts that fail to decode are skipped.
pub async fn get_recent_tips(
    handler: &CliHandler,
    limit: usize,
) -> Result<Vec<(Pubkey, Tip)>, TipjarError> {
    let accounts = handler
        .ledger()
        .get_program_accounts(&handler.tipjar_program_id, &Tip::discriminator())
        .await?;

    let mut tips: Vec<(Pubkey, Tip)> = accounts
        .into_iter()
        .filter_map(|(address, account)| {
            Tip::try_from_account_data(&account.data)
                .inspect_err(|e| warn!("Skipping tip {}: {}", address, e))
                .ok()
                .map(|tip| (address, tip))
        })
        .collect();

    tips.sort_by(|(_, a), (_, b)| b.timestamp.cmp(&a.timestamp));
    tips.truncate(limit);

    Ok(tips)
}

/// What a creator page shows: profile, tip jar and platform, read together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorOverview {
    pub username: Username,
    pub profile: Option<UserProfile>,
    pub tip_jar: Option<TipJarStats>,
    pub platform: Option<(Platform, ReconciledBalance)>,
}

impl CreatorOverview {
    pub const fn exists(&self) -> bool {
        self.profile.is_some()
    }
}

impl fmt::Display for CreatorOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.profile {
            Some(profile) => write!(f, "{}", profile)?,
            None => writeln!(f, "\n\nUser {} not found", self.username)?,
        }
        if let Some(tip_jar) = &self.tip_jar {
            write!(f, "{}", tip_jar)?;
        }
        if let Some((platform, fees)) = &self.platform {
            write!(f, "{}{}", platform, fees)?;
        }
        Ok(())
    }
}

/// Refreshes everything about one creator with concurrent reads.
///
/// A missing account in one read leaves the others untouched.
pub async fn get_creator_overview(
    handler: &CliHandler,
    username: &Username,
) -> Result<CreatorOverview, TipjarError> {
    let (profile, tip_jar, platform) = futures::try_join!(
        get_user_profile(handler, username),
        get_tip_jar_stats(handler, username),
        get_platform_stats(handler),
    )?;

    Ok(CreatorOverview {
        username: username.clone(),
        profile: profile.into_record(),
        tip_jar,
        platform,
    })
}
