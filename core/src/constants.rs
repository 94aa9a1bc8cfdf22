use solana_program::native_token::LAMPORTS_PER_SOL;

pub const PLATFORM_SEED: &[u8] = b"platform-v4";
pub const PLATFORM_VAULT_SEED: &[u8] = b"platform-vault-v4";
pub const USER_PROFILE_SEED: &[u8] = b"profile-v4";
pub const TIP_JAR_SEED: &[u8] = b"tipjar-v4";

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 20;
pub const MAX_DISPLAY_NAME_LEN: usize = 50;
pub const MAX_SENDER_NAME_LEN: usize = 50;

pub const MAX_FEE_BPS: u64 = 10_000;
pub const DEFAULT_FEE_BPS: u64 = 300;

/// Wallets holding less than this cannot cover the rent of a profile and a tip jar
pub const MIN_REGISTRATION_BALANCE: u64 = LAMPORTS_PER_SOL / 20;

pub const DEFAULT_TIP_LAMPORTS: u64 = LAMPORTS_PER_SOL / 100;

pub const DEFAULT_RECENT_TIPS: usize = 5;

/// Anchor error codes start here
pub const ANCHOR_ERROR_CODE_OFFSET: u32 = 6000;
