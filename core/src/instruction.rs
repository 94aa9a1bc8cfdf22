use borsh::BorshDeserialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{
    discriminator::{instruction_discriminator, DISCRIMINATOR_LEN},
    error::TipjarError,
};

/// A named program operation together with its typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipjarInstruction {
    InitializePlatform {
        owner: Pubkey,
        fee_percentage: u64,
    },
    RegisterUser {
        username: String,
        display_name: String,
    },
    SendTipToUser {
        receiver_username: String,
        sender_name: String,
        amount: u64,
    },
    WithdrawUserFunds {
        username: String,
        amount: u64,
    },
    WithdrawPlatformFees {
        amount: u64,
    },
}

impl TipjarInstruction {
    pub const NAMES: [&'static str; 5] = [
        "initialize_platform",
        "register_user",
        "send_tip_to_user",
        "withdraw_user_funds",
        "withdraw_platform_fees",
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::InitializePlatform { .. } => Self::NAMES[0],
            Self::RegisterUser { .. } => Self::NAMES[1],
            Self::SendTipToUser { .. } => Self::NAMES[2],
            Self::WithdrawUserFunds { .. } => Self::NAMES[3],
            Self::WithdrawPlatformFees { .. } => Self::NAMES[4],
        }
    }

    pub fn data(&self) -> Vec<u8> {
        let mut data = instruction_discriminator(self.name()).to_vec();
        let args = match self {
            Self::InitializePlatform {
                owner,
                fee_percentage,
            } => borsh::to_vec(&(owner, fee_percentage)),
            Self::RegisterUser {
                username,
                display_name,
            } => borsh::to_vec(&(username, display_name)),
            Self::SendTipToUser {
                receiver_username,
                sender_name,
                amount,
            } => borsh::to_vec(&(receiver_username, sender_name, amount)),
            Self::WithdrawUserFunds { username, amount } => borsh::to_vec(&(username, amount)),
            Self::WithdrawPlatformFees { amount } => borsh::to_vec(amount),
        };
        // Serializing owned values into a Vec cannot fail
        data.extend(args.unwrap_or_default());
        data
    }

    pub fn unpack(data: &[u8]) -> Result<Self, TipjarError> {
        let schema_mismatch = |reason: String| TipjarError::SchemaMismatch {
            account: "TipjarInstruction",
            reason,
        };

        if data.len() < DISCRIMINATOR_LEN {
            return Err(schema_mismatch("missing discriminator".to_string()));
        }
        let (discriminator, args) = data.split_at(DISCRIMINATOR_LEN);
        let name = Self::NAMES
            .into_iter()
            .find(|name| instruction_discriminator(name) == discriminator)
            .ok_or_else(|| schema_mismatch("unknown instruction".to_string()))?;

        let instruction = match name {
            "initialize_platform" => {
                let (owner, fee_percentage) = <(Pubkey, u64)>::try_from_slice(args)
                    .map_err(|e| schema_mismatch(e.to_string()))?;
                Self::InitializePlatform {
                    owner,
                    fee_percentage,
                }
            }
            "register_user" => {
                let (username, display_name) = <(String, String)>::try_from_slice(args)
                    .map_err(|e| schema_mismatch(e.to_string()))?;
                Self::RegisterUser {
                    username,
                    display_name,
                }
            }
            "send_tip_to_user" => {
                let (receiver_username, sender_name, amount) =
                    <(String, String, u64)>::try_from_slice(args)
                        .map_err(|e| schema_mismatch(e.to_string()))?;
                Self::SendTipToUser {
                    receiver_username,
                    sender_name,
                    amount,
                }
            }
            "withdraw_user_funds" => {
                let (username, amount) = <(String, u64)>::try_from_slice(args)
                    .map_err(|e| schema_mismatch(e.to_string()))?;
                Self::WithdrawUserFunds { username, amount }
            }
            _ => {
                let amount =
                    u64::try_from_slice(args).map_err(|e| schema_mismatch(e.to_string()))?;
                Self::WithdrawPlatformFees { amount }
            }
        };

        Ok(instruction)
    }
}

/// An account passed to the program under a named role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAccount {
    pub role: &'static str,
    pub meta: AccountMeta,
}

impl RoleAccount {
    pub const fn writable(role: &'static str, pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            role,
            meta: AccountMeta {
                pubkey,
                is_signer,
                is_writable: true,
            },
        }
    }

    pub const fn readonly(role: &'static str, pubkey: Pubkey) -> Self {
        Self {
            role,
            meta: AccountMeta {
                pubkey,
                is_signer: false,
                is_writable: false,
            },
        }
    }
}

/// An instruction plus its accounts, in the order the program expects them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipjarOperation {
    pub instruction: TipjarInstruction,
    pub accounts: Vec<RoleAccount>,
}

impl TipjarOperation {
    pub const fn name(&self) -> &'static str {
        self.instruction.name()
    }

    pub fn account(&self, role: &str) -> Option<&Pubkey> {
        self.accounts
            .iter()
            .find(|a| a.role == role)
            .map(|a| &a.meta.pubkey)
    }

    pub fn signers(&self) -> Vec<Pubkey> {
        self.accounts
            .iter()
            .filter(|a| a.meta.is_signer)
            .map(|a| a.meta.pubkey)
            .collect()
    }

    pub fn to_instruction(&self, program_id: &Pubkey) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: self.accounts.iter().map(|a| a.meta.clone()).collect(),
            data: self.instruction.data(),
        }
    }
}

pub fn initialize_platform(
    platform: Pubkey,
    platform_vault: Pubkey,
    payer: Pubkey,
    owner: Pubkey,
    fee_percentage: u64,
) -> TipjarOperation {
    TipjarOperation {
        instruction: TipjarInstruction::InitializePlatform {
            owner,
            fee_percentage,
        },
        accounts: vec![
            RoleAccount::writable("platform", platform, false),
            RoleAccount::writable("platform_vault", platform_vault, false),
            RoleAccount::writable("payer", payer, true),
            RoleAccount::readonly("system_program", system_program::id()),
        ],
    }
}

pub fn register_user(
    user_profile: Pubkey,
    tipjar: Pubkey,
    platform: Pubkey,
    authority: Pubkey,
    username: String,
    display_name: String,
) -> TipjarOperation {
    TipjarOperation {
        instruction: TipjarInstruction::RegisterUser {
            username,
            display_name,
        },
        accounts: vec![
            RoleAccount::writable("user_profile", user_profile, false),
            RoleAccount::writable("tipjar", tipjar, false),
            RoleAccount::writable("platform", platform, false),
            RoleAccount::writable("authority", authority, true),
            RoleAccount::readonly("system_program", system_program::id()),
        ],
    }
}

#[allow(clippy::too_many_arguments)]
pub fn send_tip_to_user(
    platform: Pubkey,
    platform_vault: Pubkey,
    user_profile: Pubkey,
    tipjar: Pubkey,
    tip: Pubkey,
    user: Pubkey,
    receiver_username: String,
    sender_name: String,
    amount: u64,
) -> TipjarOperation {
    TipjarOperation {
        instruction: TipjarInstruction::SendTipToUser {
            receiver_username,
            sender_name,
            amount,
        },
        accounts: vec![
            RoleAccount::writable("platform", platform, false),
            RoleAccount::writable("platform_vault", platform_vault, false),
            RoleAccount::readonly("user_profile", user_profile),
            RoleAccount::writable("tipjar", tipjar, false),
            RoleAccount::writable("tip", tip, true),
            RoleAccount::writable("user", user, true),
            RoleAccount::readonly("system_program", system_program::id()),
        ],
    }
}

pub fn withdraw_user_funds(
    tipjar: Pubkey,
    authority: Pubkey,
    username: String,
    amount: u64,
) -> TipjarOperation {
    TipjarOperation {
        instruction: TipjarInstruction::WithdrawUserFunds { username, amount },
        accounts: vec![
            RoleAccount::writable("tipjar", tipjar, false),
            RoleAccount::writable("authority", authority, true),
        ],
    }
}

pub fn withdraw_platform_fees(
    platform: Pubkey,
    platform_vault: Pubkey,
    authority: Pubkey,
    amount: u64,
) -> TipjarOperation {
    TipjarOperation {
        instruction: TipjarInstruction::WithdrawPlatformFees { amount },
        accounts: vec![
            RoleAccount::writable("platform", platform, false),
            RoleAccount::writable("platform_vault", platform_vault, false),
            RoleAccount::writable("authority", authority, true),
        ],
    }
}
