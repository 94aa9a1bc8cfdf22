use std::{str::FromStr, sync::Arc, time::Duration};

use crate::{
    args::{Args, ProgramCommand},
    getters::{
        get_creator_overview, get_platform_stats, get_recent_tips, get_tip_jar_stats,
        get_user_profile, get_wallet_balance,
    },
    in_flight::InFlightRegistry,
    instructions::{
        initialize_platform, register_user, send_tip_to_user, withdraw_platform_fees,
        withdraw_user_funds,
    },
    ledger::{Ledger, RpcLedger},
};
use anyhow::{anyhow, Result};
use log::{info, warn};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use tipjar_core::{
    error::TipjarError,
    identifier::Username,
    namespace::{derive, Namespace},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything a read or a submission needs, passed explicitly to every call
pub struct CliHandler {
    pub commitment: CommitmentConfig,
    keypair: Option<Keypair>,
    pub tipjar_program_id: Pubkey,
    pub priority_fee_micro_lamports: u64,
    pub timeout: Duration,
    ledger: Arc<dyn Ledger>,
    in_flight: InFlightRegistry,
}

impl CliHandler {
    pub fn from_args(args: &Args) -> Result<Self> {
        let commitment = CommitmentConfig::from_str(&args.commitment)?;

        let keypair = args
            .keypair_path
            .as_ref()
            .map(|path| {
                read_keypair_file(path)
                    .map_err(|e| anyhow!("Failed to read keypair at {}: {}", path, e))
            })
            .transpose()?;

        let tipjar_program_id = args
            .tipjar_program_id
            .as_deref()
            .ok_or_else(|| anyhow!("No Tipjar program ID, set --tipjar-program-id"))?;
        let tipjar_program_id = Pubkey::from_str(tipjar_program_id)?;

        let ledger = Arc::new(RpcLedger::new(args.rpc_url.clone(), commitment));

        Ok(Self {
            commitment,
            keypair,
            tipjar_program_id,
            priority_fee_micro_lamports: args.priority_fee_micro_lamports,
            timeout: Duration::from_millis(args.timeout_ms),
            ledger,
            in_flight: InFlightRegistry::new(),
        })
    }

    /// Builds a handler over any ledger, e.g. an in-memory one in tests
    pub fn new(
        ledger: Arc<dyn Ledger>,
        keypair: Option<Keypair>,
        tipjar_program_id: Pubkey,
    ) -> Self {
        Self {
            commitment: CommitmentConfig::confirmed(),
            keypair,
            tipjar_program_id,
            priority_fee_micro_lamports: 1,
            timeout: DEFAULT_TIMEOUT,
            ledger,
            in_flight: InFlightRegistry::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    pub fn keypair(&self) -> Result<&Keypair, TipjarError> {
        self.keypair.as_ref().ok_or(TipjarError::MissingKeypair)
    }

    pub const fn in_flight(&self) -> &InFlightRegistry {
        &self.in_flight
    }

    pub async fn handle(&self, action: ProgramCommand) -> Result<()> {
        match action {
            // Admin
            ProgramCommand::InitializePlatform { owner, fee_bps } => {
                let owner = owner.as_deref().map(Pubkey::from_str).transpose()?;
                initialize_platform(self, owner, fee_bps).await?;

                if let Some((platform, _)) = get_platform_stats(self).await? {
                    info!("{}", platform);
                }
                Ok(())
            }
            ProgramCommand::WithdrawPlatformFees {} => {
                withdraw_platform_fees(self).await?;

                if let Some((_, fees)) = get_platform_stats(self).await? {
                    info!("\n\n--- Platform Vault ---\n{}", fees);
                }
                Ok(())
            }

            // Creators
            ProgramCommand::RegisterUser {
                username,
                display_name,
            } => {
                register_user(self, &username, display_name.as_deref()).await?;

                let username = Username::new(&username)?;
                let overview = get_creator_overview(self, &username).await?;
                info!("{}", overview);
                Ok(())
            }
            ProgramCommand::WithdrawUserFunds { username } => {
                withdraw_user_funds(self, &username).await?;

                let username = Username::new(&username)?;
                if let Some(stats) = get_tip_jar_stats(self, &username).await? {
                    info!("{}", stats);
                }
                Ok(())
            }

            // Tipping
            ProgramCommand::SendTip {
                receiver,
                sender_name,
                lamports,
            } => {
                send_tip_to_user(self, &receiver, &sender_name, lamports).await?;

                // The tip is confirmed at this point, a failed refresh is only worth a warning
                let receiver = Username::new(&receiver)?;
                match get_creator_overview(self, &receiver).await {
                    Ok(overview) => info!("{}", overview),
                    Err(e) => warn!("Tip confirmed but refreshing @{} failed: {}", receiver, e),
                }
                Ok(())
            }

            // Getters
            ProgramCommand::DeriveAddress {
                namespace,
                identifier,
            } => {
                let namespace = Namespace::from_str(&namespace)?;
                let derived = derive(namespace, identifier.as_deref(), &self.tipjar_program_id)?;
                info!(
                    "\n\n{} address: {}\nBump: {}\n",
                    namespace, derived.address, derived.bump
                );
                Ok(())
            }
            ProgramCommand::GetPlatform {} => {
                match get_platform_stats(self).await? {
                    Some((platform, fees)) => {
                        info!("{}\n--- Available Fees ---\n{}", platform, fees)
                    }
                    None => info!("Platform not initialized"),
                }
                Ok(())
            }
            ProgramCommand::GetUserProfile { username } => {
                let username = Username::new(&username)?;
                match get_user_profile(self, &username).await?.into_record() {
                    Some(profile) => info!("{}", profile),
                    None => info!("User {} not found", username),
                }
                Ok(())
            }
            ProgramCommand::GetTipJar { username } => {
                let username = Username::new(&username)?;
                match get_tip_jar_stats(self, &username).await? {
                    Some(stats) => info!("{}", stats),
                    None => info!("User {} not found", username),
                }
                Ok(())
            }
            ProgramCommand::GetCreator { username } => {
                let username = Username::new(&username)?;
                let overview = get_creator_overview(self, &username).await?;
                info!("{}", overview);
                Ok(())
            }
            ProgramCommand::GetRecentTips { limit } => {
                let tips = get_recent_tips(self, limit).await?;
                if tips.is_empty() {
                    info!("No tips yet");
                }
                for (address, tip) in tips {
                    info!("Tip {}: {}", address, tip);
                }
                Ok(())
            }
            ProgramCommand::GetWalletBalance { wallet } => {
                let wallet = match wallet {
                    Some(wallet) => Pubkey::from_str(&wallet)?,
                    None => self.keypair()?.pubkey(),
                };
                let balance = get_wallet_balance(self, &wallet).await?;
                info!("Wallet {}: {} SOL", wallet, lamports_to_sol(balance));
                Ok(())
            }
        }
    }
}
