use std::fmt;

use clap::{Parser, Subcommand};
use tipjar_core::constants::{DEFAULT_FEE_BPS, DEFAULT_RECENT_TIPS, DEFAULT_TIP_LAMPORTS};

#[derive(Parser)]
#[command(author, version, about = "A CLI for creating and tipping creators on the Tipjar platform", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ProgramCommand>,

    #[arg(
        long,
        global = true,
        env = "RPC_URL",
        default_value = "https://api.devnet.solana.com",
        help = "RPC URL to use"
    )]
    pub rpc_url: String,

    #[arg(
        long,
        global = true,
        env = "COMMITMENT",
        default_value = "confirmed",
        help = "Commitment level"
    )]
    pub commitment: String,

    #[arg(
        long,
        global = true,
        env = "PRIORITY_FEE_MICRO_LAMPORTS",
        default_value_t = 1,
        help = "Priority fee in micro lamports"
    )]
    pub priority_fee_micro_lamports: u64,

    #[arg(
        long,
        global = true,
        env = "TIMEOUT_MS",
        default_value_t = 60_000,
        help = "Give up waiting for a confirmation after this many milliseconds"
    )]
    pub timeout_ms: u64,

    #[arg(
        long,
        global = true,
        env = "TIPJAR_PROGRAM_ID",
        help = "Tipjar program ID"
    )]
    pub tipjar_program_id: Option<String>,

    #[arg(long, global = true, env = "KEYPAIR_PATH", help = "keypair path")]
    pub keypair_path: Option<String>,

    #[arg(long, global = true, help = "Verbose mode")]
    pub verbose: bool,

    #[arg(long, global = true, hide = true)]
    pub markdown_help: bool,
}

#[derive(Subcommand)]
pub enum ProgramCommand {
    /// Admin
    InitializePlatform {
        #[arg(long, help = "Platform owner, defaults to the keypair")]
        owner: Option<String>,
        #[arg(long, default_value_t = DEFAULT_FEE_BPS, help = "Fee taken from each tip in basis points")]
        fee_bps: u64,
    },
    WithdrawPlatformFees {},

    /// Creators
    RegisterUser {
        #[arg(long, help = "3-20 alphanumeric characters")]
        username: String,
        #[arg(long, help = "Display name, defaults to the username")]
        display_name: Option<String>,
    },
    WithdrawUserFunds {
        #[arg(long)]
        username: String,
    },

    /// Tipping
    SendTip {
        #[arg(long, help = "Username of the creator receiving the tip")]
        receiver: String,
        #[arg(long, help = "Name shown with the tip")]
        sender_name: String,
        #[arg(long, default_value_t = DEFAULT_TIP_LAMPORTS, help = "Tip amount in lamports")]
        lamports: u64,
    },

    /// Getters
    DeriveAddress {
        #[arg(long, help = "platform, platform-vault, profile or tipjar")]
        namespace: String,
        #[arg(long, help = "Username, omitted for platform and platform-vault")]
        identifier: Option<String>,
    },
    GetPlatform {},
    GetUserProfile {
        #[arg(long)]
        username: String,
    },
    GetTipJar {
        #[arg(long)]
        username: String,
    },
    GetCreator {
        #[arg(long)]
        username: String,
    },
    GetRecentTips {
        #[arg(long, default_value_t = DEFAULT_RECENT_TIPS, help = "Number of tips to show")]
        limit: usize,
    },
    GetWalletBalance {
        #[arg(long, help = "Wallet address, defaults to the keypair")]
        wallet: Option<String>,
    },
}

#[rustfmt::skip]
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nTipjar CLI Configuration")?;
        writeln!(f, "═══════════════════════════════════════════")?;

        writeln!(f, "\n📡 Network Settings:")?;
        writeln!(f, "  • RPC URL:     {}", self.rpc_url)?;
        writeln!(f, "  • Commitment:  {}", self.commitment)?;
        writeln!(f, "  • Timeout:     {} ms", self.timeout_ms)?;

        writeln!(f, "\n🔑 Program:")?;
        writeln!(f, "  • Tipjar:      {}", self.tipjar_program_id.as_deref().unwrap_or("Not Set"))?;

        writeln!(f, "\n⚙️  Settings:")?;
        writeln!(f, "  • Keypair:     {}", self.keypair_path.as_deref().unwrap_or("Not Set"))?;
        writeln!(f, "  • Priority Fee: {} micro-lamports", self.priority_fee_micro_lamports)?;
        writeln!(f, "  • Verbose:     {}", self.verbose)?;

        writeln!(f)?;
        Ok(())
    }
}
