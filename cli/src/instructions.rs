use core::fmt;

use crate::{
    getters::{get_platform, get_platform_vault, get_tip_jar, get_wallet_balance, reconciled_balance},
    handler::CliHandler,
};
use log::{error, info};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction,
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tipjar_core::{
    constants::{MAX_DISPLAY_NAME_LEN, MAX_FEE_BPS, MAX_SENDER_NAME_LEN, MIN_REGISTRATION_BALANCE},
    error::{TipjarError, TipjarProgramError},
    identifier::Username,
    instruction::{self, TipjarOperation},
    platform::Platform,
    platform_vault::PlatformVault,
    tip_jar::TipJar,
    user_profile::UserProfile,
};
use tokio::time::timeout;

/// Lifecycle of one user-initiated submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Building,
    Submitted,
    Confirmed,
    Failed,
}

impl SubmissionState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Building)
                | (Self::Building, Self::Submitted)
                | (Self::Building, Self::Failed)
                | (Self::Submitted, Self::Confirmed)
                | (Self::Submitted, Self::Failed)
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

struct SubmissionTracker {
    operation: &'static str,
    target: Pubkey,
    state: SubmissionState,
}

impl SubmissionTracker {
    const fn new(operation: &'static str, target: Pubkey) -> Self {
        Self {
            operation,
            target,
            state: SubmissionState::Idle,
        }
    }

    fn advance(&mut self, next: SubmissionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        info!(
            "{} ({}): {} -> {}",
            self.operation, self.target, self.state, next
        );
        self.state = next;
    }

    fn fail(&mut self, error: &TipjarError) {
        error!("{} ({}) failed: {}", self.operation, self.target, error);
        self.advance(SubmissionState::Failed);
    }
}

/// A state-changing request: one program operation, the keypairs that must
/// sign besides the wallet, and the address the busy flag is keyed on
pub struct Action {
    pub operation: TipjarOperation,
    pub signers: Vec<Keypair>,
    pub target: Pubkey,
}

impl Action {
    pub fn new(operation: TipjarOperation, target: Pubkey) -> Self {
        Self {
            operation,
            signers: vec![],
            target,
        }
    }

    pub fn with_signer(mut self, signer: Keypair) -> Self {
        self.signers.push(signer);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub operation: &'static str,
    pub signature: Signature,
}

/// Submits `action` and waits for the ledger to confirm it.
///
/// Nothing is retried. Running out of `handler.timeout` while building or
/// waiting is reported as a network failure.
pub async fn submit(handler: &CliHandler, action: Action) -> Result<Confirmation, TipjarError> {
    let operation = action.operation.name();
    let _guard = handler.in_flight().try_acquire(operation, action.target)?;
    let mut tracker = SubmissionTracker::new(operation, action.target);

    let result = timeout(
        handler.timeout,
        build_and_send(handler, &action, &mut tracker),
    )
    .await
    .unwrap_or_else(|_| {
        Err(TipjarError::NetworkFailure(format!(
            "no confirmation within {:?}",
            handler.timeout
        )))
    });

    match result {
        Ok(signature) => {
            tracker.advance(SubmissionState::Confirmed);
            Ok(Confirmation {
                operation,
                signature,
            })
        }
        Err(e) => {
            tracker.fail(&e);
            Err(e)
        }
    }
}

async fn build_and_send(
    handler: &CliHandler,
    action: &Action,
    tracker: &mut SubmissionTracker,
) -> Result<Signature, TipjarError> {
    tracker.advance(SubmissionState::Building);

    let keypair = handler.keypair()?;
    let instructions = [
        ComputeBudgetInstruction::set_compute_unit_price(handler.priority_fee_micro_lamports),
        action
            .operation
            .to_instruction(&handler.tipjar_program_id),
    ];

    let blockhash = handler.ledger().get_latest_blockhash().await?;

    let mut all_signers = vec![keypair];
    all_signers.extend(action.signers.iter());

    let mut tx = Transaction::new_with_payer(&instructions, Some(&keypair.pubkey()));
    tx.try_sign(&all_signers, blockhash)
        .map_err(|e| TipjarError::SigningFailed(e.to_string()))?;

    tracker.advance(SubmissionState::Submitted);
    handler.ledger().send_and_confirm_transaction(&tx).await
}

// --------------------- ACTIONS ------------------------------

pub async fn initialize_platform(
    handler: &CliHandler,
    owner: Option<Pubkey>,
    fee_bps: u64,
) -> Result<Confirmation, TipjarError> {
    let keypair = handler.keypair()?;
    let program_id = &handler.tipjar_program_id;

    if fee_bps > MAX_FEE_BPS {
        return Err(TipjarProgramError::FeeTooHigh.into());
    }

    let (platform, _, _) = Platform::find_program_address(program_id);
    let (platform_vault, _, _) = PlatformVault::find_program_address(program_id);
    let owner = owner.unwrap_or_else(|| keypair.pubkey());

    let operation =
        instruction::initialize_platform(platform, platform_vault, keypair.pubkey(), owner, fee_bps);
    let confirmation = submit(handler, Action::new(operation, platform)).await?;

    log_transaction(
        "Initialized Platform",
        confirmation.signature,
        &[
            format!("Platform: {:?}", platform),
            format!("Platform Vault: {:?}", platform_vault),
            format!("Owner: {:?}", owner),
            format!("Fee BPS: {:?}", fee_bps),
        ],
    );

    Ok(confirmation)
}

pub async fn register_user(
    handler: &CliHandler,
    username: &str,
    display_name: Option<&str>,
) -> Result<Confirmation, TipjarError> {
    let keypair = handler.keypair()?;
    let program_id = &handler.tipjar_program_id;

    let username = Username::new(username)?;
    let display_name = display_name.unwrap_or(username.as_str()).to_string();
    if display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(TipjarProgramError::DisplayNameTooLong.into());
    }

    // Registration pays rent for two accounts, skip the round trip when that cannot work
    let balance = get_wallet_balance(handler, &keypair.pubkey()).await?;
    if balance < MIN_REGISTRATION_BALANCE {
        return Err(TipjarError::InsufficientFunds(format!(
            "{} SOL required to register, {} SOL available",
            lamports_to_sol(MIN_REGISTRATION_BALANCE),
            lamports_to_sol(balance)
        )));
    }

    let (user_profile, _, _) = UserProfile::find_program_address(program_id, &username);
    let (tipjar, _, _) = TipJar::find_program_address(program_id, &username);
    let (platform, _, _) = Platform::find_program_address(program_id);

    let operation = instruction::register_user(
        user_profile,
        tipjar,
        platform,
        keypair.pubkey(),
        username.as_str().to_string(),
        display_name.clone(),
    );
    let confirmation = submit(handler, Action::new(operation, tipjar)).await?;

    log_transaction(
        "Registered User",
        confirmation.signature,
        &[
            format!("Username: {}", username),
            format!("Display Name: {}", display_name),
            format!("User Profile: {:?}", user_profile),
            format!("Tip Jar: {:?}", tipjar),
            format!("Authority: {:?}", keypair.pubkey()),
        ],
    );

    Ok(confirmation)
}

pub async fn send_tip_to_user(
    handler: &CliHandler,
    receiver: &str,
    sender_name: &str,
    lamports: u64,
) -> Result<Confirmation, TipjarError> {
    let keypair = handler.keypair()?;
    let program_id = &handler.tipjar_program_id;

    let receiver = Username::new(receiver)?;
    if sender_name.trim().is_empty() {
        return Err(TipjarError::InvalidIdentifier(
            "sender name is required".to_string(),
        ));
    }
    if sender_name.chars().count() > MAX_SENDER_NAME_LEN {
        return Err(TipjarProgramError::NameTooLong.into());
    }
    if lamports == 0 {
        return Err(TipjarProgramError::InvalidAmount.into());
    }

    let (platform, _, _) = Platform::find_program_address(program_id);
    let (platform_vault, _, _) = PlatformVault::find_program_address(program_id);
    let (user_profile, _, _) = UserProfile::find_program_address(program_id, &receiver);
    let (tipjar, _, _) = TipJar::find_program_address(program_id, &receiver);
    let tip = Keypair::new();

    let operation = instruction::send_tip_to_user(
        platform,
        platform_vault,
        user_profile,
        tipjar,
        tip.pubkey(),
        keypair.pubkey(),
        receiver.as_str().to_string(),
        sender_name.to_string(),
        lamports,
    );
    let tip_address = tip.pubkey();
    let confirmation = submit(handler, Action::new(operation, tipjar).with_signer(tip)).await?;

    log_transaction(
        "Sent Tip",
        confirmation.signature,
        &[
            format!("Receiver: {}", receiver),
            format!("Sender Name: {}", sender_name),
            format!("Amount: {} SOL", lamports_to_sol(lamports)),
            format!("Tip: {:?}", tip_address),
        ],
    );

    Ok(confirmation)
}

/// Withdraws everything above the tip jar's rent-exempt minimum
pub async fn withdraw_user_funds(
    handler: &CliHandler,
    username: &str,
) -> Result<Confirmation, TipjarError> {
    let keypair = handler.keypair()?;
    let program_id = &handler.tipjar_program_id;

    let username = Username::new(username)?;
    let (tipjar, _, _) = TipJar::find_program_address(program_id, &username);

    let fetch = get_tip_jar(handler, &username).await?;
    let balance = reconciled_balance(handler, &fetch).await?;
    let (tip_jar, _) = fetch.found(&tipjar)?;

    if tip_jar.authority != keypair.pubkey() {
        return Err(TipjarProgramError::Unauthorized.into());
    }
    if !balance.has_withdrawable() {
        return Err(TipjarError::InsufficientFunds(format!(
            "nothing to withdraw from {}, {} SOL is held for rent",
            username,
            lamports_to_sol(balance.stored)
        )));
    }

    let operation = instruction::withdraw_user_funds(
        tipjar,
        keypair.pubkey(),
        username.as_str().to_string(),
        balance.withdrawable,
    );
    let confirmation = submit(handler, Action::new(operation, tipjar)).await?;

    log_transaction(
        "Withdrew User Funds",
        confirmation.signature,
        &[
            format!("Username: {}", username),
            format!("Tip Jar: {:?}", tipjar),
            format!("Amount: {} SOL", lamports_to_sol(balance.withdrawable)),
        ],
    );

    Ok(confirmation)
}

/// Withdraws collected fees, keeping the vault's rent-exempt minimum in place
pub async fn withdraw_platform_fees(handler: &CliHandler) -> Result<Confirmation, TipjarError> {
    let keypair = handler.keypair()?;
    let program_id = &handler.tipjar_program_id;

    let (platform, _, _) = Platform::find_program_address(program_id);
    let (platform_vault, _, _) = PlatformVault::find_program_address(program_id);

    let (platform_account, vault) =
        futures::try_join!(get_platform(handler), get_platform_vault(handler))?;
    let (platform_account, _) = platform_account.found(&platform)?;

    if platform_account.owner != keypair.pubkey() {
        return Err(TipjarProgramError::Unauthorized.into());
    }

    if vault.is_not_found() {
        return Err(TipjarError::NotFound(platform_vault));
    }
    let fees = reconciled_balance(handler, &vault).await?;
    if !fees.has_withdrawable() {
        return Err(TipjarError::InsufficientFunds(
            "no fees above the vault's rent-exempt minimum".to_string(),
        ));
    }

    let operation = instruction::withdraw_platform_fees(
        platform,
        platform_vault,
        keypair.pubkey(),
        fees.withdrawable,
    );
    let confirmation = submit(handler, Action::new(operation, platform_vault)).await?;

    log_transaction(
        "Withdrew Platform Fees",
        confirmation.signature,
        &[
            format!("Platform Vault: {:?}", platform_vault),
            format!("Amount: {} SOL", lamports_to_sol(fees.withdrawable)),
        ],
    );

    Ok(confirmation)
}

// --------------------- HELPERS -------------------------

pub fn log_transaction(title: &str, signature: Signature, log_items: &[String]) {
    let mut log_message = format!(
        "\n\n---------- {} ----------\nSignature: {:?}",
        title, signature
    );

    for item in log_items {
        log_message.push_str(&format!("\n{}", item));
    }

    log_message.push('\n');
    info!("{}", log_message);
}
