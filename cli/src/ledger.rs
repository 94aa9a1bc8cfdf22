use async_trait::async_trait;
use log::debug;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig},
    rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType},
};
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::{
    client_error::{Error as ClientError, ErrorKind as ClientErrorKind},
    request::RpcError,
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use tipjar_core::error::{TipjarError, TipjarProgramError};

/// System program error for a transfer larger than the source balance
const SYSTEM_RESULT_WITH_NEGATIVE_LAMPORTS: u32 = 1;

/// Everything the client needs from the chain.
///
/// Implementations must not retry. Whether to try again is the caller's call,
/// based on [`TipjarError::is_retryable`].
#[async_trait]
pub trait Ledger: Send + Sync {
    /// `None` when no account exists at `address`
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TipjarError>;

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, TipjarError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, TipjarError>;

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, TipjarError>;

    /// Accounts owned by `program_id` whose data starts with `discriminator`
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8],
    ) -> Result<Vec<(Pubkey, Account)>, TipjarError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, TipjarError>;

    /// Resolves only once the transaction is confirmed
    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, TipjarError>;
}

pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, commitment),
            commitment,
        }
    }

    pub const fn rpc_client(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, TipjarError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| classify_client_error(&e))?;
        Ok(response.value)
    }

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, TipjarError> {
        let response = self
            .client
            .get_multiple_accounts_with_commitment(addresses, self.commitment)
            .await
            .map_err(|e| classify_client_error(&e))?;
        Ok(response.value)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, TipjarError> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| classify_client_error(&e))
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, TipjarError> {
        let response = self
            .client
            .get_balance_with_commitment(address, self.commitment)
            .await
            .map_err(|e| classify_client_error(&e))?;
        Ok(response.value)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        discriminator: &[u8],
    ) -> Result<Vec<(Pubkey, Account)>, TipjarError> {
        let discriminator_filter = RpcFilterType::Memcmp(Memcmp::new(
            0,
            MemcmpEncodedBytes::Bytes(discriminator.to_vec()),
        ));

        let config = RpcProgramAccountsConfig {
            filters: Some(vec![discriminator_filter]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            with_context: Some(false),
            ..RpcProgramAccountsConfig::default()
        };

        self.client
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| classify_client_error(&e))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, TipjarError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| classify_client_error(&e))
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, TipjarError> {
        let config = RpcSendTransactionConfig {
            preflight_commitment: Some(self.commitment.commitment),
            ..RpcSendTransactionConfig::default()
        };
        self.client
            .send_and_confirm_transaction_with_spinner_and_config(
                transaction,
                self.commitment,
                config,
            )
            .await
            .map_err(|e| classify_client_error(&e))
    }
}

/// Maps an RPC failure onto the error taxonomy callers branch on
pub fn classify_client_error(error: &ClientError) -> TipjarError {
    debug!("Classifying RPC error: {:?}", error);

    if let Some(transaction_error) = error.get_transaction_error() {
        return classify_transaction_error(&transaction_error);
    }

    match error.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError { message, .. })
            if message.contains("already been processed") =>
        {
            TipjarError::DuplicateRequest(message.clone())
        }
        ClientErrorKind::RpcError(RpcError::RpcResponseError { message, .. })
            if message.contains("Attempt to debit an account but found no record") =>
        {
            TipjarError::InsufficientFunds(message.clone())
        }
        _ => TipjarError::NetworkFailure(error.to_string()),
    }
}

pub fn classify_transaction_error(error: &TransactionError) -> TipjarError {
    match error {
        TransactionError::AlreadyProcessed => {
            TipjarError::DuplicateRequest("transaction already processed".to_string())
        }
        TransactionError::InsufficientFundsForFee
        | TransactionError::InsufficientFundsForRent { .. }
        | TransactionError::AccountNotFound => TipjarError::InsufficientFunds(error.to_string()),
        TransactionError::InstructionError(_, InstructionError::InsufficientFunds) => {
            TipjarError::InsufficientFunds(error.to_string())
        }
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            match TipjarProgramError::from_code(*code) {
                Some(program_error) => program_error.into(),
                None if *code == SYSTEM_RESULT_WITH_NEGATIVE_LAMPORTS => {
                    TipjarError::InsufficientFunds(error.to_string())
                }
                None => TipjarError::DomainRejected {
                    code: *code,
                    message: error.to_string(),
                },
            }
        }
        _ => TipjarError::DomainRejected {
            code: 0,
            message: error.to_string(),
        },
    }
}
