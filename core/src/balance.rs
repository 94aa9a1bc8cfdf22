use core::fmt;

use solana_program::native_token::lamports_to_sol;

/// Raw storage facts about an account, read from the same fetch as its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageMetadata {
    /// Lamports currently held by the account
    pub lamports: u64,
    /// Allocated data length in bytes, as stored on the ledger
    pub data_len: usize,
}

impl StorageMetadata {
    pub const fn new(lamports: u64, data_len: usize) -> Self {
        Self { lamports, data_len }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconciledBalance {
    pub stored: u64,
    pub retention_minimum: u64,
    /// Lamports that can leave the account without dropping below its rent-exempt minimum
    pub withdrawable: u64,
}

impl ReconciledBalance {
    pub const fn zero() -> Self {
        Self {
            stored: 0,
            retention_minimum: 0,
            withdrawable: 0,
        }
    }

    pub const fn has_withdrawable(&self) -> bool {
        self.withdrawable > 0
    }
}

/// `minimum_retained` must be the rent-exempt minimum for `metadata.data_len`
pub const fn reconcile(metadata: &StorageMetadata, minimum_retained: u64) -> ReconciledBalance {
    ReconciledBalance {
        stored: metadata.lamports,
        retention_minimum: minimum_retained,
        withdrawable: metadata.lamports.saturating_sub(minimum_retained),
    }
}

#[rustfmt::skip]
impl fmt::Display for ReconciledBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Stored:                       {} SOL", lamports_to_sol(self.stored))?;
        writeln!(f, "  Rent Exempt Minimum:          {} SOL", lamports_to_sol(self.retention_minimum))?;
        writeln!(f, "  Withdrawable:                 {} SOL", lamports_to_sol(self.withdrawable))?;
        Ok(())
    }
}
