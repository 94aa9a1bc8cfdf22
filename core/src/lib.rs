pub mod account;
pub mod balance;
pub mod constants;
pub mod discriminator;
pub mod error;
pub mod identifier;
pub mod instruction;
pub mod namespace;
pub mod platform;
pub mod platform_vault;
pub mod tip;
pub mod tip_jar;
pub mod user_profile;

pub use balance::{reconcile, ReconciledBalance, StorageMetadata};
pub use namespace::{derive, DerivedAddress, Namespace};
