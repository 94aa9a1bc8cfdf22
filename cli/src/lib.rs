pub mod args;
pub mod getters;
pub mod handler;
pub mod in_flight;
pub mod instructions;
pub mod ledger;
pub mod log;
