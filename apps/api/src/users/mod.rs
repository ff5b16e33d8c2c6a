//! Accounts: registration, login, profile and admin listings.

pub mod handlers;
pub mod memory;
pub mod password;
pub mod store;
