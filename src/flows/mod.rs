//! # Flows
//!
//! Each flow is one async call that ends in exactly one `Result`.

pub mod airdrop;
pub mod balance;
pub mod donation;

pub use airdrop::request_airdrop;
pub use balance::get_balance;
pub use donation::send_donation;
