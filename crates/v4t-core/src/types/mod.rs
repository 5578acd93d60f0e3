//! Validated value types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod server_url;

pub use server_url::ServerUrl;
