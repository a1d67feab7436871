// CMT API module.
// Provides client and types for interacting with the Microsoft CMT OData API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::CmtClient;
pub use types::*;
