//! API client module

pub mod client;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod response;

pub use client::AnsClient;
pub use params::RequestParameters;
