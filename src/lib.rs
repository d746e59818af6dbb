//! dynv6 adapter for a generic DNS record management interface.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod providers;

pub use crate::core::provider::DNSProvider;
pub use crate::core::record::{DNSRecord, DNSRecordType};
pub use crate::error::Error;
pub use crate::providers::dynv6::{Dynv6Error, Dynv6Provider};
