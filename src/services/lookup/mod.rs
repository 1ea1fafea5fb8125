pub mod client;

pub use client::{LookupError, LookupService, LookupSummary};
