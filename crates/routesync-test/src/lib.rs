//! Test infrastructure for route table reconciliation
//!
//! Provides:
//! - An in-memory provider that records every API call
//! - A log sink that captures driver output
//! - Describe-response and route fixtures
//! - Call verification helpers

mod fake;
pub mod fixtures;
mod sink;
mod verification;

pub use fake::{FakeProvider, ProviderCall, ProviderOperation};
pub use fixtures::*;
pub use sink::CapturingSink;
pub use verification::*;
