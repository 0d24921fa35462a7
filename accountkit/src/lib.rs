//! `AccountKit` for mobile hosts.
//!
//! Re-exports the core flows; the Swift and Kotlin bindings are generated from
//! this library.
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

pub use accountkit_core::*;

uniffi::setup_scaffolding!("accountkit");

/// Version of the `AccountKit` library the bindings were generated from.
#[must_use]
#[uniffi::export]
pub fn accountkit_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
