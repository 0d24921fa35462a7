//! Headless account-management flows for AT Protocol mobile clients.
//!
//! The host application draws the views these flows render and implements the
//! collaborator interfaces ([`SessionStore`], [`ModalHost`], [`Translator`] and,
//! optionally, [`AccountService`]) in its own language through `UniFFI`.
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
use strum::EnumString;

/// Hosted service environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Staging network.
    Staging,
    /// Production network.
    Production,
}

mod error;
pub use error::*;

mod defaults;
pub use defaults::*;

mod session;
pub use session::*;

mod host;
pub use host::*;

mod service;
pub use service::*;

mod xrpc;
pub use xrpc::*;

pub mod delete_account;
pub use delete_account::{ActionOutcome, DeleteAccountFlow, DeleteAccountView, FlowState};

pub mod i18n;
pub use i18n::{SourceTranslator, Translator};

pub mod logger;

// private modules
mod http_request;

uniffi::setup_scaffolding!("accountkit_core");
