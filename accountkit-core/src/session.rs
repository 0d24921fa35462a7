//! Read and write access to the host's multi-account session store.

/// An account known to the local session store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Record)]
pub struct Account {
    /// Server-assigned account identifier (a DID), e.g. `did:plc:ewvi7nxzyoun6zhxrhs64oiz`.
    pub did: String,
    /// The account's handle, e.g. `alice.bsky.social`. Display only.
    pub handle: String,
}

/// The host's session store, holding every signed-in account and a pointer to
/// the active one.
///
/// Implemented by the host application. Mutators are infallible from the
/// flow's point of view: they update local state only.
#[uniffi::export(with_foreign)]
pub trait SessionStore: Send + Sync {
    /// Returns the account currently presented as signed in, if any.
    fn current_account(&self) -> Option<Account>;

    /// Removes the account and its credentials from the local store.
    fn remove_account(&self, account: Account);

    /// Clears the active-account pointer.
    fn clear_current_account(&self);
}
