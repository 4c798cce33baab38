//! Secret store backends.
//!
//! A store is the raw OS credential vault, addressed by
//! `(account, service)` pairs. It knows nothing about labels or
//! principals; `Vault` layers that on top.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Store` trait
//! 2. Add the implementation in a new file (e.g., `pass.rs`)
//! 3. Add a `StoreKind` variant and wire it in `backend.rs`

use zeroize::Zeroizing;

use crate::error::Result;

mod backend;
mod keychain;
mod memory;
mod secret_tool;

pub use backend::{default_backend, StoreKind};
pub use keychain::Keychain;
pub use memory::MemoryStore;
pub use secret_tool::SecretTool;

/// Secret storage trait.
///
/// Every method is a single blocking call into the backing vault.
pub trait Store {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// All service strings stored under `account`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the vault cannot be enumerated.
    fn services(&self, account: &str) -> Result<Vec<String>>;

    /// Look up a secret. `Ok(None)` means the entry does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for any failure other than a missing entry.
    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>>;

    /// Add an entry, replacing any existing one with the same key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the vault rejects the write.
    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()>;

    /// Remove an entry. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for any failure other than a missing entry.
    fn remove(&self, account: &str, service: &str) -> Result<bool>;
}

impl<T: Store + ?Sized> Store for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn services(&self, account: &str) -> Result<Vec<String>> {
        (**self).services(account)
    }

    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>> {
        (**self).get(account, service)
    }

    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()> {
        (**self).set(account, service, secret)
    }

    fn remove(&self, account: &str, service: &str) -> Result<bool> {
        (**self).remove(account, service)
    }
}

impl<T: Store + ?Sized> Store for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn services(&self, account: &str) -> Result<Vec<String>> {
        (**self).services(account)
    }

    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>> {
        (**self).get(account, service)
    }

    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()> {
        (**self).set(account, service, secret)
    }

    fn remove(&self, account: &str, service: &str) -> Result<bool> {
        (**self).remove(account, service)
    }
}
