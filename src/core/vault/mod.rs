//! The credential vault.
//!
//! `Vault` turns raw `(account, service)` store entries into
//! `CredentialRecord`s for one account namespace and one record kind.

use std::collections::BTreeMap;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::domain::{CredentialRecord, Principal, RecordKind};
use crate::core::store::Store;
use crate::core::validation::validate_label;
use crate::error::Result;

/// One account namespace of labelled secrets.
pub struct Vault<S: Store = Box<dyn Store>> {
    store: S,
    account: String,
    kind: RecordKind,
}

impl<S: Store> std::fmt::Debug for Vault<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("store", &self.store.name())
            .field("account", &self.account)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<S: Store> Vault<S> {
    /// Open the `account` namespace of `store`, holding `kind` records.
    pub fn new(store: S, account: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            store,
            account: account.into(),
            kind,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records in this namespace, sorted by label.
    ///
    /// Service strings that don't parse as this kind are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be enumerated.
    pub fn list(&self) -> Result<Vec<CredentialRecord>> {
        Ok(self.entries()?.into_values().map(|(record, _)| record).collect())
    }

    /// Secret for `label`, or `None` if no such record exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store lookup fails.
    pub fn find(&self, label: &str) -> Result<Option<Zeroizing<String>>> {
        let Some((_, service)) = self.entries()?.remove(label) else {
            debug!(label, "no such record");
            return Ok(None);
        };
        self.store.get(&self.account, &service)
    }

    /// Look up a single record by label.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be enumerated.
    pub fn record(&self, label: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.entries()?.remove(label).map(|(record, _)| record))
    }

    /// Store a record, replacing any existing record with the same label.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the label is invalid or the principal
    /// doesn't fit the record kind, `StoreError` if the store write fails.
    pub fn create(
        &self,
        label: &str,
        principal: Option<&Principal>,
        secret: &str,
    ) -> Result<CredentialRecord> {
        validate_label(label)?;
        let service = self.kind.service_for(label, principal)?;

        // Same label, different principal: a separate store entry that
        // would otherwise shadow the new one.
        if let Some((_, old)) = self.entries()?.remove(label) {
            if old != service {
                info!(label, "replacing record with a different principal");
                self.store.remove(&self.account, &old)?;
            }
        }

        self.store.set(&self.account, &service, secret)?;
        info!(label, account = %self.account, "record stored");

        Ok(CredentialRecord::new(label, &self.account, principal.cloned()))
    }

    /// Remove the record for `label`. Returns `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store delete fails.
    pub fn delete(&self, label: &str) -> Result<bool> {
        let Some((_, service)) = self.entries()?.remove(label) else {
            debug!(label, "nothing to delete");
            return Ok(false);
        };
        let removed = self.store.remove(&self.account, &service)?;
        if removed {
            info!(label, account = %self.account, "record deleted");
        }
        Ok(removed)
    }

    /// Records keyed by label, each with its service string.
    fn entries(&self) -> Result<BTreeMap<String, (CredentialRecord, String)>> {
        let mut entries = BTreeMap::new();
        for service in self.store.services(&self.account)? {
            match self.kind.parse_service(&self.account, &service) {
                Some(record) => {
                    entries.insert(record.label().to_string(), (record, service));
                }
                None => debug!(service = %service, kind = %self.kind, "skipping malformed entry"),
            }
        }
        Ok(entries)
    }
}
