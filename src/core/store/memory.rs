//! In-process store.
//!
//! Holds entries in a map for the lifetime of the value. Used by the
//! test suites and by callers embedding the picker loop without an OS
//! vault.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use zeroize::Zeroizing;

use super::Store;
use crate::error::Result;

type Entries = BTreeMap<(String, String), Zeroizing<String>>;

/// Map-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entries across all accounts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn services(&self, account: &str) -> Result<Vec<String>> {
        Ok(self
            .lock()
            .keys()
            .filter(|(a, _)| a == account)
            .map(|(_, s)| s.clone())
            .collect())
    }

    fn get(&self, account: &str, service: &str) -> Result<Option<Zeroizing<String>>> {
        Ok(self
            .lock()
            .get(&(account.to_string(), service.to_string()))
            .cloned())
    }

    fn set(&self, account: &str, service: &str, secret: &str) -> Result<()> {
        self.lock().insert(
            (account.to_string(), service.to_string()),
            Zeroizing::new(secret.to_string()),
        );
        Ok(())
    }

    fn remove(&self, account: &str, service: &str) -> Result<bool> {
        Ok(self
            .lock()
            .remove(&(account.to_string(), service.to_string()))
            .is_some())
    }
}
