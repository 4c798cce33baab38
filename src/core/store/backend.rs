//! Backend selection logic for secret storage
//!
//! macOS defaults to the Keychain, everything else to the Secret
//! Service. The config file can pick either explicitly.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Keychain, SecretTool, Store};

/// Which OS vault to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    /// macOS `security`
    Security,
    /// libsecret `secret-tool`
    SecretTool,
}

impl Default for StoreKind {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Security
        } else {
            Self::SecretTool
        }
    }
}

/// Build the store for `kind`.
pub fn default_backend(kind: StoreKind) -> Box<dyn Store> {
    match kind {
        StoreKind::Security => {
            info!("Using macOS Keychain backend");
            Box::new(Keychain::new())
        }
        StoreKind::SecretTool => {
            info!("Using Secret Service backend");
            Box::new(SecretTool::new())
        }
    }
}
