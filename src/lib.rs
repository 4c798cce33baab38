//! keypick - pick a stored credential and type it into your terminal.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── pick          # Interactive picker (default command)
//! │   ├── list/add/rm   # Non-interactive record management
//! │   ├── terminal      # dialoguer-backed Prompter
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # ~/.config/keypick/config.toml
//!     ├── domain/       # Records, principals, record kinds, actions
//!     ├── store/        # OS vault backends
//!     │   ├── keychain  # macOS `security`
//!     │   ├── secret_tool # libsecret `secret-tool`
//!     │   └── memory    # In-process map
//!     ├── vault         # Labelled records over a store account
//!     ├── picker        # fzf integration
//!     ├── prompt        # Prompt sequences and the Prompter trait
//!     ├── host/         # Terminal remote control (kitty, wezterm)
//!     ├── executor      # Connect and paste actions
//!     └── flow          # The picker loop state machine
//! ```
//!
//! The loop (`core::flow::Flow`) only sees traits: `Store`, `Picker`,
//! `Prompter` and `Host`. Everything external sits behind one of them.

pub mod cli;
pub mod core;
pub mod error;
