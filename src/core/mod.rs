//! Core library components.
//!
//! The picker loop and the adapters it drives: the OS vault, fzf, the
//! terminal prompts and the host terminal.

pub mod config;
pub mod constants;
pub mod domain;
pub mod executor;
pub mod flow;
pub mod host;
pub mod picker;
pub(crate) mod process;
pub mod prompt;
pub mod store;
pub mod validation;
pub mod vault;
