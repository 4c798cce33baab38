//! Command-line interface.

pub mod add;
pub mod completions;
pub mod list;
pub mod output;
pub mod pick;
pub mod rm;
pub mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::domain::RecordKind;
use crate::core::store;
use crate::core::vault::Vault;
use crate::error::Result;

/// keypick - pick a stored credential and type it into your terminal.
#[derive(Parser)]
#[command(
    name = "keypick",
    about = "Pick a stored credential with fzf and type it into your terminal",
    version,
    after_help = "Run without a subcommand to open the picker.\n\
                  ↵ connect/paste | ctrl-d delete | ctrl-y paste only (ssh) | ctrl-n new"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Record kind to work with
    #[arg(short, long, global = true, value_enum, default_value_t = RecordKind::Ssh)]
    pub kind: RecordKind,

    /// Vault account to use instead of the kind's configured one
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// Config file path
    #[arg(long, global = true, env = constants::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Open the picker (default)
    Pick,

    /// List stored credentials
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store a credential (secret is prompted, or read from piped stdin)
    Add {
        /// Record label
        label: String,
        /// user@host for ssh records (prompted when omitted)
        #[arg(short, long)]
        principal: Option<String>,
        /// Overwrite an existing record without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Remove a credential
    Rm {
        /// Record label
        label: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub kind: RecordKind,
    pub account: String,
}

impl Context {
    /// Load config and resolve the account for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file is unreadable or invalid.
    pub fn load(config: Option<PathBuf>, kind: RecordKind, account: Option<String>) -> Result<Self> {
        let config = Config::load(config.as_deref())?;
        let account = account.unwrap_or_else(|| config.account_for(kind).to_string());
        debug!(%kind, account = %account, store = ?config.store, "context ready");
        Ok(Self {
            config,
            kind,
            account,
        })
    }

    /// Vault for this context's account and kind.
    pub fn vault(&self) -> Vault {
        Vault::new(
            store::default_backend(self.config.store),
            &self.account,
            self.kind,
        )
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        command,
        kind,
        account,
        config,
        ..
    } = cli;
    let load = move || Context::load(config, kind, account);

    match command.unwrap_or(Command::Pick) {
        Command::Pick => pick::execute(&load()?),
        Command::List { json } => list::execute(&load()?, json),
        Command::Add {
            label,
            principal,
            force,
        } => add::execute(&load()?, &label, principal.as_deref(), force),
        Command::Rm { label, yes } => rm::execute(&load()?, &label, yes),
        Command::Completions { shell } => completions::execute(shell),
    }
}
