//! keypick - pick a stored credential and type it into your terminal.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keypick::cli::output;
use keypick::cli::{execute, Cli};
use keypick::core::constants::LOG_ENV;
use keypick::error::{ConfigError, Error, HostError, PickerError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keypick=debug")
        } else {
            EnvFilter::new("keypick=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Picker(PickerError::NotFound { .. }) => {
                Some("install fzf (brew install fzf) or set KEYPICK_FZF")
            }
            Error::Host(HostError::NoSession { .. }) => {
                Some("run keypick inside kitty or wezterm, or set `host` in the config")
            }
            Error::Host(HostError::Command { tool: "kitty", .. }) => {
                Some("enable allow_remote_control in kitty.conf")
            }
            Error::Config(ConfigError::Parse { .. } | ConfigError::InvalidValue { .. }) => {
                Some("check the config file, or pass --config")
            }
            Error::NotFound(_) => Some("run: keypick list"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
