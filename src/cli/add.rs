//! Add command.
//!
//! Store a credential with hidden input, or from piped stdin.

use std::io::{self, IsTerminal};

use dialoguer::Confirm;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::terminal::Terminal;
use crate::cli::{output, Context};
use crate::core::domain::Principal;
use crate::core::prompt::{self, Prompter};
use crate::core::validation::validate_label;
use crate::error::{Error, PromptError, Result, ValidationError};

/// Add a credential.
pub fn execute(ctx: &Context, label: &str, principal: Option<&str>, force: bool) -> Result<()> {
    info!("Adding credential: {}", label);
    validate_label(label)?;

    let principal = match (ctx.kind.has_principal(), principal) {
        (true, Some(p)) => Some(p.parse::<Principal>()?),
        (false, Some(_)) => return Err(ValidationError::UnexpectedPrincipal("password").into()),
        (_, None) => None,
    };

    let interactive = io::stdin().is_terminal();
    // Piped input: principal must come from the flag.
    if !interactive && ctx.kind.has_principal() && principal.is_none() {
        return Err(Error::Other(
            "pass --principal user@host when piping the secret".to_string(),
        ));
    }

    let vault = ctx.vault();
    let terminal = Terminal::new();

    if !force && vault.record(label)?.is_some() {
        output::warn(&format!("{} already exists", output::label(label)));
        let overwrite = interactive
            && Confirm::new()
                .with_prompt("Overwrite?")
                .default(false)
                .interact()?;
        if !overwrite {
            output::hint("use --force to overwrite");
            return Ok(());
        }
    }

    let (principal, secret) = if interactive {
        match principal {
            Some(p) => (Some(p), prompt::collect_secret(&terminal)?),
            None => {
                let default_user = whoami::username();
                let new = prompt::collect_new(&terminal, label, ctx.kind, Some(&default_user))?;
                (new.principal, new.secret)
            }
        }
    } else {
        (principal, read_piped_secret()?)
    };

    let record = vault.create(label, principal.as_ref(), &secret)?;
    terminal.notify(prompt::Notice::Created(record));
    Ok(())
}

fn read_piped_secret() -> Result<Zeroizing<String>> {
    let mut input = Zeroizing::new(String::new());
    io::stdin().read_line(&mut input)?;
    let secret = Zeroizing::new(input.trim_end_matches(['\r', '\n']).to_string());
    if secret.is_empty() {
        return Err(PromptError::Empty("password").into());
    }
    Ok(secret)
}
