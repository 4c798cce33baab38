//! Rm command.

use crate::cli::terminal::Terminal;
use crate::cli::{output, Context};
use crate::core::prompt::{self, Notice, Prompter};
use crate::error::{Error, Result};

/// Remove a credential, asking first unless `yes` is set.
pub fn execute(ctx: &Context, label: &str, yes: bool) -> Result<()> {
    let vault = ctx.vault();
    let Some(record) = vault.record(label)? else {
        return Err(Error::NotFound(label.to_string()));
    };

    let terminal = Terminal::new();
    if !yes && !prompt::confirm_delete(&terminal, &record, ctx.config.delete_default_yes)? {
        terminal.notify(Notice::DeleteCancelled(label.to_string()));
        return Ok(());
    }

    if vault.delete(label)? {
        terminal.notify(Notice::Deleted(record));
    } else {
        output::warn(&format!("{} was already gone", output::label(label)));
    }
    Ok(())
}
