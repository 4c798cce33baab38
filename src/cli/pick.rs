//! Pick command.
//!
//! Runs the interactive picker loop against the real vault, fzf and
//! terminal host.

use tracing::info;

use crate::cli::terminal::Terminal;
use crate::cli::Context;
use crate::core::executor::Executor;
use crate::core::flow::{Flow, FlowOptions, Outcome};
use crate::core::host;
use crate::core::picker::Fzf;
use crate::error::Result;

/// Open the picker.
pub fn execute(ctx: &Context) -> Result<()> {
    // Resolve fzf first so a missing binary fails before anything else.
    let fzf = Fzf::locate(ctx.config.picker_path().as_deref())?;
    let vault = ctx.vault();
    let host = host::default_host(ctx.config.host, ctx.config.connect.launch);
    let executor = Executor::new(host.as_ref(), ctx.config.connect.clone(), ctx.kind);
    let terminal = Terminal::new();

    let options = FlowOptions {
        delete_default_yes: ctx.config.delete_default_yes,
        default_user: Some(whoami::username()),
    };

    let outcome = Flow::new(&vault, &fzf, &terminal, &executor, options).run()?;
    match &outcome {
        Outcome::Cancelled => info!("picker cancelled"),
        Outcome::Connected { label, injection } => info!(label, ?injection, "connected"),
        Outcome::Pasted { label } => info!(label, "pasted"),
    }
    Ok(())
}
