//! List command.

use crate::cli::{output, Context};
use crate::error::Result;

/// List stored credentials for the context's account.
pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let records = ctx.vault().list()?;

    if json {
        let output = serde_json::json!({
            "account": ctx.account,
            "kind": ctx.kind,
            "records": records,
            "count": records.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if records.is_empty() {
        output::dimmed(&format!("no {} credentials stored", ctx.kind));
    } else {
        output::header(&format!("{} {} credentials", records.len(), ctx.kind));
        for record in &records {
            output::list_item(&record.display_line());
        }
    }

    Ok(())
}
