//! Full-data command - snapshot of the whole object tree

use anyhow::Result;
use jeedom_client::JeedomClient;

use crate::output::{entries, OutputContext, OutputFormat, SummaryRow};

/// Print the full tree as JSON, or a per-object summary
pub async fn full_data(client: &JeedomClient, ctx: &OutputContext) -> Result<()> {
    let value = client.full_data().await?;

    if ctx.format == OutputFormat::Json {
        ctx.json(&value);
        return Ok(());
    }

    let rows: Vec<SummaryRow> = entries(&value).into_iter().map(SummaryRow::from).collect();
    if rows.is_empty() {
        ctx.info("No objects found");
        return Ok(());
    }

    ctx.print(&rows);
    Ok(())
}
