//! Action commands - scenario, cmd and message (raw text answers)

use anyhow::Result;
use jeedom_client::{JeedomClient, ScenarioAction};

use crate::output::OutputContext;

/// Start, stop, enable or disable a scenario
pub async fn scenario(
    client: &JeedomClient,
    id: u64,
    action: ScenarioAction,
    tags: Option<&str>,
    ctx: &OutputContext,
) -> Result<()> {
    let body = client.scenario(id, action, tags).await?;
    if body.is_empty() {
        ctx.success(&format!("Scenario {}: {}", id, action));
    } else {
        ctx.raw(&body);
    }
    Ok(())
}

/// Execute a command and print its answer
pub async fn cmd(client: &JeedomClient, id: u64, ctx: &OutputContext) -> Result<()> {
    let body = client.command(id).await?;
    ctx.raw(&body);
    Ok(())
}

/// Push a message to the message center
pub async fn message(
    client: &JeedomClient,
    category: &str,
    text: &str,
    ctx: &OutputContext,
) -> Result<()> {
    let body = client.message(category, text).await?;
    if body.is_empty() {
        ctx.success("Message sent");
    } else {
        ctx.raw(&body);
    }
    Ok(())
}
