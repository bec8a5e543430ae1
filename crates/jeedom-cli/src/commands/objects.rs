//! Read commands - objects, equipment and their commands

use anyhow::Result;
use jeedom_client::JeedomClient;
use serde_json::Value;

use crate::output::{entries, CommandRow, EquipmentRow, ObjectRow, OutputContext, OutputFormat};

/// List all objects
pub async fn objects(client: &JeedomClient, ctx: &OutputContext) -> Result<()> {
    let value = client.object().await?;
    print_rows::<ObjectRow>(&value, ctx);
    Ok(())
}

/// List the equipment of an object
pub async fn equipment(client: &JeedomClient, object_id: u64, ctx: &OutputContext) -> Result<()> {
    let value = client.equipment(object_id).await?;
    print_rows::<EquipmentRow>(&value, ctx);
    Ok(())
}

/// List the commands of an equipment
pub async fn commands(
    client: &JeedomClient,
    equipment_id: u64,
    ctx: &OutputContext,
) -> Result<()> {
    let value = client.equipment_commands(equipment_id).await?;
    print_rows::<CommandRow>(&value, ctx);
    Ok(())
}

/// JSON output gets the document untouched, other formats get rows
fn print_rows<R>(value: &Value, ctx: &OutputContext)
where
    R: for<'a> From<&'a Value> + tabled::Tabled + serde::Serialize,
{
    if ctx.format == OutputFormat::Json {
        ctx.json(value);
        return;
    }

    let rows: Vec<R> = entries(value).into_iter().map(R::from).collect();
    ctx.print(&rows);
}
