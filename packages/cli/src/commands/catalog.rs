use anyhow::Result;

use super::Context;
use crate::ui;

pub async fn providers(ctx: &Context) -> Result<()> {
    let providers = ctx.service.providers().await;
    if ctx.json {
        return ctx.print_json(&providers);
    }
    ctx.term.write_str(&ui::render_providers(&providers))?;
    Ok(())
}

pub async fn deployments(ctx: &Context) -> Result<()> {
    let deployments = ctx.service.deployments().await;
    if ctx.json {
        return ctx.print_json(&deployments);
    }
    for d in &deployments {
        ctx.term.write_line(&format!("{:<24} {}", d.id, d.name))?;
    }
    Ok(())
}
