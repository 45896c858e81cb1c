use anyhow::{Result, bail};
use common::ToggleOutcome;
use console::style;

use super::Context;
use crate::ui;

/// Which challenges `challenges` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Open,
    Done,
}

pub async fn list(ctx: &Context, filter: Filter) -> Result<()> {
    let challenges: Vec<_> = ctx
        .service
        .challenges()
        .await
        .into_iter()
        .filter(|c| match filter {
            Filter::All => true,
            Filter::Open => !c.is_done,
            Filter::Done => c.is_done,
        })
        .collect();

    if ctx.json {
        return ctx.print_json(&challenges);
    }
    ctx.term.write_str(&ui::render_challenges(&challenges))?;
    Ok(())
}

pub async fn toggle(ctx: &Context, id: &str) -> Result<()> {
    match ctx.service.toggle_done(id).await {
        ToggleOutcome::Toggled(is_done) => report(ctx, id, is_done),
        ToggleOutcome::Missing => bail!("Challenge '{id}' not found"),
        ToggleOutcome::Failed => bail!("Could not update challenge '{id}'"),
    }
}

pub async fn set_done(ctx: &Context, id: &str, done: bool) -> Result<()> {
    if !ctx.service.set_done(id, done).await {
        bail!("Could not update challenge '{id}'");
    }
    report(ctx, id, done)
}

fn report(ctx: &Context, id: &str, is_done: bool) -> Result<()> {
    if ctx.json {
        return ctx.print_json(&serde_json::json!({ "id": id, "is_done": is_done }));
    }
    let state = if is_done {
        style("done").green()
    } else {
        style("open").yellow()
    };
    ctx.term.write_line(&format!("Challenge {id} is now {state}"))?;
    Ok(())
}
