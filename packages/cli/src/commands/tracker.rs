use anyhow::Result;
use common::{TrackerMatrix, TrackerMode};

use super::Context;
use crate::ui;

pub async fn show(ctx: &Context, mode: Option<TrackerMode>) -> Result<()> {
    let mode = mode.unwrap_or(ctx.config.game.tracker_mode);
    let providers = ctx.service.providers().await;
    let deployments = ctx.service.deployments().await;
    let challenges = ctx.service.challenges().await;
    let matrix = TrackerMatrix::build(&providers, &deployments, &challenges, mode);

    if ctx.json {
        return ctx.print_json(&matrix);
    }
    ctx.term.write_str(&ui::render_tracker(&matrix))?;
    Ok(())
}
