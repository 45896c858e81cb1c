use std::path::Path;

use anyhow::{Context as _, Result, bail};
use common::Document;
use tracing::info;

use super::{Context, confirm};

/// Write the whole game document to `output`, or stdout.
pub async fn export(ctx: &Context, output: Option<&Path>) -> Result<()> {
    let Some(json) = ctx.service.export_json().await else {
        bail!("Could not read game data from the store");
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, json.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Game data exported");
            ctx.term
                .write_line(&format!("Exported game data to {}", path.display()))?;
        }
        None => ctx.term.write_line(&json)?,
    }
    Ok(())
}

/// Replace the store's contents with the document in `file`.
pub async fn import(ctx: &Context, file: &Path, assume_yes: bool) -> Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = Document::from_json(&json)
        .with_context(|| format!("{} is not a valid game document", file.display()))?;

    if !assume_yes
        && !confirm(
            format!(
                "Replace all game data with {} providers, {} deployments and {} challenges?",
                document.providers.len(),
                document.deployments.len(),
                document.challenges.len()
            ),
            false,
        )
        .await?
    {
        ctx.term.write_line("Import cancelled")?;
        return Ok(());
    }

    if !ctx.service.import(document).await {
        bail!("The store refused the imported document");
    }
    ctx.term.write_line("Game data imported")?;
    Ok(())
}
