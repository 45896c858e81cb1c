use anyhow::{Result, bail};
use common::session;
use console::{Style, style};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Context;
use crate::ui;

pub fn deployment_style() -> Style {
    Style::new().cyan().bold()
}

/// Spin the provider wheel once. Nothing is recorded.
pub async fn spin(ctx: &Context) -> Result<()> {
    let mut rng = StdRng::from_os_rng();
    let Some(spin) = session::spin_provider(&ctx.service, ctx.config.game.spin_timing(), &mut rng).await
    else {
        bail!("No providers to spin");
    };

    if ctx.json {
        return ctx.print_json(spin.pick());
    }
    ui::animate_spin(&ctx.term, &spin, |p| p.name.clone(), ui::provider_style, ctx.animate).await?;
    Ok(())
}

/// Spin a deployment for `provider_id` (or for a freshly spun provider) and
/// record the challenge.
pub async fn pick(ctx: &Context, provider_id: Option<&str>, exclude_completed: bool) -> Result<()> {
    let timing = ctx.config.game.spin_timing();
    let mut rng = StdRng::from_os_rng();

    let provider = match provider_id {
        Some(id) => {
            let Some(provider) = ctx.service.providers().await.into_iter().find(|p| p.id == id)
            else {
                bail!("Provider '{id}' not found");
            };
            provider
        }
        None => {
            let Some(spin) = session::spin_provider(&ctx.service, timing, &mut rng).await else {
                bail!("No providers to spin");
            };
            if !ctx.json {
                ui::animate_spin(&ctx.term, &spin, |p| p.name.clone(), ui::provider_style, ctx.animate)
                    .await?;
            }
            spin.into_pick()
        }
    };

    let exclude = exclude_completed || ctx.config.game.exclude_completed;
    let Some(result) =
        session::spin_deployment(&ctx.service, &provider, exclude, timing, &mut rng).await
    else {
        bail!("No deployments left to spin for {}", provider.name);
    };

    if ctx.json {
        return ctx.print_json(&serde_json::json!({
            "provider": provider,
            "deployment": result.spin.pick(),
            "challenge": result.challenge,
        }));
    }

    ui::animate_spin(&ctx.term, &result.spin, |d| d.name.clone(), |_| deployment_style(), ctx.animate)
        .await?;
    match &result.challenge {
        Some(challenge) => ctx.term.write_line(&format!(
            "Challenge {} recorded: deploy {} on {}",
            style(&challenge.id).dim(),
            deployment_style().apply_to(&challenge.deployment_name),
            ui::provider_style(&provider).apply_to(&challenge.provider_name),
        ))?,
        None => ctx.term.write_line(
            &style("The challenge could not be saved; check the log for details")
                .yellow()
                .to_string(),
        )?,
    }
    Ok(())
}
