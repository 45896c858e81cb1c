use std::time::Duration;

use anyhow::{Result, bail};
use common::ToggleOutcome;
use common::flow::Stage;
use common::session::GameSession;
use common::tracker::ChallengeBoard;
use console::style;
use tokio::sync::watch;
use tokio::time::Instant;

use super::spin::deployment_style;
use super::{Context, select};
use crate::ui;

/// Interactive game: provider wheel, deployment wheel, tracker, repeat.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut session = GameSession::new(ctx.service.clone(), ctx.config.game.clone());
    let mut stages = session.flow().subscribe();

    loop {
        match session.stage() {
            Stage::ProviderSelection => {
                ctx.term
                    .write_line(&style("Spinning the provider wheel…").bold().to_string())?;
                let started = Instant::now();
                let Some(spin) = session.spin_provider().await else {
                    bail!("No providers to spin");
                };
                ui::animate_spin(&ctx.term, &spin, |p| p.name.clone(), ui::provider_style, ctx.animate)
                    .await?;
                if !next_stage(ctx, &session, &mut stages, started + spin.plan().reveal_at()).await? {
                    break;
                }
            }
            Stage::ProjectSelection => {
                if session.selected_provider().is_none() {
                    session.restart();
                    continue;
                }
                ctx.term
                    .write_line(&style("Spinning for a deployment…").bold().to_string())?;
                let started = Instant::now();
                let Some(result) = session.spin_deployment().await else {
                    ctx.term.write_line(
                        &style("Nothing left to deploy on this provider").yellow().to_string(),
                    )?;
                    session.show_tracker();
                    continue;
                };
                ui::animate_spin(
                    &ctx.term,
                    &result.spin,
                    |d| d.name.clone(),
                    |_| deployment_style(),
                    ctx.animate,
                )
                .await?;
                if result.challenge.is_none() {
                    ctx.term.write_line(
                        &style("The challenge could not be saved").yellow().to_string(),
                    )?;
                }
                if !next_stage(ctx, &session, &mut stages, started + result.spin.plan().reveal_at()).await? {
                    break;
                }
            }
            Stage::Tracker => {
                if !tracker_menu(ctx, &mut session).await? {
                    break;
                }
            }
        }
    }

    session.flow().shutdown();
    Ok(())
}

/// Wait for the timed transition, or ask the player when auto-advance is off.
/// Returns `false` when the player wants to quit.
async fn next_stage(
    ctx: &Context,
    session: &GameSession,
    stages: &mut watch::Receiver<Stage>,
    revealed_at: Instant,
) -> Result<bool> {
    let Some(next) = session.stage().next() else {
        return Ok(true);
    };

    let Some(auto_advance) = ctx.config.game.auto_advance() else {
        let choice = select(
            format!("Continue to {next}?"),
            vec!["Continue".into(), "Quit".into()],
            0,
        )
        .await?;
        if choice == 0 {
            session.continue_stage();
            return Ok(true);
        }
        return Ok(false);
    };

    let deadline = revealed_at + auto_advance;
    stages.borrow_and_update();
    while session.stage() != next {
        let remaining = deadline.saturating_duration_since(Instant::now());
        ctx.term.clear_line()?;
        ctx.term.write_str(&ui::countdown_message(remaining, next.as_str()))?;
        tokio::select! {
            changed = stages.changed() => changed?,
            _ = tokio::time::sleep(remaining.min(Duration::from_secs(1)).max(Duration::from_millis(50))) => {}
        }
    }
    ctx.term.clear_line()?;
    Ok(true)
}

/// Show the tracker and let the player toggle challenges. Returns `false` to quit.
async fn tracker_menu(ctx: &Context, session: &mut GameSession) -> Result<bool> {
    let mut board = ChallengeBoard::load(ctx.service.clone()).await;

    loop {
        ctx.term
            .write_str(&ui::render_tracker(&board.matrix(ctx.config.game.tracker_mode)))?;

        let choice = select(
            "What next?",
            vec![
                "Spin again".into(),
                "Toggle a challenge".into(),
                "Quit".into(),
            ],
            0,
        )
        .await?;

        match choice {
            0 => {
                session.restart();
                return Ok(true);
            }
            1 => toggle_from_board(ctx, &mut board).await?,
            _ => return Ok(false),
        }
    }
}

async fn toggle_from_board(ctx: &Context, board: &mut ChallengeBoard) -> Result<()> {
    if board.challenges().is_empty() {
        ctx.term.write_line("No challenges yet")?;
        return Ok(());
    }

    let items: Vec<String> = board
        .challenges()
        .iter()
        .map(|c| {
            format!(
                "[{}] {} on {}",
                if c.is_done { "x" } else { " " },
                c.deployment_name,
                c.provider_name
            )
        })
        .collect();
    let index = select("Which challenge?", items, 0).await?;
    let id = board.challenges()[index].id.clone();

    match board.toggle(&id).await {
        ToggleOutcome::Toggled(_) => {}
        ToggleOutcome::Missing => {
            ctx.term.write_line(&style("That challenge no longer exists").yellow().to_string())?;
            board.refresh().await;
        }
        ToggleOutcome::Failed => {
            ctx.term
                .write_line(&style("Could not save the change; it was undone").red().to_string())?;
        }
    }
    Ok(())
}
