use std::fmt::Write as _;
use std::time::Duration;

use common::session::Spin;
use common::{Challenge, Provider, TrackerMatrix, TrackerMode};
use console::{Style, Term, style};

/// Nearest xterm-256 colour for a `#RRGGBB` brand colour.
pub fn ansi256(rgb: (u8, u8, u8)) -> u8 {
    let level = |c: u8| (u16::from(c) * 5 / 255) as u8;
    16 + 36 * level(rgb.0) + 6 * level(rgb.1) + level(rgb.2)
}

pub fn provider_style(provider: &Provider) -> Style {
    match provider.rgb() {
        Some(rgb) => Style::new().color256(ansi256(rgb)).bold(),
        None => Style::new().bold(),
    }
}

/// Play a spin on the terminal: every frame for one tick, then the pick.
///
/// Without `animate` only the pick is printed.
pub async fn animate_spin<T>(
    term: &Term,
    spin: &Spin<T>,
    label: impl Fn(&T) -> String,
    paint: impl Fn(&T) -> Style,
    animate: bool,
) -> std::io::Result<()> {
    let timing = spin.plan().timing();
    if animate && term.is_term() {
        for candidate in spin.frames() {
            term.clear_line()?;
            term.write_str(&format!("  🎰 {}", paint(candidate).apply_to(label(candidate))))?;
            tokio::time::sleep(timing.tick).await;
        }
        tokio::time::sleep(timing.reveal_delay).await;
        term.clear_line()?;
    }

    let pick = spin.pick();
    term.write_line(&format!(
        "  🎉 {}",
        paint(pick).apply_to(label(pick)).underlined()
    ))?;
    Ok(())
}

pub fn render_providers(providers: &[Provider]) -> String {
    let mut out = String::new();
    for provider in providers {
        let _ = writeln!(
            out,
            "{}  {:<10} {}",
            provider_style(provider).apply_to("■"),
            provider.id,
            provider.name
        );
    }
    out
}

pub fn render_challenges(challenges: &[Challenge]) -> String {
    if challenges.is_empty() {
        return format!("{}\n", style("No challenges yet").dim());
    }

    let mut out = String::new();
    for c in challenges {
        let mark = if c.is_done {
            style("✔").green()
        } else {
            style("·").dim()
        };
        let _ = writeln!(
            out,
            "{mark} {:<36}  {:<8} {:<28} {}",
            c.id,
            c.provider_name,
            c.deployment_name,
            style(c.created_at.format("%Y-%m-%d %H:%M")).dim()
        );
    }
    out
}

/// Completion matrix as a text table.
pub fn render_tracker(matrix: &TrackerMatrix) -> String {
    let label_width = matrix
        .rows
        .iter()
        .map(|r| row_label(matrix.mode, r).chars().count())
        .max()
        .unwrap_or(0)
        .max(10);
    let column_width = |p: &Provider| p.name.chars().count().max(3);

    let mut out = String::new();
    let _ = write!(out, "{:<label_width$}", "");
    for provider in &matrix.columns {
        let width = column_width(provider);
        let _ = write!(
            out,
            "  {}",
            provider_style(provider).apply_to(format!("{:^width$}", provider.name))
        );
    }
    out.push('\n');

    for row in &matrix.rows {
        let _ = write!(out, "{:<label_width$}", row_label(matrix.mode, row));
        for (provider, cell) in matrix.columns.iter().zip(&row.cells) {
            let width = column_width(provider);
            let mark = if cell.done {
                style(format!("{:^width$}", "✔")).green()
            } else if cell.attempted {
                style(format!("{:^width$}", "○")).yellow()
            } else {
                style(format!("{:^width$}", "·")).dim()
            };
            let _ = write!(out, "  {mark}");
        }
        out.push('\n');
    }

    let total = matrix.rows.len() * matrix.columns.len();
    let _ = writeln!(out, "\n{} of {} done", matrix.completed(), total);
    if matrix.unmatched > 0 {
        let _ = writeln!(
            out,
            "{}",
            style(format!(
                "{} challenge(s) reference a provider or deployment that no longer exists",
                matrix.unmatched
            ))
            .yellow()
        );
    }
    out
}

fn row_label(mode: TrackerMode, row: &common::tracker::TrackerRow) -> String {
    match (mode, &row.challenge_id) {
        (TrackerMode::ByChallenge, Some(id)) => {
            let skip = id.chars().count().saturating_sub(6);
            let short: String = id.chars().skip(skip).collect();
            format!("{} (…{short})", row.deployment_name)
        }
        _ => row.deployment_name.clone(),
    }
}

/// Countdown line shown while a timed transition is pending.
pub fn countdown_message(remaining: Duration, next: &str) -> String {
    format!(
        "  Moving to {next} in {}s (Ctrl+C to quit)",
        remaining.as_secs_f64().ceil() as u64
    )
}
