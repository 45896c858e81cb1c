pub mod catalog;
pub mod challenges;
pub mod data;
pub mod play;
pub mod spin;
pub mod tracker;

use anyhow::Result;
use common::ChallengeService;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use serde::Serialize;

use crate::config::CliConfig;

/// Everything a command needs.
pub struct Context {
    pub service: ChallengeService,
    pub config: CliConfig,
    pub json: bool,
    pub animate: bool,
    pub term: Term,
}

impl Context {
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        self.term.write_line(&serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}

/// Arrow-key menu, run off the async workers because it blocks on stdin.
pub async fn select(prompt: impl Into<String>, items: Vec<String>, default: usize) -> Result<usize> {
    let prompt = prompt.into();
    let choice = tokio::task::spawn_blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(default)
            .interact()
    })
    .await??;
    Ok(choice)
}

pub async fn confirm(prompt: impl Into<String>, default: bool) -> Result<bool> {
    let prompt = prompt.into();
    let answer = tokio::task::spawn_blocking(move || {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
    })
    .await??;
    Ok(answer)
}
