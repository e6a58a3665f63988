// UI layer: collects the owner and token with `dialoguer` prompts, asks for
// confirmation and runs the keepalive with an `indicatif` spinner.

use crate::api::GithubClient;
use crate::keepalive::enable_all_workflows;
use anyhow::Result;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Interactive entry point. Blocks until the run finishes or the user
/// declines the confirmation.
pub fn run(mut api: GithubClient) -> Result<()> {
    println!("GitHub API: {}", api.base_url());

    let owner: String = Input::new()
        .with_prompt("Repository owner")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("owner must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    let owner = owner.trim().to_string();

    // `Password` hides the token while it is typed.
    let token: String = Password::new().with_prompt("Access token").interact()?;
    if token.trim().is_empty() {
        anyhow::bail!("an access token is required");
    }
    api.set_token(&token);

    let proceed = Confirm::new()
        .with_prompt(format!("Enable all workflows in all repositories of {owner}?"))
        .default(true)
        .interact()?;
    if !proceed {
        println!("Nothing changed.");
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Reading repositories of {owner}..."));

    let outcome = enable_all_workflows(&api, &owner, |enabled| {
        spinner.set_message(format!("Enabled {}/{}", enabled.repository, enabled.workflow));
    });
    spinner.finish_and_clear();

    match outcome {
        Ok(report) => {
            for enabled in &report.enabled {
                println!("  {} / {}", enabled.repository, enabled.workflow);
            }
            println!("{}", report.summary());
            Ok(())
        }
        // Reported once, by `main`.
        Err(e) => Err(e.into()),
    }
}
