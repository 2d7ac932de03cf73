//! Pay command - search, pick a recipient, confirm an amount, send

use anyhow::{bail, Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use payline_core::services::{Dashboard, EntryPoint, TransferOutcome};
use payline_core::{format_balance, Candidate, Navigation, Route};

use super::{dashboard, get_context, search};
use crate::output;

/// Run the payment flow
///
/// The directory only matches on names, so the recipient is always found
/// through `query`; `id` narrows the results to one user without a prompt.
pub async fn run(query: &str, id: Option<&str>, amount: Option<String>, yes: bool) -> Result<()> {
    let ctx = get_context("pay", EntryPoint::Cli)?;
    if let Navigation::Redirect(route) = ctx.guard.check(Route::Dashboard) {
        bail!("Not signed in. Start at {} (pl signup or pl signin)", route.path());
    }

    let mut dash = ctx.dashboard();
    dashboard::load(&mut dash).await;
    search::search(&mut dash, query).await;

    let candidate_id = match pick_candidate(dash.search_view().results(), query, id, yes)? {
        Pick::One(id) => id,
        Pick::Ask => ask_candidate(dash.search_view().results())?,
    };
    let name = dash.pay(&candidate_id)?.display_name();

    println!("{}", "Send Money".bold());
    println!("To {}", name.bold());

    let interactive = amount.is_none();
    let mut amount = amount;
    loop {
        let text = match amount.take() {
            Some(text) => text,
            None => Input::<String>::new()
                .with_prompt("Amount (in $)")
                .allow_empty(true)
                .interact_text()?,
        };
        dash.set_amount(text);
        if dash.transfer().prepare_send().is_some() {
            break;
        }
        if !interactive {
            dash.cancel_transfer();
            bail!("Amount must be a number");
        }
        output::warning("Enter a number");
    }

    if !yes {
        let amount_text = dash
            .transfer()
            .draft()
            .map(|d| d.amount.trim().to_string())
            .unwrap_or_default();
        let confirmed = Confirm::new()
            .with_prompt(format!("Send ${} to {}?", amount_text, name))
            .default(false)
            .interact()?;
        if !confirmed {
            dash.cancel_transfer();
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    send(&mut dash).await
}

/// Send the open draft and report the outcome
pub async fn send(dash: &mut Dashboard) -> Result<()> {
    let pb = output::spinner("Initiating transfer...");
    let outcome = dash.send_transfer().await;
    pb.finish_and_clear();

    match outcome? {
        Some(TransferOutcome::Completed { balance }) => {
            output::success("Transfer complete.");
            if let Some(balance) = balance {
                println!("Your balance {}", format_balance(balance).green().bold());
            }
            Ok(())
        }
        Some(TransferOutcome::Rejected) => bail!("The transfer was not accepted"),
        Some(TransferOutcome::Failed { error }) => bail!("Transfer failed: {}", error),
        None => bail!("Amount must be a number"),
    }
}

/// How the recipient is settled after the search
#[derive(Debug, PartialEq)]
enum Pick {
    One(String),
    Ask,
}

/// Requested id first, then a single result, otherwise ask
fn pick_candidate(
    results: &[Candidate],
    query: &str,
    id: Option<&str>,
    yes: bool,
) -> Result<Pick> {
    if let Some(id) = id {
        return results
            .iter()
            .find(|c| c.id == id)
            .map(|c| Pick::One(c.id.clone()))
            .with_context(|| format!("No user with id '{}' among the results for '{}'", id, query));
    }

    match results {
        [] => bail!("No users found matching '{}'", query),
        [only] => Ok(Pick::One(only.id.clone())),
        _ if yes => bail!(
            "'{}' matches {} users; pass --id to pick one",
            query,
            results.len()
        ),
        _ => Ok(Pick::Ask),
    }
}

fn ask_candidate(results: &[Candidate]) -> Result<String> {
    let labels: Vec<String> = results
        .iter()
        .map(|c| format!("{} <{}> [{}]", c.display_name(), c.email, c.id))
        .collect();
    let index = Select::new()
        .with_prompt("Send money to")
        .items(&labels)
        .default(0)
        .interact()?;
    results
        .get(index)
        .map(|c| c.id.clone())
        .context("Selection out of range")
}
