//! Dashboard command - profile and balance

use anyhow::{bail, Result};
use colored::Colorize;
use payline_core::services::{AccountView, Dashboard, EntryPoint};
use payline_core::{format_balance, Navigation, OperationResult, PaylineContext, Route};

use super::{get_context, open};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context("dashboard", EntryPoint::Cli)?;
    render(&ctx, json).await
}

/// Guard, load and print the dashboard
pub async fn render(ctx: &PaylineContext, json: bool) -> Result<()> {
    if let Navigation::Redirect(route) = ctx.guard.check(Route::Dashboard) {
        if json {
            let message = format!("Not signed in. Start at {}", route.path());
            let body = OperationResult::<()>::fail(message);
            println!("{}", serde_json::to_string_pretty(&body)?);
            bail!("Not signed in");
        }
        output::warning(&format!("Not signed in. Redirecting to {}", route.path()));
        open::print_public_page(route);
        return Ok(());
    }

    let mut dashboard = ctx.dashboard();
    load(&mut dashboard).await;

    if json {
        let body = OperationResult::ok(dashboard.account().view());
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_account(dashboard.account().view());
    Ok(())
}

/// Activate the account controller behind a spinner
pub async fn load(dashboard: &mut Dashboard) {
    let pb = output::spinner("Loading your account...");
    dashboard.activate().await;
    pb.finish_and_clear();
}

pub fn print_account(view: &AccountView) {
    match view {
        AccountView::Loaded { snapshot } => {
            println!("{}", "Payline".bold());
            println!("Hello, {}", snapshot.profile.firstname.bold());
            println!();
            println!("Your balance {}", format_balance(snapshot.balance).green().bold());
        }
        AccountView::Redirect { route } => {
            output::warning(&format!("Not signed in. Redirecting to {}", route.path()));
        }
        AccountView::Loading | AccountView::Inactive => {
            println!("{}", "Payline".bold());
            println!("{}", "Loading...".dimmed());
        }
    }
}
