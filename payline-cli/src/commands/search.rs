//! Search command - look up users in the directory

use anyhow::{bail, Result};
use colored::Colorize;
use payline_core::services::{Dashboard, EntryPoint};
use payline_core::{Navigation, OperationResult, Route};

use super::get_context;
use crate::output;

pub async fn run(query: &str, json: bool) -> Result<()> {
    let ctx = get_context("search", EntryPoint::Cli)?;
    if let Navigation::Redirect(route) = ctx.guard.check(Route::Dashboard) {
        bail!("Not signed in. Start at {} (pl signup or pl signin)", route.path());
    }

    let mut dashboard = ctx.dashboard();
    search(&mut dashboard, query).await;

    if json {
        let body = OperationResult::ok(dashboard.search_view().state());
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_results(&dashboard);
    Ok(())
}

/// Run one query behind a spinner
pub async fn search(dashboard: &mut Dashboard, query: &str) {
    let pb = output::spinner("Searching...");
    dashboard.search(query).await;
    pb.finish_and_clear();
}

pub fn print_results(dashboard: &Dashboard) {
    let results = dashboard.search_view().results();
    if results.is_empty() {
        println!("{}", "No users found".dimmed());
        return;
    }

    println!("{}", "Users".bold());
    println!("{}", output::candidates_table(results));
}
