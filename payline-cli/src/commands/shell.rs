//! Shell command - interactive dashboard session
//!
//! Keeps one dashboard alive across commands so search results and the
//! open transfer dialog carry over between lines.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use payline_core::services::{Dashboard, EntryPoint};
use payline_core::{format_balance, Navigation, Route};

use super::{dashboard, get_context, open, pay, search};
use crate::output;

const HELP: &[(&str, &str)] = &[
    ("search <text>", "Search users; an empty query clears the results"),
    ("pay <id>", "Open the send dialog for a search result"),
    ("amount <value>", "Set the amount in the open dialog"),
    ("send", "Send the drafted transfer"),
    ("cancel", "Close the send dialog"),
    ("balance", "Show your balance"),
    ("logout", "Sign out and leave the shell"),
    ("help", "Show this help"),
    ("quit", "Leave the shell"),
];

pub async fn run() -> Result<()> {
    let ctx = get_context("shell", EntryPoint::Shell)?;
    if let Navigation::Redirect(route) = ctx.guard.check(Route::Dashboard) {
        output::warning(&format!("Not signed in. Redirecting to {}", route.path()));
        open::print_public_page(route);
        return Ok(());
    }

    let mut dash = ctx.dashboard();
    dashboard::load(&mut dash).await;
    dashboard::print_account(dash.account().view());
    println!();
    output::info("Type 'help' for commands.");

    loop {
        let line: String = Input::new()
            .with_prompt(prompt(&dash))
            .allow_empty(true)
            .interact_text()?;
        let (command, arg) = match line.trim().split_once(' ') {
            Some((command, arg)) => (command.to_string(), arg.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        };

        match command.as_str() {
            "" => {}
            "search" => {
                search::search(&mut dash, &arg).await;
                search::print_results(&dash);
            }
            "pay" => match dash.pay(&arg) {
                Ok(candidate) => {
                    let name = candidate.display_name();
                    println!("{} {}", "Send Money to".bold(), name.bold());
                    println!("{}", "Set the amount with 'amount <value>', then 'send'.".dimmed());
                }
                Err(e) => output::error(&e.to_string()),
            },
            "amount" => {
                if !dash.set_amount(arg) {
                    output::warning("No transfer open. Use 'pay <id>' first.");
                }
            }
            "send" => {
                if !dash.transfer().is_open() {
                    output::warning("No transfer open. Use 'pay <id>' first.");
                } else if dash.transfer().prepare_send().is_none() {
                    output::warning("Enter a number with 'amount <value>'");
                } else if let Err(e) = pay::send(&mut dash).await {
                    output::error(&format!("{:#}", e));
                }
            }
            "cancel" => dash.cancel_transfer(),
            "balance" => match dash.account().balance() {
                Some(balance) => println!("Your balance {}", format_balance(balance).green().bold()),
                None => println!("{}", "Loading...".dimmed()),
            },
            "logout" => {
                dash.logout()?;
                output::success("Signed out.");
                return Ok(());
            }
            "help" => print_help(),
            "quit" | "exit" => return Ok(()),
            other => output::warning(&format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

fn prompt(dash: &Dashboard) -> String {
    match dash.transfer().draft() {
        Some(draft) => format!("pay {}", draft.recipient.firstname),
        None => "pl".to_string(),
    }
}

fn print_help() {
    let mut table = output::create_table();
    table.set_header(vec!["Command", "Description"]);
    for (command, description) in HELP {
        table.add_row(vec![*command, *description]);
    }
    println!("{}", table);
}
