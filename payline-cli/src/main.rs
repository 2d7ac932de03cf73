//! Payline CLI - send money from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, config, dashboard, logs, open, pay, search, shell};

/// Payline - send money from your terminal
#[derive(Parser)]
#[command(name = "pl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        firstname: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, env = "PAYLINE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in to an existing account
    Signin {
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, env = "PAYLINE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and forget the session token
    Logout,

    /// Navigate to a page path such as /dashboard
    Open {
        path: String,
    },

    /// Show your profile and balance
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the user directory
    Search {
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send money to another user
    Pay {
        /// Search query for the recipient
        query: String,
        /// Pick this user id among the results instead of prompting
        #[arg(long)]
        id: Option<String>,
        /// Amount to send (prompted when omitted)
        #[arg(long)]
        amount: Option<String>,
        /// Skip confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Interactive dashboard session
    Shell,

    /// View and change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage diagnostic logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { firstname, lastname, email, password, json } => {
            auth::run_signup(firstname, lastname, email, password, json).await
        }
        Commands::Signin { email, password, json } => {
            auth::run_signin(email, password, json).await
        }
        Commands::Logout => auth::run_logout(),
        Commands::Open { path } => open::run(&path).await,
        Commands::Dashboard { json } => dashboard::run(json).await,
        Commands::Search { query, json } => search::run(&query, json).await,
        Commands::Pay { query, id, amount, yes } => {
            pay::run(&query, id.as_deref(), amount, yes).await
        }
        Commands::Shell => shell::run().await,
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
