//! Config command - view and change payments service settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use payline_core::config::Config;

use super::get_payline_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the payments service base URL
    SetUrl {
        url: String,
    },
    /// Set the request timeout in seconds (0 disables it)
    SetTimeout {
        secs: u64,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let payline_dir = get_payline_dir();
    let mut config = Config::load(&payline_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let timeout = match config.timeout_secs {
                0 => "none".to_string(),
                secs => format!("{}s", secs),
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "directory": payline_dir.to_string_lossy(),
                        "baseUrl": config.base_url,
                        "effectiveUrl": config.api_url(),
                        "timeoutSecs": config.timeout_secs,
                    }))?
                );
                return Ok(());
            }

            let mut table = output::create_table();
            table.add_row(vec!["Directory".to_string(), payline_dir.display().to_string()]);
            table.add_row(vec!["Service URL".to_string(), config.api_url().to_string()]);
            table.add_row(vec!["Timeout".to_string(), timeout]);
            println!("{}", table);

            if config.url_override.is_some() {
                println!(
                    "{}",
                    format!("PAYLINE_API_URL overrides the saved URL ({})", config.base_url)
                        .dimmed()
                );
            }
        }
        ConfigCommands::SetUrl { url } => {
            config.set_base_url(&url)?;
            config.save(&payline_dir)?;
            output::success(&format!("Service URL set to {}", config.base_url));
        }
        ConfigCommands::SetTimeout { secs } => {
            config.timeout_secs = secs;
            config.save(&payline_dir)?;
            if secs == 0 {
                output::success("Request timeout disabled");
            } else {
                output::success(&format!("Request timeout set to {} seconds", secs));
            }
        }
    }

    Ok(())
}
