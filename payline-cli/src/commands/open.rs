//! Open command - navigate to a page path through the route guard

use anyhow::Result;
use colored::Colorize;
use payline_core::ports::DiagnosticSink;
use payline_core::services::EntryPoint;
use payline_core::{LogEvent, Navigation, Route};

use super::{dashboard, get_context};
use crate::output;

pub async fn run(path: &str) -> Result<()> {
    let ctx = get_context("open", EntryPoint::Cli)?;
    let navigation = ctx.guard.resolve(path);

    if let Navigation::Render(route) | Navigation::Redirect(route) = navigation {
        ctx.diagnostics
            .record(LogEvent::new("page_opened").with_page(route.page_name()));
    }

    match navigation {
        Navigation::Render(Route::Dashboard) => dashboard::render(&ctx, false).await,
        Navigation::Render(route) => {
            print_public_page(route);
            Ok(())
        }
        Navigation::Redirect(route) => {
            output::warning(&format!("Not signed in. Redirecting to {}", route.path()));
            print_public_page(route);
            Ok(())
        }
        Navigation::Reload => Ok(()),
    }
}

/// Pages that render without a session
pub fn print_public_page(route: Route) {
    match route {
        Route::Signup => {
            println!("{}", "Sign Up".bold());
            println!("Enter your information to create an account");
            println!("  {}", "pl signup --firstname <name> --lastname <name> --email <email>".cyan());
            println!("Already have an account? {}", "pl signin".cyan());
        }
        Route::Signin => {
            println!("{}", "Sign In".bold());
            println!("Enter your credentials to access your account");
            println!("  {}", "pl signin --email <email>".cyan());
            println!("Don't have an account? {}", "pl signup".cyan());
        }
        Route::NotFound => {
            println!("{}", "Page not found".bold());
            println!("Go to the dashboard: {}", "pl open /dashboard".cyan());
        }
        Route::Dashboard => println!("Dashboard: {}", "pl dashboard".cyan()),
    }
}
