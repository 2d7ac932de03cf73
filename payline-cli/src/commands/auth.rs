//! Signup, signin and logout commands

use anyhow::{bail, Result};
use dialoguer::{Input, Password};
use payline_core::services::EntryPoint;
use payline_core::{
    Error, Navigation, OperationResult, PaylineContext, Route, SigninForm, SignupForm,
};

use super::{dashboard, get_context};
use crate::output;

fn prompt_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

fn prompt_password(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?),
    }
}

pub async fn run_signup(
    firstname: Option<String>,
    lastname: Option<String>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context("signup", EntryPoint::Cli)?;

    let form = SignupForm {
        firstname: prompt_text(firstname, "First Name")?,
        lastname: prompt_text(lastname, "Last Name")?,
        email: prompt_text(email, "Email")?,
        password: prompt_password(password)?,
    };

    let pb = output::spinner("Creating your account...");
    let result = ctx.auth_service.signup(&form).await;
    pb.finish_and_clear();

    finish(&ctx, result, "Account created. You are signed in.", json).await
}

pub async fn run_signin(
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context("signin", EntryPoint::Cli)?;

    let form = SigninForm::new(prompt_text(email, "Email")?, prompt_password(password)?);

    let pb = output::spinner("Signing in...");
    let result = ctx.auth_service.signin(&form).await;
    pb.finish_and_clear();

    finish(&ctx, result, "Signed in.", json).await
}

async fn finish(
    ctx: &PaylineContext,
    result: payline_core::domain::result::Result<Navigation>,
    message: &str,
    json: bool,
) -> Result<()> {
    if json {
        let (body, success) = json_result(result)?;
        println!("{}", body);
        if !success {
            bail!("Authentication failed");
        }
        return Ok(());
    }

    match result {
        Ok(Navigation::Redirect(Route::Dashboard)) => {
            output::success(message);
            println!();
            dashboard::render(ctx, false).await
        }
        Ok(_) => Ok(()),
        Err(Error::Validation(errors)) => {
            output::error("Please fix the following:");
            output::field_errors(&errors);
            bail!("Form is invalid")
        }
        Err(e) => Err(e.into()),
    }
}

/// Pretty JSON for an auth outcome; field errors land under `context.fields`
fn json_result(
    result: payline_core::domain::result::Result<Navigation>,
) -> Result<(String, bool)> {
    let result = OperationResult::from(result);
    Ok((serde_json::to_string_pretty(&result)?, result.success))
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context("logout", EntryPoint::Cli)?;
    let mut dashboard = ctx.dashboard();
    dashboard.logout()?;
    output::success("Signed out.");
    Ok(())
}
