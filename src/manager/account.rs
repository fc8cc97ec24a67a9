// Account operations - Login, Signup, Logout, Whoami, History

use anyhow::{Context, Result};

use super::{current_session, open_storefront};
use crate::cli::AuthArgs;
use crate::config::Config;
use crate::core::traits::{AuthProvider, MatchStore, StandardCatalog};
use crate::session::{SessionStore, validate_email};
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::format::format_datetime;
use crate::utils::{OutputStyle, print_success, print_warning};

pub async fn handle_login_command(config: Config, args: &AuthArgs) -> Result<()> {
    validate_email(&args.email)?;
    let storefront = open_storefront(&config)?;

    let session = storefront
        .store()
        .sign_in(&args.email, args.password.as_deref())
        .await?;

    SessionStore::new(&config.general.data_dir)
        .save(&session)
        .context("Failed to save session")?;
    print_success(&format!("Signed in as {}", session.email));
    Ok(())
}

pub async fn handle_signup_command(config: Config, args: &AuthArgs) -> Result<()> {
    validate_email(&args.email)?;
    let storefront = open_storefront(&config)?;

    match storefront
        .store()
        .sign_up(&args.email, args.password.as_deref())
        .await?
    {
        Some(session) => {
            SessionStore::new(&config.general.data_dir)
                .save(&session)
                .context("Failed to save session")?;
            print_success(&format!("Account created. Signed in as {}", session.email));
        }
        None => {
            print_success("Account created. Confirm your email, then run `beautyai login`.");
        }
    }
    Ok(())
}

pub fn handle_logout_command(config: Config) -> Result<()> {
    let removed = SessionStore::new(&config.general.data_dir)
        .clear()
        .context("Failed to remove session")?;

    if removed {
        print_success("Signed out");
    } else {
        println!("{}", OutputStyle::muted("You were not signed in"));
    }
    Ok(())
}

pub fn handle_whoami_command(config: Config) -> Result<()> {
    match current_session(&config)? {
        Some(session) => {
            OutputStyle::print_field_colored("Email", &session.email, OutputStyle::name);
            OutputStyle::print_field_colored("User ID", &session.user_id, OutputStyle::muted);
            let mode = if session.is_offline() { "local profile" } else { "hosted account" };
            OutputStyle::print_field_colored("Mode", mode, OutputStyle::content);
            OutputStyle::print_field_colored(
                "Since",
                &format_datetime(&session.created_at),
                OutputStyle::muted,
            );
        }
        None => println!("{}", OutputStyle::muted("Not signed in")),
    }
    Ok(())
}

pub async fn handle_history_command(config: Config) -> Result<()> {
    let Some(session) = current_session(&config)? else {
        print_warning("Sign in with `beautyai login` to see your history");
        return Ok(());
    };

    let storefront = open_storefront(&config)?;
    let records = storefront
        .store()
        .list_matches(&session)
        .await
        .context("Failed to load match history")?;

    if records.is_empty() {
        handle_flow(FlowResult::EmptyList {
            item_type: "saved matches".to_string(),
        });
        return Ok(());
    }

    let standards = storefront.store().list_standards().await?;
    OutputStyle::print_history(&records, &standards);
    Ok(())
}
