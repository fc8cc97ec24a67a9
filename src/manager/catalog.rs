// Catalog operations - Standards, Standard, Match

use anyhow::{Context, Result};

use super::{current_session, open_storefront, resolve_format};
use crate::cli::{MatchArgs, StandardArgs, StandardsArgs};
use crate::config::Config;
use crate::core::traits::StandardCatalog;
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::{DisplayFormatter, OutputStyle, print_success, print_warning};

pub async fn handle_standards_command(config: Config, args: &StandardsArgs) -> Result<()> {
    let storefront = open_storefront(&config)?;
    let standards = storefront
        .store()
        .list_standards()
        .await
        .context("Failed to load beauty standards")?;

    DisplayFormatter::format_standards(&standards, resolve_format(args.format, &config))?;
    Ok(())
}

pub async fn handle_standard_command(config: Config, args: &StandardArgs) -> Result<()> {
    let storefront = open_storefront(&config)?;

    match storefront.store().find_standard(&args.query).await? {
        Some(standard) => OutputStyle::print_standard_detailed(&standard),
        None => handle_flow(FlowResult::NotFound {
            item_type: "Beauty standard".to_string(),
            search_term: args.query.clone(),
        }),
    }
    Ok(())
}

pub async fn handle_match_command(config: Config, args: &MatchArgs) -> Result<()> {
    let storefront = open_storefront(&config)?;
    let matches = storefront
        .rank_features(&args.features)
        .await
        .context("Failed to rank beauty standards")?;

    DisplayFormatter::format_matches(&matches, &args.features, resolve_format(args.format, &config))?;

    if args.save {
        match current_session(&config)? {
            Some(session) => {
                storefront
                    .save_matches(&session, &matches)
                    .await
                    .context("Failed to save matches")?;
                print_success("Matches saved to your history");
            }
            None => print_warning("Sign in with `beautyai login` to save your matches"),
        }
    }

    Ok(())
}
