// Analysis operations - Analyze, Feature

use anyhow::{Context, Result};

use super::{current_session, open_storefront, resolve_format};
use crate::analysis::{AnalysisRequest, PhotoInput};
use crate::cli::{AnalyzeArgs, FeatureArgs, ListFormat};
use crate::config::Config;
use crate::utils::{DisplayFormatter, OutputStyle, print_success, print_warning};

pub async fn handle_analyze_command(config: Config, args: &AnalyzeArgs) -> Result<()> {
    let photo = PhotoInput::from_path(&args.photo)?;
    let session = if args.no_save {
        None
    } else {
        current_session(&config)?
    };

    let storefront = open_storefront(&config)?;
    let format = resolve_format(args.format, &config);

    if format != ListFormat::Json {
        println!("{}", OutputStyle::muted("Analyzing your photo..."));
    }
    let result = storefront
        .analyze_photo(photo, session.as_ref())
        .await
        .context("Photo analysis failed")?;

    if format == ListFormat::Json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize analysis")?;
        println!("{}", json);
        return Ok(());
    }

    OutputStyle::print_facial_analysis(&result.analysis);
    println!();
    DisplayFormatter::format_matches(&result.matches, &result.analysis.facial_features, format)?;

    if result.saved {
        print_success("Results saved to your history");
    } else if session.is_some() {
        print_warning("Could not save your results. Run with --debug for details.");
    } else if !args.no_save {
        println!(
            "{}",
            OutputStyle::muted("Sign in with `beautyai login` to keep your results")
        );
    }

    Ok(())
}

pub async fn handle_feature_command(config: Config, args: &FeatureArgs) -> Result<()> {
    let mut request = AnalysisRequest::new(args.feature).with_hints(args.hints.clone());
    if let Some(path) = &args.photo {
        request = request.with_photo(PhotoInput::from_path(path)?);
    }
    request.validate()?;

    let storefront = open_storefront(&config)?;
    println!(
        "{}",
        OutputStyle::muted(&format!("Running {}...", args.feature.title()))
    );
    let report = storefront
        .run_feature(&request)
        .await
        .with_context(|| format!("{} failed", args.feature.title()))?;

    OutputStyle::print_report(&report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisFeature;
    use crate::utils::error::AppError;
    use std::path::PathBuf;

    fn local_config(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.general.data_dir = dir.path().to_path_buf();
        config.general.analysis_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_feature_without_required_photo_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let args = FeatureArgs {
            feature: AnalysisFeature::KBeauty,
            photo: None,
            hints: Vec::new(),
        };

        let err = handle_feature_command(local_config(&dir), &args).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_trend_fusion_needs_no_photo() {
        let dir = tempfile::tempdir().unwrap();
        let args = FeatureArgs {
            feature: AnalysisFeature::TrendFusion,
            photo: None,
            hints: vec!["glass skin".to_string()],
        };
        assert!(handle_feature_command(local_config(&dir), &args).await.is_ok());
    }

    #[tokio::test]
    async fn test_analyze_missing_photo_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            photo: PathBuf::from("/definitely/not/here.jpg"),
            no_save: true,
            format: None,
        };

        let err = handle_analyze_command(local_config(&dir), &args).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NotFound(_))));
    }
}
