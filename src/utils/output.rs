use crate::analysis::{AnalysisReport, FacialAnalysis};
use crate::cart::{Cart, CheckoutStatus, CheckoutSummary};
use crate::cli::ListFormat;
use crate::core::data::{BeautyMatch, BeautyProduct, BeautyStandard, MatchRecord};
use crate::core::operations::ShopSection;
use crate::utils::error::{AppError, AppResult, FlowResult, handle_flow};
use crate::utils::format::{format_datetime, format_price, percentage_bar, truncate_string};
use colored::*;

pub struct OutputStyle;

impl OutputStyle {
    pub fn name(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn culture(text: &str) -> ColoredString {
        text.bright_cyan()
    }

    pub fn price(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_magenta().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Green for strong matches, yellow for partial, dim for weak
    pub fn percentage(value: u8) -> ColoredString {
        let text = format!("{:>3}%", value);
        match value {
            70..=100 => text.bright_green().bold(),
            40..=69 => text.yellow(),
            _ => text.dimmed(),
        }
    }

    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>14}: {}", Self::label(label), color_fn(value));
    }

    fn print_bullets(label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        println!("  {}:", Self::header(label));
        for item in items {
            println!("    • {}", Self::content(item));
        }
    }

    pub fn format_standard_line(standard: &BeautyStandard) -> String {
        format!(
            "{} {} {}",
            Self::name(&standard.name),
            Self::culture(&format!("[{}]", standard.culture)),
            Self::muted(&format!("({})", standard.id))
        )
    }

    pub fn print_standard_detailed(standard: &BeautyStandard) {
        println!("{}", Self::title(&format!("✨ {}", standard.name)));
        Self::print_field_colored("ID", &standard.id, Self::muted);
        Self::print_field_colored("Culture", &standard.culture, Self::culture);
        if !standard.description.is_empty() {
            Self::print_field_colored("Description", &standard.description, Self::content);
        }
        Self::print_bullets("Key features", &standard.key_features);
        Self::print_bullets("Style recommendations", &standard.style_recommendations);
    }

    pub fn format_match_line(beauty_match: &BeautyMatch) -> String {
        format!(
            "{} {} {}",
            Self::percentage(beauty_match.percentage),
            Self::muted(&percentage_bar(beauty_match.percentage)),
            Self::format_standard_line(&beauty_match.standard)
        )
    }

    pub fn format_product_line(product: &BeautyProduct) -> String {
        format!(
            "{} {} {} {}",
            Self::name(&product.name),
            Self::price(&format_price(product.price)),
            Self::culture(&format!("[{}]", product.category)),
            Self::muted(&format!("({})", product.id))
        )
    }

    pub fn print_facial_analysis(analysis: &FacialAnalysis) {
        Self::print_header("🔍 Facial Analysis");
        Self::print_field_colored("Face shape", &analysis.face_shape, Self::content);
        Self::print_field_colored("Skin tone", &analysis.skin_tone, Self::content);
        Self::print_field_colored("Style", &analysis.recommended_style, Self::name);
        Self::print_field_colored("Palette", &analysis.color_palette, Self::culture);
        Self::print_bullets("Detected features", &analysis.facial_features);
    }

    pub fn print_report(report: &AnalysisReport) {
        match report {
            AnalysisReport::Facial(analysis) => Self::print_facial_analysis(analysis),
            AnalysisReport::KBeauty(k) => {
                Self::print_header("🇰🇷 K-Beauty Analysis");
                Self::print_field_colored("Skin type", &k.skin_type, Self::name);
                Self::print_bullets("Recommendations", &k.recommendations);
                Self::print_bullets("Suggested products", &k.products);
            }
            AnalysisReport::GlobalMatch { matches } => {
                Self::print_header("🌍 Global Beauty Match");
                for score in matches {
                    println!(
                        "{} {} {}",
                        Self::percentage(score.score),
                        Self::muted(&percentage_bar(score.score)),
                        Self::culture(&score.culture)
                    );
                    if !score.features.is_empty() {
                        println!("      {}", Self::muted(&score.features.join(", ")));
                    }
                }
            }
            AnalysisReport::StyleMatch(style) => {
                Self::print_header("💄 Style Matching");
                Self::print_field_colored("Primary style", &style.primary_style, Self::name);
                Self::print_bullets("Complementary styles", &style.complementary_styles);
                Self::print_bullets("Color palette", &style.color_palette);
            }
            AnalysisReport::TrendFusion(trends) => {
                Self::print_header("📈 Trend Fusion");
                Self::print_bullets("Current trends", &trends.current_trends);
                Self::print_bullets("For you", &trends.personalized_suggestions);
                Self::print_bullets("This season", &trends.seasonal_recommendations);
            }
        }
    }

    pub fn print_shop(sections: &[ShopSection]) {
        for (i, section) in sections.iter().enumerate() {
            println!("{}", Self::title(&format!("🛍️  {}", section.standard.name)));
            if section.products.is_empty() {
                println!("  {}", Self::muted("No products yet"));
            }
            for product in &section.products {
                println!("  {}", Self::format_product_line(product));
                if !product.description.is_empty() {
                    println!("      {}", Self::muted(&truncate_string(&product.description, 70)));
                }
            }
            if i + 1 < sections.len() {
                println!("{}", Self::separator());
            }
        }
    }

    pub fn print_cart(cart: &Cart) {
        if cart.is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "items in your cart".to_string(),
            });
            return;
        }

        Self::print_header("🛒 Cart");
        for item in &cart.items {
            println!(
                "  {} {} × {} = {} {}",
                Self::name(&item.name),
                Self::price(&format_price(item.price)),
                item.quantity,
                Self::price(&format_price(item.subtotal())),
                Self::muted(&format!("({})", item.id))
            );
        }
        println!("{}", Self::separator());
        println!(
            "  {} item(s), total {}",
            Self::info(&cart.item_count().to_string()),
            Self::price(&format_price(cart.total())).bold()
        );
    }

    pub fn print_checkout(summary: &CheckoutSummary) {
        Self::print_header("💳 Checkout");
        Self::print_field_colored("Lines", &summary.lines.to_string(), Self::content);
        Self::print_field_colored("Items", &summary.item_count.to_string(), Self::content);
        Self::print_field_colored("Total", &format_price(summary.total), Self::price);
        match summary.status {
            CheckoutStatus::PaymentUnavailable => {
                print_warning("Payment processing is not available yet. Your cart has been kept.")
            }
        }
    }

    pub fn print_history(records: &[MatchRecord], standards: &[BeautyStandard]) {
        Self::print_header("📜 Match History");
        for record in records {
            let name = standards
                .iter()
                .find(|s| s.id == record.standard_id)
                .map(|s| s.name.as_str())
                .unwrap_or(record.standard_id.as_str());
            println!(
                "  {} {} {}",
                Self::muted(&format_datetime(&record.created_at)),
                Self::percentage(record.match_percentage),
                Self::name(name)
            );
        }
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::System(format!("Failed to serialize to JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Display formatter for the list outputs that honour `--format`
pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn format_standards(standards: &[BeautyStandard], format: ListFormat) -> AppResult<()> {
        if standards.is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "beauty standards".to_string(),
            });
            return Ok(());
        }

        match format {
            ListFormat::Simple => {
                println!(
                    "✨ {} ({} found)",
                    OutputStyle::header("Beauty Standards"),
                    OutputStyle::info(&standards.len().to_string())
                );
                println!("{}", OutputStyle::separator());
                for standard in standards {
                    println!("{}", OutputStyle::format_standard_line(standard));
                }
            }
            ListFormat::Detailed => {
                for (i, standard) in standards.iter().enumerate() {
                    OutputStyle::print_standard_detailed(standard);
                    if i + 1 < standards.len() {
                        println!("{}", OutputStyle::separator());
                    }
                }
            }
            ListFormat::Json => print_json(standards)?,
        }
        Ok(())
    }

    /// Ranked matches, best first. Detailed output lists which key features hit.
    pub fn format_matches(
        matches: &[BeautyMatch],
        observed: &[String],
        format: ListFormat,
    ) -> AppResult<()> {
        if matches.is_empty() {
            handle_flow(FlowResult::EmptyList {
                item_type: "beauty standards to match against".to_string(),
            });
            return Ok(());
        }

        match format {
            ListFormat::Simple => {
                OutputStyle::print_header("🌸 Your Beauty Matches");
                for beauty_match in matches {
                    println!("{}", OutputStyle::format_match_line(beauty_match));
                }
            }
            ListFormat::Detailed => {
                OutputStyle::print_header("🌸 Your Beauty Matches");
                for beauty_match in matches {
                    println!("{}", OutputStyle::format_match_line(beauty_match));
                    let hits = crate::core::matching::matched_features(&beauty_match.standard, observed);
                    if !hits.is_empty() {
                        println!("      {} {}", OutputStyle::label("matched:"), hits.join(", "));
                    }
                    if let Some(tip) = beauty_match.standard.style_recommendations.first() {
                        println!("      {} {}", OutputStyle::label("try:"), OutputStyle::muted(tip));
                    }
                }
            }
            ListFormat::Json => print_json(matches)?,
        }
        Ok(())
    }
}
