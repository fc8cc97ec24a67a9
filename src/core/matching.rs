//! Beauty standard match engine
//!
//! A standard's key feature counts as present when any observed label
//! contains it as a case-insensitive substring. The feature is the needle,
//! the observed label the haystack: "Oval face" is found in
//! "Oval face shape", but "Clear skin" is not found in "Clear complexion".

use crate::core::data::{BeautyMatch, BeautyStandard};

/// Rank every standard against the observed features, best match first.
///
/// Ties keep catalog order.
pub fn rank(standards: &[BeautyStandard], observed: &[String]) -> Vec<BeautyMatch> {
    let observed = lowercase_all(observed);

    let mut matches: Vec<BeautyMatch> = standards
        .iter()
        .map(|standard| BeautyMatch {
            standard: standard.clone(),
            percentage: percentage_of(standard, &observed),
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    matches
}

/// Match percentage of a single standard, 0 when it has no key features
pub fn match_percentage(standard: &BeautyStandard, observed: &[String]) -> u8 {
    percentage_of(standard, &lowercase_all(observed))
}

/// Key features of `standard` found among the observed labels, in catalog order
pub fn matched_features<'a>(standard: &'a BeautyStandard, observed: &[String]) -> Vec<&'a str> {
    let observed = lowercase_all(observed);
    standard
        .key_features
        .iter()
        .filter(|feature| is_observed(feature, &observed))
        .map(String::as_str)
        .collect()
}

pub fn best_match(matches: &[BeautyMatch]) -> Option<&BeautyMatch> {
    matches.first()
}

fn lowercase_all(observed: &[String]) -> Vec<String> {
    observed.iter().map(|o| o.to_lowercase()).collect()
}

fn is_observed(feature: &str, observed_lower: &[String]) -> bool {
    let needle = feature.to_lowercase();
    observed_lower.iter().any(|o| o.contains(&needle))
}

fn percentage_of(standard: &BeautyStandard, observed_lower: &[String]) -> u8 {
    let total = standard.key_features.len();
    if total == 0 {
        return 0;
    }

    let hits = standard
        .key_features
        .iter()
        .filter(|feature| is_observed(feature, observed_lower))
        .count();

    // round-half-up of 100 * hits / total in integer arithmetic
    let rounded = (200 * hits + total) / (2 * total);
    rounded.min(100) as u8
}
