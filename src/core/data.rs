//! Core data structures for beauty matching and the storefront
//!
//! Catalog records are read-only once loaded; match results are created
//! fresh by the match engine and may be persisted verbatim.

use crate::analysis::FacialAnalysis;
use crate::utils::format;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named cultural aesthetic profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeautyStandard {
    pub id: String,
    pub culture: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub style_recommendations: Vec<String>,
}

/// A standard paired with how closely the observed features match it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeautyMatch {
    pub standard: BeautyStandard,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeautyProduct {
    pub id: String,
    pub standard_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
}

/// A stored match row, one per standard per analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub user_id: String,
    pub standard_id: String,
    pub match_percentage: u8,
    #[serde(with = "format", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Everything one analysis produced, stored alongside the match rows.
///
/// The analysis fields use the `user_analysis` table's camelCase columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub user_id: String,
    #[serde(rename = "faceShape")]
    pub face_shape: String,
    #[serde(rename = "skinTone")]
    pub skin_tone: String,
    #[serde(rename = "recommendedStyle")]
    pub recommended_style: String,
    #[serde(rename = "colorPalette")]
    pub color_palette: String,
    #[serde(rename = "facialFeatures")]
    pub facial_features: Vec<String>,
    pub beauty_matches: Vec<BeautyMatch>,
}

/// Standards and products loaded together from one source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub standards: Vec<BeautyStandard>,
    #[serde(default)]
    pub products: Vec<BeautyProduct>,
}

impl BeautyMatch {
    pub fn to_record(&self, user_id: &str) -> MatchRecord {
        MatchRecord {
            user_id: user_id.to_string(),
            standard_id: self.standard.id.clone(),
            match_percentage: self.percentage,
            created_at: Utc::now(),
        }
    }
}

impl AnalysisSnapshot {
    pub fn new(user_id: &str, analysis: &FacialAnalysis, matches: &[BeautyMatch]) -> Self {
        Self {
            user_id: user_id.to_string(),
            face_shape: analysis.face_shape.clone(),
            skin_tone: analysis.skin_tone.clone(),
            recommended_style: analysis.recommended_style.clone(),
            color_palette: analysis.color_palette.clone(),
            facial_features: analysis.facial_features.clone(),
            beauty_matches: matches.to_vec(),
        }
    }
}

impl Catalog {
    pub fn new(standards: Vec<BeautyStandard>, products: Vec<BeautyProduct>) -> Self {
        Self { standards, products }
    }

    pub fn find_standard(&self, query: &str) -> Option<&BeautyStandard> {
        find_standard(&self.standards, query)
    }

    pub fn find_product(&self, id: &str) -> Option<&BeautyProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products for one standard, or every product when `standard_id` is None
    pub fn products_for(&self, standard_id: Option<&str>) -> Vec<BeautyProduct> {
        match standard_id {
            Some(id) => self
                .products
                .iter()
                .filter(|p| p.standard_id == id)
                .cloned()
                .collect(),
            None => self.products.clone(),
        }
    }
}

/// Look a standard up by exact id, then by case-insensitive name fragment
pub fn find_standard<'a>(standards: &'a [BeautyStandard], query: &str) -> Option<&'a BeautyStandard> {
    if let Some(standard) = standards.iter().find(|s| s.id == query) {
        return Some(standard);
    }

    let needle = query.to_lowercase();
    standards
        .iter()
        .find(|s| s.name.to_lowercase().contains(&needle))
}

/// Group products under every standard id; standards without products get an empty list
pub fn group_products(
    standards: &[BeautyStandard],
    products: &[BeautyProduct],
) -> BTreeMap<String, Vec<BeautyProduct>> {
    standards
        .iter()
        .map(|standard| {
            let items = products
                .iter()
                .filter(|p| p.standard_id == standard.id)
                .cloned()
                .collect();
            (standard.id.clone(), items)
        })
        .collect()
}

impl std::fmt::Display for BeautyStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.culture)
    }
}

impl std::fmt::Display for BeautyProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, format::format_price(self.price))
    }
}
