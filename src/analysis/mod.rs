//! Photo and style analysis
//!
//! Analysis sits behind the [`Analyzer`] trait so a real backend can replace
//! the simulated one without touching matching or presentation code.

pub mod simulated;

use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use simulated::SimulatedAnalyzer;

/// Upper bound on accepted photo size
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AnalysisFeature {
    /// Facial features used for standard matching
    Facial,
    /// Korean skincare routine analysis
    KBeauty,
    /// Closest worldwide beauty standards
    GlobalMatch,
    /// East-meets-West style blend
    StyleMatch,
    /// Current trends, no photo needed
    TrendFusion,
}

impl AnalysisFeature {
    pub fn requires_photo(self) -> bool {
        !matches!(self, AnalysisFeature::TrendFusion)
    }

    pub fn title(self) -> &'static str {
        match self {
            AnalysisFeature::Facial => "Facial Analysis",
            AnalysisFeature::KBeauty => "K-Beauty Analysis",
            AnalysisFeature::GlobalMatch => "Global Beauty Match",
            AnalysisFeature::StyleMatch => "Style Matching",
            AnalysisFeature::TrendFusion => "Trend Fusion",
        }
    }
}

/// A validated photo on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoInput {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl PhotoInput {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| AppError::NotFound(format!("Photo '{}'", path.display())))?;

        if !metadata.is_file() {
            return Err(AppError::Validation(format!(
                "'{}' is not a file",
                path.display()
            )));
        }

        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)));
        if !is_image {
            return Err(AppError::Validation(
                "Please upload an image file (jpg, png, gif, webp, bmp or heic)".to_string(),
            ));
        }

        if metadata.len() > MAX_PHOTO_BYTES {
            return Err(AppError::Validation(
                "Image size should be less than 5MB".to_string(),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub feature: AnalysisFeature,
    pub photo: Option<PhotoInput>,
    /// Free-text features or preferences supplied by the user
    pub hints: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(feature: AnalysisFeature) -> Self {
        Self {
            feature,
            photo: None,
            hints: Vec::new(),
        }
    }

    pub fn with_photo(mut self, photo: PhotoInput) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.feature.requires_photo() && self.photo.is_none() {
            return Err(AppError::Validation(format!(
                "{} needs a photo. Pass one with --photo",
                self.feature.title()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacialAnalysis {
    pub face_shape: String,
    pub skin_tone: String,
    pub recommended_style: String,
    pub color_palette: String,
    pub facial_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KBeautyReport {
    pub skin_type: String,
    pub recommendations: Vec<String>,
    pub products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultureScore {
    pub culture: String,
    pub score: u8,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleReport {
    pub primary_style: String,
    pub complementary_styles: Vec<String>,
    /// Hex colors, e.g. `#FFE4E1`
    pub color_palette: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendReport {
    pub current_trends: Vec<String>,
    pub personalized_suggestions: Vec<String>,
    pub seasonal_recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisReport {
    Facial(FacialAnalysis),
    KBeauty(KBeautyReport),
    GlobalMatch { matches: Vec<CultureScore> },
    StyleMatch(StyleReport),
    TrendFusion(TrendReport),
}

impl AnalysisReport {
    pub fn into_facial(self) -> AppResult<FacialAnalysis> {
        match self {
            AnalysisReport::Facial(analysis) => Ok(analysis),
            _ => Err(AppError::System(
                "Analyzer returned a non-facial report for a facial request".to_string(),
            )),
        }
    }
}

/// Pluggable analysis backend
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_photo_requires_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = PhotoInput::from_path(&path).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_photo_accepts_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selfie.JPG");
        std::fs::write(&path, [0xFFu8, 0xD8, 0xFF]).unwrap();

        let photo = PhotoInput::from_path(&path).unwrap();
        assert_eq!(photo.size_bytes, 3);
    }

    #[test]
    fn test_photo_rejects_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![0u8; (MAX_PHOTO_BYTES + 1) as usize]).unwrap();

        let err = PhotoInput::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("5MB"));
    }

    #[test]
    fn test_missing_photo_is_not_found() {
        let err = PhotoInput::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_request_validation_by_feature() {
        assert!(AnalysisRequest::new(AnalysisFeature::TrendFusion).validate().is_ok());
        assert!(AnalysisRequest::new(AnalysisFeature::KBeauty).validate().is_err());
        assert!(AnalysisRequest::new(AnalysisFeature::Facial).validate().is_err());
    }
}
