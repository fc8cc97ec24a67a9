use super::{
    AnalysisFeature, AnalysisReport, AnalysisRequest, Analyzer, CultureScore, FacialAnalysis,
    KBeautyReport, StyleReport, TrendReport,
};
use crate::utils::error::AppResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Stand-in analyzer: waits, then returns fixed results
pub struct SimulatedAnalyzer {
    delay: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl Analyzer for SimulatedAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport> {
        request.validate()?;

        debug!(
            feature = ?request.feature,
            delay_ms = self.delay.as_millis() as u64,
            hints = request.hints.len(),
            "running simulated analysis"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let report = match request.feature {
            AnalysisFeature::Facial => AnalysisReport::Facial(facial()),
            AnalysisFeature::KBeauty => AnalysisReport::KBeauty(k_beauty()),
            AnalysisFeature::GlobalMatch => AnalysisReport::GlobalMatch {
                matches: global_match(),
            },
            AnalysisFeature::StyleMatch => AnalysisReport::StyleMatch(style_match()),
            AnalysisFeature::TrendFusion => AnalysisReport::TrendFusion(trend_fusion()),
        };
        Ok(report)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn facial() -> FacialAnalysis {
    FacialAnalysis {
        face_shape: "Oval".to_string(),
        skin_tone: "Warm".to_string(),
        recommended_style: "Modern Minimalist".to_string(),
        color_palette: "Spring Warm".to_string(),
        facial_features: strings(&[
            "Clear, dewy complexion",
            "High cheekbones",
            "Almond eyes",
            "Defined nose bridge",
            "Full lips",
        ]),
    }
}

fn k_beauty() -> KBeautyReport {
    KBeautyReport {
        skin_type: "Combination with slight sensitivity".to_string(),
        recommendations: strings(&[
            "Double cleansing routine",
            "Hydrating toner",
            "Gentle exfoliation twice weekly",
            "Lightweight moisturizer",
        ]),
        products: strings(&[
            "Oil-based cleanser",
            "Foam cleanser",
            "Centella toner",
            "Hyaluronic acid serum",
        ]),
    }
}

fn global_match() -> Vec<CultureScore> {
    vec![
        CultureScore {
            culture: "Korean".to_string(),
            score: 85,
            features: strings(&["Oval face shape", "Clear complexion", "High cheekbones"]),
        },
        CultureScore {
            culture: "Japanese".to_string(),
            score: 75,
            features: strings(&["Balanced features", "Natural elegance", "Gentle expression"]),
        },
        CultureScore {
            culture: "Western".to_string(),
            score: 70,
            features: strings(&["Defined features", "Strong bone structure", "Expressive eyes"]),
        },
    ]
}

fn style_match() -> StyleReport {
    StyleReport {
        primary_style: "Modern Minimalist".to_string(),
        complementary_styles: strings(&["K-Beauty Natural", "Clean Beauty", "Soft Glam"]),
        color_palette: strings(&["#FFE4E1", "#F5F5DC", "#E6E6FA", "#F0F8FF"]),
    }
}

fn trend_fusion() -> TrendReport {
    TrendReport {
        current_trends: strings(&[
            "Glass skin finish",
            "Gradient lips",
            "Feathered brows",
            "Dewy highlighter",
        ]),
        personalized_suggestions: strings(&[
            "Natural base with focused glow points",
            "Subtle eye emphasis",
            "Hydrated, plump skin texture",
        ]),
        seasonal_recommendations: strings(&[
            "Light-reflecting primers",
            "Cream-based products",
            "Multi-use tints",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PhotoInput;
    use crate::utils::error::AppError;

    fn photo() -> (tempfile::TempDir, PhotoInput) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        std::fs::write(&path, [0x89u8, b'P', b'N', b'G']).unwrap();
        let photo = PhotoInput::from_path(&path).unwrap();
        (dir, photo)
    }

    #[tokio::test]
    async fn test_facial_analysis_returns_fixed_features() {
        let (_dir, photo) = photo();
        let analyzer = SimulatedAnalyzer::instant();
        let request = AnalysisRequest::new(AnalysisFeature::Facial).with_photo(photo);

        let analysis = analyzer.analyze(&request).await.unwrap().into_facial().unwrap();
        assert_eq!(analysis.face_shape, "Oval");
        assert_eq!(analysis.facial_features.len(), 5);
        assert!(analysis.facial_features.contains(&"High cheekbones".to_string()));
    }

    #[tokio::test]
    async fn test_trend_fusion_needs_no_photo() {
        let analyzer = SimulatedAnalyzer::instant();
        let report = analyzer
            .analyze(&AnalysisRequest::new(AnalysisFeature::TrendFusion))
            .await
            .unwrap();
        assert!(matches!(report, AnalysisReport::TrendFusion(ref t) if t.current_trends.len() == 4));
    }

    #[tokio::test]
    async fn test_photo_features_fail_without_photo() {
        let analyzer = SimulatedAnalyzer::instant();
        let err = analyzer
            .analyze(&AnalysisRequest::new(AnalysisFeature::StyleMatch))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_global_match_is_sorted_by_score() {
        let (_dir, photo) = photo();
        let analyzer = SimulatedAnalyzer::instant();
        let request = AnalysisRequest::new(AnalysisFeature::GlobalMatch).with_photo(photo);

        match analyzer.analyze(&request).await.unwrap() {
            AnalysisReport::GlobalMatch { matches } => {
                let scores: Vec<u8> = matches.iter().map(|m| m.score).collect();
                assert_eq!(scores, vec![85, 75, 70]);
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let analyzer = SimulatedAnalyzer::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        analyzer
            .analyze(&AnalysisRequest::new(AnalysisFeature::TrendFusion))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
