use serde::{Deserialize, Serialize};

use crate::{NormalizedResult, SeverityLevel, SourceRef, TriageConfig};

/// Bảng tóm tắt số liệu bên cạnh báo cáo chi tiết.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub severity: SeverityLevel,
    pub medication_count: usize,
    pub diet_count: usize,
    pub diagnosis_count: usize,
    pub source_count: usize,
    pub doctor_visit_flag: bool,
    #[serde(default)]
    pub recommendation_preview: Vec<String>,
    #[serde(default)]
    pub source_preview: Vec<SourceRef>,
    #[serde(default)]
    pub emergency_warning: Option<String>,
}

/// Tóm tắt với cấu hình mặc định.
pub fn summarize(result: &NormalizedResult) -> Dashboard {
    summarize_with(result, &TriageConfig::default())
}

/// Các bộ đếm luôn bằng độ dài danh sách mà phần chi tiết dùng.
pub fn summarize_with(result: &NormalizedResult, config: &TriageConfig) -> Dashboard {
    Dashboard {
        severity: result.severity,
        medication_count: result.medications.len(),
        diet_count: result.diet.len(),
        diagnosis_count: result.diagnosis_points.len(),
        source_count: result.sources.len(),
        doctor_visit_flag: result.doctor_referral.recommended,
        recommendation_preview: result
            .recommendations
            .iter()
            .take(config.recommendation_preview)
            .cloned()
            .collect(),
        source_preview: result
            .sources
            .iter()
            .take(config.source_preview)
            .cloned()
            .collect(),
        emergency_warning: result.emergency_warning.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DoctorReferral;
    use proptest::prelude::*;

    fn source(n: usize) -> SourceRef {
        SourceRef {
            title: format!("Source {n}"),
            url: format!("https://example.org/{n}"),
        }
    }

    #[test]
    fn counts_match_sequences() {
        let result = NormalizedResult {
            severity: SeverityLevel::High,
            medications: vec!["Paracetamol".into(), "Ibuprofen".into()],
            diet: vec!["Water".into()],
            diagnosis_points: vec!["A".into(), "B".into(), "C".into()],
            sources: (0..5).map(source).collect(),
            doctor_referral: DoctorReferral {
                recommended: true,
                specialist_paragraphs: Vec::new(),
            },
            ..NormalizedResult::default()
        };

        let dashboard = summarize(&result);
        assert_eq!(dashboard.severity, SeverityLevel::High);
        assert_eq!(dashboard.medication_count, 2);
        assert_eq!(dashboard.diet_count, 1);
        assert_eq!(dashboard.diagnosis_count, 3);
        assert_eq!(dashboard.source_count, 5);
        assert!(dashboard.doctor_visit_flag);
        assert_eq!(dashboard.source_preview.len(), 3);
    }

    #[test]
    fn previews_follow_config() {
        let result = NormalizedResult {
            recommendations: vec!["One".into(), "Two".into(), "Three".into()],
            sources: (0..2).map(source).collect(),
            ..NormalizedResult::default()
        };
        let config = TriageConfig {
            recommendation_preview: 1,
            source_preview: 10,
        };

        let dashboard = summarize_with(&result, &config);
        assert_eq!(dashboard.recommendation_preview, vec!["One"]);
        assert_eq!(dashboard.source_preview.len(), 2);
        assert_eq!(summarize(&result).recommendation_preview, vec!["One", "Two"]);
    }

    proptest! {
        #[test]
        fn medication_count_matches_detail(meds in proptest::collection::vec("[a-z]{1,10}", 0..20)) {
            let result = NormalizedResult { medications: meds, ..NormalizedResult::default() };
            prop_assert_eq!(summarize(&result).medication_count, result.medications.len());
        }
    }
}
