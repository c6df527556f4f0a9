use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when an upload's file name has no usable stem.
pub const DEFAULT_REPORT_TITLE: &str = "检查报告";

/// An uploaded report and, once analyzed, its layperson explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub ocr_text: String,
    pub analysis: Option<ReportAnalysis>,
    pub created_at: DateTime<Utc>,
}

impl MedicalReport {
    /// Creates an unanalyzed report titled after the uploaded file.
    pub fn from_upload(file_name: &str, ocr_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title_from_file_name(file_name),
            image_url: None,
            ocr_text: ocr_text.into(),
            analysis: None,
            created_at: Utc::now(),
        }
    }
}

/// Strips the final extension; falls back to [`DEFAULT_REPORT_TITLE`].
pub fn title_from_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => &file_name[..idx],
        _ => file_name,
    };
    if stem.trim().is_empty() {
        DEFAULT_REPORT_TITLE.to_string()
    } else {
        stem.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysis {
    pub elderly_explanation: String,
    pub family_explanation: String,
    pub medical_terms: Vec<MedicalTerm>,
    pub abnormal_indicators: Vec<AbnormalIndicator>,
    pub health_suggestions: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalTerm {
    pub term: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbnormalIndicator {
    pub name: String,
    pub value: String,
    pub normal_range: String,
    pub level: IndicatorLevel,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorLevel {
    High,
    Low,
    Critical,
}

impl IndicatorLevel {
    pub fn label(self) -> &'static str {
        match self {
            IndicatorLevel::High => "偏高",
            IndicatorLevel::Low => "偏低",
            IndicatorLevel::Critical => "危急",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_file_name() {
        assert_eq!(title_from_file_name("体检报告.jpg"), "体检报告");
        assert_eq!(title_from_file_name("scan.2024.pdf"), "scan.2024");
        assert_eq!(title_from_file_name(".png"), DEFAULT_REPORT_TITLE);
        assert_eq!(title_from_file_name(""), DEFAULT_REPORT_TITLE);
        assert_eq!(title_from_file_name("noext"), "noext");
    }

    #[test]
    fn test_indicator_level_rejects_unknown() {
        let raw = r#"{"name":"血糖","value":"5","normalRange":"3-6","level":"normal","explanation":""}"#;
        assert!(serde_json::from_str::<AbnormalIndicator>(raw).is_err());
    }
}
