use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    client::{CareApi, OcrService},
    error::{CareError, Result},
    models::{
        AbnormalIndicator, ChecklistCategory, ChecklistItem, IndicatorLevel, MedicalTerm,
        PossibleCondition, PreparationChecklist, Probability, ReportAnalysis, TriageResult,
        UrgencyLevel,
    },
    protocol::WireMessage,
};

pub fn sample_analysis() -> ReportAnalysis {
    ReportAnalysis {
        elderly_explanation: "整体还不错".to_string(),
        family_explanation: "血脂略高".to_string(),
        medical_terms: vec![MedicalTerm {
            term: "血脂".to_string(),
            explanation: "血液中脂肪类物质的含量".to_string(),
        }],
        abnormal_indicators: vec![AbnormalIndicator {
            name: "总胆固醇".to_string(),
            value: "5.8 mmol/L".to_string(),
            normal_range: "3.1-5.2 mmol/L".to_string(),
            level: IndicatorLevel::High,
            explanation: "略高".to_string(),
        }],
        health_suggestions: vec!["低盐低脂饮食".to_string()],
        summary: "血脂偏高".to_string(),
    }
}

pub fn sample_triage_result() -> TriageResult {
    TriageResult {
        possible_conditions: vec![PossibleCondition {
            name: "普通感冒".to_string(),
            probability: Probability::High,
            description: "上呼吸道病毒感染".to_string(),
        }],
        recommended_department: "内科".to_string(),
        urgency_level: UrgencyLevel::Routine,
        additional_advice: "多休息".to_string(),
    }
}

pub fn sample_checklist() -> PreparationChecklist {
    PreparationChecklist {
        items: vec![ChecklistItem {
            id: "1".to_string(),
            text: "身份证".to_string(),
            checked: false,
            category: ChecklistCategory::Document,
        }],
        symptom_description: "头晕".to_string(),
        questions_for_doctor: vec!["需要做哪些检查？".to_string()],
        department: "内科".to_string(),
    }
}

/// In-process [`CareApi`] with canned answers.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    fail: bool,
    fail_analysis: bool,
    gate: Option<Arc<Notify>>,
    transcripts: Arc<Mutex<Vec<Vec<WireMessage>>>>,
}

impl ScriptedApi {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// OCR succeeds but report analysis fails.
    pub fn failing_analysis() -> Self {
        Self {
            fail_analysis: true,
            ..Self::default()
        }
    }

    /// Triage replies and results wait until the gate is notified.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    pub fn gate(&self) -> Arc<Notify> {
        self.gate.clone().expect("api is not gated")
    }

    pub fn last_transcript(&self) -> Vec<WireMessage> {
        self.transcripts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(CareError::RequestFailed("scripted failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CareApi for ScriptedApi {
    async fn analyze_report(&self, _ocr_text: &str) -> Result<ReportAnalysis> {
        self.check()?;
        if self.fail_analysis {
            return Err(CareError::MalformedResponse {
                kind: "report",
                reason: "scripted failure".to_string(),
            });
        }
        Ok(sample_analysis())
    }

    async fn send_triage_message(&self, messages: &[WireMessage]) -> Result<String> {
        self.transcripts.lock().unwrap().push(messages.to_vec());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.check()?;
        Ok("请问持续多久了？".to_string())
    }

    async fn generate_triage_result(&self, _messages: &[WireMessage]) -> Result<TriageResult> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.check()?;
        Ok(sample_triage_result())
    }

    async fn generate_preparation(
        &self,
        _symptoms: &str,
        _department: &str,
    ) -> Result<PreparationChecklist> {
        self.check()?;
        Ok(sample_checklist())
    }
}

#[async_trait]
impl OcrService for ScriptedApi {
    async fn recognize(&self, _file_name: &str, _bytes: &[u8]) -> Result<String> {
        self.check()?;
        Ok("总胆固醇(TC)：5.8mmol/L".to_string())
    }
}
