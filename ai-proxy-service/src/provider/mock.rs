use async_trait::async_trait;
use care_flow::{
    AbnormalIndicator, AiRequest, AiRequestKind, ChecklistCategory, ChecklistItem,
    IndicatorLevel, MedicalTerm, PossibleCondition, PreparationChecklist, Probability,
    ReportAnalysis, TriageResult, UrgencyLevel,
};

use super::AiProvider;

pub const MOCK_TRIAGE_REPLY: &str = "您好！我了解到您或家人身体不适，请不要着急。为了更好地帮助您，请详细描述一下症状：\n\n1. 主要不舒服的感觉是什么？\n2. 从什么时候开始的？\n3. 有没有其他伴随的不舒服？\n\n请放心，我会耐心帮您分析。";

/// Demo-mode backend. Answers depend only on the request kind.
pub struct MockProvider;

#[async_trait]
impl AiProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &AiRequest) -> anyhow::Result<String> {
        mock_result(request.kind)
    }
}

pub fn mock_result(kind: AiRequestKind) -> anyhow::Result<String> {
    let result = match kind {
        AiRequestKind::Report => serde_json::to_string(&mock_report_analysis())?,
        AiRequestKind::Triage => MOCK_TRIAGE_REPLY.to_string(),
        AiRequestKind::TriageResult => serde_json::to_string(&mock_triage_result())?,
        AiRequestKind::Preparation => serde_json::to_string(&mock_preparation())?,
    };
    Ok(result)
}

fn term(term: &str, explanation: &str) -> MedicalTerm {
    MedicalTerm {
        term: term.to_string(),
        explanation: explanation.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mock_report_analysis() -> ReportAnalysis {
    ReportAnalysis {
        elderly_explanation: "您的检查结果整体还不错，就像汽车年检一样，大部分零件都正常运转。有几个小指标稍微偏高一点，就好比轮胎气压稍微多了一点点，不用太担心，注意饮食清淡、多喝水就好。".to_string(),
        family_explanation: "报告显示受检者的基本健康状况良好。血常规和生化指标中，大部分数值在正常范围内。需要关注的是：血压偏高、血脂略有异常，这些通常与饮食习惯和运动量有关。建议定期复查并调整生活方式。总体来看无需过度担忧，但应保持健康的生活习惯。".to_string(),
        medical_terms: vec![
            term("血常规", "通过抽血检查血液中各种细胞的数量和质量，是最基本的体检项目"),
            term("血脂", "血液中脂肪类物质的含量，过高容易导致血管硬化"),
            term("血压", "心脏泵血时对血管壁产生的压力，正常值为120/80mmHg左右"),
        ],
        abnormal_indicators: vec![
            AbnormalIndicator {
                name: "总胆固醇".to_string(),
                value: "5.8 mmol/L".to_string(),
                normal_range: "3.1-5.2 mmol/L".to_string(),
                level: IndicatorLevel::High,
                explanation: "总胆固醇略高于正常范围，建议减少高脂食物摄入".to_string(),
            },
            AbnormalIndicator {
                name: "收缩压".to_string(),
                value: "142 mmHg".to_string(),
                normal_range: "90-140 mmHg".to_string(),
                level: IndicatorLevel::High,
                explanation: "收缩压略高，建议减少盐分摄入，适当运动".to_string(),
            },
        ],
        health_suggestions: strings(&[
            "建议低盐低脂饮食，每日盐摄入量控制在6克以内",
            "每天保持30分钟中等强度运动，如快走、太极拳",
            "建议3个月后复查血脂和血压",
            "保持充足睡眠，避免过度劳累",
            "如有头晕、胸闷等症状请及时就医",
        ]),
        summary: "整体健康状况良好，血脂和血压略偏高，建议调整生活方式并定期复查。".to_string(),
    }
}

fn mock_triage_result() -> TriageResult {
    TriageResult {
        possible_conditions: vec![
            PossibleCondition {
                name: "普通感冒".to_string(),
                probability: Probability::High,
                description: "上呼吸道病毒感染，通常1-2周自愈".to_string(),
            },
            PossibleCondition {
                name: "流行性感冒".to_string(),
                probability: Probability::Medium,
                description: "流感病毒感染，症状较重，需注意并发症".to_string(),
            },
        ],
        recommended_department: "内科/呼吸科".to_string(),
        urgency_level: UrgencyLevel::Routine,
        additional_advice: "多休息、多饮水，注意体温变化。如体温持续超过38.5°C或出现呼吸困难，请及时就医。".to_string(),
    }
}

fn mock_preparation() -> PreparationChecklist {
    let items = [
        ("身份证", ChecklistCategory::Document),
        ("医保卡", ChecklistCategory::Document),
        ("既往病历和检查报告", ChecklistCategory::Document),
        ("目前正在服用的药物清单", ChecklistCategory::Information),
        ("近期的检查结果", ChecklistCategory::Document),
        ("水杯和少量零食", ChecklistCategory::Item),
        ("手机充电宝", ChecklistCategory::Item),
        ("纸巾和口罩", ChecklistCategory::Item),
    ];

    PreparationChecklist {
        items: items
            .iter()
            .enumerate()
            .map(|(i, (text, category))| ChecklistItem {
                id: (i + 1).to_string(),
                text: text.to_string(),
                checked: false,
                category: *category,
            })
            .collect(),
        symptom_description: "患者近期出现不适症状，需要就医检查".to_string(),
        questions_for_doctor: strings(&[
            "这个症状可能是什么原因引起的？",
            "需要做哪些检查？",
            "治疗方案是什么？大概需要多长时间？",
            "日常生活中有什么需要注意的？",
            "什么情况下需要立即来复诊？",
        ]),
        department: "内科".to_string(),
    }
}
