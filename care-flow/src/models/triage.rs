use serde::{Deserialize, Serialize};

/// Structured outcome of a triage conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub possible_conditions: Vec<PossibleCondition>,
    pub recommended_department: String,
    pub urgency_level: UrgencyLevel,
    pub additional_advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PossibleCondition {
    pub name: String,
    pub probability: Probability,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Probability {
    High,
    Medium,
    Low,
}

impl Probability {
    pub fn label(self) -> &'static str {
        match self {
            Probability::High => "可能性高",
            Probability::Medium => "可能性中",
            Probability::Low => "可能性低",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyLevel {
    Emergency,
    Urgent,
    Routine,
    SelfCare,
}

/// Display tone for an urgency badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyTone {
    Red,
    Orange,
    Blue,
    Green,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Emergency,
        UrgencyLevel::Urgent,
        UrgencyLevel::Routine,
        UrgencyLevel::SelfCare,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UrgencyLevel::Emergency => "立即就医",
            UrgencyLevel::Urgent => "尽快就医",
            UrgencyLevel::Routine => "择期就医",
            UrgencyLevel::SelfCare => "居家观察",
        }
    }

    pub fn tone(self) -> UrgencyTone {
        match self {
            UrgencyLevel::Emergency => UrgencyTone::Red,
            UrgencyLevel::Urgent => UrgencyTone::Orange,
            UrgencyLevel::Routine => UrgencyTone::Blue,
            UrgencyLevel::SelfCare => UrgencyTone::Green,
        }
    }
}
