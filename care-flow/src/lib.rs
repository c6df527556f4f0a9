pub mod client;
pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod preparation;
pub mod prompts;
pub mod protocol;
pub mod report_flow;
pub mod store;
pub mod timeline;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use client::{CareApi, HttpCareClient, OcrService};
pub use conversation::{TriageConversation, TriagePhase};
pub use error::{CareError, Result};
pub use knowledge::{CardCategory, KnowledgeCard, KnowledgeFilter};
pub use models::{
    AbnormalIndicator, ChatMessage, ChecklistCategory, ChecklistItem, IndicatorLevel,
    MedicalReport, MedicalTerm, MessageRole, PossibleCondition, PreparationChecklist,
    Probability, ReportAnalysis, TriageResult, UrgencyLevel, UrgencyTone,
};
pub use preparation::PreparationDesk;
pub use protocol::{AiRequest, AiRequestKind, AiResponse, ErrorBody, OcrResponse, WireMessage};
pub use report_flow::{ReportFlow, ReportView};
pub use store::AppStore;
pub use timeline::{EntryType, NewTimelineEntry, TimelineEntry};
