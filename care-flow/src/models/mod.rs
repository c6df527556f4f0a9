pub mod chat;
pub mod preparation;
pub mod report;
pub mod triage;

pub use chat::{ChatMessage, MessageRole};
pub use preparation::{ChecklistCategory, ChecklistItem, PreparationChecklist};
pub use report::{AbnormalIndicator, IndicatorLevel, MedicalReport, MedicalTerm, ReportAnalysis};
pub use triage::{PossibleCondition, Probability, TriageResult, UrgencyLevel, UrgencyTone};
