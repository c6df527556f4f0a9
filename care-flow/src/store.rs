use tokio::sync::{Mutex, RwLock};

use crate::{
    error::{CareError, Result},
    knowledge::{self, KnowledgeCard, KnowledgeFilter},
    models::{ChatMessage, MedicalReport, ReportAnalysis, TriageResult},
    timeline::{self, TimelineEntry},
};

/// Transcript and result of the triage conversation.
///
/// Kept under one lock so that a reset clears both at once.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub result: Option<TriageResult>,
    /// Bumped on every reset; replies tagged with an older epoch are dropped.
    pub epoch: u64,
}

/// Application state shared by every page. Setters are the only mutation path.
#[derive(Debug, Default)]
pub struct AppStore {
    reports: RwLock<Vec<MedicalReport>>,
    chat: Mutex<ChatState>,
    timeline: RwLock<Vec<TimelineEntry>>,
    knowledge: RwLock<Vec<KnowledgeCard>>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the built-in knowledge cards.
    pub fn with_knowledge_base() -> Self {
        Self {
            knowledge: RwLock::new(knowledge::builtin_cards()),
            ..Self::default()
        }
    }

    // Reports

    /// Newest reports come first.
    pub async fn add_report(&self, report: MedicalReport) {
        self.reports.write().await.insert(0, report);
    }

    pub async fn update_report_analysis(&self, id: &str, analysis: ReportAnalysis) -> Result<()> {
        let mut reports = self.reports.write().await;
        let report = reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CareError::NotFound(format!("report {id}")))?;
        report.analysis = Some(analysis);
        Ok(())
    }

    pub async fn reports(&self) -> Vec<MedicalReport> {
        self.reports.read().await.clone()
    }

    pub async fn report(&self, id: &str) -> Option<MedicalReport> {
        self.reports.read().await.iter().find(|r| r.id == id).cloned()
    }

    // Chat

    pub async fn add_chat_message(&self, message: ChatMessage) {
        self.chat.lock().await.messages.push(message);
    }

    /// Clears transcript and result together.
    pub async fn clear_chat(&self) {
        let mut chat = self.chat.lock().await;
        chat.messages.clear();
        chat.result = None;
        chat.epoch += 1;
    }

    pub async fn set_triage_result(&self, result: Option<TriageResult>) {
        self.chat.lock().await.result = result;
    }

    pub async fn chat_messages(&self) -> Vec<ChatMessage> {
        self.chat.lock().await.messages.clone()
    }

    pub async fn triage_result(&self) -> Option<TriageResult> {
        self.chat.lock().await.result.clone()
    }

    /// Consistent copy of the whole chat section.
    pub async fn chat_snapshot(&self) -> ChatState {
        self.chat.lock().await.clone()
    }

    /// Runs `f` with the chat section locked. The lock is never held across an await.
    pub(crate) async fn with_chat<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        let mut chat = self.chat.lock().await;
        f(&mut chat)
    }

    // Timeline

    pub async fn add_timeline_entry(&self, entry: TimelineEntry) {
        self.timeline.write().await.insert(0, entry);
    }

    /// Returns false when no entry had `id`.
    pub async fn remove_timeline_entry(&self, id: &str) -> bool {
        let mut entries = self.timeline.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }

    /// Entries ordered newest date first.
    pub async fn timeline(&self) -> Vec<TimelineEntry> {
        timeline::sorted_newest_first(&self.timeline.read().await)
    }

    // Knowledge

    pub async fn toggle_save_card(&self, id: &str) -> Result<bool> {
        let mut cards = self.knowledge.write().await;
        knowledge::toggle_save(&mut cards, id)
            .ok_or_else(|| CareError::NotFound(format!("knowledge card {id}")))
    }

    pub async fn knowledge_cards(&self) -> Vec<KnowledgeCard> {
        self.knowledge.read().await.clone()
    }

    pub async fn filter_knowledge(&self, filter: KnowledgeFilter, query: &str) -> Vec<KnowledgeCard> {
        let cards = self.knowledge.read().await;
        knowledge::filter_cards(&cards, filter, query)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMessage, UrgencyLevel};
    use crate::timeline::{EntryType, NewTimelineEntry};

    fn sample_result() -> TriageResult {
        TriageResult {
            possible_conditions: vec![],
            recommended_department: "内科".to_string(),
            urgency_level: UrgencyLevel::Routine,
            additional_advice: "多休息".to_string(),
        }
    }

    #[tokio::test]
    async fn test_reports_prepend_and_update() {
        let store = AppStore::new();
        let first = MedicalReport::from_upload("a.jpg", "first");
        let second = MedicalReport::from_upload("b.jpg", "second");
        store.add_report(first.clone()).await;
        store.add_report(second.clone()).await;

        let reports = store.reports().await;
        assert_eq!(reports[0].id, second.id);
        assert_eq!(reports[1].id, first.id);

        let err = store
            .update_report_analysis("missing", crate::test_support::sample_analysis())
            .await
            .unwrap_err();
        assert!(matches!(err, CareError::NotFound(_)));

        store
            .update_report_analysis(&first.id, crate::test_support::sample_analysis())
            .await
            .unwrap();
        assert!(store.report(&first.id).await.unwrap().analysis.is_some());
        assert!(store.report(&second.id).await.unwrap().analysis.is_none());
    }

    #[tokio::test]
    async fn test_clear_chat_clears_both() {
        let store = AppStore::new();
        store.add_chat_message(ChatMessage::greeting()).await;
        store.set_triage_result(Some(sample_result())).await;

        store.clear_chat().await;
        let chat = store.chat_snapshot().await;
        assert!(chat.messages.is_empty());
        assert!(chat.result.is_none());
        assert_eq!(chat.epoch, 1);
    }

    #[tokio::test]
    async fn test_timeline_add_remove() {
        let store = AppStore::new();
        let entry = NewTimelineEntry::new(EntryType::Symptom, "头晕")
            .tags("头晕,血压")
            .into_entry()
            .unwrap();
        store.add_timeline_entry(entry.clone()).await;
        assert_eq!(store.timeline().await.len(), 1);

        assert!(store.remove_timeline_entry(&entry.id).await);
        assert!(!store.remove_timeline_entry(&entry.id).await);
        assert!(store.timeline().await.is_empty());
    }

    #[tokio::test]
    async fn test_knowledge_toggle_through_store() {
        let store = AppStore::with_knowledge_base();
        assert!(store.toggle_save_card("k2").await.unwrap());
        let saved = store.filter_knowledge(KnowledgeFilter::Saved, "").await;
        let ids: Vec<_> = saved.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["k2", "k4"]);
        assert!(store.toggle_save_card("nope").await.is_err());
    }
}
