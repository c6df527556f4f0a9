use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::{
    client::CareApi,
    error::{CareError, Result},
    models::PreparationChecklist,
};

/// Holds the checklist generated for one upcoming visit.
pub struct PreparationDesk {
    api: Arc<dyn CareApi>,
    checklist: Mutex<Option<PreparationChecklist>>,
}

impl PreparationDesk {
    pub fn new(api: Arc<dyn CareApi>) -> Self {
        Self {
            api,
            checklist: Mutex::new(None),
        }
    }

    /// Generates a fresh checklist, replacing any previous one on success.
    pub async fn generate(&self, symptoms: &str, department: &str) -> Result<PreparationChecklist> {
        if symptoms.trim().is_empty() {
            return Err(CareError::InvalidInput("symptoms are required".to_string()));
        }

        let checklist = self.api.generate_preparation(symptoms, department).await?;
        info!(
            items = checklist.items.len(),
            department = %checklist.department,
            "Preparation checklist generated"
        );

        *self.checklist.lock().await = Some(checklist.clone());
        Ok(checklist)
    }

    pub async fn checklist(&self) -> Option<PreparationChecklist> {
        self.checklist.lock().await.clone()
    }

    /// Flips one item. Fails if there is no checklist or no such item.
    pub async fn toggle_item(&self, id: &str) -> Result<()> {
        let mut guard = self.checklist.lock().await;
        let checklist = guard
            .as_mut()
            .ok_or_else(|| CareError::NotFound("no checklist generated".to_string()))?;
        if checklist.toggle_item(id) {
            Ok(())
        } else {
            Err(CareError::NotFound(format!("checklist item {id}")))
        }
    }

    /// Back to the input form.
    pub async fn reset(&self) {
        *self.checklist.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedApi;

    #[tokio::test]
    async fn test_generate_and_toggle() {
        let desk = PreparationDesk::new(Arc::new(ScriptedApi::default()));
        assert!(desk.toggle_item("1").await.is_err());

        desk.generate("头晕一周", "").await.unwrap();
        desk.toggle_item("1").await.unwrap();
        assert!(desk.checklist().await.unwrap().items[0].checked);
        assert!(desk.toggle_item("99").await.is_err());

        desk.reset().await;
        assert!(desk.checklist().await.is_none());
    }

    #[tokio::test]
    async fn test_blank_symptoms_rejected() {
        let desk = PreparationDesk::new(Arc::new(ScriptedApi::default()));
        assert!(matches!(
            desk.generate("  ", "内科").await,
            Err(CareError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_previous() {
        let desk = PreparationDesk::new(Arc::new(ScriptedApi::failing()));
        assert!(desk.generate("头晕", "内科").await.is_err());
        assert!(desk.checklist().await.is_none());
    }
}
