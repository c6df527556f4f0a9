use serde::{Deserialize, Serialize};

/// Department used when the visitor has not chosen one yet.
pub const UNDECIDED_DEPARTMENT: &str = "待确定";

/// Checklist for an upcoming hospital visit.
///
/// Only `items[*].checked` changes after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationChecklist {
    pub items: Vec<ChecklistItem>,
    pub symptom_description: String,
    pub questions_for_doctor: Vec<String>,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
    pub category: ChecklistCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistCategory {
    Document,
    Item,
    Information,
}

impl ChecklistCategory {
    /// Display order of the checklist groups.
    pub const ORDER: [ChecklistCategory; 3] = [
        ChecklistCategory::Document,
        ChecklistCategory::Item,
        ChecklistCategory::Information,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChecklistCategory::Document => "证件文件",
            ChecklistCategory::Item => "随身物品",
            ChecklistCategory::Information => "信息准备",
        }
    }
}

impl PreparationChecklist {
    /// Flips `checked` on the item with `id`. Returns false if no item matched.
    pub fn toggle_item(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.checked = !item.checked;
                true
            }
            None => false,
        }
    }

    /// Items grouped by category in display order. Empty groups are kept.
    pub fn grouped(&self) -> Vec<(ChecklistCategory, Vec<&ChecklistItem>)> {
        ChecklistCategory::ORDER
            .iter()
            .map(|category| {
                let items = self
                    .items
                    .iter()
                    .filter(|item| item.category == *category)
                    .collect();
                (*category, items)
            })
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}
