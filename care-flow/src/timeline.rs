use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CareError, Result};

static TAG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,，\s]+").expect("valid tag separator regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Symptom,
    Medication,
    Checkup,
    Note,
}

impl EntryType {
    pub fn label(self) -> &'static str {
        match self {
            EntryType::Symptom => "症状",
            EntryType::Medication => "用药",
            EntryType::Checkup => "检查",
            EntryType::Note => "笔记",
        }
    }
}

/// One record on the personal health timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// User input for a new timeline entry, before validation.
#[derive(Debug, Clone)]
pub struct NewTimelineEntry {
    pub entry_type: EntryType,
    pub title: String,
    pub description: String,
    /// Comma or whitespace separated, as typed by the user.
    pub tags: String,
    pub date: Option<DateTime<Utc>>,
}

impl NewTimelineEntry {
    pub fn new(entry_type: EntryType, title: impl Into<String>) -> Self {
        Self {
            entry_type,
            title: title.into(),
            description: String::new(),
            tags: String::new(),
            date: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn into_entry(self) -> Result<TimelineEntry> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CareError::InvalidInput(
                "timeline entry title is required".to_string(),
            ));
        }

        Ok(TimelineEntry {
            id: Uuid::new_v4().to_string(),
            date: self.date.unwrap_or_else(Utc::now),
            entry_type: self.entry_type,
            title: title.to_string(),
            description: self.description.trim().to_string(),
            tags: Some(parse_tags(&self.tags)),
        })
    }
}

/// Splits free-form tag input on ASCII commas, full-width commas and whitespace.
pub fn parse_tags(raw: &str) -> Vec<String> {
    TAG_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Newest first. Entries with equal dates keep their relative order.
pub fn sorted_newest_first(entries: &[TimelineEntry]) -> Vec<TimelineEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
