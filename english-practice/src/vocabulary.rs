use crate::types::VocabularyWord;

/// Distinct categories in first-seen order.
pub fn categories(words: &[VocabularyWord]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for word in words {
        if !seen.contains(&word.category.as_str()) {
            seen.push(&word.category);
        }
    }
    seen
}

pub fn words_by_category<'a>(words: &'a [VocabularyWord], category: &str) -> Vec<&'a VocabularyWord> {
    words.iter().filter(|w| w.category == category).collect()
}
