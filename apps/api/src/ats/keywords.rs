//! Keyword Extractor — folds skills and free-text fields into a bounded,
//! de-duplicated keyword set.
//!
//! Order is insertion order of first occurrence: skills, then each work
//! description in order, then the professional summary.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::resume::ResumeContent;

/// Maximum number of keywords retained on a resume.
pub const MAX_KEYWORDS: usize = 50;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "was", "were", "are", "have", "has",
];

/// Runs of three or more ASCII word characters. Matching is greedy and
/// leftmost, so every hit is a whole word-boundary-delimited run.
fn word_pattern() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"[0-9A-Za-z_]{3,}").expect("static keyword pattern"))
}

/// Insertion-ordered set that stops accepting new entries at `cap`.
struct KeywordSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
    cap: usize,
}

impl KeywordSet {
    fn new(cap: usize) -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
            cap,
        }
    }

    fn is_full(&self) -> bool {
        self.ordered.len() >= self.cap
    }

    fn insert(&mut self, keyword: String) {
        if self.is_full() {
            return;
        }
        if self.seen.insert(keyword.clone()) {
            self.ordered.push(keyword);
        }
    }

    fn extend_from_text(&mut self, text: &str) {
        let lowered = text.to_lowercase();
        for word in tokenize(&lowered) {
            if self.is_full() {
                return;
            }
            self.insert(word.to_string());
        }
    }
}

/// Yields stop-word-filtered tokens of a (pre-lowercased) text.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    word_pattern()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
}

/// Extracts the resume's keyword set, capped at [`MAX_KEYWORDS`].
pub fn extract_keywords(content: &ResumeContent) -> Vec<String> {
    let mut set = KeywordSet::new(MAX_KEYWORDS);

    for skill in &content.skills {
        set.insert(skill.to_lowercase());
    }
    for exp in &content.work_experience {
        set.extend_from_text(&exp.description);
    }
    set.extend_from_text(&content.professional_summary);

    set.ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::WorkExperience;

    fn work(description: &str) -> WorkExperience {
        WorkExperience {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_skills_are_case_folded_without_tokenizing() {
        let content = ResumeContent {
            skills: vec!["Node.js".to_string(), "C#".to_string(), "Go".to_string()],
            ..Default::default()
        };
        assert_eq!(extract_keywords(&content), vec!["node.js", "c#", "go"]);
    }

    #[test]
    fn test_stop_words_and_short_tokens_are_dropped() {
        let tokens: Vec<_> = tokenize("the api and a db were built with rust for teams").collect();
        assert_eq!(tokens, vec!["api", "built", "rust", "teams"]);
    }

    #[test]
    fn test_tokens_split_on_non_word_characters() {
        let tokens: Vec<_> = tokenize("ci/cd, node.js & k8s_ops").collect();
        assert_eq!(tokens, vec!["node", "k8s_ops"]);
    }

    #[test]
    fn test_order_is_skills_then_descriptions_then_summary() {
        let content = ResumeContent {
            skills: vec!["Rust".to_string()],
            work_experience: vec![work("Built payments"), work("Scaled search")],
            professional_summary: "Seasoned engineer".to_string(),
            ..Default::default()
        };
        assert_eq!(
            extract_keywords(&content),
            vec!["rust", "built", "payments", "scaled", "search", "seasoned", "engineer"]
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let content = ResumeContent {
            skills: vec!["Python".to_string()],
            work_experience: vec![work("Python services in PYTHON")],
            ..Default::default()
        };
        assert_eq!(extract_keywords(&content), vec!["python", "services"]);
    }

    #[test]
    fn test_keyword_set_is_capped_at_fifty() {
        let skills: Vec<String> = (0..40).map(|i| format!("skill{i}")).collect();
        let description: String = (0..30).map(|i| format!("word{i} ")).collect();
        let content = ResumeContent {
            skills,
            work_experience: vec![work(&description)],
            professional_summary: "summary words never make it".to_string(),
            ..Default::default()
        };

        let keywords = extract_keywords(&content);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "skill0");
        assert_eq!(keywords[39], "skill39");
        assert_eq!(keywords[40], "word0");
        assert_eq!(keywords[49], "word9");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let content = ResumeContent {
            skills: vec!["SQL".to_string()],
            work_experience: vec![work("Designed schemas and tuned queries")],
            professional_summary: "Data engineer".to_string(),
            ..Default::default()
        };
        assert_eq!(extract_keywords(&content), extract_keywords(&content));
    }
}
