//! Keyword table for the zero-network classification tier
//!
//! Matching is by substring over the lowercase sanitized input. When several
//! keywords match, the longest keyword wins; equal lengths keep table order.

use serde::Serialize;
use std::sync::OnceLock;

use crate::mode::Mode;

const BUILTIN_KEYWORDS: &[(&str, Mode)] = &[
    // Architect
    ("hire", Mode::Architect),
    ("hiring", Mode::Architect),
    ("recruit", Mode::Architect),
    ("business", Mode::Architect),
    ("strategy", Mode::Architect),
    ("consult", Mode::Architect),
    ("leadership", Mode::Architect),
    ("management", Mode::Architect),
    ("resume", Mode::Architect),
    ("career", Mode::Architect),
    ("client", Mode::Architect),
    ("enterprise", Mode::Architect),
    ("product", Mode::Architect),
    ("process", Mode::Architect),
    ("partnership", Mode::Architect),
    ("collaborate", Mode::Architect),
    ("work with", Mode::Architect),
    ("architect", Mode::Architect),
    ("job", Mode::Architect),
    // Author
    ("write", Mode::Author),
    ("writing", Mode::Author),
    ("writer", Mode::Author),
    ("story", Mode::Author),
    ("stories", Mode::Author),
    ("blog", Mode::Author),
    ("essay", Mode::Author),
    ("poem", Mode::Author),
    ("poetry", Mode::Author),
    ("book", Mode::Author),
    ("novel", Mode::Author),
    ("article", Mode::Author),
    ("narrative", Mode::Author),
    ("journal", Mode::Author),
    ("prose", Mode::Author),
    ("author", Mode::Author),
    ("reading", Mode::Author),
    ("reader", Mode::Author),
    // Lab
    ("code", Mode::Lab),
    ("coding", Mode::Lab),
    ("tech", Mode::Lab),
    ("github", Mode::Lab),
    ("engineer", Mode::Lab),
    ("developer", Mode::Lab),
    ("software", Mode::Lab),
    ("program", Mode::Lab),
    ("algorithm", Mode::Lab),
    ("open source", Mode::Lab),
    ("experiment", Mode::Lab),
    ("hack", Mode::Lab),
    ("build", Mode::Lab),
    ("stack", Mode::Lab),
    ("laboratory", Mode::Lab),
];

/// A keyword hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordMatch {
    pub keyword: &'static str,
    pub mode: Mode,
}

/// Read-only keyword to mode mapping, ordered for matching
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<(&'static str, Mode)>,
    declared: Vec<(&'static str, Mode)>,
}

impl KeywordTable {
    /// Build a table from `(keyword, mode)` pairs.
    ///
    /// Keywords must already be lowercase. Entries are stably sorted longest
    /// first, so ties keep the given order.
    pub fn new(entries: &[(&'static str, Mode)]) -> Self {
        let declared = entries.to_vec();
        let mut entries = declared.clone();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries, declared }
    }

    /// The process-wide built-in table
    pub fn builtin() -> &'static KeywordTable {
        static TABLE: OnceLock<KeywordTable> = OnceLock::new();
        TABLE.get_or_init(|| KeywordTable::new(BUILTIN_KEYWORDS))
    }

    /// First matching entry in longest-first order
    pub fn lookup(&self, text_lower: &str) -> Option<KeywordMatch> {
        self.entries
            .iter()
            .find(|(keyword, _)| text_lower.contains(keyword))
            .map(|&(keyword, mode)| KeywordMatch { keyword, mode })
    }

    /// Keywords for a mode in declaration order, used to describe modes in prompts
    pub fn keywords_for(&self, mode: Mode) -> Vec<&'static str> {
        self.declared
            .iter()
            .filter(|(_, m)| *m == mode)
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("code", Mode::Lab ; "code is lab")]
    #[test_case("hire", Mode::Architect ; "hire is architect")]
    #[test_case("writing", Mode::Author ; "writing is author")]
    #[test_case("engineering", Mode::Lab ; "engineering is lab")]
    #[test_case("storytelling", Mode::Author ; "storytelling is author")]
    #[test_case("i want to hire you", Mode::Architect ; "sentence with hire")]
    fn test_lookup(input: &str, expected: Mode) {
        let hit = KeywordTable::builtin().lookup(input).unwrap();
        assert_eq!(hit.mode, expected);
    }

    #[test_case("are you available next week?" ; "available")]
    #[test_case("i'm ready when you are" ; "ready")]
    #[test_case("what's your label" ; "label")]
    fn test_common_words_do_not_match(input: &str) {
        assert_eq!(KeywordTable::builtin().lookup(input), None);
    }

    #[test]
    fn test_no_match() {
        assert!(KeywordTable::builtin().lookup("xyzabc").is_none());
        assert!(KeywordTable::builtin().lookup("").is_none());
    }

    #[test]
    fn test_longest_match_wins() {
        let table = KeywordTable::new(&[("lab", Mode::Lab), ("collaborate", Mode::Architect)]);
        let hit = table.lookup("let's collaborate").unwrap();
        assert_eq!(hit.keyword, "collaborate");
        assert_eq!(hit.mode, Mode::Architect);

        let hit = KeywordTable::builtin().lookup("a writer's notes").unwrap();
        assert_eq!(hit.keyword, "writer");
    }

    #[test]
    fn test_keywords_for_keeps_declaration_order() {
        let table = KeywordTable::builtin();
        assert_eq!(table.keywords_for(Mode::Architect)[..3], ["hire", "hiring", "recruit"]);
        assert_eq!(table.keywords_for(Mode::Lab)[0], "code");
    }

    #[test]
    fn test_equal_length_keeps_table_order() {
        let table = KeywordTable::new(&[("tech", Mode::Lab), ("blog", Mode::Author)]);
        let hit = table.lookup("tech blog").unwrap();
        assert_eq!(hit.mode, Mode::Lab);

        let table = KeywordTable::new(&[("blog", Mode::Author), ("tech", Mode::Lab)]);
        assert_eq!(table.lookup("tech blog").unwrap().mode, Mode::Author);
    }

    #[test]
    fn test_builtin_keys_are_lowercase_and_cover_every_mode() {
        let table = KeywordTable::builtin();
        assert!(!table.is_empty());
        for (keyword, _) in BUILTIN_KEYWORDS {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
        for mode in Mode::ALL {
            assert!(!table.keywords_for(mode).is_empty());
        }
    }
}
