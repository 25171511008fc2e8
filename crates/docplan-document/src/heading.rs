//! Heading detection
//!
//! One [`HeadingRule`] decides which paragraphs are headings. The same rule
//! feeds both plan/document reconciliation and section statistics.

use crate::paragraph::Paragraph;
use serde::{Deserialize, Serialize};

/// Which paragraph styles count as headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingRule {
    /// `Heading1` / `Title` are level 1, `Heading2` is level 2; nothing else
    #[default]
    Strict,
    /// Any style containing "heading", or `Title`; depth taken from the
    /// trailing number of the style name (1 when absent)
    Coarse,
}

impl HeadingRule {
    /// Heading depth for a style name, `None` when it is body text
    ///
    /// Whitespace and case in the style name are ignored, so "Heading 1"
    /// and "heading1" are the same style.
    #[must_use]
    pub fn classify(self, style_name: &str) -> Option<u8> {
        let style: String = style_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        if style == "title" {
            return Some(1);
        }

        match self {
            HeadingRule::Strict => match style.as_str() {
                "heading1" => Some(1),
                "heading2" => Some(2),
                _ => None,
            },
            HeadingRule::Coarse => {
                let at = style.find("heading")?;
                let digits: String = style[at + "heading".len()..]
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .collect();
                Some(digits.parse().unwrap_or(1))
            }
        }
    }
}

/// A heading found in the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeading {
    /// Trimmed heading text
    pub text: String,
    /// Heading depth (1 = top level)
    pub level: u8,
    /// Ordinal of the paragraph in the body
    pub index: usize,
}

impl DocumentHeading {
    /// Create a heading
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, level: u8, index: usize) -> Self {
        Self {
            text: text.into(),
            level,
            index,
        }
    }
}

/// Scan paragraphs for headings under `rule`
#[must_use]
pub fn detect_headings(paragraphs: &[Paragraph], rule: HeadingRule) -> Vec<DocumentHeading> {
    paragraphs
        .iter()
        .enumerate()
        .filter_map(|(index, p)| {
            rule.classify(&p.style_name)
                .map(|level| DocumentHeading::new(p.text.trim(), level, index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strict_rule_levels() {
        let rule = HeadingRule::Strict;
        assert_eq!(rule.classify("Heading1"), Some(1));
        assert_eq!(rule.classify("Heading 2"), Some(2));
        assert_eq!(rule.classify("Title"), Some(1));
        assert_eq!(rule.classify("Heading3"), None);
        assert_eq!(rule.classify("Normal"), None);
    }

    #[test]
    fn coarse_rule_levels() {
        let rule = HeadingRule::Coarse;
        assert_eq!(rule.classify("Heading 3"), Some(3));
        assert_eq!(rule.classify("TOC Heading"), Some(1));
        assert_eq!(rule.classify("Title"), Some(1));
        assert_eq!(rule.classify("List Paragraph"), None);
    }

    #[test]
    fn detect_records_trimmed_text_and_index() {
        let paragraphs = vec![
            Paragraph::new("  Introduction ", "Heading1"),
            Paragraph::body("Some text."),
            Paragraph::new("Background", "Heading2"),
            Paragraph::new("Detail", "Heading3"),
        ];

        let headings = detect_headings(&paragraphs, HeadingRule::Strict);
        assert_eq!(
            headings,
            vec![
                DocumentHeading::new("Introduction", 1, 0),
                DocumentHeading::new("Background", 2, 2),
            ]
        );

        let coarse = detect_headings(&paragraphs, HeadingRule::Coarse);
        assert_eq!(coarse.len(), 3);
        assert_eq!(coarse[2].level, 3);
    }
}
