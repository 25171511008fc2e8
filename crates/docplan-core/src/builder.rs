//! Structure building
//!
//! Renders outline sections into [`InsertBatch`]es. Nothing here touches the
//! document; the planner flushes the batches it gets back.

use crate::config::PlannerConfig;
use docplan_document::{BuiltInStyle, InsertBatch, InsertPosition};
use docplan_outline::{Level, TocItem};

/// Gray used for placeholder text
pub const PLACEHOLDER_COLOR: &str = "#666666";

/// Which structure a build produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildKind {
    /// Table-of-contents scaffold
    TocScaffold,
    /// Headings with placeholder text
    DocumentStructure,
}

/// Outcome of a successful build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// What was built
    pub kind: BuildKind,
    /// Sections rendered
    pub sections: usize,
    /// Paragraphs inserted
    pub paragraphs: usize,
    /// Sync performed before the build, if any
    pub sync: Option<crate::reconcile::SyncSummary>,
}

/// Renders sections into formatted paragraphs
#[derive(Debug, Clone)]
pub struct StructureBuilder {
    placeholder_text: String,
    toc_title: String,
}

impl StructureBuilder {
    /// Create a builder using the configured texts
    #[must_use]
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            placeholder_text: config.placeholder_text.clone(),
            toc_title: config.toc_title.clone(),
        }
    }

    /// TOC scaffold: a title at the body start, then one indented line per
    /// section appended in id order
    #[must_use]
    pub fn toc_scaffold(&self, sections: &[TocItem]) -> InsertBatch {
        let mut batch = InsertBatch::new();
        batch
            .insert_paragraph(self.toc_title.clone(), InsertPosition::Start)
            .bold(true)
            .size(16.0);

        for item in sorted_by_id(sections) {
            let nesting = item.level.nesting();
            let text = format!("{}{}", "  ".repeat(usize::from(nesting)), item.title);
            let (size, style) = heading_format(item.level);
            batch
                .insert_paragraph(text, InsertPosition::End)
                .left_indent(f32::from(nesting) * 20.0)
                .bold(true)
                .size(size)
                .built_in_style(style);
        }
        batch
    }

    /// Document skeleton: per section, in id order, a heading, a placeholder
    /// paragraph and an empty separator
    #[must_use]
    pub fn document_structure(&self, sections: &[TocItem]) -> InsertBatch {
        let mut batch = InsertBatch::new();
        for item in sorted_by_id(sections) {
            self.queue_section(&mut batch, item);
        }
        batch
    }

    /// Headings missing from the document, appended in the given order
    #[must_use]
    pub fn document_additions(&self, sections: &[TocItem]) -> InsertBatch {
        let mut batch = InsertBatch::new();
        for item in sections {
            self.queue_section(&mut batch, item);
        }
        batch
    }

    fn queue_section(&self, batch: &mut InsertBatch, item: &TocItem) {
        let (size, style) = heading_format(item.level);
        batch
            .insert_paragraph(item.title.clone(), InsertPosition::End)
            .bold(true)
            .size(size)
            .built_in_style(style);
        batch
            .insert_paragraph(self.placeholder_text.clone(), InsertPosition::End)
            .italic(true)
            .size(11.0)
            .color(PLACEHOLDER_COLOR);
        batch.insert_paragraph(String::new(), InsertPosition::End);
    }
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

fn heading_format(level: Level) -> (f32, BuiltInStyle) {
    match level {
        Level::One => (16.0, BuiltInStyle::Heading1),
        Level::Two => (14.0, BuiltInStyle::Heading2),
    }
}

fn sorted_by_id(sections: &[TocItem]) -> Vec<&TocItem> {
    let mut sorted: Vec<&TocItem> = sections.iter().collect();
    sorted.sort_by_key(|item| item.id);
    sorted
}
