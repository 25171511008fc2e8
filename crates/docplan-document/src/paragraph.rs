//! Paragraph model and insertion batches
//!
//! Mutations are never sent to the host one by one. Callers queue
//! paragraphs into an [`InsertBatch`], set formatting through the returned
//! [`ParagraphHandle`], and hand the whole batch to
//! [`DocumentGateway::flush`](crate::DocumentGateway::flush) once.

use serde::{Deserialize, Serialize};

/// A paragraph as read from the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text
    pub text: String,
    /// Host style name (e.g. "Heading1", "Normal")
    pub style_name: String,
}

impl Paragraph {
    /// Create a paragraph
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_name: style_name.into(),
        }
    }

    /// Body text in the default style
    #[inline]
    #[must_use]
    pub fn body(text: impl Into<String>) -> Self {
        Self::new(text, "Normal")
    }
}

/// Where a queued paragraph lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertPosition {
    /// Before the first paragraph of the body
    Start,
    /// After the last paragraph of the body
    End,
}

/// Host built-in paragraph styles the planner maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltInStyle {
    /// First-level heading
    Heading1,
    /// Second-level heading
    Heading2,
}

impl BuiltInStyle {
    /// Host style name
    #[inline]
    #[must_use]
    pub fn style_name(self) -> &'static str {
        match self {
            BuiltInStyle::Heading1 => "Heading1",
            BuiltInStyle::Heading2 => "Heading2",
        }
    }
}

/// Formatting applied to an inserted paragraph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParagraphFormat {
    /// Bold font
    pub bold: bool,
    /// Italic font
    pub italic: bool,
    /// Font size in points
    pub size: Option<f32>,
    /// Font color as `#rrggbb`
    pub color: Option<String>,
    /// Left indent in layout units
    pub left_indent: f32,
    /// Built-in style, when the host supports it
    pub built_in_style: Option<BuiltInStyle>,
}

/// One queued insertion
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedParagraph {
    /// Paragraph text
    pub text: String,
    /// Insertion point
    pub position: InsertPosition,
    /// Formatting to apply
    pub format: ParagraphFormat,
}

/// Handle for setting the formatting of a queued paragraph
#[derive(Debug)]
pub struct ParagraphHandle<'a> {
    paragraph: &'a mut QueuedParagraph,
}

impl ParagraphHandle<'_> {
    /// Set bold
    #[inline]
    pub fn bold(self, bold: bool) -> Self {
        self.paragraph.format.bold = bold;
        self
    }

    /// Set italic
    #[inline]
    pub fn italic(self, italic: bool) -> Self {
        self.paragraph.format.italic = italic;
        self
    }

    /// Set font size in points
    #[inline]
    pub fn size(self, points: f32) -> Self {
        self.paragraph.format.size = Some(points);
        self
    }

    /// Set font color
    #[inline]
    pub fn color(self, color: impl Into<String>) -> Self {
        self.paragraph.format.color = Some(color.into());
        self
    }

    /// Set left indent
    #[inline]
    pub fn left_indent(self, units: f32) -> Self {
        self.paragraph.format.left_indent = units;
        self
    }

    /// Map onto a built-in style
    #[inline]
    pub fn built_in_style(self, style: BuiltInStyle) -> Self {
        self.paragraph.format.built_in_style = Some(style);
        self
    }
}

/// Ordered set of insertions flushed to the host in one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertBatch {
    queued: Vec<QueuedParagraph>,
}

impl InsertBatch {
    /// Create an empty batch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a paragraph and return a handle for its formatting
    pub fn insert_paragraph(&mut self, text: impl Into<String>, position: InsertPosition) -> ParagraphHandle<'_> {
        self.queued.push(QueuedParagraph {
            text: text.into(),
            position,
            format: ParagraphFormat::default(),
        });
        let last = self.queued.len() - 1;
        ParagraphHandle {
            paragraph: &mut self.queued[last],
        }
    }

    /// Queued insertions in program order
    #[inline]
    #[must_use]
    pub fn paragraphs(&self) -> &[QueuedParagraph] {
        &self.queued
    }

    /// Number of queued insertions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Whether nothing is queued
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Consume the batch
    #[must_use]
    pub fn into_paragraphs(self) -> Vec<QueuedParagraph> {
        self.queued
    }
}
