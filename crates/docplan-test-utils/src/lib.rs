//! Testing utilities for the docplan workspace
//!
//! Shared fakes and fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use docplan_document::{
    DocumentGateway, FlushReport, GatewayError, InsertBatch, InsertPosition, Paragraph,
    QueuedParagraph,
};
use docplan_outline::{Level, OutlineItem, OutlineModel, PlanSnapshot, SectionId};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory document host
#[derive(Debug, Default)]
pub struct FakeDocument {
    paragraphs: Mutex<Vec<Paragraph>>,
    inserted: Mutex<Vec<QueuedParagraph>>,
    fail_next_flush: Mutex<Option<usize>>,
    unavailable: AtomicBool,
    fail_reads: AtomicBool,
    flushes: AtomicUsize,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let doc = Self::new();
        *doc.paragraphs.lock() = paragraphs;
        doc
    }

    /// Headings only, each followed by one body paragraph
    pub fn with_headings(headings: &[(&str, u8)]) -> Self {
        let mut paragraphs = Vec::new();
        for (text, level) in headings {
            paragraphs.push(Paragraph::new(*text, format!("Heading{level}")));
            paragraphs.push(Paragraph::body(format!("Text under {text}.")));
        }
        Self::with_paragraphs(paragraphs)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make the next flush apply `applied` paragraphs and then fail
    pub fn fail_next_flush(&self, applied: usize) {
        *self.fail_next_flush.lock() = Some(applied);
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    pub fn paragraphs(&self) -> Vec<Paragraph> {
        self.paragraphs.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.paragraphs.lock().iter().map(|p| p.text.clone()).collect()
    }

    /// Every paragraph applied through a flush, in application order
    pub fn inserted(&self) -> Vec<QueuedParagraph> {
        self.inserted.lock().clone()
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::HostUnavailable("fake host offline".to_string()));
        }
        Ok(())
    }

    fn apply(&self, queued: QueuedParagraph) {
        let style = queued
            .format
            .built_in_style
            .map_or("Normal", |s| s.style_name());
        let paragraph = Paragraph::new(queued.text.clone(), style);

        let mut body = self.paragraphs.lock();
        match queued.position {
            InsertPosition::Start => body.insert(0, paragraph),
            InsertPosition::End => body.push(paragraph),
        }
        self.inserted.lock().push(queued);
    }
}

#[async_trait]
impl DocumentGateway for FakeDocument {
    async fn load_paragraphs(&self) -> Result<Vec<Paragraph>, GatewayError> {
        self.check_available()?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Read("fake read failure".to_string()));
        }
        Ok(self.paragraphs())
    }

    async fn is_body_empty(&self) -> Result<bool, GatewayError> {
        self.check_available()?;
        Ok(self.paragraphs.lock().iter().all(|p| p.text.trim().is_empty()))
    }

    async fn flush(&self, batch: InsertBatch) -> Result<FlushReport, GatewayError> {
        self.check_available()?;
        self.flushes.fetch_add(1, Ordering::SeqCst);

        let queued = batch.len();
        let failure = self.fail_next_flush.lock().take();
        let limit = failure.map_or(queued, |applied| applied.min(queued));

        for paragraph in batch.into_paragraphs().into_iter().take(limit) {
            self.apply(paragraph);
        }

        match failure {
            Some(_) => Err(GatewayError::sync("fake flush failure", queued, limit)),
            None => Ok(FlushReport { inserted: queued }),
        }
    }
}

/// Outline containing exactly the given sections in the given order
pub fn outline_of(sections: &[(u32, &str, Level)]) -> OutlineModel {
    let planning_items: Vec<OutlineItem> = sections
        .iter()
        .map(|(id, title, level)| OutlineItem::new(SectionId(*id), *title, *level))
        .collect();
    let snapshot = PlanSnapshot {
        toc_items: planning_items.iter().map(OutlineItem::toc_item).collect(),
        planning_items,
    };
    OutlineModel::from_snapshot(snapshot).unwrap()
}

/// Titles of an outline in plan order
pub fn titles(model: &OutlineModel) -> Vec<String> {
    model.items().iter().map(|i| i.title.clone()).collect()
}
