use serde::{Deserialize, Serialize};

/// Entity as reported by a recognizer, before validation.
///
/// Only the span is guaranteed; classification fields are whatever the
/// recognizer chose to provide. The extractor adapter turns this into the
/// canonical [`ExtractedEntity`] shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntity {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RawEntity {
    #[must_use]
    pub const fn new(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            start,
            end,
            entity_type: None,
            label: None,
            confidence: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Canonical entity shape guaranteed to every consumer.
///
/// `start`/`end` are half-open byte offsets into the source text the entity
/// was extracted from, and `text` is exactly the substring at those offsets.
/// The adapter enforces both before one of these is ever constructed.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ExtractedEntity {
    #[must_use]
    pub fn new(text: String, start: usize, end: usize, entity_type: impl Into<String>) -> Self {
        Self {
            text,
            start,
            end,
            entity_type: entity_type.into(),
            label: None,
            confidence: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
