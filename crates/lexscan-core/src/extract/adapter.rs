use std::sync::Arc;

use thiserror::Error;

use super::recognizer::{CompositeRecognizer, RecognitionError, Recognizer};
use crate::entity::{ExtractedEntity, RawEntity};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction failed: {0}")]
    Recognition(#[from] RecognitionError),
    #[error(
        "Recognizer output inconsistent with source text: \
         span {start}..{end} does not contain {text:?}"
    )]
    Integrity {
        text: String,
        start: usize,
        end: usize,
    },
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Type assigned when a recognizer reports an entity without classifying it.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Wraps a [`Recognizer`] and normalizes its raw output into the canonical
/// [`ExtractedEntity`] shape.
///
/// The recognizer is held behind an `Arc` and accessed read-only, so one
/// extractor can serve concurrent requests. Stateless otherwise.
#[derive(Clone)]
pub struct EntityExtractor {
    recognizer: Arc<dyn Recognizer>,
}

impl EntityExtractor {
    #[must_use]
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    /// Extractor backed by the built-in legal rule sets.
    #[must_use]
    pub fn legal() -> Self {
        Self::new(Arc::new(CompositeRecognizer::legal()))
    }

    /// Runs recognition over `text` and returns validated canonical entities.
    ///
    /// Every returned span is checked against the source text; a recognizer
    /// that reports a span whose substring differs from its `text` field is a
    /// defect and fails the whole call rather than being silently corrected.
    pub async fn extract(&self, text: &str) -> ExtractionResult<Vec<ExtractedEntity>> {
        tracing::debug!(len = text.len(), "extracting entities");

        let raw = self.recognizer.recognize(text).await?;
        let mut entities = Vec::with_capacity(raw.len());
        for raw_entity in raw {
            entities.push(canonicalize(text, raw_entity)?);
        }

        tracing::debug!(count = entities.len(), "extraction complete");
        Ok(entities)
    }
}

fn canonicalize(source_text: &str, raw: RawEntity) -> ExtractionResult<ExtractedEntity> {
    let valid_span = raw.start < raw.end
        && source_text.get(raw.start..raw.end) == Some(raw.text.as_str());
    if !valid_span {
        return Err(ExtractionError::Integrity {
            text: raw.text,
            start: raw.start,
            end: raw.end,
        });
    }

    let entity_type = raw
        .entity_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

    let mut entity = ExtractedEntity::new(raw.text, raw.start, raw.end, entity_type);
    if let Some(label) = raw.label.filter(|l| !l.is_empty()) {
        entity = entity.with_label(label);
    }
    if let Some(confidence) = raw.confidence {
        entity = entity.with_confidence(confidence);
    }
    if let Some(source) = raw.source.filter(|s| !s.is_empty()) {
        entity = entity.with_source(source);
    }

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::recognizer::RecognitionResult;

    /// Recognizer that replays a fixed answer, for exercising the adapter
    /// without any pattern matching.
    struct StubRecognizer {
        entities: Vec<RawEntity>,
    }

    #[async_trait::async_trait]
    impl Recognizer for StubRecognizer {
        fn name(&self) -> &str {
            "stub"
        }

        async fn recognize(&self, _text: &str) -> RecognitionResult<Vec<RawEntity>> {
            Ok(self.entities.clone())
        }
    }

    struct FailingRecognizer;

    #[async_trait::async_trait]
    impl Recognizer for FailingRecognizer {
        fn name(&self) -> &str {
            "failing"
        }

        async fn recognize(&self, _text: &str) -> RecognitionResult<Vec<RawEntity>> {
            Err(RecognitionError::Failed("model crashed".into()))
        }
    }

    #[tokio::test]
    async fn empty_input_yields_empty_sequence() {
        let extractor = EntityExtractor::legal();
        let entities = extractor.extract("").await.unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn spans_match_source_text() {
        let extractor = EntityExtractor::legal();
        let text = "The lawyer specializes in patent law and trademark disputes in Texas.";

        let entities = extractor.extract(text).await.unwrap();

        assert!(!entities.is_empty());
        for entity in &entities {
            assert!(entity.start < entity.end);
            assert!(entity.end <= text.len());
            assert_eq!(&text[entity.start..entity.end], entity.text);
        }
    }

    #[tokio::test]
    async fn missing_type_falls_back_to_unknown() {
        let stub = StubRecognizer {
            entities: vec![RawEntity::new("abc".into(), 0, 3)],
        };
        let extractor = EntityExtractor::new(Arc::new(stub));

        let entities = extractor.extract("abc def").await.unwrap();

        assert_eq!(entities[0].entity_type, UNKNOWN_TYPE);
        assert_eq!(entities[0].label, None);
    }

    #[tokio::test]
    async fn mismatched_span_is_an_integrity_error() {
        let stub = StubRecognizer {
            entities: vec![RawEntity::new("xyz".into(), 0, 3).with_type("practice_area")],
        };
        let extractor = EntityExtractor::new(Arc::new(stub));

        let err = extractor.extract("abc def").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Integrity { .. }));
    }

    #[tokio::test]
    async fn out_of_bounds_span_is_an_integrity_error() {
        let stub = StubRecognizer {
            entities: vec![RawEntity::new("def".into(), 4, 99).with_type("party_role")],
        };
        let extractor = EntityExtractor::new(Arc::new(stub));

        let err = extractor.extract("abc def").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Integrity { .. }));
    }

    #[tokio::test]
    async fn recognizer_failure_propagates() {
        let extractor = EntityExtractor::new(Arc::new(FailingRecognizer));

        let err = extractor.extract("anything").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Recognition(_)));
    }

    #[tokio::test]
    async fn extraction_is_deterministic() {
        let text = "The plaintiff retained counsel in Delaware for securities litigation.";
        let extractor = EntityExtractor::legal();

        let first = extractor.extract(text).await.unwrap();
        let second = extractor.extract(text).await.unwrap();

        assert_eq!(first, second);
    }
}
