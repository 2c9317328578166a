pub mod entity;
pub mod extract;

pub use entity::{ExtractedEntity, RawEntity};
pub use extract::{
    BatchOutcome, CompositeRecognizer, EntityExtractor, ExtractionError, ExtractionPipeline,
    ExtractionReport, PersistenceError, PipelineError, RecognitionError, RecognitionPattern,
    Recognizer, RuleBasedRecognizer, Statistics,
};
