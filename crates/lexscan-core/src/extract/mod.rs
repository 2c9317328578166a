mod adapter;
mod pipeline;
mod recognizer;
mod sink;
mod stats;

pub use adapter::{EntityExtractor, ExtractionError, ExtractionResult, UNKNOWN_TYPE};
pub use pipeline::{
    BatchOutcome, ExtractionPipeline, ExtractionReport, PipelineError, PipelineResult,
    SAMPLE_TEXT,
};
pub use recognizer::{
    CompositeRecognizer, RecognitionError, RecognitionPattern, RecognitionResult, Recognizer,
    RuleBasedRecognizer,
};
pub use sink::{persist_entities, persist_stats, PersistenceError, PersistenceResult};
pub use stats::Statistics;
