use lexscan_core::ExtractionPipeline;

/// Application state shared across all requests.
///
/// The pipeline wraps the recognizer behind an `Arc`, so cloning the state
/// per request shares one recognizer initialized at startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ExtractionPipeline,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipeline: ExtractionPipeline::legal(),
        }
    }

    #[must_use]
    pub const fn with_pipeline(pipeline: ExtractionPipeline) -> Self {
        Self { pipeline }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
