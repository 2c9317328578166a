use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::adapter::{EntityExtractor, ExtractionError};
use super::sink::{persist_entities, persist_stats, PersistenceError};
use super::stats::Statistics;
use crate::entity::ExtractedEntity;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read input {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fallback document for batch runs invoked without an input file.
pub const SAMPLE_TEXT: &str = "\
The intellectual property lawyer specializes in patent law and copyright \
infringement cases. She also handles trademark disputes and trade secret \
litigation. Recently she has been working on a high-profile case involving \
software licensing and open source compliance in Paris, Texas.";

/// One extraction with its derived statistics. Both are computed from a
/// single recognizer call, so they are always consistent with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub entities: Vec<ExtractedEntity>,
    pub statistics: Statistics,
}

/// What a batch run produced, for the console summary.
#[derive(Debug)]
pub struct BatchOutcome {
    pub report: ExtractionReport,
    pub results_path: PathBuf,
    pub stats_path: PathBuf,
}

/// Sequences adapter, aggregator, and sink for both entry points.
///
/// The interactive boundary uses [`run`](Self::run) and
/// [`run_with_stats`](Self::run_with_stats); the batch boundary uses
/// [`run_batch_file`](Self::run_batch_file). Each run either completes or
/// fails; there is no checkpointing and nothing is retried here.
#[derive(Clone)]
pub struct ExtractionPipeline {
    extractor: EntityExtractor,
}

impl ExtractionPipeline {
    #[must_use]
    pub const fn new(extractor: EntityExtractor) -> Self {
        Self { extractor }
    }

    /// Pipeline over the built-in legal recognizers.
    #[must_use]
    pub fn legal() -> Self {
        Self::new(EntityExtractor::legal())
    }

    /// Interactive: extract only.
    pub async fn run(&self, text: &str) -> PipelineResult<Vec<ExtractedEntity>> {
        Ok(self.extractor.extract(text).await?)
    }

    /// Interactive: extract once and aggregate over the same result.
    pub async fn run_with_stats(&self, text: &str) -> PipelineResult<ExtractionReport> {
        let entities = self.extractor.extract(text).await?;
        let statistics = Statistics::aggregate(&entities);
        Ok(ExtractionReport {
            entities,
            statistics,
        })
    }

    /// Batch: one extraction, persisted to both output files.
    ///
    /// The results write and the statistics write are independent; if the
    /// second fails the first is not rolled back.
    pub async fn run_batch(
        &self,
        text: &str,
        results_path: &Path,
        stats_path: &Path,
    ) -> PipelineResult<BatchOutcome> {
        let report = self.run_with_stats(text).await?;

        persist_entities(&report.entities, results_path)?;
        persist_stats(&report.statistics, stats_path)?;

        Ok(BatchOutcome {
            report,
            results_path: results_path.to_path_buf(),
            stats_path: stats_path.to_path_buf(),
        })
    }

    /// Batch from a file, or from [`SAMPLE_TEXT`] when no input is given.
    pub async fn run_batch_file(
        &self,
        input: Option<&Path>,
        results_path: &Path,
        stats_path: &Path,
    ) -> PipelineResult<BatchOutcome> {
        let text = match input {
            Some(path) => {
                std::fs::read_to_string(path).map_err(|source| PipelineError::Input {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => {
                tracing::info!("no input file given, using built-in sample text");
                SAMPLE_TEXT.to_string()
            }
        };

        self.run_batch(&text, results_path, stats_path).await
    }
}
