use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::stats::Statistics;
use crate::entity::ExtractedEntity;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Writes the entity sequence as pretty-printed JSON at `path`.
///
/// The file appears atomically from the caller's point of view: content goes
/// to a sibling temp file first and is renamed into place. Overwrites an
/// existing file; does not create parent directories.
pub fn persist_entities(entities: &[ExtractedEntity], path: &Path) -> PersistenceResult<()> {
    write_json(entities, path)?;
    tracing::info!(count = entities.len(), path = %path.display(), "wrote extraction results");
    Ok(())
}

/// Writes the statistics document as pretty-printed JSON at `path`.
pub fn persist_stats(stats: &Statistics, path: &Path) -> PersistenceResult<()> {
    write_json(stats, path)?;
    tracing::info!(path = %path.display(), "wrote extraction statistics");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> PersistenceResult<()> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');

    write_atomic(path, &contents).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entities() -> Vec<ExtractedEntity> {
        vec![
            ExtractedEntity::new("patent law".into(), 26, 36, "practice_area")
                .with_confidence(0.85)
                .with_source("practice_area_rules"),
            ExtractedEntity::new("Texas".into(), 63, 68, "jurisdiction")
                .with_label("US state")
                .with_confidence(0.9),
        ]
    }

    #[test]
    fn entities_round_trip_through_the_results_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let entities = sample_entities();

        persist_entities(&entities, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let back: Vec<ExtractedEntity> = serde_json::from_str(&contents).unwrap();
        assert_eq!(back, entities);
    }

    #[test]
    fn stats_file_is_indented_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let stats = Statistics::aggregate(&sample_entities());

        persist_stats(&stats, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\n  \"total_entities\": 2"));
        let back: Statistics = serde_json::from_str(&contents).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "stale").unwrap();

        persist_entities(&sample_entities(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
    }

    #[test]
    fn missing_parent_directory_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("results.json");

        let err = persist_entities(&sample_entities(), &path).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));

        // the destination must not have appeared
        assert!(!path.exists());
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        persist_entities(&sample_entities(), &path).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["results.json"]);
    }
}
