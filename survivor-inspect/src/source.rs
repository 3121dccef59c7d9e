use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use survivor_game::{EventLogError, ExploreLog, GameStateSource, Item};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode explore log {path}")]
    Log {
        path: PathBuf,
        #[source]
        source: EventLogError,
    },
    #[error("failed to decode items {path}")]
    Items {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `{"seed": 1337, "items": [{"id": 42, "xp": 100}]}`
#[derive(Debug, Default, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    seed: u64,
    items: Vec<Item>,
}

/// Game state read from JSON exports on disk. Absent paths read as empty.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    pub log_path: Option<PathBuf>,
    pub items_path: Option<PathBuf>,
    pub seed_override: Option<u64>,
}

impl FileSource {
    fn read(path: &Path) -> Result<String, SourceError> {
        fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl GameStateSource for FileSource {
    type Error = SourceError;

    fn load_explore_log(&self) -> Result<ExploreLog, Self::Error> {
        let Some(path) = &self.log_path else {
            return Ok(ExploreLog::new());
        };
        let log = ExploreLog::from_json(&Self::read(path)?).map_err(|source| SourceError::Log {
            path: path.clone(),
            source,
        })?;
        log::debug!("loaded {} explore events from {}", log.len(), path.display());
        Ok(log)
    }

    fn load_items(&self) -> Result<(Vec<Item>, u64), Self::Error> {
        let file = match &self.items_path {
            Some(path) => serde_json::from_str::<ItemsFile>(&Self::read(path)?).map_err(
                |source| SourceError::Items {
                    path: path.clone(),
                    source,
                },
            )?,
            None => ItemsFile::default(),
        };
        let seed = self.seed_override.unwrap_or(file.seed);
        log::debug!("loaded {} items, specials seed {seed}", file.items.len());
        Ok((file.items, seed))
    }
}
