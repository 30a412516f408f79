//! Loading of train data

use std::path::Path;
use std::{fs, io};

use thiserror::Error;
use train_reservation_core::Trains;

/// Trains available when no other data is configured
pub const DEFAULT_TRAINS: &str = include_str!("data/trains.json");

/// Failure to load train data
#[derive(Debug, Error)]
pub enum DataError {
    /// The train data file could not be read
    #[error("could not read train data: {0}")]
    Read(#[from] io::Error),
    /// The train data is not a valid JSON encoded registry
    #[error("could not decode train data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode JSON encoded trains
pub fn parse(json: &str) -> Result<Trains, DataError> {
    Ok(serde_json::from_str(json)?)
}

/// Read the train data stored in the file at `path`
pub fn read(path: &Path) -> Result<String, DataError> {
    tracing::debug!(path = %path.display(), "reading train data");
    Ok(fs::read_to_string(path)?)
}
