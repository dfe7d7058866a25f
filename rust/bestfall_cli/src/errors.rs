use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error reading file {}: {source}", display_path(.path))]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error interpreting the config: {0}")]
    Config(String),

    #[error("Error loading the map: {0}")]
    GridLoad(#[from] bestfall::GridLoadError),

    #[error("Search failed: {0}")]
    Search(#[from] bestfall::BestFallError),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io {
            source: e,
            path: None,
        }
    }
}
