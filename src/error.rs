use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverdueError {
    #[error("Config directory not found at {0}. Run 'overdue init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to fetch overdue bills: {0}")]
    Fetch(String),

    #[error("Failed to decode bills from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bill '{0}' not found")]
    BillNotFound(String),

    #[error("Invalid bucket '{0}'. Use 1-30, 31-60, 61-90 or 90+.")]
    InvalidBucket(String),

    #[error("Invalid stage '{0}'. Use first-notice, second-notice or protest.")]
    InvalidStage(String),

    #[error("Invalid sort field '{0}'. Use amount, due-date or days-overdue.")]
    InvalidSortField(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OverdueError>;
