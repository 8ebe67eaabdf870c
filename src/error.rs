use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, XlsxToJsonError>;

/// Every way a conversion run can fail. All of them are fatal.
#[derive(Error, Debug)]
pub enum XlsxToJsonError {
    #[error("config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A required key is missing or is not a string.
    #[error("invalid config: {0}")]
    ConfigValidation(String),

    #[error("failed to open workbook {}: {source}", path.display())]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("worksheet '{sheet}' not found in {}", path.display())]
    WorksheetNotFound { path: PathBuf, sheet: String },

    /// Fewer than two rows: a label row and at least one data row are needed.
    #[error("insufficient data in worksheet '{sheet}': found {rows} row(s), need a label row and a data row")]
    InsufficientData { sheet: String, rows: usize },

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to create output file {}: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
