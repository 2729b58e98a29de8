use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SheetError {
    #[error("invalid analysis set id: {0}")]
    InvalidAnalysisSetId(String),

    #[error("invalid catalog endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("catalog request failed: {0}")]
    CatalogHttp(String),

    #[error("catalog returned status {status}: {message}")]
    CatalogStatus { status: u16, message: String },

    #[error("failed to parse catalog report: {0}")]
    ReportParse(String),

    #[error("catalog report is missing column: {0}")]
    MissingColumn(String),

    #[error("malformed {kind} identifier: {value}")]
    MalformedIdentifier { kind: &'static str, value: String },

    #[error("failed to write output: {0}")]
    OutputWrite(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Processing,
    Configuration,
}

impl SheetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::CatalogHttp(_) | SheetError::CatalogStatus { .. } => ErrorKind::Transport,
            SheetError::InvalidAnalysisSetId(_)
            | SheetError::InvalidEndpoint(_)
            | SheetError::ConfigRead(_)
            | SheetError::ConfigParse(_) => ErrorKind::Configuration,
            SheetError::ReportParse(_)
            | SheetError::MissingColumn(_)
            | SheetError::MalformedIdentifier { .. }
            | SheetError::OutputWrite(_) => ErrorKind::Processing,
        }
    }
}
