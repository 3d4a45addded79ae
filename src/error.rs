use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sheet not found: '{0}'")]
    SheetNotFound(String),

    #[error("No sheet name contains '{0}'")]
    NoSheetMatching(String),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LeadsheetError>;
