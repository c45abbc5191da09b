// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown location type: {0}")]
    UnknownLocationType(String),

    #[error("Invalid page: {0} (pages are 1-based)")]
    InvalidPage(u32),
}

pub type Result<T> = std::result::Result<T, DomainError>;
