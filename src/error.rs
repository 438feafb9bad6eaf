use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MmdError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifierError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Raised when a document is not well-formed or doesn't carry an MMD root element.
///
/// `reason` holds the lower level XML error, if there was one.
#[derive(Error, Debug)]
#[error("{msg}")]
pub struct ParseError {
    pub msg: String,
    #[source]
    pub reason: Option<roxmltree::Error>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into(), reason: None }
    }
}

impl From<roxmltree::Error> for ParseError {
    fn from(e: roxmltree::Error) -> Self {
        Self {
            msg: e.to_string(),
            reason: Some(e),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid identifier {id}: {reason}")]
pub struct InvalidIdentifierError {
    pub id: String,
    pub reason: String,
}

impl InvalidIdentifierError {
    pub fn new(id: &str, reason: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found ({path})")]
    NotFound { path: PathBuf },
    #[error("Failed to decode configuration file ({path}): {message}")]
    Decode { path: String, message: String },
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, MmdError>;
