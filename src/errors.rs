use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// The storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}

#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(vfile::io),
    help("Check that the file exists, its permissions, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }

    pub fn read(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(FileOperation::Read, path.into(), error)
    }

    pub fn write(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(FileOperation::Write, path.into(), error)
    }

    pub fn mkdir(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::new(FileOperation::Mkdir, path.into(), error)
    }
}

#[derive(Debug, Error, Diagnostic)]
#[error("Unable to parse TOML in '{path}'")]
#[diagnostic(
    code(vfile::parse),
    help("Extension lists are either arrays of strings or comma-joined strings")
)]
pub struct ParseError {
    pub path: PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn new(path: impl Into<PathBuf>, error: toml::de::Error) -> Self {
        Self {
            path: path.into(),
            source: error,
        }
    }
}
