use miette::Diagnostic;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum StatusError {
    #[error("unknown status '{value}'")]
    #[diagnostic(
        code(vfile::status::unknown),
        help("Valid statuses are: READY, DOING, DONE, WRITTEN")
    )]
    Unknown { value: String },
}

/// Where a virtual file is in the pipeline.
///
/// The entity itself enforces no ordering between states; any stage may assign any of
/// them. `Written` is the conventional end-of-pipeline marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Ready,
    Doing,
    Done,
    Written,
}
impl Status {
    pub const ALL: [Status; 4] = [Self::Ready, Self::Doing, Self::Done, Self::Written];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Doing => "DOING",
            Self::Done => "DONE",
            Self::Written => "WRITTEN",
        }
    }
}
impl FromStr for Status {
    type Err = StatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| StatusError::Unknown {
                value: value.to_string(),
            })
    }
}
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
