use thiserror::Error;

pub type EncoderResult<T> = Result<T, EncoderError>;

/// What was wrong with an annotation header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderProblem {
    #[error("is missing")]
    Missing,
    #[error("is not an integer: '{0}'")]
    NotAnInteger(String),
    #[error("is out of range: '{0}'")]
    OutOfRange(String),
}

/// Errors returned by [`crate::FrameEncoder::translate`]. Both kinds are
/// terminal for the object being translated: nothing is emitted and the
/// encoder state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncoderError {
    #[error("Malformed header `{header}`: {problem}")]
    MalformedInput {
        header: &'static str,
        problem: HeaderProblem,
    },
    #[error("Unsupported message type: {0}")]
    UnsupportedInput(String),
}

impl EncoderError {
    pub(crate) fn missing(header: &'static str) -> Self {
        Self::MalformedInput {
            header,
            problem: HeaderProblem::Missing,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Unsupported SPDY version: {0}")]
    Unsupported(String),
}
