//! Error handling for chain construction and queries

use std::io;

/// Unified error to report malformed input: unparsable parameter fields, invalid symbol names,
/// mismatched vector lengths and wrong frame indices.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    InvalidSymbol(String),
    InvalidLength { expected: usize, found: usize },
    FrameOrder { from: usize, to: usize, frames: usize },
    EmptyChain,
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParameterError::InvalidSymbol(ref name) =>
                write!(f, "Invalid symbol name: '{}'", name),
            ParameterError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ParameterError::FrameOrder { from, to, frames } =>
                write!(f, "Frame order: need from < to <= {}, got from {} to {}", frames, from, to),
            ParameterError::EmptyChain =>
                write!(f, "The chain must have at least one link"),
        }
    }
}

impl std::error::Error for ParameterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            ParameterError::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}
