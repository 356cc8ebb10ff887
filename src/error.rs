//! Error types for text analysis and playback.
//!
//! Every variant is a synchronous validation rejection. An operation that
//! returns one of these leaves the engine exactly as it was before the call.

use thiserror::Error;

use crate::engine::EngineState;

/// Errors raised by the text analyzer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Focus-letter computation was asked for an empty word
    #[error("cannot compute a focus letter for an empty word")]
    InvalidWord,

    /// Custom boundary rules did not compile into a matcher
    #[error("invalid sentence boundary rules: {0}")]
    Boundary(String),
}

/// Errors raised by the playback engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `load` produced no words to play
    #[error("text contains no words to play")]
    EmptyInput,

    /// Words-per-minute must be a finite number above zero
    #[error("invalid speed {0} wpm: must be a finite number greater than zero")]
    InvalidSpeed(f64),

    /// The operation is not allowed in the engine's current state
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Errors from parsing an interactive control line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid argument for {command}: {argument}")]
    InvalidArgument {
        command: &'static str,
        argument: String,
    },
}
