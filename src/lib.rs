pub mod display;
pub mod driver;
pub mod engine;
pub mod error;
pub mod reader;
pub mod text_analyzer;

// Re-export main types for convenient access
pub use engine::{EngineState, Frame, PlaybackView, RsvpEngine, DEFAULT_WPM};
pub use error::{AnalysisError, CommandError, EngineError};

// Re-export the analyzer's free functions
pub use text_analyzer::{
    analyze_text, get_focus_letter_index, segment, split_into_sentences, summarize,
    Sentence, SentenceAnalysis, TextSummary, Word,
};

// Re-export host-side types
pub use display::{RecordingDisplay, TerminalDisplay, WordDisplay};
pub use driver::{PlaybackCommand, PlaybackConfig, PlaybackDriver, PlaybackReport};
