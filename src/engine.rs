//! Playback state machine.
//!
//! ```text
//! Idle --load--> Ready --start--> Running --pause--> Paused
//!                  ^                 |  ^--start------'
//!                  |               tick (last word)
//!                  |                 v
//!                  '----restart---- Finished
//! ```
//!
//! The engine never schedules anything itself. A host calls [`RsvpEngine::tick`]
//! at [`RsvpEngine::tick_interval`] and renders the returned [`Frame`].

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::error::EngineError;
use crate::text_analyzer::{playback_duration, segment, Sentence, Word};

/// Words per minute used until `set_speed` is called
pub const DEFAULT_WPM: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    /// No text loaded
    Idle,
    /// Text loaded, not playing
    Ready,
    Running,
    /// Playback suspended, position kept
    Paused,
    /// Every word has been shown
    Finished,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Idle => "idle",
            EngineState::Ready => "ready",
            EngineState::Running => "running",
            EngineState::Paused => "paused",
            EngineState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// One word handed to the display, with its place in the text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub word: &'a Word,
    pub focus_index: usize,
    /// Number of words shown so far, this one included
    pub position: usize,
    pub total: usize,
}

impl<'a> Frame<'a> {
    fn new(word: &'a Word, position: usize, total: usize) -> Self {
        Self {
            word,
            focus_index: word.focus_index,
            position,
            total,
        }
    }

    pub fn progress(&self) -> f64 {
        fraction(self.position, self.total)
    }
}

/// Read-only view of playback that display code is allowed to hold
pub trait PlaybackView {
    fn state(&self) -> EngineState;
    fn position(&self) -> usize;
    fn total_words(&self) -> usize;
    fn wpm(&self) -> f64;
    fn progress(&self) -> f64;
    /// Last word shown, if any
    fn current_word(&self) -> Option<&Word>;
}

/// Mutable playback data owned by the engine
#[derive(Debug, Clone)]
pub struct PlaybackState {
    sentences: Vec<Sentence>,
    words: Vec<Word>,
    /// Index into `words` of the first word of each sentence
    sentence_starts: Vec<usize>,
    position: usize,
    wpm: f64,
    state: EngineState,
}

impl PlaybackState {
    fn empty(wpm: f64) -> Self {
        Self {
            sentences: Vec::new(),
            words: Vec::new(),
            sentence_starts: Vec::new(),
            position: 0,
            wpm,
            state: EngineState::Idle,
        }
    }

    fn sentence_of(&self, word_index: usize) -> usize {
        self.sentence_starts
            .partition_point(|&start| start <= word_index)
            .saturating_sub(1)
    }
}

/// RSVP playback engine
#[derive(Debug, Clone)]
pub struct RsvpEngine {
    playback: PlaybackState,
}

impl Default for RsvpEngine {
    fn default() -> Self {
        Self {
            playback: PlaybackState::empty(DEFAULT_WPM),
        }
    }
}

impl RsvpEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a starting speed other than [`DEFAULT_WPM`]
    pub fn with_speed(wpm: f64) -> Result<Self, EngineError> {
        let mut engine = Self::default();
        engine.set_speed(wpm)?;
        Ok(engine)
    }

    /// Analyze `text` and replace whatever was loaded. Position resets to 0
    /// and the engine becomes `Ready`.
    ///
    /// Returns the number of words loaded. Text without words is rejected
    /// with [`EngineError::EmptyInput`] and the previous text stays loaded.
    pub fn load(&mut self, text: &str) -> Result<usize, EngineError> {
        let sentences = segment(text)?;

        let mut words = Vec::new();
        let mut sentence_starts = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            sentence_starts.push(words.len());
            words.extend(sentence.words.iter().cloned());
        }

        if words.is_empty() {
            debug!(state = %self.playback.state, "Rejected load of text without words");
            return Err(EngineError::EmptyInput);
        }

        info!(
            sentences = sentences.len(),
            words = words.len(),
            "Loaded text for playback"
        );

        let total = words.len();
        self.playback.sentences = sentences;
        self.playback.words = words;
        self.playback.sentence_starts = sentence_starts;
        self.playback.position = 0;
        self.transition(EngineState::Ready);
        Ok(total)
    }

    /// `Ready` or `Paused` to `Running`
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.playback.state {
            EngineState::Ready | EngineState::Paused => {
                self.transition(EngineState::Running);
                Ok(())
            }
            state => Err(EngineError::InvalidState {
                operation: "start",
                state,
            }),
        }
    }

    /// `Running` to `Paused`
    pub fn pause(&mut self) -> Result<(), EngineError> {
        match self.playback.state {
            EngineState::Running => {
                self.transition(EngineState::Paused);
                Ok(())
            }
            state => Err(EngineError::InvalidState {
                operation: "pause",
                state,
            }),
        }
    }

    /// Show the next word. Only advances while `Running`; in every other
    /// state this is a no-op returning `None`.
    pub fn tick(&mut self) -> Option<Frame<'_>> {
        if self.playback.state != EngineState::Running {
            trace!(state = %self.playback.state, "Ignored tick");
            return None;
        }

        let total = self.playback.words.len();
        let index = self.playback.position;
        if index >= total {
            self.transition(EngineState::Finished);
            return None;
        }

        self.playback.position += 1;
        if self.playback.position == total {
            self.transition(EngineState::Finished);
        }

        let position = self.playback.position;
        Some(Frame::new(&self.playback.words[index], position, total))
    }

    /// Change words-per-minute. Takes effect from the next scheduled tick.
    pub fn set_speed(&mut self, wpm: f64) -> Result<(), EngineError> {
        if !wpm.is_finite() || wpm <= 0.0 {
            return Err(EngineError::InvalidSpeed(wpm));
        }
        debug!(from = self.playback.wpm, to = wpm, "Changed playback speed");
        self.playback.wpm = wpm;
        Ok(())
    }

    /// Back to the first word, not running. Without loaded text the engine
    /// stays `Idle`.
    pub fn restart(&mut self) {
        self.playback.position = 0;
        if self.playback.state != EngineState::Idle {
            self.transition(EngineState::Ready);
        }
    }

    /// Step back `count` words. Allowed while stopped (`Ready`, `Paused`,
    /// `Finished`); a finished engine becomes `Paused`.
    pub fn rewind(&mut self, count: usize) -> Result<(), EngineError> {
        self.ensure_stopped("rewind")?;
        let target = self.playback.position.saturating_sub(count);
        self.seek(target);
        Ok(())
    }

    /// Jump back to the start of the sentence holding the last shown word, or
    /// to the previous sentence when that word already opens its sentence.
    pub fn rewind_sentence(&mut self) -> Result<(), EngineError> {
        self.ensure_stopped("rewind sentence")?;
        let Some(last_shown) = self.playback.position.checked_sub(1) else {
            return Ok(());
        };

        let sentence = self.playback.sentence_of(last_shown);
        let start = self.playback.sentence_starts[sentence];
        let target = if start == last_shown && sentence > 0 {
            self.playback.sentence_starts[sentence - 1]
        } else {
            start
        };
        self.seek(target);
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.playback.state
    }

    pub fn position(&self) -> usize {
        self.playback.position
    }

    pub fn total_words(&self) -> usize {
        self.playback.words.len()
    }

    pub fn wpm(&self) -> f64 {
        self.playback.wpm
    }

    /// Fraction of words shown, in `[0, 1]`; 0 when nothing is loaded
    pub fn progress(&self) -> f64 {
        fraction(self.playback.position, self.playback.words.len())
    }

    /// Delay between ticks at the current speed: `60000 / wpm` milliseconds
    pub fn tick_interval(&self) -> Duration {
        playback_duration(1, self.playback.wpm)
    }

    /// Time left to show the remaining words at the current speed
    pub fn remaining_duration(&self) -> Duration {
        let remaining = self.total_words() - self.playback.position;
        playback_duration(remaining, self.playback.wpm)
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.playback
            .position
            .checked_sub(1)
            .and_then(|index| self.playback.words.get(index))
    }

    /// The frame for the last shown word, for redrawing without advancing
    pub fn current_frame(&self) -> Option<Frame<'_>> {
        let total = self.total_words();
        self.current_word()
            .map(|word| Frame::new(word, self.playback.position, total))
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.playback.sentences
    }

    pub fn words(&self) -> &[Word] {
        &self.playback.words
    }

    fn ensure_stopped(&self, operation: &'static str) -> Result<(), EngineError> {
        match self.playback.state {
            EngineState::Ready | EngineState::Paused | EngineState::Finished => Ok(()),
            state => Err(EngineError::InvalidState { operation, state }),
        }
    }

    fn seek(&mut self, target: usize) {
        debug!(from = self.playback.position, to = target, "Moved playback position");
        self.playback.position = target;
        if self.playback.state == EngineState::Finished && target < self.total_words() {
            self.transition(EngineState::Paused);
        }
    }

    fn transition(&mut self, next: EngineState) {
        if self.playback.state != next {
            debug!(from = %self.playback.state, to = %next, position = self.playback.position, "Engine state change");
            self.playback.state = next;
        }
    }
}

impl PlaybackView for RsvpEngine {
    fn state(&self) -> EngineState {
        RsvpEngine::state(self)
    }

    fn position(&self) -> usize {
        RsvpEngine::position(self)
    }

    fn total_words(&self) -> usize {
        RsvpEngine::total_words(self)
    }

    fn wpm(&self) -> f64 {
        RsvpEngine::wpm(self)
    }

    fn progress(&self) -> f64 {
        RsvpEngine::progress(self)
    }

    fn current_word(&self) -> Option<&Word> {
        RsvpEngine::current_word(self)
    }
}

fn fraction(position: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        position as f64 / total as f64
    }
}
