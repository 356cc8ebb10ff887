//! Display collaborators.
//!
//! Displays receive frames and read-only engine views. They never hold the
//! engine mutably, so control always flows display-host → engine.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;

use crate::engine::{EngineState, Frame, PlaybackView};

/// Anything that can put a word on screen
pub trait WordDisplay {
    /// Render one word with its focus letter on the anchor
    fn show(&mut self, frame: &Frame<'_>);

    /// Called after the engine changes state
    fn state_changed(&mut self, _view: &dyn PlaybackView) {}

    /// Called once when the host stops driving playback
    fn finish(&mut self, _view: &dyn PlaybackView) {}
}

/// Left-pad `frame`'s word so its focus letter lands on `anchor_column`
/// (0-based). Words whose focus index is past the anchor are not padded.
pub fn align_word(frame: &Frame<'_>, anchor_column: usize) -> String {
    let padding = anchor_column.saturating_sub(frame.focus_index);
    format!("{}{}", " ".repeat(padding), frame.word.text)
}

/// Guide line with a marker over the anchor column
pub fn anchor_guide(anchor_column: usize, width: usize) -> String {
    let width = width.max(anchor_column + 1);
    (0..width)
        .map(|column| if column == anchor_column { '▼' } else { '─' })
        .collect()
}

/// Terminal renderer backed by an `indicatif` progress bar
pub struct TerminalDisplay {
    bar: ProgressBar,
    anchor_column: usize,
    show_progress: bool,
}

impl TerminalDisplay {
    pub fn new(total_words: usize, anchor_column: usize, show_progress: bool) -> Self {
        let bar = if show_progress {
            ProgressBar::with_draw_target(Some(total_words as u64), ProgressDrawTarget::stdout())
        } else {
            ProgressBar::hidden()
        };

        // Template is a literal, so this only fails if it is edited badly
        if let Ok(style) = ProgressStyle::with_template(
            "{prefix}\n{msg}\n[{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(anchor_guide(anchor_column, anchor_column * 3));

        Self {
            bar,
            anchor_column,
            show_progress,
        }
    }
}

impl WordDisplay for TerminalDisplay {
    fn show(&mut self, frame: &Frame<'_>) {
        let line = align_word(frame, self.anchor_column);
        if self.show_progress {
            self.bar.set_position(frame.position as u64);
            self.bar.set_message(line);
        } else {
            println!("{line}");
        }
    }

    fn state_changed(&mut self, view: &dyn PlaybackView) {
        if !self.show_progress {
            return;
        }
        match view.state() {
            EngineState::Paused => {
                self.bar
                    .println(format!("paused at {}/{}", view.position(), view.total_words()));
            }
            EngineState::Ready => {
                self.bar.reset();
                self.bar.set_message(String::new());
            }
            _ => {}
        }
    }

    fn finish(&mut self, view: &dyn PlaybackView) {
        if self.show_progress {
            self.bar.set_position(view.position() as u64);
            self.bar.abandon();
        }
    }
}

/// Frame as captured by [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedFrame {
    pub text: String,
    pub focus_index: usize,
    pub position: usize,
}

/// Collects frames and state changes instead of drawing them
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    pub frames: Vec<RecordedFrame>,
    pub states: Vec<EngineState>,
    pub finished: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> Vec<&str> {
        self.frames.iter().map(|frame| frame.text.as_str()).collect()
    }
}

impl WordDisplay for RecordingDisplay {
    fn show(&mut self, frame: &Frame<'_>) {
        self.frames.push(RecordedFrame {
            text: frame.word.text.clone(),
            focus_index: frame.focus_index,
            position: frame.position,
        });
    }

    fn state_changed(&mut self, view: &dyn PlaybackView) {
        self.states.push(view.state());
    }

    fn finish(&mut self, _view: &dyn PlaybackView) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RsvpEngine;

    #[test]
    fn test_focus_letters_share_a_column() {
        let mut engine = RsvpEngine::new();
        engine.load("I read extraordinarily quickly.").unwrap();
        engine.start().unwrap();

        let anchor = 10;
        while let Some(frame) = engine.tick() {
            let line = align_word(&frame, anchor);
            let focus = line.chars().nth(anchor).unwrap();
            assert_eq!(focus, frame.word.focus_letter, "line {line:?}");
        }
    }

    #[test]
    fn test_align_without_room() {
        let mut engine = RsvpEngine::new();
        engine.load("extraordinarily").unwrap();
        engine.start().unwrap();
        let frame = engine.tick().unwrap();
        assert_eq!(align_word(&frame, 0), "extraordinarily");
    }

    #[test]
    fn test_anchor_guide() {
        assert_eq!(anchor_guide(2, 5), "──▼──");
        assert_eq!(anchor_guide(4, 2), "────▼");
    }

    #[test]
    fn test_recording_display() {
        let mut engine = RsvpEngine::new();
        engine.load("one two").unwrap();
        engine.start().unwrap();

        let mut display = RecordingDisplay::new();
        while let Some(frame) = engine.tick() {
            display.show(&frame);
        }
        display.state_changed(&engine);
        display.finish(&engine);

        assert_eq!(display.words(), vec!["one", "two"]);
        assert_eq!(display.frames[1].position, 2);
        assert_eq!(display.states, vec![EngineState::Finished]);
        assert!(display.finished);
    }

    #[test]
    fn test_hidden_terminal_display_accepts_frames() {
        let mut engine = RsvpEngine::new();
        engine.load("one two").unwrap();
        engine.start().unwrap();
        let mut display = TerminalDisplay::new(engine.total_words(), 4, true);
        display.bar.set_draw_target(ProgressDrawTarget::hidden());
        while let Some(frame) = engine.tick() {
            display.show(&frame);
        }
        display.finish(&engine);
        assert_eq!(display.bar.position(), 2);
    }
}
