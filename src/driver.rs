//! Timer host that drives an [`RsvpEngine`] on a tokio runtime.
//!
//! The driver owns the engine and the display. Controls arrive over an mpsc
//! channel and are applied between ticks, so a pause or restart is always
//! visible before the next word can be shown.

use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::display::WordDisplay;
use crate::engine::{EngineState, RsvpEngine, DEFAULT_WPM};
use crate::error::{CommandError, EngineError};

/// Host-side playback settings
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Starting words per minute
    pub wpm: f64,
    /// 0-based terminal column the focus letter is pinned to
    pub anchor_column: usize,
    /// Extra hold after a word that ends a sentence
    pub sentence_pause: Duration,
    /// Stop the loop once the last word has been shown
    pub exit_on_finish: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            anchor_column: 12,
            sentence_pause: Duration::ZERO,
            exit_on_finish: true,
        }
    }
}

/// Control sent to a running driver
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Start,
    Pause,
    /// Pause when running, start otherwise
    TogglePause,
    SetSpeed(f64),
    Rewind(usize),
    RewindSentence,
    Restart,
    Quit,
}

impl FromStr for PlaybackCommand {
    type Err = CommandError;

    /// Parse one control line such as `p`, `s 450` or `b 3`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let argument = parts.next();

        match command.to_ascii_lowercase().as_str() {
            "start" | "r" | "resume" => Ok(PlaybackCommand::Start),
            "p" | "pause" => Ok(PlaybackCommand::Pause),
            "t" | "toggle" => Ok(PlaybackCommand::TogglePause),
            "s" | "speed" => {
                let raw = argument.unwrap_or_default();
                raw.parse::<f64>()
                    .map(PlaybackCommand::SetSpeed)
                    .map_err(|_| CommandError::InvalidArgument {
                        command: "speed",
                        argument: raw.to_string(),
                    })
            }
            "b" | "back" => match argument {
                None => Ok(PlaybackCommand::Rewind(1)),
                Some(raw) => raw
                    .parse::<usize>()
                    .map(PlaybackCommand::Rewind)
                    .map_err(|_| CommandError::InvalidArgument {
                        command: "back",
                        argument: raw.to_string(),
                    }),
            },
            "bs" | "sentence" => Ok(PlaybackCommand::RewindSentence),
            "restart" => Ok(PlaybackCommand::Restart),
            "q" | "quit" => Ok(PlaybackCommand::Quit),
            _ => Err(CommandError::Unknown(command.to_string())),
        }
    }
}

/// Summary returned when the driver loop ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackReport {
    pub words_shown: usize,
    pub final_state: EngineState,
    pub final_position: usize,
    pub rejected_commands: usize,
}

pub struct PlaybackDriver<D: WordDisplay> {
    engine: RsvpEngine,
    display: D,
    config: PlaybackConfig,
}

impl<D: WordDisplay> PlaybackDriver<D> {
    /// Wrap a loaded engine. The configured speed is applied immediately.
    pub fn new(mut engine: RsvpEngine, display: D, config: PlaybackConfig) -> Result<Self, EngineError> {
        engine.set_speed(config.wpm)?;
        Ok(Self {
            engine,
            display,
            config,
        })
    }

    pub fn engine(&self) -> &RsvpEngine {
        &self.engine
    }

    pub fn into_parts(self) -> (RsvpEngine, D) {
        (self.engine, self.display)
    }

    /// Play until the text finishes (with `exit_on_finish`), a `Quit`
    /// arrives, or the channel closes while nothing is running.
    ///
    /// A `Ready` engine is started on entry; the first word is shown
    /// without delay.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<PlaybackCommand>) -> PlaybackReport {
        let mut words_shown = 0usize;
        let mut rejected_commands = 0usize;
        let mut commands_open = true;
        let mut deadline = Instant::now();

        if self.engine.state() == EngineState::Ready {
            if let Err(e) = self.engine.start() {
                warn!("Could not start playback: {}", e);
            }
            self.display.state_changed(&self.engine);
        }

        info!(
            words = self.engine.total_words(),
            wpm = self.engine.wpm(),
            "Starting playback loop"
        );

        loop {
            let state = self.engine.state();
            if state == EngineState::Finished && self.config.exit_on_finish {
                break;
            }
            let running = state == EngineState::Running;

            tokio::select! {
                biased;

                command = commands.recv(), if commands_open => match command {
                    Some(PlaybackCommand::Quit) => {
                        debug!("Received quit");
                        break;
                    }
                    Some(command) => {
                        let before = self.engine.state();
                        match self.apply(command) {
                            Ok(()) => {
                                // Resuming shows the next word right away
                                if before != EngineState::Running
                                    && self.engine.state() == EngineState::Running
                                {
                                    deadline = Instant::now();
                                }
                                if before != self.engine.state() {
                                    self.display.state_changed(&self.engine);
                                }
                            }
                            Err(e) => {
                                warn!("Rejected playback command: {}", e);
                                rejected_commands += 1;
                            }
                        }
                    }
                    None => {
                        debug!("Command channel closed");
                        commands_open = false;
                    }
                },

                _ = sleep_until(deadline), if running => {
                    let mut hold = self.engine.tick_interval();
                    if let Some(frame) = self.engine.tick() {
                        words_shown += 1;
                        if frame.word.ends_sentence() {
                            hold += self.config.sentence_pause;
                        }
                        self.display.show(&frame);
                    }
                    if self.engine.state() != EngineState::Running {
                        self.display.state_changed(&self.engine);
                    }
                    deadline = Instant::now() + hold;
                },

                else => break,
            }
        }

        self.display.finish(&self.engine);

        let report = PlaybackReport {
            words_shown,
            final_state: self.engine.state(),
            final_position: self.engine.position(),
            rejected_commands,
        };
        info!(?report, "Playback loop ended");
        report
    }

    fn apply(&mut self, command: PlaybackCommand) -> Result<(), EngineError> {
        debug!(?command, "Applying playback command");
        match command {
            PlaybackCommand::Start => self.engine.start(),
            PlaybackCommand::Pause => self.engine.pause(),
            PlaybackCommand::TogglePause => {
                if self.engine.state() == EngineState::Running {
                    self.engine.pause()
                } else {
                    self.engine.start()
                }
            }
            PlaybackCommand::SetSpeed(wpm) => self.engine.set_speed(wpm),
            PlaybackCommand::Rewind(count) => self.engine.rewind(count),
            PlaybackCommand::RewindSentence => self.engine.rewind_sentence(),
            PlaybackCommand::Restart => {
                self.engine.restart();
                Ok(())
            }
            // Handled by the loop before dispatch
            PlaybackCommand::Quit => Ok(()),
        }
    }
}
