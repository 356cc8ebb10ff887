use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rsvp_reader::display::{align_word, TerminalDisplay};
use rsvp_reader::driver::{PlaybackCommand, PlaybackConfig, PlaybackDriver};
use rsvp_reader::engine::{RsvpEngine, DEFAULT_WPM};
use rsvp_reader::reader::{ReaderConfig, TextReader, TextSource};
use rsvp_reader::text_analyzer;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rsvp")]
#[command(about = "Rapid serial visual presentation reader for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flash the text one word at a time
    Play(PlayArgs),
    /// Print sentences, focus points and statistics as JSON
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Text file to read; stdin is used when neither FILE nor --text is given
    file: Option<PathBuf>,

    /// Read this text instead of a file
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
}

impl InputArgs {
    fn source(&self) -> TextSource {
        match (&self.file, &self.text) {
            (Some(path), _) => TextSource::File(path.clone()),
            (None, Some(text)) => TextSource::Inline(text.clone()),
            (None, None) => TextSource::Stdin,
        }
    }
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Words per minute
    #[arg(long, default_value_t = DEFAULT_WPM)]
    wpm: f64,

    /// Terminal column the focus letter is pinned to
    #[arg(long, default_value_t = 12)]
    anchor_column: usize,

    /// Extra pause after sentence-ending words, in milliseconds
    #[arg(long, default_value_t = 0)]
    sentence_pause_ms: u64,

    /// Suppress the progress bar and print one word per line
    #[arg(long)]
    no_progress: bool,

    /// Print every aligned word immediately without timing
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Speed used for the reading-time estimate
    #[arg(long, default_value_t = DEFAULT_WPM)]
    wpm: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the word display owns stdout
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .json()
        .init();

    let cli = Cli::parse();
    info!(?cli, "Parsed CLI arguments");

    match cli.command {
        Command::Play(args) => play(args).await,
        Command::Analyze(args) => analyze(args).await,
    }
}

async fn read_input(input: &InputArgs) -> Result<String> {
    let reader = TextReader::new(ReaderConfig::default());
    let (text, _stats) = reader.read(&input.source()).await?;
    Ok(text)
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    if !args.wpm.is_finite() || args.wpm <= 0.0 {
        anyhow::bail!("--wpm must be greater than zero, got {}", args.wpm);
    }

    let text = read_input(&args.input).await?;
    let report = text_analyzer::report(&text, args.wpm)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn play(args: PlayArgs) -> Result<()> {
    let source = args.input.source();
    let text = read_input(&args.input).await?;

    let mut engine = RsvpEngine::with_speed(args.wpm)?;
    let total = engine.load(&text).context("Nothing to play")?;

    if args.dry_run {
        engine.start()?;
        while let Some(frame) = engine.tick() {
            println!("{}", align_word(&frame, args.anchor_column));
        }
        return Ok(());
    }

    let config = PlaybackConfig {
        wpm: args.wpm,
        anchor_column: args.anchor_column,
        sentence_pause: Duration::from_millis(args.sentence_pause_ms),
        exit_on_finish: true,
    };
    let display = TerminalDisplay::new(total, config.anchor_column, !args.no_progress);
    let mut driver = PlaybackDriver::new(engine, display, config)?;

    let (tx, rx) = mpsc::channel(16);

    // Ctrl-C ends playback cleanly
    let quit_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(PlaybackCommand::Quit).await;
        }
    });

    // Stdin is a control channel unless the text itself came from it
    if source != TextSource::Stdin {
        tokio::spawn(forward_controls(tx));
    } else {
        drop(tx);
    }

    let report = driver.run(rx).await;
    info!(?report, "Playback complete");
    eprintln!(
        "shown {} of {} words ({:?})",
        report.final_position,
        driver.engine().total_words(),
        report.final_state
    );
    Ok(())
}

/// Turn stdin lines into playback commands until stdin closes or `q` is sent
async fn forward_controls(tx: mpsc::Sender<PlaybackCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match line.parse::<PlaybackCommand>() {
            Ok(command) => {
                let quit = command == PlaybackCommand::Quit;
                if tx.send(command).await.is_err() || quit {
                    break;
                }
            }
            Err(e) => warn!("Ignored control line {:?}: {}", line, e),
        }
    }
}
