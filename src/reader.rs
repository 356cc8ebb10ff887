use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

/// Where the text to read comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    File(PathBuf),
    Inline(String),
    Stdin,
}

impl TextSource {
    fn label(&self) -> String {
        match self {
            TextSource::File(path) => path.display().to_string(),
            TextSource::Inline(_) => "<inline>".to_string(),
            TextSource::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Configuration for text reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for one read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub source: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async reader that collects a text source line by line
pub struct TextReader {
    config: ReaderConfig,
}

impl TextReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the whole source. Line breaks are kept as `\n`; they are
    /// whitespace to the analyzer anyway.
    pub async fn read(&self, source: &TextSource) -> Result<(String, ReadStats)> {
        let start_time = std::time::Instant::now();
        let label = source.label();
        debug!("Starting read of {}", label);

        let (text, lines_read) = match source {
            TextSource::Inline(text) => (text.clone(), text.lines().count() as u64),
            TextSource::File(path) => {
                let file = File::open(path)
                    .await
                    .with_context(|| format!("Failed to open file {}", path.display()))?;
                self.read_lines(file, &label).await?
            }
            TextSource::Stdin => self.read_lines(tokio::io::stdin(), &label).await?,
        };

        let stats = ReadStats {
            source: label,
            lines_read,
            bytes_read: text.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            stats.source, stats.lines_read, stats.bytes_read, stats.duration_ms
        );
        Ok((text, stats))
    }

    async fn read_lines<R: AsyncRead + Unpin>(&self, input: R, label: &str) -> Result<(String, u64)> {
        let reader = BufReader::with_capacity(self.config.buffer_size, input);
        let mut lines = reader.lines();
        let mut text = String::new();
        let mut line_count = 0u64;

        while let Some(line) = lines
            .next_line()
            .await
            .with_context(|| format!("UTF-8 decoding error in {} at line {}", label, line_count + 1))?
        {
            if line_count > 0 {
                text.push('\n');
            }
            text.push_str(&line);
            line_count += 1;
        }

        Ok((text, line_count))
    }
}

/// Read a single file with default configuration
pub async fn read_text_file<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = TextReader::new(ReaderConfig::default());
    let source = TextSource::File(file_path.as_ref().to_path_buf());
    let (text, _stats) = reader.read(&source).await?;
    Ok(text)
}
