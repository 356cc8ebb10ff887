// Shared fixtures and helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Multi-line text with blank lines, quotes, ellipses and Unicode
pub const COMPLEX_TEXT: &str = r#"Hello world. This is a test sentence.

How are you doing today? I hope you're well!

"I am fine," she said. Then she walked away...

This sentence has
line breaks in the middle. But it should still work.

Pi is 3.14 -- roughly. Final sentence with émojis 🦀 and Unicode 世界"#;

/// Expected sentences for COMPLEX_TEXT, one per line
pub const COMPLEX_EXPECTED: &str = r#"Hello world.
This is a test sentence.
How are you doing today?
I hope you're well!
"I am fine," she said.
Then she walked away...
This sentence has line breaks in the middle.
But it should still work.
Pi is 3.14 -- roughly.
Final sentence with émojis 🦀 and Unicode 世界"#;

/// Texts used for property-style checks
pub const CORPUS: &[&str] = &[
    "",
    "   \n\t  ",
    "word",
    "a",
    "The quick brown fox.",
    "Wait!!! What?! No... way.",
    "No terminator at all here",
    "...leading dots then text. And more",
    "Tabs\tand\r\nwindows\rline endings. Fine!",
    "(Parenthetical.) \"Quoted!\" 'Single?' Done.",
    "Numbers 1.5 and 2.0 stay whole. e.g. this, i.e. that.",
    "- -- --- . ! ?",
    "Ünïcödé wörds ärë fïnë. 日本語のテキスト。 End.",
];

/// Temporary directory holding text files for reader-based tests
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write a text file relative to the fixture root
    pub fn create_text_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// Compare two strings line by line, providing a detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context, i + 1, expected_line, actual_line
            );
        }
    }

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines",
            context, expected_lines.len(), actual_lines.len()
        );
    }
}
