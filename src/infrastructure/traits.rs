//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::io::{self, BufRead, Cursor, Stdout, StdinLock, Write};
use std::path::Path;

use tracing::warn;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Line-oriented conversation partner of the game.
///
/// The engine only talks through this trait, so the same state machine runs
/// against a terminal, a scripted test, or a saved knowledge file.
pub trait Messenger {
    /// Write a complete line.
    fn say(&mut self, text: &str) -> io::Result<()>;

    /// Write a prompt and leave the cursor after it.
    fn prompt(&mut self, text: &str) -> io::Result<()>;

    /// Read one line without its newline. `None` once input is exhausted.
    ///
    /// Read errors count as exhausted input.
    fn read_line(&mut self) -> Option<String>;

    /// Prompt and read the answer.
    fn ask(&mut self, text: &str) -> io::Result<Option<String>> {
        self.prompt(text)?;
        Ok(self.read_line())
    }
}

/// Read one line, stripping only the trailing `\n`.
///
/// Bytes that are not valid UTF-8 are replaced, so such a line still reaches
/// classification.
fn read_input_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut buf = Vec::new();
    match input.read_until(b'\n', &mut buf) {
        Ok(0) => None,
        Ok(_) => {
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            Some(String::from_utf8_lossy(&buf).into_owned())
        }
        Err(e) => {
            warn!("read_line: treating input as exhausted: {}", e);
            None
        }
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Interactive messenger bound to an input reader and an output writer.
#[derive(Debug)]
pub struct ConsoleMessenger<R, W> {
    input: R,
    output: W,
}

impl ConsoleMessenger<StdinLock<'static>, Stdout> {
    /// Messenger on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleMessenger<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Messenger for ConsoleMessenger<R, W> {
    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    fn read_line(&mut self) -> Option<String> {
        read_input_line(&mut self.input)
    }
}

/// Messenger that replays input silently: all outbound text is discarded.
#[derive(Debug)]
pub struct MutedMessenger<R> {
    input: R,
    lines_read: usize,
}

impl MutedMessenger<Cursor<String>> {
    /// Muted messenger over in-memory content, e.g. a loaded knowledge file.
    pub fn from_content(content: String) -> Self {
        Self::new(Cursor::new(content))
    }
}

impl<R: BufRead> MutedMessenger<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            lines_read: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl<R: BufRead> Messenger for MutedMessenger<R> {
    fn say(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn prompt(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn read_line(&mut self) -> Option<String> {
        let line = read_input_line(&mut self.input);
        if line.is_some() {
            self.lines_read += 1;
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_strips_only_newline() {
        let mut m = ConsoleMessenger::new(Cursor::new(" Yes \r\nlast"), Vec::new());
        assert_eq!(m.read_line().as_deref(), Some(" Yes \r"));
        assert_eq!(m.read_line().as_deref(), Some("last"));
        assert_eq!(m.read_line(), None);
    }

    #[test]
    fn given_invalid_utf8_line_when_reading_then_line_is_kept() {
        let input: &[u8] = &[0xff, 0xfe, b'\n', b'Y', b'e', b's', b'\n'];
        let mut m = ConsoleMessenger::new(Cursor::new(input), Vec::new());
        assert_eq!(m.read_line().as_deref(), Some("\u{fffd}\u{fffd}"));
        assert_eq!(m.read_line().as_deref(), Some("Yes"));
        assert_eq!(m.read_line(), None);
    }

    #[test]
    fn test_console_empty_line_is_empty_string() {
        let mut m = ConsoleMessenger::new(Cursor::new("\n"), Vec::new());
        assert_eq!(m.read_line().as_deref(), Some(""));
        assert_eq!(m.read_line(), None);
    }

    #[test]
    fn test_console_writes_prompts_and_lines() {
        let mut m = ConsoleMessenger::new(Cursor::new("Yes\n"), Vec::new());
        m.say("Hello").unwrap();
        let answer = m.ask("Is your animal a cat? ").unwrap();
        assert_eq!(answer.as_deref(), Some("Yes"));
        let out = String::from_utf8(m.into_output()).unwrap();
        assert_eq!(out, "Hello\nIs your animal a cat? ");
    }

    #[test]
    fn test_muted_discards_output_and_counts_lines() {
        let mut m = MutedMessenger::from_content("No\ndog\n".to_string());
        m.say("ignored").unwrap();
        assert_eq!(m.ask("ignored? ").unwrap().as_deref(), Some("No"));
        assert_eq!(m.read_line().as_deref(), Some("dog"));
        assert_eq!(m.read_line(), None);
        assert_eq!(m.lines_read(), 2);
    }
}
