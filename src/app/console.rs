use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::info;

const MAX_LINES: usize = 5000;

/// In-app console shared between the UI thread and workers. Doubles as the
/// log sink handed to plugins.
#[derive(Clone)]
pub struct ConsoleLog {
    inner: Arc<Mutex<ConsoleInner>>,
}

struct ConsoleInner {
    lines: Vec<String>,
    file_path: Option<PathBuf>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ConsoleInner {
                lines: Vec::new(),
                file_path: None,
            })),
        }
    }

    /// Mirror console lines into a file. `None` disables mirroring.
    pub fn set_file(&self, path: Option<PathBuf>) {
        let mut inner = self.inner.lock().expect("console lock poisoned");
        inner.file_path = path;
    }

    pub fn log(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        info!("{message}");
        let stamped = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        let mut inner = self.inner.lock().expect("console lock poisoned");
        if let Some(path) = &inner.file_path {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{stamped}");
            }
        }
        inner.lines.push(stamped);
        if inner.lines.len() > MAX_LINES {
            let excess = inner.lines.len() - MAX_LINES;
            inner.lines.drain(..excess);
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("console lock poisoned")
            .lines
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("console lock poisoned").lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("console lock poisoned")
            .lines
            .clear();
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn logs_one_timestamped_line_per_call() {
        let console = ConsoleLog::new();
        console.log("first");
        console.log("second");
        let lines = console.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }

    #[test]
    fn clear_empties_the_buffer() {
        let console = ConsoleLog::new();
        console.log("something");
        console.clear();
        assert!(console.is_empty());
    }

    #[test]
    fn mirrors_to_file_when_enabled() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("console.log");
        let console = ConsoleLog::new();
        console.set_file(Some(path.clone()));
        console.log("mirrored");
        console.set_file(None);
        console.log("memory only");

        let content = std::fs::read_to_string(&path).expect("read log");
        assert!(content.contains("mirrored"));
        assert!(!content.contains("memory only"));
        assert_eq!(console.len(), 2);
    }
}
