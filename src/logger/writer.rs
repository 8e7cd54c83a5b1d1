//! Rotating file writer used by the file layer

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;
use crate::logger::rotation::RotationManager;

/// File writer with rotation support.
///
/// When the file cannot be written or rotated the writer switches to stderr
/// for the rest of the process instead of dropping events.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

struct WriterState {
    file: BufWriter<File>,
    written: u64,
    rotation: RotationManager,
    on_stderr: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;
        let written = if config.append {
            fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                written,
                rotation: RotationManager::new(config.rotation),
                on_stderr: false,
            })),
            path: config.path.clone(),
        })
    }

    /// Whether file output failed and events now go to stderr.
    pub fn is_on_stderr(&self) -> bool {
        self.state.lock().map(|s| s.on_stderr).unwrap_or(true)
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            state: Arc::clone(&self.state),
            path: self.path.clone(),
        }
    }
}

/// Per-event handle returned by [`RotatingFileWriter::make_writer`]
pub struct RotatingWriterGuard {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

impl RotatingWriterGuard {
    fn lock(&self) -> io::Result<MutexGuard<'_, WriterState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))
    }

    fn fall_back(state: &mut WriterState, buf: &[u8], error: &dyn std::fmt::Display) -> io::Result<usize> {
        if !state.on_stderr {
            eprintln!("[logger] file output failed, switching to stderr: {}", error);
            state.on_stderr = true;
        }
        io::stderr().write(buf)
    }
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let path = self.path.clone();
        let mut guard = self.lock()?;
        let state = &mut *guard;

        if state.on_stderr {
            return io::stderr().write(buf);
        }

        if state.rotation.should_rotate(state.written) {
            if let Err(e) = state.file.flush() {
                return Self::fall_back(state, buf, &e);
            }
            if let Err(e) = state.rotation.rotate(&path) {
                return Self::fall_back(state, buf, &e);
            }
            match open_log_file(&path, false) {
                Ok(file) => {
                    state.file = file;
                    state.written = 0;
                }
                Err(e) => return Self::fall_back(state, buf, &e),
            }
        }

        match state.file.write(buf) {
            Ok(n) => {
                state.written += n as u64;
                Ok(n)
            }
            Err(e) => Self::fall_back(state, buf, &e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.lock()?;
        if state.on_stderr {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::{LogFormat, RotationConfig, RotationPolicy};
    use tempfile::tempdir;

    fn file_config(path: PathBuf, append: bool, max_size: u64) -> FileConfig {
        FileConfig::new(
            true,
            path,
            append,
            LogFormat::Full,
            RotationConfig::new(RotationPolicy::Size, max_size, 3).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 1024)).unwrap();

        writer.make_writer().write_all(b"hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_on_stderr());
    }

    #[test]
    fn test_truncates_when_not_appending() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old content\n").unwrap();

        let writer = RotatingFileWriter::new(&file_config(path.clone(), false, 1024)).unwrap();
        writer.make_writer().write_all(b"new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old\n").unwrap();

        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 1024)).unwrap();
        writer.make_writer().write_all(b"new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_rotates_when_size_reached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), true, 8)).unwrap();

        writer.make_writer().write_all(b"0123456789\n").unwrap();
        writer.make_writer().write_all(b"next\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        let rotated: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != path)
            .collect();
        assert_eq!(rotated.len(), 1);
    }
}
