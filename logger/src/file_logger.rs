use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::error::LoggerError;
use crate::log_contracts::{LogLevel, Logger};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends `<timestamp> [<LEVEL>] <message>` lines to a plain text file.
///
/// The file is created lazily on the first record, preceded by a single
/// `Log file created` notice. Writes from one instance are serialized; each
/// record is a single append so lines from separate processes never merge.
pub struct FileLogger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_for_append(&self) -> io::Result<File> {
        match OpenOptions::new().append(true).open(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create(),
            other => other,
        }
    }

    fn create(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        match OpenOptions::new().append(true).create_new(true).open(&self.path) {
            Ok(mut file) => {
                self.write_creation_notice(&mut file)?;
                tracing::debug!(path = %self.path.display(), "created log file");
                Ok(file)
            }
            // Someone else created it between our open and create_new
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                OpenOptions::new().append(true).open(&self.path)
            }
            Err(e) => Err(e),
        }
    }

    // A file without its notice is removed so the next call creates it again
    fn write_creation_notice<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let notice = format!("Log file created: {}", self.path.display());
        write_line(out, LogLevel::Info, &notice).map_err(|e| {
            if let Err(remove_err) = fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %remove_err, "could not discard log file");
            }
            e
        })
    }

    // Best effort: leave a trace of the failure in the file itself.
    // Never recurses into try_log.
    fn record_failure(&self, cause: &io::Error) {
        let message = format!("Error writing to log file: {}", cause);
        let written = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .and_then(|mut file| write_line(&mut file, LogLevel::Error, &message));

        if let Err(e) = written {
            tracing::warn!(path = %self.path.display(), error = %e, "could not record log file failure");
        }
    }
}

impl Logger for FileLogger {
    fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LoggerError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.open_for_append()
            .and_then(|mut file| write_line(&mut file, level, message))
            .map_err(|source| {
                self.record_failure(&source);
                LoggerError::Io {
                    path: self.path.clone(),
                    source,
                }
            })
    }
}

fn write_line<W: Write>(out: &mut W, level: LogLevel, message: &str) -> io::Result<()> {
    let line = format_line(Local::now(), level, message);
    out.write_all(line.as_bytes())
}

fn format_line(timestamp: DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!("{} [{}] {}\n", timestamp.format(TIMESTAMP_FORMAT), level, message)
}
