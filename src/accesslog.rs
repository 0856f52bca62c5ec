//! Apache/NCSA combined-log parsing
//!
//! Log entries are of this format:
//! 127.0.0.1 - - [23/Dec/2010:13:10:30 -0500] "GET /favicon.ico HTTP/1.1" 200 1406
//! 127.0.0.1 - - [23/Dec/2010:13:10:30 -0500] "GET /jw/jw-trial-config.xml HTTP/1.1" 200 762

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Number of whitespace-separated tokens in a well-formed entry.
const ENTRY_TOKENS: usize = 10;

/// Timestamp fields of an entry, kept verbatim as written in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub date: String,
    pub time: String,
    pub utc_offset: String,
}

/// Request-line fields. `path` is the raw request target and may still
/// carry a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub protocol: String,
}

/// Response fields. Status and size stay strings here; the tree builder
/// decides whether they are numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: String,
    pub size_bytes: String,
}

/// One parsed access log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub client_address: String,
    pub timestamp: Timestamp,
    pub request: Request,
    pub response: Response,
}

impl LogRecord {
    /// Parse a single log line.
    ///
    /// Returns `None` unless the line splits into exactly 10 whitespace
    /// tokens. Token positions are trusted beyond that count: a 10-token
    /// line that deviates from the combined log format yields garbage
    /// fields rather than an error.
    pub fn parse(line: &str) -> Option<Self> {
        let raw: Vec<&str> = line.split_whitespace().collect();
        if raw.len() != ENTRY_TOKENS {
            return None;
        }

        Some(LogRecord {
            client_address: raw[0].to_string(),
            timestamp: Timestamp {
                date: raw[3].get(1..12).unwrap_or_default().to_string(),
                time: raw[3].get(13..).unwrap_or_default().to_string(),
                utc_offset: raw[4].strip_suffix(']').unwrap_or(raw[4]).to_string(),
            },
            request: Request {
                method: raw[5].strip_prefix('"').unwrap_or(raw[5]).to_string(),
                path: raw[6].to_string(),
                protocol: raw[7].strip_suffix('"').unwrap_or(raw[7]).to_string(),
            },
            response: Response {
                status_code: raw[8].to_string(),
                size_bytes: raw[9].to_string(),
            },
        })
    }
}

/// Fatal errors opening the log file. Messages are user-facing and go to
/// stdout, so no variant wraps another error type's display.
#[derive(Debug, Error)]
pub enum OpenLogError {
    #[error("Log file '{path}' does not exist")]
    Missing { path: String },
    #[error("There was an error opening '{path}':\n  \"{message}\"")]
    Open { path: String, message: String },
}

/// A log file opened for sequential, line-by-line reading.
#[derive(Debug)]
pub struct LogFile {
    reader: BufReader<fs::File>,
}

impl LogFile {
    /// Open a log file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, OpenLogError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|err| {
            let path = path.display().to_string();
            if err.kind() == io::ErrorKind::NotFound {
                OpenLogError::Missing { path }
            } else {
                OpenLogError::Open {
                    path,
                    message: err.to_string(),
                }
            }
        })?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }

    /// Iterate over parse attempts, one per line.
    ///
    /// Unparsable lines come through as `Ok(None)` so the caller can skip
    /// them; an I/O failure mid-file surfaces as the iterator's error.
    pub fn records(self) -> impl Iterator<Item = io::Result<Option<LogRecord>>> {
        self.reader
            .lines()
            .map(|line| line.map(|line| LogRecord::parse(&line)))
    }
}
