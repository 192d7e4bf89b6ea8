//! Append-only response journal.
//!
//! One plain-text line per event: job start, successful reply, failed reply,
//! job finish with aggregate counters. The file is opened, appended, and
//! closed on every event; there is exactly one writer in the process so no
//! locking is needed.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default journal file, relative to the process working directory.
pub const DEFAULT_JOURNAL_FILE: &str = "responses_log.txt";

/// Append-only writer for the response journal.
#[derive(Debug, Clone)]
pub struct ResponseJournal {
    path: PathBuf,
}

impl ResponseJournal {
    /// Create a journal writing to the given path. The file is created on
    /// first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record the start of a cycle.
    pub fn job_start(&self) -> io::Result<()> {
        self.append(&format!("Starting Job: {}\n", timestamp()))
    }

    /// Record a successfully posted reply.
    pub fn replied(&self, tweet_id: &str, text: &str) -> io::Result<()> {
        self.append(&format!(
            "{} - Responded to tweet ID: {} with text: {}\n",
            timestamp(),
            tweet_id,
            text
        ))
    }

    /// Record a failed reply attempt.
    pub fn reply_error(&self, tweet_id: &str, error: &dyn std::fmt::Display) -> io::Result<()> {
        self.append(&format!(
            "{} - Error replying to tweet ID: {}: {}\n",
            timestamp(),
            tweet_id,
            error
        ))
    }

    /// Record the end of a cycle with its aggregate counters.
    pub fn job_finish(&self, found: usize, replied: usize, errors: usize) -> io::Result<()> {
        self.append(&format!(
            "Finished Job: {}, Found: {}, Replied: {}, Errors: {}\n",
            timestamp(),
            found,
            replied,
            errors
        ))
    }

    fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

/// UTC timestamp with microsecond precision and no zone suffix.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn journal_in(dir: &tempfile::TempDir) -> ResponseJournal {
        ResponseJournal::new(dir.path().join("responses_log.txt"))
    }

    #[test]
    fn lines_are_appended_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let journal = journal_in(&dir);

        journal.job_start().expect("start line");
        journal.replied("10", "To the moon, briefly.").expect("reply line");
        journal
            .reply_error("11", &"API error (403): Forbidden")
            .expect("error line");
        journal.job_finish(2, 1, 1).expect("finish line");

        let contents = fs::read_to_string(journal.path()).expect("journal exists");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Starting Job: "));
        assert!(lines[1].contains("Responded to tweet ID: 10 with text: To the moon, briefly."));
        assert!(lines[2].contains("Error replying to tweet ID: 11: API error (403): Forbidden"));
        assert!(lines[3].contains("Found: 2, Replied: 1, Errors: 1"));
    }

    #[test]
    fn file_is_created_on_first_append() {
        let dir = tempfile::tempdir().expect("tempdir");
        let journal = journal_in(&dir);
        assert!(!journal.path().exists());

        journal.job_start().expect("start line");
        assert!(journal.path().exists());
    }

    #[test]
    fn timestamps_carry_microseconds_without_zone() {
        let ts = timestamp();
        // e.g. 2024-06-01T10:00:00.123456
        assert_eq!(ts.len(), 26);
        assert!(!ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
    }
}
