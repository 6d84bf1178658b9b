// Library Catalog - single-user library catalog manager
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Transaction audit log
//!
//! Plain-text, append-only record of borrow/return actions, one line each:
//!
//! ```text
//! Borrowed - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-01
//! Returned - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-10
//! ```
//!
//! The log is independent of the catalog database; an entry is appended only
//! after the corresponding database transaction has committed.

pub mod entry;

pub use entry::{AuditEntry, LoanAction};

use crate::error::{CatalogError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tracing::debug;

/// Append-only transaction log backed by a text file
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create a handle; the file itself is created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory holding the log file if it is missing
    pub async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    CatalogError::FileIoError(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Append one entry
    ///
    /// The file is opened, written, flushed and closed within this call, so
    /// the line is on disk once it returns.
    pub async fn append(&self, entry: &AuditEntry) -> Result<()> {
        self.ensure_parent_dir().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                CatalogError::FileIoError(format!(
                    "Failed to open audit log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        let line = format!("{}\n", entry);
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        file.sync_data().await?;

        debug!(path = %self.path.display(), %entry, "audit entry appended");
        Ok(())
    }

    /// Read the log from the start
    ///
    /// Lines are read lazily. A missing file yields no lines rather than an
    /// error. Each call starts over from the first line.
    pub async fn read_all(&self) -> Result<AuditLines> {
        match File::open(&self.path).await {
            Ok(file) => Ok(AuditLines {
                lines: Some(BufReader::new(file).lines()),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AuditLines { lines: None }),
            Err(e) => Err(CatalogError::FileIoError(format!(
                "Failed to read audit log {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Read the whole log as typed entries
    pub async fn entries(&self) -> Result<Vec<AuditEntry>> {
        let mut lines = self.read_all().await?;
        let mut entries = Vec::new();
        while let Some(line) = lines.next_line().await? {
            entries.push(line.parse()?);
        }
        Ok(entries)
    }
}

/// Lazy reader over audit log lines
pub struct AuditLines {
    lines: Option<Lines<BufReader<File>>>,
}

impl AuditLines {
    /// Next non-empty line with its trailing newline removed
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let Some(lines) = self.lines.as_mut() else {
            return Ok(None);
        };

        while let Some(line) = lines.next_line().await? {
            let line = line.trim_end();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }

        Ok(None)
    }

    /// Drain the remaining lines
    pub async fn collect_lines(mut self) -> Result<Vec<String>> {
        let mut out = Vec::new();
        while let Some(line) = self.next_line().await? {
            out.push(line);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemberId;

    fn entry(action: LoanAction, date: &str) -> AuditEntry {
        AuditEntry::new(action, MemberId::new(1), 1, date)
    }

    #[tokio::test]
    async fn test_missing_log_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("transaction_log.txt"));

        let lines = log.read_all().await.expect("Missing log should not error");
        assert!(lines.collect_lines().await.unwrap().is_empty());
        assert!(log.entries().await.unwrap().is_empty());
        // Reading must not create the file
        assert!(!log.path().exists());
    }

    #[tokio::test]
    async fn test_append_and_reread() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("transaction_log.txt"));

        log.append(&entry(LoanAction::Borrowed, "2024-01-01")).await.unwrap();
        log.append(&entry(LoanAction::Returned, "2024-01-10")).await.unwrap();

        let lines = log.read_all().await.unwrap().collect_lines().await.unwrap();
        assert_eq!(
            lines,
            vec![
                "Borrowed - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-01",
                "Returned - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-10",
            ]
        );

        // Restartable: a second read starts from the top again
        let mut again = log.read_all().await.unwrap();
        assert_eq!(
            again.next_line().await.unwrap().as_deref(),
            Some("Borrowed - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-01")
        );

        let entries = log.entries().await.unwrap();
        assert_eq!(entries[1].action, LoanAction::Returned);
        assert_eq!(entries[1].date, "2024-01-10");
    }

    #[tokio::test]
    async fn test_append_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("logs").join("daily").join("transaction_log.txt"));

        log.append(&entry(LoanAction::Borrowed, "2024-01-01")).await.unwrap();

        assert!(log.path().exists());
        assert_eq!(log.entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaction_log.txt");
        tokio::fs::write(&path, "Borrowed - Member ID: MEM0000002, Book ID: 9, Date: 2023-12-24\n")
            .await
            .unwrap();

        let log = AuditLog::new(&path);
        log.append(&entry(LoanAction::Borrowed, "2024-01-01")).await.unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].book_id, 9);
    }
}
