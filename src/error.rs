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


//! Error types for the library catalog
//!
//! # Error Categories
//!
//! ### Loan outcomes (reported to the user, never fatal)
//! - Unknown book id during borrow → `BookNotFound`
//! - Borrowing a book that is out → `AlreadyBorrowed`
//! - Strict return without an open loan → `NoOpenLoan`
//! - Malformed member card number → `InvalidMemberId`
//! - Loan date with control characters → `InvalidInput`
//!
//! ### Storage
//! - Schema setup failures → `MigrationFailed`
//! - Driver failures → `SqlxError` (via `#[from]`)
//! - No card number left for a new member → `MemberIdsExhausted`
//!
//! ### Files and configuration
//! - Audit log and database directory I/O → `FileIoError`, `IoError`
//! - Bad config files → `ConfigurationError`, `TomlError`

use crate::storage::models::{BookId, MemberId};
use thiserror::Error;

/// Result type alias using our CatalogError type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for the library catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== Loan Errors =====

    /// Book id referenced by a borrow (or strict return) does not exist
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    /// Book is currently out on loan
    #[error("Book with ID {0} is already borrowed")]
    AlreadyBorrowed(BookId),

    /// Strict return policy found no open borrow record for the pair
    #[error("No open loan of book {book_id} for member {member_id}")]
    NoOpenLoan {
        member_id: MemberId,
        book_id: BookId,
    },

    /// Member card number did not parse
    #[error("Invalid member ID: {0}")]
    InvalidMemberId(String),

    // ===== Input / Data Errors =====

    /// Free-text field that cannot be stored as given
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Audit log line that does not follow the entry format
    #[error("Invalid audit entry: {0}")]
    InvalidAuditEntry(String),

    // ===== Storage Errors =====

    /// Next member id would not fit a 10-character card number
    #[error("Member ID {0} exceeds the card number range")]
    MemberIdsExhausted(i64),

    /// Database migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    // ===== File / Config Errors =====

    /// File I/O error with context
    #[error("File I/O error: {0}")]
    FileIoError(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ===== External Library Errors =====

    /// SQLx database error
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl CatalogError {
    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        CatalogError::InvalidInput(message.into())
    }

    /// Check if error is an expected loan outcome rather than an infrastructure fault
    ///
    /// Reportable errors leave the catalog unchanged and only need to be shown
    /// to the user.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            CatalogError::BookNotFound(_)
                | CatalogError::AlreadyBorrowed(_)
                | CatalogError::NoOpenLoan { .. }
                | CatalogError::InvalidMemberId(_)
                | CatalogError::InvalidInput(_)
        )
    }

    /// Get user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::BookNotFound(book_id) => {
                format!("Book with ID {} not found.", book_id)
            }
            CatalogError::AlreadyBorrowed(book_id) => {
                format!("Book with ID {} is already borrowed.", book_id)
            }
            CatalogError::NoOpenLoan { member_id, book_id } => {
                format!(
                    "Member ID {} has no open loan for book with ID {}.",
                    member_id, book_id
                )
            }
            CatalogError::InvalidMemberId(_) => {
                "Invalid member ID! Please enter exactly 10 characters (e.g. MEM0000001).".to_string()
            }
            CatalogError::MemberIdsExhausted(_) => {
                "No more member IDs available.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_outcomes_are_reportable() {
        assert!(CatalogError::BookNotFound(7).is_reportable());
        assert!(CatalogError::AlreadyBorrowed(7).is_reportable());
        assert!(!CatalogError::MigrationFailed("boom".into()).is_reportable());
        assert!(!CatalogError::FileIoError("disk".into()).is_reportable());
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            CatalogError::AlreadyBorrowed(3).user_message(),
            "Book with ID 3 is already borrowed."
        );
        let err = CatalogError::NoOpenLoan {
            member_id: MemberId::new(12),
            book_id: 4,
        };
        assert_eq!(
            err.user_message(),
            "Member ID MEM0000012 has no open loan for book with ID 4."
        );
    }

    #[test]
    fn test_invalid_input_is_reportable() {
        let err = CatalogError::invalid_input("date contains a control character");
        assert!(err.is_reportable());
        assert_eq!(err.user_message(), "Invalid input: date contains a control character");
    }
}
