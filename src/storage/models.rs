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


//! Database models
//!
//! Row types for the three catalog tables plus the insert payloads.
//!
//! # Design Notes
//! - Dates are kept as the text the user typed; no calendar validation
//! - `is_available` is stored as INTEGER 0/1 and decoded as `bool`
//! - Members are addressed by card number (`MEM` + 7 digits) outside the database

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Book primary key
pub type BookId = i64;

/// Prefix of a member card number
pub const MEMBER_ID_PREFIX: &str = "MEM";

/// Total length of a member card number
pub const MEMBER_ID_LEN: usize = 10;

const MEMBER_ID_DIGITS: usize = MEMBER_ID_LEN - MEMBER_ID_PREFIX.len();

/// Largest member id that still fits a card number
pub const MAX_MEMBER_ID: i64 = 9_999_999;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Member identifier
///
/// Stored as the integer row id of `Members`. Shown and parsed as a
/// 10-character card number, e.g. id 1 is `MEM0000001`. Ids above
/// [`MAX_MEMBER_ID`] are never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        MemberId(id)
    }

    /// Underlying row id
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", MEMBER_ID_PREFIX, self.0, width = MEMBER_ID_DIGITS)
    }
}

impl FromStr for MemberId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != MEMBER_ID_LEN {
            return Err(CatalogError::InvalidMemberId(s.to_string()));
        }

        let digits = s
            .strip_prefix(MEMBER_ID_PREFIX)
            .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| CatalogError::InvalidMemberId(s.to_string()))?;

        digits
            .parse::<i64>()
            .map(MemberId)
            .map_err(|_| CatalogError::InvalidMemberId(s.to_string()))
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Book row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub is_available: bool,
}

impl Book {
    /// Human-readable availability
    pub fn status(&self) -> &'static str {
        if self.is_available {
            "Available"
        } else {
            "Borrowed"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id,
            self.title,
            self.author,
            self.year,
            self.status()
        )
    }
}

/// Data for inserting a new book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Member row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub membership_date: String,
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Membership Date: {}",
            self.id, self.name, self.membership_date
        )
    }
}

/// Data for inserting a new member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub membership_date: String,
}

impl NewMember {
    pub fn new(name: impl Into<String>, membership_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            membership_date: membership_date.into(),
        }
    }
}

/// Borrow table row
///
/// Open while `return_date` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BorrowRecord {
    pub member_id: MemberId,
    pub book_id: BookId,
    pub borrow_date: String,
    pub return_date: Option<String>,
}

impl BorrowRecord {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_display() {
        assert_eq!(MemberId::new(1).to_string(), "MEM0000001");
        assert_eq!(MemberId::new(1234567).to_string(), "MEM1234567");

        let last = MemberId::new(MAX_MEMBER_ID).to_string();
        assert_eq!(last.len(), MEMBER_ID_LEN);
        assert_eq!(last.parse::<MemberId>().unwrap().get(), MAX_MEMBER_ID);
    }

    #[test]
    fn test_member_id_parse() {
        let id: MemberId = "MEM0000042".parse().unwrap();
        assert_eq!(id.get(), 42);

        // Surrounding whitespace from terminal input is tolerated
        let id: MemberId = " MEM0000007\n".parse().unwrap();
        assert_eq!(id.get(), 7);
    }

    #[test]
    fn test_member_id_rejects_wrong_shape() {
        for input in ["", "MEM001", "MEM00000001", "ABC0000001", "MEM00000x1", "1234567890"] {
            let result = input.parse::<MemberId>();
            assert!(
                matches!(result, Err(CatalogError::InvalidMemberId(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_book_status() {
        let mut book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herrington".to_string(),
            year: 1965,
            is_available: true,
        };
        assert_eq!(book.status(), "Available");
        assert_eq!(
            book.to_string(),
            "ID: 1, Title: Dune, Author: Herrington, Year: 1965, Status: Available"
        );

        book.is_available = false;
        assert_eq!(book.status(), "Borrowed");
    }
}
