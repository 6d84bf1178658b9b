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


//! Audit log line format

use crate::error::CatalogError;
use crate::storage::models::{BookId, MemberId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanAction {
    Borrowed,
    Returned,
}

impl LoanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanAction::Borrowed => "Borrowed",
            LoanAction::Returned => "Returned",
        }
    }
}

impl fmt::Display for LoanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanAction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Borrowed" => Ok(LoanAction::Borrowed),
            "Returned" => Ok(LoanAction::Returned),
            other => Err(CatalogError::InvalidAuditEntry(format!("unknown action '{}'", other))),
        }
    }
}

/// One audit log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: LoanAction,
    pub member_id: MemberId,
    pub book_id: BookId,
    pub date: String,
}

impl AuditEntry {
    pub fn new(action: LoanAction, member_id: MemberId, book_id: BookId, date: impl Into<String>) -> Self {
        Self {
            action,
            member_id,
            book_id,
            date: date.into(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Member ID: {}, Book ID: {}, Date: {}",
            self.action, self.member_id, self.book_id, self.date
        )
    }
}

impl FromStr for AuditEntry {
    type Err = CatalogError;

    /// Parse `<Action> - Member ID: <id>, Book ID: <id>, Date: <date>`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || CatalogError::InvalidAuditEntry(line.to_string());

        let (action, rest) = line.split_once(" - Member ID: ").ok_or_else(malformed)?;
        let (member, rest) = rest.split_once(", Book ID: ").ok_or_else(malformed)?;
        let (book, date) = rest.split_once(", Date: ").ok_or_else(malformed)?;

        Ok(Self {
            action: action.parse()?,
            member_id: member.parse().map_err(|_| malformed())?,
            book_id: book.trim().parse().map_err(|_| malformed())?,
            date: date.trim_end().to_string(),
        })
    }
}
