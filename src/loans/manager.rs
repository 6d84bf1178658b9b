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


use crate::audit::{AuditEntry, AuditLog, LoanAction};
use crate::error::{CatalogError, Result};
use crate::loans::ReturnPolicy;
use crate::storage::{queries, BookId, Database, MemberId};
use tracing::{info, warn};

/// Result of a completed return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    /// Entry written to the audit log
    pub entry: AuditEntry,
    /// Open borrow records closed by this return (0 under lenient policy
    /// when nothing was on loan)
    pub records_closed: u64,
}

/// Applies borrow/return transitions to the catalog
#[derive(Debug, Clone)]
pub struct LoanManager {
    db: Database,
    audit: AuditLog,
    policy: ReturnPolicy,
}

impl LoanManager {
    pub fn new(db: Database, audit: AuditLog) -> Self {
        Self {
            db,
            audit,
            policy: ReturnPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReturnPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// Lend a book to a member
    ///
    /// # Errors
    /// - `BookNotFound` if `book_id` does not exist
    /// - `AlreadyBorrowed` if the book is out
    /// - `InvalidInput` if the date contains a control character
    ///
    /// No error writes anything.
    pub async fn borrow(
        &self,
        member_id: MemberId,
        book_id: BookId,
        borrow_date: &str,
    ) -> Result<AuditEntry> {
        check_date(borrow_date)?;
        let mut tx = self.db.pool().begin().await?;

        // Early returns drop `tx`, which rolls it back
        match queries::book_availability(&mut tx, book_id).await? {
            None => return Err(CatalogError::BookNotFound(book_id)),
            Some(false) => return Err(CatalogError::AlreadyBorrowed(book_id)),
            Some(true) => {}
        }

        queries::insert_borrow_record(&mut tx, member_id, book_id, borrow_date).await?;
        queries::set_book_availability(&mut tx, book_id, false).await?;
        tx.commit().await?;

        let entry = AuditEntry::new(LoanAction::Borrowed, member_id, book_id, borrow_date);
        self.audit.append(&entry).await?;

        info!(%member_id, book_id, date = borrow_date, "book borrowed");
        Ok(entry)
    }

    /// Take a book back from a member
    ///
    /// Under [`ReturnPolicy::Lenient`] this always succeeds: the book is
    /// marked available (a no-op for unknown ids), every open record for the
    /// pair is closed, and a `Returned` entry is logged even when no record
    /// matched.
    ///
    /// Under [`ReturnPolicy::Strict`] an unknown book yields `BookNotFound`
    /// and a pair without an open record yields `NoOpenLoan`; nothing is
    /// written in either case.
    ///
    /// A date containing a control character is rejected with
    /// `InvalidInput` under both policies.
    pub async fn return_book(
        &self,
        member_id: MemberId,
        book_id: BookId,
        return_date: &str,
    ) -> Result<ReturnReceipt> {
        check_date(return_date)?;
        let mut tx = self.db.pool().begin().await?;

        if self.policy == ReturnPolicy::Strict {
            if queries::book_availability(&mut tx, book_id).await?.is_none() {
                return Err(CatalogError::BookNotFound(book_id));
            }
            if queries::open_borrow_count(&mut tx, member_id, book_id).await? == 0 {
                return Err(CatalogError::NoOpenLoan { member_id, book_id });
            }
        }

        queries::set_book_availability(&mut tx, book_id, true).await?;
        let records_closed =
            queries::close_borrow_records(&mut tx, member_id, book_id, return_date).await?;
        tx.commit().await?;

        if records_closed == 0 {
            warn!(%member_id, book_id, "return matched no open borrow record");
        }

        let entry = AuditEntry::new(LoanAction::Returned, member_id, book_id, return_date);
        self.audit.append(&entry).await?;

        info!(%member_id, book_id, date = return_date, records_closed, "book returned");
        Ok(ReturnReceipt {
            entry,
            records_closed,
        })
    }
}

/// Dates are stored as typed, but each audit entry must stay on one line
fn check_date(date: &str) -> Result<()> {
    if date.chars().any(char::is_control) {
        return Err(CatalogError::invalid_input(format!(
            "date {:?} contains a control character",
            date
        )));
    }
    Ok(())
}
