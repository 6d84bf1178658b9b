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


//! Library facade
//!
//! One [`Library`] owns the catalog database, the audit log and the loan
//! manager for a single catalog. Open as many as needed; they share nothing.

use crate::audit::{AuditEntry, AuditLines, AuditLog};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::loans::{LoanManager, ReturnPolicy, ReturnReceipt};
use crate::storage::{
    queries, Book, BookId, BorrowRecord, Database, Member, MemberId, NewBook, NewMember,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Library {
    db: Database,
    loans: LoanManager,
}

impl Library {
    /// Open the catalog described by `config`, creating files as needed
    pub async fn open(config: &CatalogConfig) -> Result<Self> {
        let db = Database::new(&config.database_path).await?;
        let audit = AuditLog::new(&config.audit_log_path);
        // Fail here rather than after a loan has already been committed
        audit.ensure_parent_dir().await?;
        info!(
            database = %config.database_path.display(),
            audit_log = %config.audit_log_path.display(),
            policy = ?config.return_policy,
            "catalog opened"
        );
        Ok(Self::from_parts(db, audit, config.return_policy))
    }

    pub fn from_parts(db: Database, audit: AuditLog, policy: ReturnPolicy) -> Self {
        let loans = LoanManager::new(db.clone(), audit).with_policy(policy);
        Self { db, loans }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn loans(&self) -> &LoanManager {
        &self.loans
    }

    pub async fn add_book(&self, title: &str, author: &str, year: i64) -> Result<BookId> {
        let id = queries::add_book(self.db.pool(), &NewBook::new(title, author, year)).await?;
        info!(book_id = id, title, "book added");
        Ok(id)
    }

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        queries::list_books(self.db.pool()).await
    }

    pub async fn find_book(&self, book_id: BookId) -> Result<Option<Book>> {
        queries::find_book(self.db.pool(), book_id).await
    }

    pub async fn add_member(&self, name: &str, membership_date: &str) -> Result<MemberId> {
        let id = queries::add_member(self.db.pool(), &NewMember::new(name, membership_date)).await?;
        info!(member_id = %id, name, "member added");
        Ok(id)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        queries::list_members(self.db.pool()).await
    }

    pub async fn find_member(&self, member_id: MemberId) -> Result<Option<Member>> {
        queries::find_member(self.db.pool(), member_id).await
    }

    pub async fn list_borrow_records(&self) -> Result<Vec<BorrowRecord>> {
        queries::list_borrow_records(self.db.pool()).await
    }

    pub async fn borrow(&self, member_id: MemberId, book_id: BookId, date: &str) -> Result<AuditEntry> {
        self.loans.borrow(member_id, book_id, date).await
    }

    pub async fn return_book(
        &self,
        member_id: MemberId,
        book_id: BookId,
        date: &str,
    ) -> Result<ReturnReceipt> {
        self.loans.return_book(member_id, book_id, date).await
    }

    /// Transaction history as raw log lines
    pub async fn history(&self) -> Result<AuditLines> {
        self.loans.audit_log().read_all().await
    }

    pub async fn close(self) -> Result<()> {
        self.db.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_isolated_instances() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let a = Library::open(&CatalogConfig::in_dir(dir_a.path())).await.unwrap();
        let b = Library::open(&CatalogConfig::in_dir(dir_b.path())).await.unwrap();

        a.add_book("Dune", "Herrington", 1965).await.unwrap();

        assert_eq!(a.list_books().await.unwrap().len(), 1);
        assert!(b.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_empty_before_any_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let library = Library::open(&CatalogConfig::in_dir(dir.path())).await.unwrap();

        let lines = library.history().await.unwrap().collect_lines().await.unwrap();
        assert!(lines.is_empty());
    }
}
