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


//! Database query functions
//!
//! # Query Patterns
//! - Catalog reads/inserts take the pool and auto-commit
//! - Loan row helpers take a connection so the loan manager can run them
//!   inside one transaction (`&mut tx` derefs to the connection)
//! - Listings are ordered by rowid, i.e. insertion order

use crate::error::{CatalogError, Result};
use crate::storage::models::*;
use sqlx::{SqliteConnection, SqlitePool};

// ============================================================================
// BOOK QUERIES
// ============================================================================

/// Insert a new book
///
/// Returns the id of the inserted book. New books are available.
pub async fn add_book(pool: &SqlitePool, book: &NewBook) -> Result<BookId> {
    let result = sqlx::query("INSERT INTO Books (title, author, year) VALUES (?, ?, ?)")
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Find book by ID
pub async fn find_book(pool: &SqlitePool, book_id: BookId) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, year, is_available FROM Books WHERE id = ?",
    )
    .bind(book_id)
    .fetch_optional(pool)
    .await?;

    Ok(book)
}

/// List all books in insertion order
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, year, is_available FROM Books ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(books)
}

/// Availability flag of a book, `None` if the book does not exist
pub async fn book_availability(conn: &mut SqliteConnection, book_id: BookId) -> Result<Option<bool>> {
    let available = sqlx::query_scalar::<_, bool>("SELECT is_available FROM Books WHERE id = ?")
        .bind(book_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(available)
}

/// Set a book's availability flag
///
/// Returns the number of rows touched (0 if the book does not exist).
pub async fn set_book_availability(
    conn: &mut SqliteConnection,
    book_id: BookId,
    is_available: bool,
) -> Result<u64> {
    let result = sqlx::query("UPDATE Books SET is_available = ? WHERE id = ?")
        .bind(is_available)
        .bind(book_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

// ============================================================================
// MEMBER QUERIES
// ============================================================================

/// Insert a new member
///
/// Fails with `MemberIdsExhausted`, leaving the table untouched, once the
/// next id would no longer fit a 10-character card number.
pub async fn add_member(pool: &SqlitePool, member: &NewMember) -> Result<MemberId> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO Members (name, membership_date) VALUES (?, ?)")
        .bind(&member.name)
        .bind(&member.membership_date)
        .execute(&mut *tx)
        .await?;

    let id = result.last_insert_rowid();
    if id > MAX_MEMBER_ID {
        // Dropping `tx` rolls the insert back
        return Err(CatalogError::MemberIdsExhausted(id));
    }

    tx.commit().await?;
    Ok(MemberId::new(id))
}

/// Find member by ID
pub async fn find_member(pool: &SqlitePool, member_id: MemberId) -> Result<Option<Member>> {
    let member = sqlx::query_as::<_, Member>(
        "SELECT id, name, membership_date FROM Members WHERE id = ?",
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await?;

    Ok(member)
}

/// List all members in insertion order
pub async fn list_members(pool: &SqlitePool) -> Result<Vec<Member>> {
    let members = sqlx::query_as::<_, Member>(
        "SELECT id, name, membership_date FROM Members ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(members)
}

// ============================================================================
// BORROW QUERIES
// ============================================================================

/// Insert an open borrow record
pub async fn insert_borrow_record(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    book_id: BookId,
    borrow_date: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO Borrow (member_id, book_id, borrow_date) VALUES (?, ?, ?)")
        .bind(member_id)
        .bind(book_id)
        .bind(borrow_date)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Close every open record for (member, book)
///
/// Returns the number of records closed; zero is not an error here.
pub async fn close_borrow_records(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    book_id: BookId,
    return_date: &str,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE Borrow SET return_date = ?
        WHERE member_id = ? AND book_id = ? AND return_date IS NULL
        "#,
    )
    .bind(return_date)
    .bind(member_id)
    .bind(book_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Count open records for (member, book)
pub async fn open_borrow_count(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    book_id: BookId,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM Borrow WHERE member_id = ? AND book_id = ? AND return_date IS NULL",
    )
    .bind(member_id)
    .bind(book_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}

/// List all borrow records in insertion order
pub async fn list_borrow_records(pool: &SqlitePool) -> Result<Vec<BorrowRecord>> {
    let records = sqlx::query_as::<_, BorrowRecord>(
        "SELECT member_id, book_id, borrow_date, return_date FROM Borrow ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}
