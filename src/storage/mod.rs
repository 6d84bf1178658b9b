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


//! Catalog storage
//!
//! This module handles all database operations using SQLite through sqlx.
//!
//! # Database Schema
//! - Books: catalog entries with an availability flag
//! - Members: registered borrowers
//! - Borrow: loan records, open while `return_date` is NULL
//!
//! # Usage Example
//! ```no_run
//! use library_catalog::storage::{Database, queries, NewBook};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./library.db").await?;
//!
//! let book_id = queries::add_book(db.pool(), &NewBook::new("Dune", "Herrington", 1965)).await?;
//! let book = queries::find_book(db.pool(), book_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::{Book, BookId, BorrowRecord, Member, MemberId, NewBook, NewMember};
