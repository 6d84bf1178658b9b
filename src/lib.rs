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


//! Library catalog
//!
//! Tracks books, members and loans in SQLite and keeps a plain-text audit
//! log of every borrow and return.
//!
//! - [`storage`]: schema, models and queries
//! - [`loans`]: borrow/return transitions
//! - [`audit`]: append-only transaction log
//! - [`library`]: one handle owning all of the above
//! - [`shell`]: interactive text menu

pub mod audit;
pub mod config;
pub mod error;
pub mod library;
pub mod loans;
pub mod logging;
pub mod shell;
pub mod storage;

pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use library::Library;
pub use loans::ReturnPolicy;
