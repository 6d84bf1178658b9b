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


//! Borrow/return transitions
//!
//! # State Machine (per book)
//! ```text
//! Available --borrow--> Borrowed --return--> Available
//! ```
//!
//! Borrow is guarded: unknown books and books already out are rejected
//! without touching the catalog or the audit log. Return is guarded only
//! under [`ReturnPolicy::Strict`].
//!
//! Each transition runs in one SQL transaction; the audit entry is appended
//! after commit.

pub mod manager;

pub use manager::{LoanManager, ReturnReceipt};

use serde::{Deserialize, Serialize};

/// How strictly `return_book` checks its arguments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReturnPolicy {
    /// Always mark the book available, close whatever open records match and
    /// log the return, even if nothing was on loan.
    #[default]
    Lenient,
    /// Reject returns of unknown books or books the member has no open loan for.
    Strict,
}
