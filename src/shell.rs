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


//! Interactive menu
//!
//! Text front end over a [`Library`]. Reads from any async buffered reader
//! and writes to any async writer, so the desktop binary drives it with
//! stdin/stdout and tests drive it with byte buffers.
//!
//! End of input behaves like choosing "Exit".

use crate::error::{CatalogError, Result};
use crate::library::Library;
use crate::storage::MemberId;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::error;

const MENU: &str = "
        Library Management System
        1. Add Book
        2. List Books
        3. Add Member
        4. List Members
        5. Borrow Book
        6. Return Book
        7. View Past Transactions
        8. Exit
";

const INVALID_MEMBER_ID: &str = "Invalid member ID! Please enter exactly 10 characters (e.g. MEM0000001).";

enum Flow {
    Continue,
    Exit,
}

/// Today's date in the format the catalog stores
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

pub struct Shell<R, W> {
    library: Library,
    input: Lines<R>,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(library: Library, input: R, output: W) -> Self {
        Self {
            library,
            input: input.lines(),
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until "Exit" or end of input
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.write(MENU).await?;
            let Some(choice) = self.prompt("Enter your choice: ").await? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add_book().await,
                "2" => self.list_books().await,
                "3" => self.add_member().await,
                "4" => self.list_members().await,
                "5" => self.borrow().await,
                "6" => self.return_book().await,
                "7" => self.history().await,
                "8" => Ok(Flow::Exit),
                _ => {
                    self.say("Invalid choice! Please try again.").await?;
                    Ok(Flow::Continue)
                }
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => self.report(&e).await?,
            }
        }

        self.say("Exiting...").await
    }

    async fn add_book(&mut self) -> Result<Flow> {
        let Some(title) = self.prompt("Enter book title: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Enter book author: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self
            .prompt_parsed::<i64>("Enter book publication year: ", "Invalid year! Please enter a number.")
            .await?
        else {
            return Ok(Flow::Exit);
        };

        let id = self.library.add_book(&title, &author, year).await?;
        self.say(&format!("Book \"{}\" added successfully! (ID: {})", title, id)).await?;
        Ok(Flow::Continue)
    }

    async fn list_books(&mut self) -> Result<Flow> {
        let books = self.library.list_books().await?;
        if books.is_empty() {
            self.say("No books in the catalog.").await?;
        }
        for book in books {
            self.say(&book.to_string()).await?;
        }
        Ok(Flow::Continue)
    }

    async fn add_member(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter member name: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt_date("Enter membership date (YYYY-MM-DD, blank for today): ").await? else {
            return Ok(Flow::Exit);
        };

        let id = self.library.add_member(&name, &date).await?;
        self.say(&format!("Member \"{}\" added successfully! (ID: {})", name, id)).await?;
        Ok(Flow::Continue)
    }

    async fn list_members(&mut self) -> Result<Flow> {
        let members = self.library.list_members().await?;
        if members.is_empty() {
            self.say("No members registered.").await?;
        }
        for member in members {
            self.say(&member.to_string()).await?;
        }
        Ok(Flow::Continue)
    }

    async fn borrow(&mut self) -> Result<Flow> {
        let Some((member_id, book_id)) = self.prompt_loan().await? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt_date("Enter borrow date (YYYY-MM-DD, blank for today): ").await? else {
            return Ok(Flow::Exit);
        };

        self.library.borrow(member_id, book_id, &date).await?;
        self.say(&format!("Book with ID {} borrowed by Member ID {}.", book_id, member_id))
            .await?;
        Ok(Flow::Continue)
    }

    async fn return_book(&mut self) -> Result<Flow> {
        let Some((member_id, book_id)) = self.prompt_loan().await? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self.prompt_date("Enter return date (YYYY-MM-DD, blank for today): ").await? else {
            return Ok(Flow::Exit);
        };

        self.library.return_book(member_id, book_id, &date).await?;
        self.say(&format!("Book with ID {} returned by Member ID {}.", book_id, member_id))
            .await?;
        Ok(Flow::Continue)
    }

    async fn history(&mut self) -> Result<Flow> {
        self.say("Past Transactions:").await?;
        let mut lines = self.library.history().await?;
        let mut any = false;
        while let Some(line) = lines.next_line().await? {
            any = true;
            self.say(&line).await?;
        }
        if !any {
            self.say("No transaction records found.").await?;
        }
        Ok(Flow::Continue)
    }

    async fn report(&mut self, e: &CatalogError) -> Result<()> {
        if e.is_reportable() {
            self.say(&e.user_message()).await
        } else {
            error!(error = %e, "menu action failed");
            self.say(&format!("Error: {}", e.user_message())).await
        }
    }

    // ------------------------------------------------------------------
    // prompting
    // ------------------------------------------------------------------

    async fn prompt_loan(&mut self) -> Result<Option<(MemberId, i64)>> {
        let Some(member_id) = self
            .prompt_parsed::<MemberId>("Enter member ID (10 characters): ", INVALID_MEMBER_ID)
            .await?
        else {
            return Ok(None);
        };
        let Some(book_id) = self
            .prompt_parsed::<i64>("Enter book ID: ", "Invalid book ID! Please enter a number.")
            .await?
        else {
            return Ok(None);
        };
        Ok(Some((member_id, book_id)))
    }

    async fn prompt_date(&mut self, message: &str) -> Result<Option<String>> {
        Ok(self.prompt(message).await?.map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                today()
            } else {
                raw.to_string()
            }
        }))
    }

    /// Prompt until the answer parses; `None` on end of input
    async fn prompt_parsed<T: FromStr>(&mut self, message: &str, retry: &str) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(message).await? else {
                return Ok(None);
            };
            match raw.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(retry).await?,
            }
        }
    }

    async fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        self.write(message).await?;
        Ok(self.input.next_line().await?)
    }

    async fn say(&mut self, line: &str) -> Result<()> {
        self.write(line).await?;
        self.write("\n").await
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
