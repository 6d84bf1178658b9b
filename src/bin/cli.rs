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


use anyhow::Context;
use clap::{Parser, Subcommand};
use library_catalog::shell::{today, Shell};
use library_catalog::storage::MemberId;
use library_catalog::{logging, CatalogConfig, CatalogError, Library, ReturnPolicy};
use std::path::PathBuf;
use tokio::io::BufReader;

#[derive(Parser)]
#[command(name = "library-cli")]
#[command(about = "Library catalog - books, members and loans", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Transaction log file (overrides config)
    #[arg(long, global = true)]
    audit_log: Option<PathBuf>,

    /// Return policy (overrides config)
    #[arg(long, global = true, value_enum)]
    return_policy: Option<ReturnPolicy>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to the catalog
    AddBook {
        title: String,
        author: String,
        year: i64,
    },
    /// List all books with their availability
    ListBooks,
    /// Register a member
    AddMember {
        name: String,
        /// Membership date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all members
    ListMembers,
    /// Lend a book to a member
    Borrow {
        /// Member card number, e.g. MEM0000001
        member_id: MemberId,
        book_id: i64,
        /// Borrow date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Take a book back
    Return {
        /// Member card number, e.g. MEM0000001
        member_id: MemberId,
        book_id: i64,
        /// Return date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Print the transaction log
    History,
    /// Interactive menu (default)
    Shell,
}

impl Cli {
    fn catalog_config(&self) -> anyhow::Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CatalogConfig::default(),
        };

        if let Some(path) = &self.database {
            config.database_path = path.clone();
        }
        if let Some(path) = &self.audit_log {
            config.audit_log_path = path.clone();
        }
        if let Some(policy) = self.return_policy {
            config.return_policy = policy;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let config = cli.catalog_config()?;
    let library = Library::open(&config)
        .await
        .with_context(|| format!("opening catalog {}", config.database_path.display()))?;

    let outcome = run(&library, cli.command.unwrap_or(Commands::Shell)).await;
    library.close().await?;

    match outcome {
        Err(e) if e.is_reportable() => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
        other => Ok(other?),
    }
}

async fn run(library: &Library, command: Commands) -> Result<(), CatalogError> {
    match command {
        Commands::AddBook { title, author, year } => {
            let id = library.add_book(&title, &author, year).await?;
            println!("Book \"{}\" added successfully! (ID: {})", title, id);
        }
        Commands::ListBooks => {
            for book in library.list_books().await? {
                println!("{}", book);
            }
        }
        Commands::AddMember { name, date } => {
            let date = date.unwrap_or_else(today);
            let id = library.add_member(&name, &date).await?;
            println!("Member \"{}\" added successfully! (ID: {})", name, id);
        }
        Commands::ListMembers => {
            for member in library.list_members().await? {
                println!("{}", member);
            }
        }
        Commands::Borrow { member_id, book_id, date } => {
            let date = date.unwrap_or_else(today);
            library.borrow(member_id, book_id, &date).await?;
            println!("Book with ID {} borrowed by Member ID {}.", book_id, member_id);
        }
        Commands::Return { member_id, book_id, date } => {
            let date = date.unwrap_or_else(today);
            let receipt = library.return_book(member_id, book_id, &date).await?;
            println!("Book with ID {} returned by Member ID {}.", book_id, member_id);
            if receipt.records_closed == 0 {
                eprintln!("Note: no open loan matched this return.");
            }
        }
        Commands::History => {
            println!("Past Transactions:");
            let lines = library.history().await?.collect_lines().await?;
            if lines.is_empty() {
                println!("No transaction records found.");
            }
            for line in lines {
                println!("{}", line);
            }
        }
        Commands::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut shell = Shell::new(library.clone(), stdin, tokio::io::stdout());
            shell.run().await?;
        }
    }

    Ok(())
}
