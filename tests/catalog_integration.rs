//! Integration tests for the library catalog
//!
//! Every test opens a catalog on real files inside a temp directory.

use library_catalog::audit::LoanAction;
use library_catalog::storage::MemberId;
use library_catalog::{CatalogConfig, CatalogError, Library, ReturnPolicy};

async fn open(dir: &tempfile::TempDir) -> Library {
    Library::open(&CatalogConfig::in_dir(dir.path()))
        .await
        .expect("Failed to open catalog")
}

async fn history(library: &Library) -> Vec<String> {
    library
        .history()
        .await
        .expect("Failed to read history")
        .collect_lines()
        .await
        .expect("Failed to read history")
}

#[tokio::test]
async fn test_dune_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let library = open(&dir).await;
    let member: MemberId = "MEM0000001".parse().unwrap();

    let book_id = library.add_book("Dune", "Herrington", 1965).await.unwrap();
    assert_eq!(book_id, 1);
    let books = library.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].status(), "Available");

    library.borrow(member, book_id, "2024-01-01").await.unwrap();
    assert!(!library.find_book(book_id).await.unwrap().unwrap().is_available);
    assert_eq!(
        history(&library).await,
        vec!["Borrowed - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-01"]
    );

    library.return_book(member, book_id, "2024-01-10").await.unwrap();
    assert!(library.find_book(book_id).await.unwrap().unwrap().is_available);
    assert_eq!(
        history(&library).await,
        vec![
            "Borrowed - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-01",
            "Returned - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-10",
        ]
    );
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let library = open(&dir).await;
        let book_id = library.add_book("Emma", "Austen", 1815).await.unwrap();
        let member = library.add_member("Ada", "2024-01-01").await.unwrap();
        library.borrow(member, book_id, "2024-02-01").await.unwrap();
        library.close().await.unwrap();
    }

    let library = open(&dir).await;
    let books = library.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].status(), "Borrowed");

    let members = library.list_members().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id.to_string(), "MEM0000001");

    let records = library.list_borrow_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_open());

    // A reopened catalog keeps appending to the same log
    library.return_book(members[0].id, books[0].id, "2024-02-10").await.unwrap();
    let entries = library.loans().audit_log().entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, LoanAction::Borrowed);
    assert_eq!(entries[1].action, LoanAction::Returned);
}

#[tokio::test]
async fn test_strict_policy_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("catalog.toml");
    std::fs::write(
        &config_path,
        format!(
            "database_path = {:?}\naudit_log_path = {:?}\nreturn_policy = \"strict\"\n",
            dir.path().join("books.db"),
            dir.path().join("loans.log"),
        ),
    )
    .unwrap();

    let config = CatalogConfig::from_toml_file(&config_path).unwrap();
    assert_eq!(config.return_policy, ReturnPolicy::Strict);

    let library = Library::open(&config).await.unwrap();
    let book_id = library.add_book("Dune", "Herrington", 1965).await.unwrap();

    let result = library
        .return_book(MemberId::new(1), book_id, "2024-01-10")
        .await;
    assert!(matches!(result, Err(CatalogError::NoOpenLoan { .. })));
    assert!(history(&library).await.is_empty());
    assert!(!dir.path().join("loans.log").exists());
}

#[tokio::test]
async fn test_repeat_loans_of_same_book() {
    let dir = tempfile::tempdir().unwrap();
    let library = open(&dir).await;
    let member = MemberId::new(3);
    let book_id = library.add_book("Dune", "Herrington", 1965).await.unwrap();

    for (out, back) in [("2024-01-01", "2024-01-05"), ("2024-02-01", "2024-02-05")] {
        library.borrow(member, book_id, out).await.unwrap();
        let receipt = library.return_book(member, book_id, back).await.unwrap();
        assert_eq!(receipt.records_closed, 1);
    }

    let records = library.list_borrow_records().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].return_date.as_deref(), Some("2024-01-05"));
    assert_eq!(records[1].return_date.as_deref(), Some("2024-02-05"));
    assert_eq!(history(&library).await.len(), 4);
}

#[tokio::test]
async fn test_audit_log_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = CatalogConfig {
        database_path: dir.path().join("library.db"),
        audit_log_path: dir.path().join("logs").join("transaction_log.txt"),
        return_policy: ReturnPolicy::Lenient,
    };

    let library = Library::open(&config).await.unwrap();
    let member: MemberId = "MEM0000001".parse().unwrap();
    let book_id = library.add_book("Dune", "Herrington", 1965).await.unwrap();

    library.borrow(member, book_id, "2024-01-01").await.unwrap();
    library.return_book(member, book_id, "2024-01-10").await.unwrap();

    assert!(config.audit_log_path.exists());
    assert_eq!(
        history(&library).await,
        vec![
            "Borrowed - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-01",
            "Returned - Member ID: MEM0000001, Book ID: 1, Date: 2024-01-10",
        ]
    );
    assert!(library.find_book(book_id).await.unwrap().unwrap().is_available);
}
