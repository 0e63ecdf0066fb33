//! Role Facade Integration Tests
//!
//! Tests that manager and borrower facades share one catalog and each
//! expose their own capabilities.

use shelf::{Borrower, Browse, Lookup, Manager, Role, SharedCatalog};
use tempfile::TempDir;

fn open_shared() -> (SharedCatalog, TempDir) {
    let temp = TempDir::new().unwrap();
    let shared = SharedCatalog::open(temp.path().join("BooksFile")).unwrap();
    (shared, temp)
}

#[test]
fn test_facades_see_each_others_changes() {
    let (shared, _temp) = open_shared();
    let manager = Manager::new(shared.clone());
    let borrower = Borrower::new(shared);

    manager.add_book("Orwell", "1984").unwrap();
    assert_eq!(borrower.list_authors(), vec!["Orwell".to_string()]);

    assert!(borrower.check_out("Orwell", "1984").unwrap());
    assert!(!manager.is_available(0, 0).unwrap());
}

#[test]
fn test_borrower_uses_record_identity() {
    let (shared, _temp) = open_shared();
    let manager = Manager::new(shared.clone());
    let borrower = Borrower::new(shared);

    manager.add_book("Orwell", "1984").unwrap();
    manager.add_book("Orwell", "Animal Farm").unwrap();

    let picked = borrower.books_of(0).unwrap()[1].clone();
    assert_eq!(picked.author(), "Orwell");

    assert!(borrower.check_out_record(&picked).unwrap());
    assert_eq!(borrower.lookup("Orwell", "Animal Farm"), Lookup::CheckedOut);

    assert!(borrower.return_record(&picked).unwrap());
    assert_eq!(borrower.lookup("Orwell", "Animal Farm"), Lookup::Available);
}

#[test]
fn test_stale_record_after_removal_is_a_no_op() {
    let (shared, _temp) = open_shared();
    let manager = Manager::new(shared.clone());
    let borrower = Borrower::new(shared);

    manager.add_book("Orwell", "1984").unwrap();
    let picked = borrower.books_of(0).unwrap()[0].clone();

    assert!(manager.remove_book("Orwell", "1984").unwrap());

    assert!(!borrower.check_out_record(&picked).unwrap());
    assert_eq!(borrower.lookup("Orwell", "1984"), Lookup::AuthorNotFound);
    assert!(borrower.books_of(0).is_err());
}

#[test]
fn test_greetings_follow_role() {
    let (shared, _temp) = open_shared();
    let manager = Manager::new(shared.clone());
    let borrower = Borrower::new(shared);

    assert_eq!(manager.role(), Role::Manager);
    assert_eq!(borrower.role(), Role::Borrower);
    assert_eq!(manager.greeting(), "Hello, manager!");
    assert_eq!(borrower.greeting(), "Hello, borrower!");
}

#[test]
fn test_browse_through_trait_object() {
    let (shared, _temp) = open_shared();
    Manager::new(shared.clone()).add_book("Huxley", "Island").unwrap();

    let views: Vec<Box<dyn Browse>> = vec![
        Box::new(Manager::new(shared.clone())),
        Box::new(Borrower::new(shared)),
    ];

    for view in &views {
        assert_eq!(view.list_authors(), vec!["Huxley".to_string()]);
        assert!(view.is_available(0, 0).unwrap());
    }
}
