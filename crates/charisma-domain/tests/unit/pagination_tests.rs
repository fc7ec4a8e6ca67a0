//! Unit tests for pagination

use charisma_domain::{Page, Pagination};

#[test]
fn test_default_pagination() {
    let p = Pagination::default();
    assert_eq!((p.page, p.limit), (1, 10));
    assert_eq!(p.offset(), 0);
}

#[test]
fn test_page_slice_middle() {
    let items: Vec<u32> = (1..=25).collect();
    let page = Page::slice(items, Pagination::new(2, 10));
    assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.pages, 3);
}

#[test]
fn test_page_slice_past_end_is_empty() {
    let items: Vec<u32> = (1..=5).collect();
    let page = Page::slice(items, Pagination::new(3, 10));
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.pages, 1);
}
