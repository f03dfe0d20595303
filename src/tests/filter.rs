use crate::catalog::{self, Category, Item};
use crate::filter::filter;

fn casio() -> Item {
    Item {
        title: "Casio FX-991ES Calculator".to_string(),
        desc: "Like new condition".to_string(),
        meta: "₹400 · CSE 2nd Year".to_string(),
    }
}

#[test]
fn test_all_token_returns_input_unchanged() {
    let items = catalog::items(Category::Rides);

    assert_eq!(filter(items, "All Rides"), items);
    assert_eq!(filter(items, "all"), items);
    assert_eq!(filter(items, "ALL"), items);
}

#[test]
fn test_substring_match_includes_and_excludes() {
    let items = vec![casio()];

    assert_eq!(filter(&items, "casio").len(), 1);
    assert!(filter(&items, "xyz123").is_empty());
}

#[test]
fn test_match_is_case_insensitive_across_fields() {
    let items = vec![casio()];

    // title, desc, and meta all participate
    assert_eq!(filter(&items, "CALCULATOR").len(), 1);
    assert_eq!(filter(&items, "like new").len(), 1);
    assert_eq!(filter(&items, "cse").len(), 1);
}

#[test]
fn test_order_is_preserved() {
    let matches = filter(catalog::items(Category::Rides), "Jaipur");

    let titles: Vec<&str> = matches.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Campus → Jaipur", "Campus → Jaipur"]);

    let metas: Vec<&str> = matches.iter().map(|item| item.meta.as_str()).collect();
    assert_eq!(
        metas,
        vec![
            "₹80 per seat · Dishant Tailor",
            "₹90 per seat · Yash Agarwal"
        ]
    );
}

#[test]
fn test_no_match_returns_empty() {
    assert!(filter(catalog::items(Category::Rides), "Electronics").is_empty());
}

#[test]
fn test_status_chips_narrow_complaints() {
    let matches = filter(catalog::items(Category::Complaints), "Resolved");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "Library AC Not Working");
}
