use crate::catalog::Item;

/// Narrows a list by a filter-chip token.
///
/// A token that is (or contains) the word "all" passes the input through
/// unchanged. Anything else keeps the items whose title, desc, or meta
/// contains the token, case-insensitive, original order preserved.
pub fn filter(items: &[Item], token: &str) -> Vec<Item> {
    let token = token.trim().to_lowercase();

    if token.contains("all") {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&token)
                || item.desc.to_lowercase().contains(&token)
                || item.meta.to_lowercase().contains(&token)
        })
        .cloned()
        .collect()
}
