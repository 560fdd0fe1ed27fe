//! Search filtering and grouping for display.

use lb_core::Item;
use serde::Serialize;

/// Case-insensitive substring match on title or group.
pub fn matches_search(item: &Item, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty()
        || item.title.to_lowercase().contains(&needle)
        || item.group.to_lowercase().contains(&needle)
}

/// Items matching `term`, in collection order. A blank term matches all.
pub fn filter_items<'a>(items: &'a [Item], term: &str) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| matches_search(item, term))
        .collect()
}

/// Items sharing one display group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGroup {
    pub name: String,
    pub items: Vec<Item>
}

/// Groups items by display group, in order of first appearance.
///
/// Items with an empty group land under "Uncategorized".
pub fn group_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();
    for item in items {
        let name = item.display_group();
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(ItemGroup {
                name: name.to_string(),
                items: vec![item.clone()]
            })
        }
    }
    groups
}

/// Whether suggestions should be offered: a real search that found nothing.
pub fn wants_suggestions(items: &[Item], term: &str) -> bool {
    !term.trim().is_empty() && filter_items(items, term).is_empty()
}
