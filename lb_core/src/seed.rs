//! Default reports written to an empty general collection on first run.

use crate::item::Item;

const DEFAULT_REPORTS: &[(&str, &str, &str)] = &[
    ("1", "Weekly Sales Report", "Sales Reports"),
    ("2", "Monthly Sales Report", "Sales Reports"),
    ("3", "Annual Sales Report", "Sales Reports"),
    ("4", "Sales Dashboard", "Sales Reports"),
    ("5", "Q3 Financial Summary", "Financial Reports"),
    ("6", "Annual Financial Statement", "Financial Reports"),
    ("11", "Investor Relations Deck", "Financial Reports"),
    ("12", "Expense Breakdown", "Financial Reports"),
    ("7", "Monthly User Engagement", "User Metrics"),
    ("8", "Daily Active Users", "User Metrics"),
    ("13", "User Retention Rate", "User Metrics"),
    ("14", "Churn Analysis", "User Metrics"),
    ("9", "Marketing Campaign Performance", "Marketing"),
    ("10", "Social Media Reach", "Marketing"),
    ("15", "SEO Keyword Rankings", "Marketing"),
    ("16", "Email Campaign Open Rates", "Marketing"),
];

/// The sixteen placeholder reports, grouped by department.
pub fn default_items() -> Vec<Item> {
    DEFAULT_REPORTS
        .iter()
        .map(|(id, title, group)| Item::placeholder(*id, *title).with_group(*group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_items_have_unique_ids() {
        let items = default_items();
        assert_eq!(items.len(), 16);
        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_default_items_are_placeholders() {
        assert!(default_items().iter().all(Item::has_placeholder_links));
        assert!(default_items().iter().all(|i| i.last_refreshed.is_none()));
    }
}
