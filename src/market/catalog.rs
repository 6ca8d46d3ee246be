use crate::common::{ProviderSummary, Role, WasteItem};

/// Category chip that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// Listings the marketplace starts with.
pub fn seed_listings() -> Vec<WasteItem> {
    vec![
        seed(
            "1",
            "Spent Coffee Grounds",
            "Food Waste",
            "50 kg/week",
            "Downtown Cafe, San Francisco, CA",
            "High-quality arabica coffee grounds, collected daily. Perfect for compost, substrate for mushroom cultivation, or bioplastic production.",
            "https://picsum.photos/seed/coffee/400/300",
            "John Doe",
        ),
        seed(
            "2",
            "Wood Chips and Sawdust",
            "Agricultural Waste",
            "2 tons",
            "Oakwood Mill, Portland, OR",
            "Mixed hardwood chips and sawdust. Available for immediate pickup. Suitable for biofuel, particleboard, or as a carbon source in composting.",
            "https://picsum.photos/seed/wood/400/300",
            "Jane Smith",
        ),
        seed(
            "3",
            "Citrus Peels",
            "Food Waste",
            "200 lbs/day",
            "Juice Factory, Miami, FL",
            "Orange and grapefruit peels from our daily juicing operations. Rich in limonene and pectin, ideal for essential oil extraction or producing biopolymers.",
            "https://picsum.photos/seed/citrus/400/300",
            "Fresh Juices Inc.",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    title: &str,
    category: &str,
    quantity: &str,
    location: &str,
    description: &str,
    image_url: &str,
    provider: &str,
) -> WasteItem {
    WasteItem {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        quantity: quantity.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        user: ProviderSummary {
            name: provider.to_string(),
            role: Role::Provider,
        },
    }
}

/// Items whose title or description contains `term` (case-insensitive) and
/// whose category equals `category`, unless it is [`ALL_CATEGORIES`].
pub fn filter_listings<'a>(items: &'a [WasteItem], term: &str, category: &str) -> Vec<&'a WasteItem> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.title.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .filter(|item| category == ALL_CATEGORIES || item.category == category)
        .collect()
}

/// "All" followed by each category in order of first appearance.
pub fn categories(items: &[WasteItem]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !out.iter().any(|existing| existing == &item.category) {
            out.push(item.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&WasteItem]) -> Vec<String> {
        items.iter().map(|item| item.title.clone()).collect()
    }

    #[test]
    fn empty_term_and_all_returns_everything() {
        let items = seed_listings();
        assert_eq!(filter_listings(&items, "", ALL_CATEGORIES).len(), 3);
    }

    #[test]
    fn term_matches_title_or_description_case_insensitively() {
        let items = seed_listings();
        assert_eq!(
            titles(&filter_listings(&items, "COFFEE", ALL_CATEGORIES)),
            vec!["Spent Coffee Grounds"]
        );
        // "pectin" only appears in a description
        assert_eq!(
            titles(&filter_listings(&items, "Pectin", ALL_CATEGORIES)),
            vec!["Citrus Peels"]
        );
    }

    #[test]
    fn term_and_category_must_both_hold() {
        let items = seed_listings();
        // "compost" appears in coffee (Food) and wood (Agricultural) descriptions
        assert_eq!(
            titles(&filter_listings(&items, "compost", "Food Waste")),
            vec!["Spent Coffee Grounds"]
        );
        assert_eq!(
            titles(&filter_listings(&items, "compost", ALL_CATEGORIES)),
            vec!["Spent Coffee Grounds", "Wood Chips and Sawdust"]
        );
        assert!(filter_listings(&items, "citrus", "Agricultural Waste").is_empty());
    }

    #[test]
    fn all_is_identity_on_category() {
        let items = seed_listings();
        for term in ["", "waste", "peels", "nothing-matches"] {
            let all = filter_listings(&items, term, ALL_CATEGORIES);
            let by_term: Vec<_> = items
                .iter()
                .filter(|item| {
                    let t = term.to_lowercase();
                    item.title.to_lowercase().contains(&t)
                        || item.description.to_lowercase().contains(&t)
                })
                .collect();
            assert_eq!(all, by_term);
        }
    }

    #[test]
    fn category_is_exact_match() {
        let items = seed_listings();
        assert!(filter_listings(&items, "", "food waste").is_empty());
        assert_eq!(filter_listings(&items, "", "Food Waste").len(), 2);
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let items = seed_listings();
        assert_eq!(
            categories(&items),
            vec!["All", "Food Waste", "Agricultural Waste"]
        );
    }
}
