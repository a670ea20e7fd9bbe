//! Tag catalog — the known filter vocabulary and its normalization rules.

use serde::{Deserialize, Serialize};

/// One catalog entry: machine value plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub value: String,
    pub label: String,
}

impl Tag {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Tag { value: value.into(), label: label.into() }
    }
}

/// The tag vocabulary the listing page knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    pub fn new(tags: Vec<Tag>) -> Self {
        TagCatalog { tags }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn contains(&self, value: &str) -> bool {
        self.tags.iter().any(|tag| tag.value == value)
    }

    pub fn label(&self, value: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.value == value)
            .map(|tag| tag.label.as_str())
    }

    /// Drop unknown values and duplicates, preserving first-seen order.
    pub fn normalize<'a, I>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: Vec<String> = Vec::new();
        for value in values {
            if !self.contains(value) {
                continue;
            }
            if seen.iter().any(|kept| kept == value) {
                continue;
            }
            seen.push(value.to_string());
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TagCatalog {
        TagCatalog::new(vec![
            Tag::new("breakfast", "Breakfast"),
            Tag::new("lunch", "Lunch"),
            Tag::new("dinner", "Dinner"),
            Tag::new("dessert", "Dessert"),
            Tag::new("snack", "Snack"),
            Tag::new("pp", "Healthy"),
        ])
    }

    #[test]
    fn normalize_drops_unknown_values() {
        let kept = catalog().normalize(["breakfast", "bogus", "dinner"]);
        assert_eq!(kept, vec!["breakfast", "dinner"]);
    }

    #[test]
    fn normalize_dedupes_preserving_first_seen_order() {
        let kept = catalog().normalize(["snack", "pp", "snack", "pp"]);
        assert_eq!(kept, vec!["snack", "pp"]);
    }

    #[test]
    fn label_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.label("dessert"), Some("Dessert"));
        assert_eq!(catalog.label("bogus"), None);
    }
}
