//! Attachment points and engine configuration.
//!
//! The listing page hands the engine its anchors at mount time. Optional
//! anchors model the page tolerating absent elements: when a required
//! anchor is missing the whole feature stays inert, which is a valid
//! configuration rather than an error.

use std::sync::Arc;
use std::time::Duration;

use forage_core::tags::TagCatalog;

use crate::address::AddressBar;
use crate::debounce::DEBOUNCE_MS;
use crate::render::ResultsSink;
use crate::search::Transport;

/// Engine tuning and page-level configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path full navigations target (the server-rendered listing).
    pub listing_path: String,
    /// Delay before a text-input burst dispatches.
    pub debounce: Duration,
    /// Known tag vocabulary. When present, filters read from the address at
    /// mount are normalized against it, the way the server normalizes
    /// incoming `tags` parameters.
    pub catalog: Option<TagCatalog>,
}

impl EngineConfig {
    pub fn new(listing_path: impl Into<String>) -> Self {
        EngineConfig {
            listing_path: listing_path.into(),
            debounce: Duration::from_millis(DEBOUNCE_MS),
            catalog: None,
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    pub fn with_catalog(mut self, catalog: TagCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

/// Page anchors handed to [`crate::engine::SearchEngine::mount`].
///
/// `results` and `search_url` are required for the engine to come alive;
/// the extra-tags panel is optional independently of them.
pub struct PageBindings {
    /// The navigable address, owned by the platform.
    pub address: Arc<dyn AddressBar>,
    /// Results container target. Absent on pages without a listing.
    pub results: Option<Arc<dyn ResultsSink>>,
    /// Network seam the search request goes through.
    pub transport: Arc<dyn Transport>,
    /// Search endpoint, carried as configuration data by the form element.
    pub search_url: Option<String>,
    /// Option values governed by the extra-tags panel, when the page has
    /// one. See [`parse_extra_tags`] for the comma-separated form the
    /// panel element carries.
    pub extra_tags: Option<Vec<String>>,
}

/// Split the comma-separated option list the extra-tags panel carries.
/// Blank entries are dropped; an all-blank list means no panel.
pub fn parse_extra_tags(raw: &str) -> Option<Vec<String>> {
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extra_tags_splits_and_trims() {
        assert_eq!(
            parse_extra_tags("snack, pp,gluten-free"),
            Some(vec!["snack".into(), "pp".into(), "gluten-free".into()])
        );
    }

    #[test]
    fn blank_lists_mean_no_panel() {
        assert_eq!(parse_extra_tags(""), None);
        assert_eq!(parse_extra_tags(" , ,"), None);
    }
}
