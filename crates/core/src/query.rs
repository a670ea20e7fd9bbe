//! Search request descriptor and the query-string codec.
//!
//! One codec serializes the descriptor for both the address bar and the
//! outgoing request URL. The two must never diverge — the address is the
//! replayable form of the request.

use url::form_urlencoded;

use crate::filter::FilterSet;

/// Repeatable tag-filter query parameter.
pub const TAGS_PARAM: &str = "tags";

/// Singular free-text query parameter.
pub const TEXT_PARAM: &str = "q";

/// What a search asks for: the active tag filters plus optional free text.
///
/// Derived deterministically from the current [`FilterSet`] and text-input
/// value. Empty text means no `q` parameter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDescriptor {
    pub tags: FilterSet,
    pub text: Option<String>,
}

impl SearchDescriptor {
    /// Descriptor for the given filters and text; empty text collapses to
    /// `None`.
    pub fn new(tags: FilterSet, text: impl Into<String>) -> Self {
        let text = text.into();
        let text = if text.is_empty() { None } else { Some(text) };
        SearchDescriptor { tags, text }
    }

    /// Descriptor carrying only tag filters (the full-navigation path).
    pub fn tags_only(tags: FilterSet) -> Self {
        SearchDescriptor { tags, text: None }
    }

    /// Serialize to the canonical query string, without a leading `?`:
    /// repeated `tags` pairs in set order, then `q` when text is present.
    pub fn to_query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for tag in self.tags.iter() {
            query.append_pair(TAGS_PARAM, tag);
        }
        if let Some(text) = &self.text {
            query.append_pair(TEXT_PARAM, text);
        }
        query.finish()
    }

    /// Parse a query string (leading `?` tolerated). Unknown parameters are
    /// ignored; an empty `q` counts as absent.
    pub fn from_query_string(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut tags = FilterSet::new();
        let mut text = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                TAGS_PARAM => {
                    tags.insert(value.into_owned());
                }
                TEXT_PARAM if !value.is_empty() => {
                    text = Some(value.into_owned());
                }
                _ => {}
            }
        }
        SearchDescriptor { tags, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tags_then_text() {
        let tags: FilterSet = ["dessert", "vegan"].into_iter().collect();
        let descriptor = SearchDescriptor::new(tags, "creamy soup");
        assert_eq!(
            descriptor.to_query_string(),
            "tags=dessert&tags=vegan&q=creamy+soup"
        );
    }

    #[test]
    fn empty_text_emits_no_q_parameter() {
        let tags: FilterSet = ["vegan"].into_iter().collect();
        let descriptor = SearchDescriptor::new(tags, "");
        assert_eq!(descriptor.to_query_string(), "tags=vegan");

        let empty = SearchDescriptor::default();
        assert_eq!(empty.to_query_string(), "");
    }

    #[test]
    fn parse_reads_repeated_tags_and_text() {
        let descriptor =
            SearchDescriptor::from_query_string("?tags=vegan&tags=dessert&q=soup");
        assert!(descriptor.tags.contains("vegan"));
        assert!(descriptor.tags.contains("dessert"));
        assert_eq!(descriptor.text.as_deref(), Some("soup"));
    }

    #[test]
    fn parse_ignores_unknown_params_and_empty_text() {
        let descriptor = SearchDescriptor::from_query_string("page=2&q=&tags=pp");
        assert_eq!(descriptor.tags.len(), 1);
        assert!(descriptor.tags.contains("pp"));
        assert_eq!(descriptor.text, None);
    }

    #[test]
    fn round_trips_through_the_codec() {
        let tags: FilterSet = ["gluten-free", "snack"].into_iter().collect();
        let descriptor = SearchDescriptor::new(tags, "тыквенный суп");
        let parsed = SearchDescriptor::from_query_string(&descriptor.to_query_string());
        assert_eq!(parsed, descriptor);
    }
}
