//! Forage core — pure data model for the faceted search engine.
//!
//! Everything in this crate is synchronous and side-effect free; the async
//! components (debounce, requests, address synchronization) live in
//! `forage-engine` and drive these types.
//!
//! # Modules
//!
//! - [`filter`] — the active tag-filter set
//! - [`query`] — search request descriptor + query-string codec
//! - [`panel`] — extra-tags dropdown state machine
//! - [`tags`] — tag catalog and normalization

pub mod filter;
pub mod panel;
pub mod query;
pub mod tags;

pub use filter::FilterSet;
pub use panel::{ExtraTagsPanel, PanelState};
pub use query::SearchDescriptor;
pub use tags::{Tag, TagCatalog};
