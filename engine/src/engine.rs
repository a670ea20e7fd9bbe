//! Orchestrator — wires page interactions to filter state, the address
//! bar, the debounced scheduler, and the cancellable search request.
//!
//! Ordering and cancellation policy in one place: filter commits (quick
//! tags, panel apply/clear, reset) navigate with a full reload and never
//! debounce; text-driven searches debounce, supersede any in-flight
//! request, and rewrite the address in place before the request goes out,
//! so the address is always the replayable form of the search.

use std::sync::Arc;

use forage_core::filter::FilterSet;
use forage_core::panel::ExtraTagsPanel;
use forage_core::query::SearchDescriptor;
use tracing::{debug, warn};

use crate::address::AddressBar;
use crate::debounce::Debouncer;
use crate::page::{EngineConfig, PageBindings};
use crate::render::ResultsSink;
use crate::search::SearchClient;

/// A discrete page interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Always-visible tag button clicked.
    QuickTagClicked(String),
    /// Extra-tags panel toggle button.
    PanelToggleClicked,
    /// Checkbox inside the panel changed.
    PanelCheckboxChanged { value: String, checked: bool },
    /// Panel apply button.
    PanelApplyClicked,
    /// Panel clear button.
    PanelClearClicked,
    /// Outside click or escape key while the panel is open.
    PanelDismissed,
    /// Reset-all control.
    ResetAllClicked,
    /// Free-text input changed.
    TextChanged(String),
    /// Search form submitted.
    FormSubmitted,
    /// Clear-search control.
    ClearSearchClicked,
}

/// Collaborators a search still touches after its suspension points.
struct SearchContext {
    client: SearchClient,
    address: Arc<dyn AddressBar>,
    results: Arc<dyn ResultsSink>,
    search_url: String,
}

/// One engine instance per listing page. Owns all attachment points and
/// the single in-flight-request slot.
pub struct SearchEngine {
    filters: FilterSet,
    text: String,
    panel: Option<ExtraTagsPanel>,
    listing_path: String,
    debouncer: Debouncer,
    ctx: Arc<SearchContext>,
}

impl SearchEngine {
    /// Construct the engine from its page anchors. Returns `None` when a
    /// required anchor (results target, search URL) is absent — the page
    /// then has no live search, which is not an error. The committed
    /// filter set and text value are read back from the current address.
    pub fn mount(config: EngineConfig, bindings: PageBindings) -> Option<SearchEngine> {
        let results = match bindings.results {
            Some(results) => results,
            None => {
                debug!("no results target, search engine stays inert");
                return None;
            }
        };
        let search_url = match bindings.search_url {
            Some(url) => url,
            None => {
                debug!("no search endpoint configured, search engine stays inert");
                return None;
            }
        };

        let mut descriptor = SearchDescriptor::from_query_string(&bindings.address.query());
        if let Some(catalog) = &config.catalog {
            descriptor.tags = catalog.normalize(descriptor.tags.iter()).into_iter().collect();
        }
        let filters = descriptor.tags;
        let text = descriptor.text.unwrap_or_default();

        let panel = bindings.extra_tags.map(|governs| {
            let mut panel = ExtraTagsPanel::new(governs);
            panel.seed_from(&filters);
            panel
        });

        Some(SearchEngine {
            filters,
            text,
            panel,
            listing_path: config.listing_path,
            debouncer: Debouncer::new(config.debounce),
            ctx: Arc::new(SearchContext {
                client: SearchClient::new(bindings.transport),
                address: bindings.address,
                results,
                search_url,
            }),
        })
    }

    /// Committed filter set.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Current text-input value as the engine models it.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the extra-tags panel is open. False when the page has none.
    pub fn panel_open(&self) -> bool {
        self.panel.as_ref().is_some_and(ExtraTagsPanel::is_open)
    }

    /// Live checkbox tally for the panel's count badge.
    pub fn badge_count(&self) -> usize {
        self.panel.as_ref().map_or(0, ExtraTagsPanel::badge_count)
    }

    /// Route one interaction.
    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::QuickTagClicked(id) => {
                self.filters = self.filters.toggle(&id);
                self.navigate_current_filters();
            }
            PageEvent::PanelToggleClicked => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.toggle();
                }
            }
            PageEvent::PanelCheckboxChanged { value, checked } => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.set_checked(&value, checked);
                }
            }
            PageEvent::PanelApplyClicked => {
                let committed = self.panel.as_mut().map(|panel| panel.apply(&self.filters));
                if let Some(committed) = committed {
                    self.filters = committed;
                    self.navigate_current_filters();
                }
            }
            PageEvent::PanelClearClicked => {
                let committed = self.panel.as_mut().map(|panel| panel.clear(&self.filters));
                if let Some(committed) = committed {
                    self.filters = committed;
                    self.navigate_current_filters();
                }
            }
            PageEvent::PanelDismissed => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.dismiss();
                }
            }
            PageEvent::ResetAllClicked => {
                self.filters = FilterSet::new();
                self.navigate_current_filters();
            }
            PageEvent::TextChanged(value) => {
                self.text = value;
                self.schedule_dispatch();
            }
            PageEvent::FormSubmitted => {
                self.text = self.text.trim().to_string();
                self.dispatch_now();
            }
            PageEvent::ClearSearchClicked => {
                self.text.clear();
                self.dispatch_now();
            }
        }
    }

    /// Full reload carrying the filter set only; the server re-render owns
    /// the rest of the page state.
    fn navigate_current_filters(&self) {
        let query = SearchDescriptor::tags_only(self.filters.clone()).to_query_string();
        let location = if query.is_empty() {
            self.listing_path.clone()
        } else {
            format!("{}?{query}", self.listing_path)
        };
        self.ctx.address.navigate(&location);
    }

    /// Snapshot the current state as the request descriptor. Every newer
    /// input event reschedules, so a debounced snapshot is always the value
    /// present at the final event of the burst.
    fn descriptor(&self) -> SearchDescriptor {
        SearchDescriptor::new(self.filters.clone(), self.text.clone())
    }

    fn schedule_dispatch(&self) {
        let ctx = Arc::clone(&self.ctx);
        let descriptor = self.descriptor();
        self.debouncer.schedule(async move {
            dispatch_search(ctx, descriptor).await;
        });
    }

    /// Submit path: never waits out the debounce window, and cancels the
    /// pending debounced dispatch so it does not also fire afterwards.
    fn dispatch_now(&self) {
        self.debouncer.cancel_pending();
        let ctx = Arc::clone(&self.ctx);
        let descriptor = self.descriptor();
        tokio::spawn(async move {
            dispatch_search(ctx, descriptor).await;
        });
    }
}

/// Build the canonical query string once, mirror it into the address
/// (replace semantics), then run the request through the supersede gate.
async fn dispatch_search(ctx: Arc<SearchContext>, descriptor: SearchDescriptor) {
    let query = descriptor.to_query_string();
    ctx.address.replace_query(&query);
    let url = if query.is_empty() {
        ctx.search_url.clone()
    } else {
        format!("{}?{query}", ctx.search_url)
    };
    match ctx.client.dispatch(&url).await {
        Ok(html) => ctx.results.replace(&html),
        Err(err) if err.is_superseded() => {
            debug!(url = url.as_str(), "search superseded, response discarded");
        }
        Err(err) => {
            warn!(error = %err, url = url.as_str(), "search failed, results left unchanged");
        }
    }
}
