//! Test harness for engine integration tests.
//!
//! Mounts a full page over in-memory collaborators: a scripted transport
//! with virtual-clock delays, a memory address bar, and a recording
//! results sink. Tests drive [`TestPage::engine`] and assert against the
//! recorded traffic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use forage_engine::search::TransportFuture;
use forage_engine::{
    AddressBar, EngineConfig, MemoryAddressBar, MemoryResults, PageBindings, ResultsSink,
    SearchEngine, SearchPayload, Transport, TransportError,
};

/// Search endpoint the fixture form carries.
pub const SEARCH_URL: &str = "/recipes/search";

/// Extra-tag values the test panel governs.
pub fn extra_tags() -> Vec<String> {
    vec!["snack".into(), "pp".into(), "gluten-free".into()]
}

/// Transport that replays queued responses after virtual-clock delays and
/// records every URL it was asked to fetch.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<(Duration, Result<SearchPayload, TransportError>)>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(ScriptedTransport::default())
    }

    /// Queue a successful response carrying `html` after `delay_ms`.
    pub fn push_html(&self, delay_ms: u64, html: &str) {
        self.script.lock().unwrap().push_back((
            Duration::from_millis(delay_ms),
            Ok(SearchPayload { html: Some(html.to_string()) }),
        ));
    }

    /// Queue a payload as-is (e.g. one with no `html` field).
    pub fn push_payload(&self, delay_ms: u64, payload: SearchPayload) {
        self.script
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(delay_ms), Ok(payload)));
    }

    pub fn push_error(&self, delay_ms: u64, error: TransportError) {
        self.script
            .lock()
            .unwrap()
            .push_back((Duration::from_millis(delay_ms), Err(error)));
    }

    /// Every URL fetched, in dispatch order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn fetch<'a>(&'a self, url: &'a str) -> TransportFuture<'a> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(url.to_string());
            let (delay, result) = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((Duration::ZERO, Ok(SearchPayload { html: Some(String::new()) })));
            tokio::time::sleep(delay).await;
            result
        })
    }
}

/// A mounted engine plus handles on all of its collaborators.
pub struct TestPage {
    pub engine: SearchEngine,
    pub address: Arc<MemoryAddressBar>,
    pub results: Arc<MemoryResults>,
    pub transport: Arc<ScriptedTransport>,
}

impl TestPage {
    /// Mount at `location` with the default config and the test panel.
    pub fn mount(location: &str) -> TestPage {
        TestPage::mount_with_config(location, EngineConfig::new("/recipes"))
    }

    pub fn mount_with_config(location: &str, config: EngineConfig) -> TestPage {
        let address = Arc::new(MemoryAddressBar::new(location));
        let results = Arc::new(MemoryResults::new());
        let transport = ScriptedTransport::new();
        let engine = SearchEngine::mount(
            config,
            PageBindings {
                address: Arc::clone(&address) as Arc<dyn AddressBar>,
                results: Some(Arc::clone(&results) as Arc<dyn ResultsSink>),
                transport: Arc::clone(&transport) as Arc<dyn Transport>,
                search_url: Some(SEARCH_URL.to_string()),
                extra_tags: Some(extra_tags()),
            },
        )
        .expect("engine should mount with all anchors present");
        TestPage { engine, address, results, transport }
    }
}

/// Let timers and in-flight requests settle (virtual clock).
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(700)).await;
}
