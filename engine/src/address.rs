//! Address synchronizer — reflects filter/query state into the navigable
//! address and reads it back on load.
//!
//! Two distinct transitions. [`AddressBar::replace_query`] rewrites the
//! query portion in place with no new history entry, so keystroke-driven
//! searches never pollute back-navigation. [`AddressBar::navigate`]
//! performs a full navigation with a new history entry; the platform
//! re-renders the page from the server, refreshing counts and headers the
//! fragment path does not touch.

use std::sync::Mutex;

/// Platform seam for the browser-owned address.
pub trait AddressBar: Send + Sync {
    /// Current query string, without the leading `?`. Empty when absent.
    fn query(&self) -> String;

    /// Rewrite the query portion in place — replace semantics, no new
    /// history entry. An empty `query` drops the `?` entirely.
    fn replace_query(&self, query: &str);

    /// Full navigation to `location` (path plus optional query) with a new
    /// history entry.
    fn navigate(&self, location: &str);
}

/// In-process address bar for headless embedding and tests. Keeps the full
/// history log so replace-vs-push semantics stay observable.
#[derive(Debug)]
pub struct MemoryAddressBar {
    inner: Mutex<History>,
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    navigations: usize,
}

impl MemoryAddressBar {
    pub fn new(location: &str) -> Self {
        MemoryAddressBar {
            inner: Mutex::new(History { entries: vec![location.to_string()], navigations: 0 }),
        }
    }

    /// Current location, path plus query.
    pub fn location(&self) -> String {
        self.inner.lock().unwrap().entries.last().cloned().unwrap_or_default()
    }

    /// Path portion of the current location.
    pub fn path(&self) -> String {
        let location = self.location();
        match location.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => location,
        }
    }

    /// Number of full navigations performed.
    pub fn navigation_count(&self) -> usize {
        self.inner.lock().unwrap().navigations
    }

    /// Every address this bar has pointed at, oldest first. Replacements
    /// overwrite the last entry rather than appending.
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().unwrap().entries.clone()
    }
}

impl AddressBar for MemoryAddressBar {
    fn query(&self) -> String {
        match self.location().split_once('?') {
            Some((_, query)) => query.to_string(),
            None => String::new(),
        }
    }

    fn replace_query(&self, query: &str) {
        let mut inner = self.inner.lock().unwrap();
        let current = inner.entries.last().cloned().unwrap_or_default();
        let path = match current.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => current,
        };
        let next = if query.is_empty() { path } else { format!("{path}?{query}") };
        match inner.entries.last_mut() {
            Some(last) => *last = next,
            None => inner.entries.push(next),
        }
    }

    fn navigate(&self, location: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.push(location.to_string());
        inner.navigations += 1;
    }
}
