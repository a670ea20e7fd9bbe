//! Results renderer — replaces the results region's content verbatim.

use std::sync::Mutex;

/// Platform seam for the results container.
pub trait ResultsSink: Send + Sync {
    /// Replace the entire content with `html` verbatim. The server is
    /// trusted to emit sanitized markup; no diffing, no sanitization.
    fn replace(&self, html: &str);
}

/// Recording sink for headless embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryResults {
    renders: Mutex<Vec<String>>,
}

impl MemoryResults {
    pub fn new() -> Self {
        MemoryResults::default()
    }

    /// Content currently shown, if anything has rendered yet.
    pub fn current(&self) -> Option<String> {
        self.renders.lock().unwrap().last().cloned()
    }

    /// Every render so far, oldest first.
    pub fn renders(&self) -> Vec<String> {
        self.renders.lock().unwrap().clone()
    }

    pub fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }
}

impl ResultsSink for MemoryResults {
    fn replace(&self, html: &str) {
        self.renders.lock().unwrap().push(html.to_string());
    }
}
