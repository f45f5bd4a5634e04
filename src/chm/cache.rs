use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

struct CacheEntry {
    url: Arc<str>,
    data: Arc<[u8]>,
}

/// Bytes already served to the hosted control, kept for the life of the
/// document. A linear scan is fine: documents have at most a few hundred
/// distinct resource urls. The lock is reentrant because the control can
/// request nested resources while an outer fetch is still on the stack.
#[derive(Default)]
pub struct UrlDataCache {
    entries: ReentrantMutex<RefCell<Vec<CacheEntry>>>,
}

impl UrlDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes for `url`, loading them via `load` on the first
    /// request. Empty data counts as a miss and is not cached.
    pub fn fetch(&self, url: &str, load: impl FnOnce() -> Option<Vec<u8>>) -> Option<Arc<[u8]>> {
        let guard = self.entries.lock();
        let cached = guard
            .borrow()
            .iter()
            .find(|e| &*e.url == url)
            .map(|e| Arc::clone(&e.data));
        if cached.is_some() {
            return cached;
        }
        // the loader may re-enter fetch; keep the cell unborrowed while it runs
        let data = load()?;
        if data.is_empty() {
            return None;
        }
        let data: Arc<[u8]> = data.into();
        guard.borrow_mut().push(CacheEntry {
            url: Arc::from(url),
            data: Arc::clone(&data),
        });
        Some(data)
    }
}
