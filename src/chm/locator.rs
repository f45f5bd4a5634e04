use std::collections::HashMap;
use std::sync::Arc;

use crate::chm::store::ResourceStore;
use crate::chm::url::{is_external_url, normalize_url};
use crate::destination::Destination;

/// CHM files have no pages, so page numbers are synthesized: every unique
/// page url met while walking the table of contents becomes one page, in
/// traversal order, with the home page always first.
#[derive(Default)]
pub struct PageLocator {
    pages: Vec<Arc<str>>,
    index: HashMap<Arc<str>, i32>,
}

impl PageLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The home page is always page 1; call this before any traversal.
    pub fn register_home_page(&mut self, url: &str) -> i32 {
        debug_assert!(self.pages.is_empty());
        self.assign_page_no(url)
    }

    /// Interns `url` and returns its page number, reusing the number from an
    /// earlier visit. External urls get page 0 and no table entry.
    pub fn assign_page_no(&mut self, url: &str) -> i32 {
        if url.is_empty() || is_external_url(url) {
            return 0;
        }
        let plain = normalize_url(url);
        if let Some(&page_no) = self.index.get(plain.as_str()) {
            return page_no;
        }
        let interned: Arc<str> = plain.into();
        let page_no = self.pages.len() as i32 + 1;
        self.pages.push(Arc::clone(&interned));
        self.index.insert(interned, page_no);
        page_no
    }

    /// Exact lookup by normalized url, no side effects.
    pub fn resolve_url(&self, url: &str) -> Option<i32> {
        let plain = normalize_url(url);
        self.index.get(plain.as_str()).copied()
    }

    pub fn url_for_page(&self, page_no: i32) -> Option<&str> {
        if page_no < 1 {
            return None;
        }
        self.pages.get(page_no as usize - 1).map(|url| url.as_ref())
    }

    pub fn page_count(&self) -> i32 {
        self.pages.len() as i32
    }

    /// Named destinations are either in-document urls or numeric topic ids
    /// from the container's alias table.
    pub fn resolve_named_dest(
        &self,
        name: &str,
        store: &dyn ResourceStore,
    ) -> Option<Destination> {
        if let Some(dest) = self.resolve_dest_url(name, store) {
            return Some(dest);
        }
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let topic_id: u32 = name.parse().ok()?;
        let url = store.resolve_topic_id(topic_id)?;
        self.resolve_dest_url(&url, store)
    }

    fn resolve_dest_url(&self, url: &str, store: &dyn ResourceStore) -> Option<Destination> {
        let plain = normalize_url(url);
        if let Some(&page_no) = self.index.get(plain.as_str()) {
            return Some(Destination::named_page(&plain, page_no));
        }
        if store.has_data(&plain) {
            // some documents use redirection urls which aren't listed in the
            // ToC; page 1 is good enough for callers that only follow the url
            return Some(Destination::named_page(&plain, 1));
        }
        None
    }
}
