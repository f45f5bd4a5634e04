//! Controller for CHM documents. Page numbers are synthesized from the
//! table of contents; rendering is delegated to an embedded HTML control
//! that fetches its resources back through the controller.

pub mod cache;
pub mod locator;
pub mod store;
pub mod toc_builder;
pub mod url;

use std::cell::{Cell, OnceCell, RefCell};
use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::browser::{BrowserEvents, HostedBrowser, UiMessage};
use crate::controller::{ControllerEvents, DisplayMode, DocController};
use crate::destination::Destination;
use crate::geom::{Point, Rect};
use crate::settings::schema::{FileState, ZoomSettings};
use crate::toc::TocTree;
use crate::zoom::{self, INVALID_ZOOM, ZOOM_MAX, ZOOM_MIN, is_valid_zoom};
use cache::UrlDataCache;
use locator::PageLocator;
use store::ResourceStore;
use toc_builder::{ChmTocBuilder, TocTraceItem, build_toc_tree};
use url::{is_blank_url, is_external_url, normalize_url};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no home page in {path}")]
    NoHomePage { path: String },
}

/// Destination for a link target as written in the document: external urls
/// launch a browser, everything else scrolls to a named page. Url-less
/// (folder) entries have no destination.
pub(crate) fn link_dest(url: &str, page_no: i32) -> Option<Destination> {
    if url.is_empty() {
        return None;
    }
    if is_external_url(url) {
        return Some(Destination::LaunchUrl { url: url.to_string() });
    }
    Some(Destination::named_page(url, page_no))
}

pub struct ChmController {
    path: String,
    store: Box<dyn ResourceStore>,
    events: Box<dyn ControllerEvents>,
    locator: PageLocator,
    trace: Vec<TocTraceItem>,
    cache: UrlDataCache,
    zoom_prefs: ZoomSettings,

    browser: RefCell<Option<Box<dyn HostedBrowser>>>,
    current_page: Cell<i32>,
    // the control ignores zoom requests until a page is loaded, so the last
    // requested zoom is re-applied once on the next document-complete
    pending_zoom: Cell<f32>,
    forwarding_ui_msg: Cell<bool>,
    toc_tree: OnceCell<Option<TocTree>>,
}

impl ChmController {
    /// Opens `store` and numbers its pages by walking the table of contents.
    /// The home page is always page 1.
    pub fn load(
        path: &str,
        store: Box<dyn ResourceStore>,
        events: Box<dyn ControllerEvents>,
        zoom_prefs: ZoomSettings,
    ) -> Result<Self, LoadError> {
        let mut locator = PageLocator::new();
        let home = store.home_path().unwrap_or_default();
        if locator.register_home_page(&home) != 1 {
            return Err(LoadError::NoHomePage { path: path.to_string() });
        }
        // parse the ToC up front since page numbering depends on it
        let mut trace = Vec::new();
        let mut builder = ChmTocBuilder::new(&mut locator, &mut trace);
        store.parse_toc(&mut builder);

        Ok(Self {
            path: path.to_string(),
            store,
            events,
            locator,
            trace,
            cache: UrlDataCache::new(),
            zoom_prefs,
            browser: RefCell::new(None),
            current_page: Cell::new(1),
            pending_zoom: Cell::new(INVALID_ZOOM),
            forwarding_ui_msg: Cell::new(false),
            toc_tree: OnceCell::new(),
        })
    }

    pub fn attach_browser(&self, browser: Box<dyn HostedBrowser>) {
        debug_assert!(self.browser.borrow().is_none(), "browser already attached");
        self.browser.replace(Some(browser));
    }

    pub fn detach_browser(&self) {
        self.browser.replace(None);
    }

    /// Runs `f` with the control taken out of its cell for the duration, so
    /// a call the control makes back into this controller sees it detached
    /// instead of tripping over the outstanding borrow.
    fn with_browser<R>(&self, f: impl FnOnce(&mut dyn HostedBrowser) -> R) -> Option<R> {
        let mut browser = self.browser.borrow_mut().take()?;
        let res = f(browser.as_mut());
        self.browser.replace(Some(browser));
        Some(res)
    }

    /// Navigates the control to a page url. External urls are routed to the
    /// viewer instead, same as for paginated formats. Returns whether the
    /// url was found in the page table.
    pub fn display_page(&self, page_url: &str) -> bool {
        if is_external_url(page_url) {
            if let Some(dest) = link_dest(page_url, 0) {
                self.events.goto_link(&dest);
            }
            return true;
        }

        let page_no = self.locator.resolve_url(page_url);
        if let Some(n) = page_no {
            self.current_page.set(n);
        }

        // Some chm files use urls starting with "..\" even though the
        // control rejects those; stripping the prefix usually leaves the
        // right in-document url.
        let mut url = page_url;
        if let Some(rest) = url.strip_prefix("..\\") {
            url = rest;
        }
        if let Some(rest) = url.strip_prefix('/') {
            url = rest;
        }

        self.with_browser(|browser| browser.navigate_to_data_url(url));
        page_no.is_some()
    }

    /// Relays a keyboard or mouse message to the control. Returns 0 while a
    /// previous relay is still on the stack: the control can bounce the
    /// message straight back at us.
    pub fn forward_ui_message(&self, msg: UiMessage) -> isize {
        if self.forwarding_ui_msg.get() {
            return 0;
        }
        self.forwarding_ui_msg.set(true);
        let res = self.with_browser(|browser| browser.send_ui_message(msg));
        self.forwarding_ui_msg.set(false);
        res.unwrap_or(0)
    }

    pub fn print_current_page(&self, show_ui: bool) {
        self.with_browser(|browser| browser.print_current_page(show_ui));
    }

    pub fn find_in_current_page(&self) {
        self.with_browser(|browser| browser.find_in_current_page());
    }

    pub fn select_all(&self) {
        self.with_browser(|browser| browser.select_all());
    }

    pub fn copy_selection(&self) {
        self.with_browser(|browser| browser.copy_selection());
    }

    fn update_zoom(&self, mut zoom: f32) {
        if zoom > 0.0 {
            zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
        if !is_valid_zoom(zoom) {
            zoom = 100.0;
        }
        self.with_browser(|browser| browser.set_zoom_percent(zoom as i32));
        self.pending_zoom.set(zoom);
    }
}

impl DocController for ChmController {
    fn file_path(&self) -> &str {
        &self.path
    }

    fn page_count(&self) -> i32 {
        self.locator.page_count()
    }

    fn current_page_no(&self) -> i32 {
        self.current_page.get()
    }

    fn go_to_page(&mut self, page_no: i32, _add_to_history: bool) {
        if !self.valid_page_no(page_no) {
            // reachable via link fallbacks carrying page 0, so warn only
            warn!("go_to_page: page {page_no} out of range");
            return;
        }
        if let Some(url) = self.locator.url_for_page(page_no) {
            self.display_page(url);
        }
    }

    fn scroll_to_page(&mut self, _page_no: i32, _rect: Option<Rect>, _zoom: Option<f32>) {
        warn!("scroll_to_page on a chm controller");
        debug_assert!(false, "chm pages are urls, use go_to_page");
    }

    fn handle_link(&mut self, dest: &Destination) -> bool {
        if !matches!(dest, Destination::ScrollTo { .. }) {
            warn!("handle_link: unsupported destination kind {}", dest.kind_name());
        }
        if let Some(url) = dest.name() {
            if self.display_page(url) {
                return true;
            }
        }
        self.go_to_page(dest.page_no(), false);
        true
    }

    fn can_navigate(&self, dir: i32) -> bool {
        self.with_browser(|browser| {
            if dir < 0 {
                browser.can_go_back()
            } else {
                browser.can_go_forward()
            }
        })
        .unwrap_or(false)
    }

    fn navigate(&mut self, mut dir: i32) {
        if dir < 0 {
            while dir < 0 && self.can_navigate(dir) {
                self.with_browser(|browser| browser.go_back());
                dir += 1;
            }
        } else {
            while dir > 0 && self.can_navigate(dir) {
                self.with_browser(|browser| browser.go_forward());
                dir -= 1;
            }
        }
    }

    fn set_display_mode(&mut self, _mode: DisplayMode) {
        // single page is all the control can show
    }

    fn display_mode(&self) -> DisplayMode {
        DisplayMode::SinglePage
    }

    fn set_zoom_virtual(&mut self, zoom: f32, _fixed_pt: Option<Point>) {
        self.update_zoom(zoom);
    }

    fn zoom_virtual(&self) -> f32 {
        self.with_browser(|browser| browser.zoom_percent() as f32)
            .unwrap_or(100.0)
    }

    fn next_zoom_step(&self, towards_level: f32) -> f32 {
        let curr = self.zoom_virtual();
        zoom::next_zoom_step(
            curr,
            towards_level,
            &self.zoom_prefs.levels,
            self.zoom_prefs.increment,
        )
    }

    fn toc(&self) -> Option<&TocTree> {
        self.toc_tree.get_or_init(|| build_toc_tree(&self.trace)).as_ref()
    }

    fn get_named_dest(&self, name: &str) -> Option<Destination> {
        self.locator.resolve_named_dest(name, self.store.as_ref())
    }

    fn property(&self, name: &str) -> Option<String> {
        self.store.property(name)
    }

    fn fill_display_state(&self, state: &mut FileState, remember_per_document: bool) {
        if !state.file_path.eq_ignore_ascii_case(&self.path) {
            state.file_path = self.path.clone();
        }
        state.use_default_state = !remember_per_document;
        state.display_mode = self.display_mode();
        state.zoom = self.zoom_virtual();
        state.page_no = self.current_page_no();
        state.scroll_pos = Point::default();
    }
}

impl BrowserEvents for ChmController {
    fn on_before_navigate(&self, url: &str, new_window: bool) -> bool {
        // keep javascript on the page from holding on to the focus
        self.events.focus_frame(false);
        if !new_window {
            return true;
        }
        // new browser windows are never allowed; reroute to the viewer
        if let Some(dest) = link_dest(url, 0) {
            self.events.goto_link(&dest);
        }
        false
    }

    fn on_document_complete(&self, url: &str) {
        if url.is_empty() || is_blank_url(url) {
            return;
        }
        let Some(page_no) = self.locator.resolve_url(url) else {
            return;
        };
        self.current_page.set(page_no);
        let pending = self.pending_zoom.get();
        if is_valid_zoom(pending) {
            self.update_zoom(pending);
            self.pending_zoom.set(INVALID_ZOOM);
        }
        self.events.page_changed(page_no);
    }

    fn on_left_button_down(&self) {
        self.events.focus_frame(true);
    }

    fn data_for_url(&self, url: &str) -> Option<Arc<[u8]>> {
        let plain = normalize_url(url);
        self.cache.fetch(&plain, || self.store.get_data(&plain))
    }

    fn download_data(&self, url: &str, data: &[u8]) {
        self.events.save_download(url, data);
    }
}
