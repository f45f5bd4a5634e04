//! Turns resolved link destinations into viewer actions: scrolling the
//! right window, opening sibling documents, or handing urls to the OS.

pub mod fuzzy;
pub mod path;
pub mod shell;

use log::debug;

use crate::destination::Destination;
use fuzzy::{find_toc_dest, normalize_fuzzy};
use path::{is_absolute, join, parent_dir, percent_decode};
use shell::{PathKind, ViewerShell, WindowId};

/// What a link is allowed to do outside its own document.
#[derive(Debug, Clone, Copy)]
pub struct NavPolicy {
    /// Embedded in another application; documents are treated as
    /// self-contained and never launch files.
    pub plugin_mode: bool,
    pub allow_disk_access: bool,
}

impl Default for NavPolicy {
    fn default() -> Self {
        Self {
            plugin_mode: false,
            allow_disk_access: true,
        }
    }
}

/// Routes destinations coming out of one window's document.
pub struct LinkDispatcher<'a> {
    shell: &'a mut dyn ViewerShell,
    win: WindowId,
    policy: NavPolicy,
}

impl<'a> LinkDispatcher<'a> {
    pub fn new(shell: &'a mut dyn ViewerShell, win: WindowId, policy: NavPolicy) -> Self {
        Self { shell, win, policy }
    }

    pub fn goto_link(&mut self, dest: Option<&Destination>) {
        let Some(dest) = dest else {
            return;
        };
        if !self.shell.is_doc_loaded(self.win) {
            return;
        }
        match dest {
            Destination::ScrollTo { .. } => self.scroll_to_dest(dest),
            Destination::LaunchUrl { url } => self.launch_url(url),
            Destination::LaunchFile { path, inner } => self.launch_file(path, inner.as_deref()),
            // embedded files and attachments are only saved from their
            // context menu, never followed as links
            Destination::LaunchEmbedded { .. } | Destination::Attachment { .. } => {}
        }
    }

    /// Scrolls this window's document to `dest`, unless the controller
    /// handles the destination itself.
    pub fn scroll_to_dest(&mut self, dest: &Destination) {
        if !self.shell.is_doc_loaded(self.win) {
            return;
        }
        let Some(ctrl) = self.shell.controller(self.win) else {
            return;
        };
        if ctrl.handle_link(dest) {
            return;
        }
        let page_no = dest.page_no();
        if !ctrl.valid_page_no(page_no) {
            return;
        }
        let (rect, zoom) = match dest {
            Destination::ScrollTo { rect, zoom, .. } => (*rect, *zoom),
            _ => (None, None),
        };
        ctrl.scroll_to_page(page_no, rect, zoom);
    }

    /// Opens `url` in the browser, unless it is a relative file path in
    /// disguise (no scheme, or the first ':' comes after a '#').
    pub fn launch_url(&mut self, url: &str) {
        let colon = url.find(':');
        let hash = url.find('#');
        let is_relative = match (colon, hash) {
            (None, _) => true,
            (Some(c), Some(h)) => c > h,
            (Some(_), None) => false,
        };
        if !is_relative {
            self.shell.launch_browser(url);
            return;
        }
        let end = hash.unwrap_or(url.len());
        let path = percent_decode(&url[..end].replace('/', "\\"));
        self.launch_file(&path, None);
    }

    /// Opens the document at `path`, reusing a window that already shows
    /// it. `inner` optionally names a destination inside that document.
    pub fn launch_file(&mut self, path: &str, inner: Option<&Destination>) {
        if self.policy.plugin_mode || !self.policy.allow_disk_access {
            return;
        }
        debug!("launch_file: {path}");

        let mut path = path.replace('/', "\\");
        if let Some(rest) = path.strip_prefix(".\\") {
            path = rest.to_string();
        }

        let full_path = if is_absolute(&path) {
            path
        } else {
            let Some(ctrl) = self.shell.controller(self.win) else {
                return;
            };
            let dir = parent_dir(ctrl.file_path()).to_string();
            join(&dir, &path)
        };

        match self.shell.classify_path(&full_path) {
            PathKind::Missing => {
                self.shell.show_error_notification(&full_path);
                return;
            }
            PathKind::Dir => {
                self.shell.open_folder_in_explorer(&full_path);
                return;
            }
            PathKind::File => {}
        }

        let target = match self.shell.find_window_by_path(&full_path) {
            Some(win) => win,
            None => match self.shell.load_document(&full_path, self.win) {
                Some(win) => win,
                None => return,
            },
        };

        if !self.shell.is_doc_loaded(target) {
            // not a document we can show; the placeholder tab goes away and
            // the OS gets a chance before we report an error
            self.shell.close_placeholder_tab(target);
            if !self.shell.open_file_externally(&full_path) {
                self.shell.show_error_notification(&full_path);
            }
            return;
        }

        self.shell.focus(target);
        let Some(inner) = inner else {
            return;
        };

        match inner.name() {
            Some(name) => {
                let dest = self
                    .shell
                    .controller(target)
                    .and_then(|ctrl| ctrl.get_named_dest(name));
                if let Some(dest) = dest {
                    LinkDispatcher::new(&mut *self.shell, target, self.policy)
                        .scroll_to_dest(&dest);
                }
            }
            None => {
                LinkDispatcher::new(&mut *self.shell, target, self.policy).scroll_to_dest(inner);
            }
        }
    }

    /// Match order:
    /// 1. exact match on an internal destination name
    /// 2. fuzzy match on a full ToC item title
    /// 3. fuzzy match on a part of a ToC item title
    /// 4. exact match on a page label
    pub fn goto_named_dest(&mut self, name: &str) {
        let Some(ctrl) = self.shell.controller(self.win) else {
            return;
        };

        let mut dest = ctrl.get_named_dest(name);
        if dest.is_none() {
            if let Some(tree) = ctrl.toc() {
                let fuz_name = normalize_fuzzy(name);
                if !fuz_name.is_empty() {
                    dest = find_toc_dest(&tree.root, &fuz_name, false)
                        .or_else(|| find_toc_dest(&tree.root, &fuz_name, true));
                }
            }
        }
        if let Some(dest) = dest {
            self.scroll_to_dest(&dest);
            return;
        }

        let Some(ctrl) = self.shell.controller(self.win) else {
            return;
        };
        if let Some(page_no) = ctrl.page_by_label(name) {
            if ctrl.valid_page_no(page_no) {
                ctrl.go_to_page(page_no, true);
            }
        }
    }
}
