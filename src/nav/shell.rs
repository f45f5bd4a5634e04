//! What link dispatch needs from the surrounding viewer: window and tab
//! management, document loading, and OS launchers.

use crate::controller::DocController;

/// Identifies one viewer window across the shell seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Missing,
    File,
    Dir,
}

pub trait ViewerShell {
    fn controller(&mut self, win: WindowId) -> Option<&mut dyn DocController>;
    fn is_doc_loaded(&self, win: WindowId) -> bool;
    fn focus(&mut self, win: WindowId);
    /// Closes the empty tab a failed load leaves behind.
    fn close_placeholder_tab(&mut self, win: WindowId);

    fn find_window_by_path(&self, path: &str) -> Option<WindowId>;
    /// Opens `path` as a document; `source` is the window the navigation
    /// came from. Returns the window showing it, loaded or not.
    fn load_document(&mut self, path: &str, source: WindowId) -> Option<WindowId>;

    fn launch_browser(&mut self, url: &str) -> bool;
    fn open_file_externally(&mut self, path: &str) -> bool;
    fn open_folder_in_explorer(&mut self, path: &str) -> bool;
    fn show_error_notification(&mut self, path: &str);

    fn classify_path(&self, path: &str) -> PathKind {
        match std::fs::metadata(path) {
            Ok(md) if md.is_dir() => PathKind::Dir,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }
}
