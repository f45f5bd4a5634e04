//! The hosted-browser seam: what an embedded HTML control offers a
//! controller, and the events it raises back.

use std::sync::Arc;

/// A raw input message relayed to the hosted control. Kept as plain numbers
/// so the seam stays platform neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiMessage {
    pub code: u32,
    pub wparam: usize,
    pub lparam: isize,
}

/// The embedded HTML control a CHM controller drives.
pub trait HostedBrowser {
    /// Navigates within the current document; the bytes for `url` are served
    /// back through [`BrowserEvents::data_for_url`].
    fn navigate_to_data_url(&mut self, url: &str);

    fn zoom_percent(&self) -> i32;
    fn set_zoom_percent(&mut self, percent: i32);

    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn go_back(&mut self);
    fn go_forward(&mut self);

    fn send_ui_message(&mut self, msg: UiMessage) -> isize;

    fn print_current_page(&mut self, show_ui: bool);
    fn find_in_current_page(&mut self);
    fn select_all(&mut self);
    fn copy_selection(&mut self);
}

/// Callbacks the embedded control raises while navigating.
pub trait BrowserEvents {
    /// Return false to block the navigation.
    fn on_before_navigate(&self, url: &str, new_window: bool) -> bool;
    fn on_document_complete(&self, url: &str);
    fn on_left_button_down(&self);
    fn data_for_url(&self, url: &str) -> Option<Arc<[u8]>>;
    fn download_data(&self, url: &str, data: &[u8]);
}
