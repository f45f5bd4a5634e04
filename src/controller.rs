//! The seam between a loaded document and the viewer UI.

use serde::{Deserialize, Serialize};

use crate::destination::Destination;
use crate::geom::{Point, Rect};
use crate::settings::schema::FileState;
use crate::toc::TocTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    Automatic,
    SinglePage,
    Facing,
    BookView,
    Continuous,
    ContinuousFacing,
    ContinuousBookView,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::Automatic
    }
}

/// What a loaded document exposes to the viewer: paging, zoom, table of
/// contents, named destinations and view-state capture. Implementations for
/// paginated formats scroll a canvas; browser-hosted formats navigate the
/// hosted control instead.
pub trait DocController {
    fn file_path(&self) -> &str;
    fn page_count(&self) -> i32;
    fn current_page_no(&self) -> i32;

    fn valid_page_no(&self, page_no: i32) -> bool {
        page_no >= 1 && page_no <= self.page_count()
    }

    fn go_to_page(&mut self, page_no: i32, add_to_history: bool);
    fn scroll_to_page(&mut self, page_no: i32, rect: Option<Rect>, zoom: Option<f32>);

    /// Lets a controller intercept a link destination before the generic
    /// dispatch runs. Returns true when the destination was consumed.
    fn handle_link(&mut self, dest: &Destination) -> bool {
        let _ = dest;
        false
    }

    /// `dir < 0` is back, `dir > 0` is forward, one step per unit.
    fn can_navigate(&self, dir: i32) -> bool;
    fn navigate(&mut self, dir: i32);

    fn set_display_mode(&mut self, mode: DisplayMode);
    fn display_mode(&self) -> DisplayMode;

    fn set_zoom_virtual(&mut self, zoom: f32, fixed_pt: Option<Point>);
    fn zoom_virtual(&self) -> f32;
    fn next_zoom_step(&self, towards_level: f32) -> f32;

    fn toc(&self) -> Option<&TocTree>;
    fn get_named_dest(&self, name: &str) -> Option<Destination>;

    fn page_by_label(&self, label: &str) -> Option<i32> {
        let _ = label;
        None
    }

    fn property(&self, name: &str) -> Option<String> {
        let _ = name;
        None
    }

    /// Captures the current viewing state for the session file, replacing
    /// every field `remember_per_document` covers.
    fn fill_display_state(&self, state: &mut FileState, remember_per_document: bool);
}

/// Notifications a controller raises back at the viewer.
pub trait ControllerEvents {
    fn page_changed(&self, page_no: i32);
    /// A link inside the document points outside of it (or at another page);
    /// the viewer decides what to do with it.
    fn goto_link(&self, dest: &Destination);
    fn focus_frame(&self, focus: bool);
    fn save_download(&self, url: &str, data: &[u8]);
}
