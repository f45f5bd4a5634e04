use crate::geom::Rect;

/// A resolved link target, as produced by name resolution, TOC items or
/// in-document links.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Scroll the current document to a page, optionally to a region of it.
    /// `name` carries the symbolic target (a CHM URL) when the destination
    /// came out of name resolution; CHM link handling navigates by the name
    /// and falls back to the page number.
    ScrollTo {
        page_no: i32,
        rect: Option<Rect>,
        zoom: Option<f32>,
        name: Option<String>,
    },
    /// Open a URL in the system browser.
    LaunchUrl { url: String },
    /// Open another local document, optionally at a destination inside it.
    LaunchFile {
        path: String,
        inner: Option<Box<Destination>>,
    },
    /// A document embedded inside the current container.
    LaunchEmbedded { name: String },
    /// A file attachment inside the current container.
    Attachment { name: String },
}

impl Destination {
    pub fn scroll_to(page_no: i32) -> Self {
        Destination::ScrollTo {
            page_no,
            rect: None,
            zoom: None,
            name: None,
        }
    }

    /// Destination that scrolls by symbolic target, the form CHM name
    /// resolution produces.
    pub fn named_page(url: &str, page_no: i32) -> Self {
        Destination::ScrollTo {
            page_no,
            rect: None,
            zoom: None,
            name: Some(url.to_string()),
        }
    }

    pub fn page_no(&self) -> i32 {
        match self {
            Destination::ScrollTo { page_no, .. } => *page_no,
            _ => 0,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Destination::ScrollTo { name, .. } => name.as_deref(),
            Destination::LaunchEmbedded { name } | Destination::Attachment { name } => Some(name),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Destination::ScrollTo { .. } => "scroll-to",
            Destination::LaunchUrl { .. } => "launch-url",
            Destination::LaunchFile { .. } => "launch-file",
            Destination::LaunchEmbedded { .. } => "launch-embedded",
            Destination::Attachment { .. } => "attachment",
        }
    }
}
