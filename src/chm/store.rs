//! Back-end seam for an opened CHM container: path-addressed resources, the
//! table of contents, and container metadata.

/// Receives table-of-contents entries in document order during
/// [`ResourceStore::parse_toc`]. `level` is 1-based nesting depth.
pub trait TocSink {
    fn visit(&mut self, title: &str, url: &str, level: i32);
}

/// An opened CHM container. Urls are container paths in either `/`- or
/// `\`-separated form; implementations resolve them case-insensitively the
/// way CHM readers do.
pub trait ResourceStore {
    /// The path of the page the document opens on.
    fn home_path(&self) -> Option<String>;

    fn get_data(&self, url: &str) -> Option<Vec<u8>>;

    fn has_data(&self, url: &str) -> bool {
        self.get_data(url).is_some()
    }

    /// Maps a numeric help context id to a page url.
    fn resolve_topic_id(&self, id: u32) -> Option<String>;

    fn property(&self, name: &str) -> Option<String>;

    /// Walks the table of contents in document order.
    fn parse_toc(&self, sink: &mut dyn TocSink);
}
