use std::sync::Arc;

use crate::destination::Destination;

/// One table-of-contents entry. Children are owned by their parent in
/// document order.
#[derive(Debug, Clone, PartialEq)]
pub struct TocNode {
    pub id: i32,
    pub title: Arc<str>,
    pub page_no: i32,
    pub dest: Option<Destination>,
    pub children: Vec<TocNode>,
}

impl TocNode {
    pub fn new(id: i32, title: Arc<str>, page_no: i32, dest: Option<Destination>) -> Self {
        Self {
            id,
            title,
            page_no,
            dest,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocTree {
    pub root: Vec<TocNode>,
}
