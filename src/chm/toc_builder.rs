use std::sync::Arc;

use log::warn;

use crate::chm::locator::PageLocator;
use crate::chm::store::TocSink;
use crate::toc::{TocNode, TocTree};

/// One table-of-contents entry as visited, before tree assembly. The url
/// stays as written in the document; the browser side wants it raw.
#[derive(Debug, Clone)]
pub struct TocTraceItem {
    pub title: String,
    pub url: String,
    pub level: i32,
    pub page_no: i32,
}

/// Interns every visited url into the page table and records a flat trace.
/// The tree itself is assembled later, on demand, since most documents are
/// closed without the ToC ever being shown.
pub struct ChmTocBuilder<'a> {
    locator: &'a mut PageLocator,
    trace: &'a mut Vec<TocTraceItem>,
}

impl<'a> ChmTocBuilder<'a> {
    pub fn new(locator: &'a mut PageLocator, trace: &'a mut Vec<TocTraceItem>) -> Self {
        Self { locator, trace }
    }
}

impl TocSink for ChmTocBuilder<'_> {
    fn visit(&mut self, title: &str, url: &str, level: i32) {
        let page_no = self.locator.assign_page_no(url);
        self.trace.push(TocTraceItem {
            title: title.to_string(),
            url: url.to_string(),
            level,
            page_no,
        });
    }
}

/// Assembles the flat trace into a tree. Levels may skip forward or jump
/// back arbitrarily; an entry deeper than the current chain becomes a child
/// of the newest node, anything else a sibling at its own level.
pub fn build_toc_tree(trace: &[TocTraceItem]) -> Option<TocTree> {
    if trace.is_empty() {
        return None;
    }

    let mut roots: Vec<TocNode> = Vec::new();
    // index path from the roots down to the most recently attached node
    let mut path: Vec<usize> = Vec::new();
    let mut next_id = 0;

    for item in trace {
        next_id += 1;
        let mut level = item.level;
        if level < 1 {
            // levels are 1-based; anything else is document breakage
            warn!("toc entry {:?} has invalid level {}", item.title, item.level);
            level = 1;
        }
        let node = TocNode::new(
            next_id,
            Arc::from(item.title.as_str()),
            item.page_no,
            super::link_dest(&item.url, item.page_no),
        );
        let depth = (level as usize).min(path.len() + 1);
        path.truncate(depth - 1);
        let siblings = siblings_at(&mut roots, &path);
        siblings.push(node);
        path.push(siblings.len() - 1);
    }
    Some(TocTree { root: roots })
}

fn siblings_at<'a>(roots: &'a mut Vec<TocNode>, path: &[usize]) -> &'a mut Vec<TocNode> {
    let mut list = roots;
    for &idx in path {
        list = &mut list[idx].children;
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Destination;

    fn entry(title: &str, level: i32) -> TocTraceItem {
        TocTraceItem {
            title: title.to_string(),
            url: format!("pages/{}.htm", title.to_lowercase()),
            level,
            page_no: 0,
        }
    }

    #[test]
    fn siblings_and_children_follow_the_levels() {
        let trace = vec![entry("A", 1), entry("B", 2), entry("C", 2), entry("D", 1)];
        let tree = build_toc_tree(&trace).unwrap();

        assert_eq!(tree.root.len(), 2);
        assert_eq!(&*tree.root[0].title, "A");
        assert_eq!(&*tree.root[1].title, "D");
        let a = &tree.root[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(&*a.children[0].title, "B");
        assert_eq!(&*a.children[1].title, "C");
        assert!(tree.root[1].children.is_empty());
    }

    #[test]
    fn a_skipped_level_attaches_under_the_newest_node() {
        let trace = vec![entry("A", 1), entry("B", 3), entry("C", 2)];
        let tree = build_toc_tree(&trace).unwrap();

        let a = &tree.root[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(&*a.children[0].title, "B");
        assert_eq!(&*a.children[1].title, "C");
        assert!(a.children[0].children.is_empty());
    }

    #[test]
    fn ids_are_assigned_in_visit_order() {
        let trace = vec![entry("A", 1), entry("B", 2), entry("C", 1)];
        let tree = build_toc_tree(&trace).unwrap();

        assert_eq!(tree.root[0].id, 1);
        assert_eq!(tree.root[0].children[0].id, 2);
        assert_eq!(tree.root[1].id, 3);
    }

    #[test]
    fn an_empty_trace_yields_no_tree() {
        assert!(build_toc_tree(&[]).is_none());
    }

    #[test]
    fn a_broken_level_is_clamped_to_the_top() {
        let trace = vec![entry("A", 1), entry("B", 0), entry("C", -3)];
        let tree = build_toc_tree(&trace).unwrap();

        assert_eq!(tree.root.len(), 3);
        assert!(tree.root.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn entry_urls_become_destinations() {
        let trace = vec![
            TocTraceItem {
                title: "Folder".into(),
                url: String::new(),
                level: 1,
                page_no: 0,
            },
            TocTraceItem {
                title: "Intro".into(),
                url: "/intro.htm".into(),
                level: 2,
                page_no: 2,
            },
            TocTraceItem {
                title: "Site".into(),
                url: "http://example.com".into(),
                level: 2,
                page_no: 0,
            },
        ];
        let tree = build_toc_tree(&trace).unwrap();

        let folder = &tree.root[0];
        assert_eq!(folder.dest, None);
        assert_eq!(
            folder.children[0].dest,
            Some(Destination::named_page("/intro.htm", 2))
        );
        assert_eq!(
            folder.children[1].dest,
            Some(Destination::LaunchUrl { url: "http://example.com".into() })
        );
    }

    #[test]
    fn visiting_entries_interns_their_urls() {
        let mut locator = PageLocator::new();
        locator.register_home_page("/index.htm");
        let mut trace = Vec::new();
        let mut builder = ChmTocBuilder::new(&mut locator, &mut trace);

        builder.visit("Intro", "pages/intro.htm", 1);
        builder.visit("Folder", "", 1);
        builder.visit("Intro again", "/pages/intro.htm#top", 2);

        assert_eq!(trace[0].page_no, 2);
        assert_eq!(trace[1].page_no, 0);
        assert_eq!(trace[2].page_no, 2);
        assert_eq!(locator.page_count(), 2);
    }
}
