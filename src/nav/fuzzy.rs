//! Fuzzy table-of-contents title matching for named-destination lookup.

use crate::destination::Destination;
use crate::toc::TocNode;

/// Case-folds and collapses whitespace runs, so `"  Chapter   One "`
/// compares equal to `"chapter one"`.
pub fn normalize_fuzzy(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `title` matches `query`; both must already be normalized. A
/// partial match only counts at the start of a word, that is at the
/// beginning of the title or right after a space.
pub fn match_fuzzy(title: &str, query: &str, partially: bool) -> bool {
    if !partially {
        return title == query;
    }
    let mut start = 0;
    while let Some(pos) = title[start..].find(query) {
        let at = start + pos;
        if at == 0 || title.as_bytes()[at - 1] == b' ' {
            return true;
        }
        start = at + title[at..].chars().next().map_or(1, |c| c.len_utf8());
    }
    false
}

/// Depth-first search for the first entry whose title matches the
/// normalized `name`, returning that entry's destination. A matched entry
/// without a destination ends the search of its own sibling chain; outer
/// levels keep looking.
pub fn find_toc_dest(nodes: &[TocNode], name: &str, partially: bool) -> Option<Destination> {
    for node in nodes {
        if match_fuzzy(&normalize_fuzzy(&node.title), name, partially) {
            return node.dest.clone();
        }
        let dest = find_toc_dest(&node.children, name, partially);
        if dest.is_some() {
            return dest;
        }
    }
    None
}
