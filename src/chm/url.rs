/// True for URLs that must leave the viewer and open in the system browser.
pub fn is_external_url(url: &str) -> bool {
    let starts = |prefix: &str| {
        url.len() >= prefix.len()
            && url.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    };
    starts("http://") || starts("https://") || starts("mailto:")
}

/// The hosted control reports this URL while no document is shown.
pub fn is_blank_url(url: &str) -> bool {
    url.eq_ignore_ascii_case("about:blank")
}

/// Canonical form used as the page table key: fragment dropped, forward
/// slashes, `.` and `..` segments resolved lexically, no leading separator.
/// A leading `..` that has nothing to pop stays literal.
pub fn normalize_url(url: &str) -> String {
    let no_frag = match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    };
    let slashes = no_frag.replace('\\', "/");
    let rel = slashes.strip_prefix('/').unwrap_or(&slashes);

    let mut segments: Vec<&str> = Vec::new();
    for seg in rel.split('/') {
        match seg {
            "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            _ => segments.push(seg),
        }
    }
    segments.join("/")
}
