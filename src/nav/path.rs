//! Path strings from document links are Windows style and handled as plain
//! text; nothing here touches the filesystem.

/// A leading `\` or a drive letter marks an absolute path. Technically
/// `c:foo` is drive-relative, but it is treated as absolute here.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('\\') || (path.len() >= 2 && path.as_bytes()[1] == b':')
}

/// The directory part of a path, without the trailing separator except for
/// filesystem roots. Paths without any separator yield `.`.
pub fn parent_dir(path: &str) -> &str {
    let Some(pos) = path.rfind('\\') else {
        return ".";
    };
    if pos == 0 {
        return &path[..1];
    }
    if pos == 2 && path.as_bytes()[1] == b':' {
        return &path[..3];
    }
    &path[..pos]
}

/// Plain concatenation with a single separator. `..` segments are kept
/// as-is, never collapsed.
pub fn join(dir: &str, name: &str) -> String {
    let name = name.strip_prefix('\\').unwrap_or(name);
    if dir.ends_with('\\') {
        format!("{dir}{name}")
    } else {
        format!("{dir}\\{name}")
    }
}

/// Decodes `%XX` escapes; malformed escapes are kept literal.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
