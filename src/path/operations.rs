//! Path operations implementation

/// Path of the filesystem root
pub const ROOT: &str = ".";

/// Lexically normalise a slash-separated path
///
/// Collapses repeated separators, drops `.` elements and resolves `..`
/// against the element before it. An empty result becomes `"."`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ROOT.to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `..` above an absolute root stays at the root
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(segment),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ROOT.to_string()
    } else {
        joined
    }
}

/// Check that a path is already in canonical relative form
///
/// `"."` is valid; otherwise every element must be non-empty and neither
/// `.` nor `..`.
pub fn is_valid(path: &str) -> bool {
    if path == ROOT {
        return true;
    }
    path.split('/')
        .all(|element| !element.is_empty() && element != "." && element != "..")
}

/// Whether a cleaned path points outside the root
pub fn escapes_root(cleaned: &str) -> bool {
    cleaned == ".." || cleaned.starts_with("../") || cleaned.starts_with('/')
}

/// Join a directory path and an entry name, then clean the result
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir == ROOT {
        clean(name)
    } else {
        clean(&format!("{}/{}", dir, name))
    }
}

/// Parent directory of a cleaned path
pub fn parent(cleaned: &str) -> &str {
    match cleaned.rfind('/') {
        Some(0) => "/",
        Some(index) => &cleaned[..index],
        None => ROOT,
    }
}

/// Last element of a cleaned path
pub fn base(cleaned: &str) -> &str {
    if cleaned == "/" {
        return cleaned;
    }
    match cleaned.rfind('/') {
        Some(index) => &cleaned[index + 1..],
        None => cleaned,
    }
}

/// Iterator over a path and each of its ancestors
///
/// Created by [`ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a str>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let current = self.next?;
        self.next = if current == ROOT || current == "/" {
            None
        } else {
            Some(parent(current))
        };
        Some(current)
    }
}

/// Walk a cleaned path up to the root
///
/// `a/b/c` yields `a/b/c`, `a/b`, `a`, `.`. The root yields only itself.
/// The yielded values borrow from `cleaned`.
pub fn ancestors(cleaned: &str) -> Ancestors<'_> {
    Ancestors {
        next: Some(cleaned),
    }
}

/// Clean a path and collect it with all of its ancestors
pub fn prefixes(path: &str) -> Vec<String> {
    let cleaned = clean(path);
    let mut result = Vec::with_capacity(cleaned.matches('/').count() + 2);
    result.extend(ancestors(&cleaned).map(str::to_string));
    result
}
