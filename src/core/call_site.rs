//! Source location of the code that created a log entry

use std::borrow::Cow;
use std::panic::Location;

/// File base name, line and short function name of a call site.
///
/// Missing information degrades to empty strings and line `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Resolve the caller of the outermost `#[track_caller]` frame.
    ///
    /// Only file and line are available this way; the function name is left
    /// empty. Use the `call_site!` macro to capture it as well.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(base_name(location.file()), location.line(), "")
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty() && self.line == 0 && self.function.is_empty()
    }
}

/// Strip directories from a source path
pub fn base_name(path: &'static str) -> &'static str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Reduce a marker function's type name to `module::function`.
///
/// `call_site!` defines a nested `__f` and hands its type name here, e.g.
/// `app::handlers::get_user::__f` becomes `handlers::get_user`. Closure
/// frames (`{{closure}}`) are dropped so async bodies report their function.
/// Impl qualifiers such as `<app::User as core::fmt::Display>` collapse to
/// their self type, giving `User::fmt`.
pub fn short_function(type_name: &'static str) -> Cow<'static, str> {
    let mut name = type_name.strip_suffix("::__f").unwrap_or(type_name);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }

    let segments = split_path(name);
    let tail = &segments[segments.len().saturating_sub(2)..];
    if tail.iter().any(|segment| segment.starts_with('<')) {
        let parts: Vec<&str> = tail.iter().map(|segment| self_type(segment)).collect();
        Cow::Owned(parts.join("::"))
    } else {
        let start = name.len() - tail.iter().map(|s| s.len()).sum::<usize>() - 2 * (tail.len() - 1);
        Cow::Borrowed(&name[start..])
    }
}

/// `short_function` with a `'static` result, leaking the rewritten name.
///
/// `call_site!` caches the result per call site, so each site leaks at most
/// one string.
pub fn intern_function(type_name: &'static str) -> &'static str {
    match short_function(type_name) {
        Cow::Borrowed(name) => name,
        Cow::Owned(name) => Box::leak(name.into_boxed_str()),
    }
}

/// Split a path on `::` outside of angle brackets
fn split_path(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in fn pointer types does not close a bracket
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

/// Last path segment of the self type in `<T as Trait>`, `<impl Trait for T>`
/// or `<impl T>`; other segments are returned unchanged
fn self_type(segment: &str) -> &str {
    let Some(inner) = segment
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        return segment;
    };

    let ty = match inner.strip_prefix("impl ") {
        Some(rest) => find_top_level(rest, " for ").map_or(rest, |at| &rest[at + 5..]),
        None => find_top_level(inner, " as ").map_or(inner, |at| &inner[..at]),
    };
    split_path(ty).last().copied().unwrap_or(ty)
}

fn find_top_level(s: &str, pattern: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(pattern.as_bytes()) => return Some(i),
            _ => {}
        }
    }
    None
}
