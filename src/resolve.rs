//! Module for reference resolution.

use crate::{
    component::{Components, Path, SCHEME_FILE},
    imp::{RmrRef, Uri, UriRef},
};
use alloc::string::String;
use borrow_or_share::Bos;
use core::fmt;

/// Options shared by [`Resolver`] and [`Broadcaster`](crate::Broadcaster).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Options {
    pub remove_dot_segments: bool,
    pub windows_drive_letters: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            remove_dot_segments: false,
            windows_drive_letters: true,
        }
    }
}

/// A configurable URI reference resolver against a fixed base.
///
/// # Examples
///
/// ```
/// use urlmaster::{resolve::Resolver, Uri, UriRef};
///
/// let base = Uri::parse("http://example.com/foo/bar")?;
/// let resolver = Resolver::with_base(base);
///
/// assert_eq!(resolver.resolve(&UriRef::parse("baz")), "http://example.com/foo/baz");
/// assert_eq!(resolver.resolve(&UriRef::parse("/baz")), "http://example.com/baz");
/// assert_eq!(resolver.resolve(&UriRef::parse("//example.org")), "http://example.org");
/// assert_eq!(resolver.resolve(&UriRef::parse("?baz")), "http://example.com/foo/bar?baz");
/// # Ok::<_, urlmaster::error::ParseError>(())
/// ```
#[derive(Clone, Copy)]
#[must_use]
pub struct Resolver<T> {
    base: Uri<T>,
    options: Options,
}

impl<T: Bos<str>> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("base", &self.base)
            .field("remove_dot_segments", &self.options.remove_dot_segments)
            .field("windows_drive_letters", &self.options.windows_drive_letters)
            .finish()
    }
}

impl<T: Bos<str>> Resolver<T> {
    /// Creates a new `Resolver` with the given base.
    pub fn with_base(base: Uri<T>) -> Self {
        Self {
            base,
            options: Options::default(),
        }
    }

    /// Sets whether to remove dot segments (`"."` and `".."`) from the resolved path.
    ///
    /// This defaults to `false`, in which case dot segments are passed through
    /// as they are. A value of `true` follows the reference resolution algorithm
    /// defined in [Section 5.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2).
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::{resolve::Resolver, Uri, UriRef};
    ///
    /// let base = Uri::parse("http://example.com/foo/bar")?;
    /// let r = UriRef::parse("../baz");
    ///
    /// let resolver = Resolver::with_base(base);
    /// assert_eq!(resolver.resolve(&r), "http://example.com/foo/../baz");
    ///
    /// let resolver = resolver.remove_dot_segments(true);
    /// assert_eq!(resolver.resolve(&r), "http://example.com/baz");
    /// # Ok::<_, urlmaster::error::ParseError>(())
    /// ```
    pub fn remove_dot_segments(mut self, value: bool) -> Self {
        self.options.remove_dot_segments = value;
        self
    }

    /// Sets whether a Windows drive letter at the start of a `file:///` base path
    /// is kept when resolving an absolute-path reference.
    ///
    /// This defaults to `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::{resolve::Resolver, Uri, UriRef};
    ///
    /// let base = Uri::parse("file:///C:/foo/bar")?;
    /// let r = UriRef::parse("/a");
    ///
    /// let resolver = Resolver::with_base(base);
    /// assert_eq!(resolver.resolve(&r), "file:///C:/a");
    ///
    /// let resolver = resolver.windows_drive_letters(false);
    /// assert_eq!(resolver.resolve(&r), "file:///a");
    /// # Ok::<_, urlmaster::error::ParseError>(())
    /// ```
    pub fn windows_drive_letters(mut self, value: bool) -> Self {
        self.options.windows_drive_letters = value;
        self
    }

    /// Returns the base.
    #[must_use]
    pub fn base(&self) -> &Uri<T> {
        &self.base
    }

    /// Resolves the given reference against the configured base.
    ///
    /// The reference is classified as follows, in order:
    ///
    /// 1. A reference with a scheme is returned as it is.
    /// 2. A network-path reference (`"//host/path"`) takes the scheme of the base.
    /// 3. An absolute-path reference (`"/path"`) takes the scheme and the authority
    ///    of the base. With a `file:///` base whose path begins with a drive letter,
    ///    the drive is kept unless the reference names its own.
    /// 4. Any other reference is merged with the base path with its last segment
    ///    removed. An empty reference path keeps the whole base path along with
    ///    the base query, unless the reference has a query.
    ///
    /// The query and the fragment are always taken from the reference, except
    /// for the query in the last case above.
    pub fn resolve<U: Bos<str>>(&self, reference: &UriRef<U>) -> UriRef<String> {
        let buf = resolve(self.base.make_ref(), reference.make_ref(), self.options);
        UriRef::parse_from(buf)
    }
}

pub(crate) fn resolve(
    base: RmrRef<'_, '_>,
    /* reference */ r: RmrRef<'_, '_>,
    options: Options,
) -> String {
    debug_assert!(base.has_scheme() && base.has_authority());

    let (t_scheme, t_authority, t_path, t_query);
    let mut buf = String::new();

    let r_path = r.path();
    let r_query = r.query();

    if let Some(r_scheme) = r.scheme_opt() {
        if !options.remove_dot_segments {
            return r.as_str().into();
        }
        t_scheme = r_scheme.as_str();
        t_authority = r.authority().map(|auth| auth.as_str());
        t_path = if r_path.is_absolute() {
            remove_dot_segments(&mut buf, r_path.as_str(), 1)
        } else {
            r_path.as_str()
        };
        t_query = r_query;
    } else {
        t_scheme = base.scheme().as_str();

        if r.has_authority() {
            t_authority = r.authority().map(|auth| auth.as_str());
            t_path = finish_path(&mut buf, r_path.as_str(), 1, options);
            t_query = r_query;
        } else {
            let base_auth = base.authority();
            t_authority = base_auth.map(|auth| auth.as_str());

            // Drive letters only count against a `file:///` base.
            let drive_aware = options.windows_drive_letters
                && base.scheme() == SCHEME_FILE
                && base_auth.map_or(true, |auth| auth.is_empty());
            let base_drive = base.path().drive_letter().filter(|_| drive_aware);

            if r_path.is_empty() {
                t_path = finish_path(
                    &mut buf,
                    base.path().as_str(),
                    drive_floor(base_drive),
                    options,
                );
                t_query = r_query.or_else(|| base.query());
            } else {
                if r_path.is_absolute() {
                    let r_drive = r_path.drive_letter().filter(|_| drive_aware);
                    t_path = match (base_drive, r_drive) {
                        (Some(drive), None) => {
                            let r_path = r_path.as_str();
                            let mut joined =
                                String::with_capacity(1 + drive.len() + r_path.len());
                            joined.push('/');
                            joined.push_str(drive);
                            joined.push_str(r_path);
                            let floor = drive_floor(base_drive);
                            finish_owned_path(&mut buf, joined, floor, options)
                        }
                        // The drive of the reference, if any, wins.
                        _ => {
                            let floor = drive_floor(r_drive);
                            finish_path(&mut buf, r_path.as_str(), floor, options)
                        }
                    };
                } else {
                    let floor = drive_floor(base_drive);
                    t_path = merge(&mut buf, base.path(), r_path, floor, options);
                }
                t_query = r_query;
            }
        }
    }

    let mut out = Components {
        scheme: Some(t_scheme),
        authority: t_authority,
        path: t_path,
        query: t_query,
        fragment: r.fragment(),
    }
    .compose();

    // Schemes are case-insensitive; the canonical form is lowercase.
    out[..t_scheme.len()].make_ascii_lowercase();
    out
}

// Returns the length of the output prefix that `".."` must not climb above.
fn drive_floor(drive: Option<&str>) -> usize {
    // "/" or "/C:/"
    drive.map_or(1, |drive| drive.len() + 2)
}

// Removes dot segments from `path` into `buf` if asked to, or borrows `path` as it is.
fn finish_path<'a>(buf: &'a mut String, path: &'a str, floor: usize, options: Options) -> &'a str {
    if options.remove_dot_segments && path.starts_with('/') {
        remove_dot_segments(buf, path, floor)
    } else {
        path
    }
}

fn finish_owned_path(buf: &mut String, path: String, floor: usize, options: Options) -> &str {
    if options.remove_dot_segments {
        remove_dot_segments(buf, &path, floor)
    } else {
        *buf = path;
        buf
    }
}

// Appends the reference path to the base path with its last segment removed.
fn merge<'a>(
    buf: &'a mut String,
    base_path: &Path,
    r_path: &Path,
    floor: usize,
    options: Options,
) -> &'a str {
    let base_path = base_path.as_str();
    let r_path = r_path.as_str();

    if !options.remove_dot_segments {
        // A base with an authority and an empty path merges as "/".
        let dir = base_path.rfind('/').map_or("/", |i| &base_path[..=i]);
        buf.reserve_exact(dir.len() + r_path.len());
        buf.push_str(dir);
        buf.push_str(r_path);
        return buf;
    }

    // Instead of merging the paths, remove dot segments incrementally.
    match base_path.rfind('/') {
        None => {
            buf.reserve_exact(r_path.len() + 1);
            buf.push('/');
        }
        Some(last_slash_i) => {
            // A trailing ".." still counts as a directory to climb out of.
            let last_seg = &base_path[last_slash_i + 1..];
            let base_path_stripped = match classify_segment(last_seg) {
                SegKind::DoubleDot => base_path,
                _ => &base_path[..=last_slash_i],
            };
            buf.reserve_exact(base_path_stripped.len() + r_path.len());
            remove_dot_segments(buf, base_path_stripped, floor);
        }
    }
    remove_dot_segments(buf, r_path, floor)
}

/// Removes dot segments from an absolute `path`, appending the output to `buf`.
///
/// `buf` must either be empty or end with `'/'`. A `".."` segment never
/// truncates `buf` to less than `floor` bytes.
pub(crate) fn remove_dot_segments<'a>(buf: &'a mut String, path: &str, floor: usize) -> &'a str {
    for seg in path.split_inclusive('/') {
        let seg_stripped = seg.strip_suffix('/').unwrap_or(seg);
        match classify_segment(seg_stripped) {
            SegKind::Dot => truncate_after_last_slash(buf),
            SegKind::DoubleDot => {
                if buf.len() > floor {
                    // Drop the trailing "/", then the last segment.
                    buf.pop();
                    truncate_after_last_slash(buf);
                }
            }
            SegKind::Normal => buf.push_str(seg),
        }
    }
    buf
}

fn truncate_after_last_slash(buf: &mut String) {
    let len = buf.rfind('/').map_or(0, |i| i + 1);
    buf.truncate(len);
}

enum SegKind {
    Dot,
    DoubleDot,
    Normal,
}

fn classify_segment(mut seg: &str) -> SegKind {
    if seg.is_empty() {
        return SegKind::Normal;
    }
    if let Some(rem) = seg.strip_prefix('.') {
        seg = rem;
    } else if let Some(rem) = seg.strip_prefix("%2E") {
        seg = rem;
    } else if let Some(rem) = seg.strip_prefix("%2e") {
        seg = rem;
    }
    if seg.is_empty() {
        SegKind::Dot
    } else if seg == "." || seg == "%2E" || seg == "%2e" {
        SegKind::DoubleDot
    } else {
        SegKind::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remove(path: &str, floor: usize) -> String {
        let mut buf = String::new();
        remove_dot_segments(&mut buf, path, floor).into()
    }

    #[test]
    fn dot_segments() {
        assert_eq!(remove("/a/b/c/./../../g", 1), "/a/g");
        assert_eq!(remove("/a/./b/", 1), "/a/b/");
        assert_eq!(remove("/a/b/..", 1), "/a/");
        assert_eq!(remove("/%2E%2e/a", 1), "/a");
        assert_eq!(remove("/../../a", 1), "/a");
        assert_eq!(remove("/a/.b/..c", 1), "/a/.b/..c");
    }

    #[test]
    fn dot_segments_stop_at_drive() {
        assert_eq!(remove("/C:/a/../../b", 4), "/C:/b");
        assert_eq!(remove("/C:/..", 4), "/C:/");
    }

    #[test]
    fn segment_kinds() {
        assert!(matches!(classify_segment(""), SegKind::Normal));
        assert!(matches!(classify_segment("."), SegKind::Dot));
        assert!(matches!(classify_segment("%2e"), SegKind::Dot));
        assert!(matches!(classify_segment(".."), SegKind::DoubleDot));
        assert!(matches!(classify_segment(".%2E"), SegKind::DoubleDot));
        assert!(matches!(classify_segment("..."), SegKind::Normal));
    }
}
