//! URI components.

use crate::{imp::UriRef, table};
use alloc::string::String;
use core::str::Split;
use ref_cast::{ref_cast_custom, RefCastCustom};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively. You should do a case-insensitive
/// comparison if the scheme specification allows both letter cases in the scheme name.
///
/// # Examples
///
/// ```
/// use urlmaster::{component::Scheme, Uri};
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Uri::parse("HTTP://EXAMPLE.COM/")?.scheme();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// # Ok::<_, urlmaster::error::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

/// The `file` scheme, the only one subject to drive letter handling.
pub(crate) const SCHEME_FILE: &Scheme = Scheme::new_or_panic("file");

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

/// An [authority] component.
///
/// The authority is not validated: it is whatever sits between `"//"` and
/// the next `'/'`, `'?'` or `'#'`.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Authority<'a> {
    val: &'a str,
}

impl<'a> Authority<'a> {
    pub(crate) const fn new(val: &'a str) -> Self {
        Self { val }
    }

    /// Returns the authority component as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// assert_eq!(uri.authority().as_str(), "user@example.com:8080");
    /// # Ok::<_, urlmaster::error::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.val
    }

    /// Returns `true` if the authority is empty, as in `file:///etc/hosts`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.val.is_empty()
    }

    /// Returns the optional [userinfo] subcomponent.
    ///
    /// [userinfo]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.1
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a str> {
        self.split().0
    }

    /// Returns the [host] subcomponent as a string slice.
    ///
    /// The host subcomponent is always present, although it may be empty.
    /// The square brackets enclosing an IP literal are included.
    ///
    /// [host]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::Uri;
    ///
    /// let uri = Uri::parse("http://user@example.com:8080/")?;
    /// assert_eq!(uri.authority().host(), "example.com");
    ///
    /// let uri = Uri::parse("file:///path/to/file")?;
    /// assert_eq!(uri.authority().host(), "");
    ///
    /// let uri = Uri::parse("http://[::1]")?;
    /// assert_eq!(uri.authority().host(), "[::1]");
    /// # Ok::<_, urlmaster::error::ParseError>(())
    /// ```
    #[must_use]
    pub fn host(&self) -> &'a str {
        self.split().1
    }

    /// Returns the optional [port] subcomponent.
    ///
    /// [port]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2.3
    #[must_use]
    pub fn port(&self) -> Option<&'a str> {
        self.split().2
    }

    fn split(&self) -> (Option<&'a str>, &'a str, Option<&'a str>) {
        let (userinfo, host_port) = match self.val.rfind('@') {
            Some(i) => (Some(&self.val[..i]), &self.val[i + 1..]),
            None => (None, self.val),
        };
        // A colon inside an IP literal is not a port delimiter.
        match host_port.rfind(':') {
            Some(i) if !host_port[i..].contains(']') => {
                (userinfo, &host_port[..i], Some(&host_port[i + 1..]))
            }
            _ => (userinfo, host_port, None),
        }
    }
}

/// The [path] component of a URI reference.
///
/// [path]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.3
#[derive(RefCastCustom, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

impl Path {
    #[ref_cast_custom]
    #[inline]
    pub(crate) fn new_validated(path: &str) -> &Path;

    /// Returns the path as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns `true` if the path is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the path is absolute, i.e., beginning with "/".
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Returns `true` if the path is rootless, i.e., not beginning with "/".
    #[inline]
    #[must_use]
    pub fn is_rootless(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns an iterator over the [segments] of the path.
    ///
    /// [segments]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.3
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::UriRef;
    ///
    /// // An empty path has no segments.
    /// let r = UriRef::parse("");
    /// assert_eq!(r.path().segments().next(), None);
    ///
    /// let r = UriRef::parse("a/b/c");
    /// assert!(r.path().segments().eq(["a", "b", "c"]));
    ///
    /// // The empty string before a preceding "/" is not a segment.
    /// // However, segments can be empty in the other cases.
    /// let r = UriRef::parse("/path/to//dir/");
    /// assert!(r.path().segments().eq(["path", "to", "", "dir", ""]));
    /// ```
    #[inline]
    pub fn segments(&self) -> Segments<'_> {
        let path = self.inner.strip_prefix('/').unwrap_or(&self.inner);
        Segments {
            inner: (!self.inner.is_empty()).then(|| path.split('/')),
        }
    }

    /// Returns the Windows drive letter segment (such as `"C:"`) that the path
    /// begins with, if any.
    ///
    /// Only an absolute path can begin with a drive letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::Uri;
    ///
    /// let uri = Uri::parse("file:///C:/Windows/win.ini")?;
    /// assert_eq!(uri.path().drive_letter(), Some("C:"));
    ///
    /// let uri = Uri::parse("file:///etc/hosts")?;
    /// assert_eq!(uri.path().drive_letter(), None);
    /// # Ok::<_, urlmaster::error::ParseError>(())
    /// ```
    #[must_use]
    pub fn drive_letter(&self) -> Option<&str> {
        if self.is_rootless() {
            return None;
        }
        self.segments().next().filter(|seg| is_drive_letter(seg))
    }
}

/// Returns `true` if the segment is a single ASCII letter followed by a colon.
pub(crate) fn is_drive_letter(seg: &str) -> bool {
    matches!(seg.as_bytes(), [letter, b':'] if letter.is_ascii_alphabetic())
}

/// An iterator over the segments of a [`Path`].
///
/// This struct is created by [`Path::segments`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Segments<'a> {
    inner: Option<Split<'a, char>>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        self.inner.as_mut()?.next()
    }
}

/// The components of a URI reference, borrowed from their sources.
///
/// A `Components` is what [`UriRef::to_components`] takes apart and what
/// [`recompose`](Self::recompose) puts back together.
///
/// # Examples
///
/// ```
/// use urlmaster::UriRef;
///
/// let r = UriRef::parse("http://example.com/a/b?q#f");
/// let mut c = r.to_components();
/// assert_eq!(c.authority, Some("example.com"));
///
/// c.path = "/c";
/// c.fragment = None;
/// assert_eq!(c.recompose(), "http://example.com/c?q");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Components<'a> {
    /// The scheme, without the trailing `':'`.
    pub scheme: Option<&'a str>,
    /// The authority, without the leading `"//"`.
    pub authority: Option<&'a str>,
    /// The path.
    ///
    /// It should either be empty or begin with `'/'` when an authority is present.
    pub path: &'a str,
    /// The query, without the leading `'?'`.
    pub query: Option<&'a str>,
    /// The fragment, without the leading `'#'`.
    pub fragment: Option<&'a str>,
}

impl<'a> Components<'a> {
    /// Recomposes the components into a URI reference.
    ///
    /// Recomposition is the exact inverse of parsing: it never adds or drops
    /// a slash that is not in the path.
    #[must_use]
    pub fn recompose(&self) -> UriRef<String> {
        UriRef::parse_from(self.compose())
    }

    pub(crate) fn compose(&self) -> String {
        let mut len = self.path.len();
        if let Some(scheme) = self.scheme {
            len += scheme.len() + 1;
        }
        if let Some(authority) = self.authority {
            len += authority.len() + 2;
        }
        let dot_prefix = self.authority.is_none() && self.path.starts_with("//");
        if dot_prefix {
            len += 2;
        }
        if let Some(query) = self.query {
            len += query.len() + 1;
        }
        if let Some(fragment) = self.fragment {
            len += fragment.len() + 1;
        }

        let mut buf = String::with_capacity(len);

        if let Some(scheme) = self.scheme {
            buf.push_str(scheme);
            buf.push(':');
        }
        if let Some(authority) = self.authority {
            buf.push_str("//");
            buf.push_str(authority);
        }
        // Keep a path starting with "//" from being read back as an authority.
        if dot_prefix {
            buf.push_str("/.");
        }
        buf.push_str(self.path);
        if let Some(query) = self.query {
            buf.push('?');
            buf.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }

        debug_assert_eq!(buf.len(), len);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_letters() {
        assert!(is_drive_letter("C:"));
        assert!(is_drive_letter("z:"));
        assert!(!is_drive_letter("C"));
        assert!(!is_drive_letter("CD:"));
        assert!(!is_drive_letter("1:"));
        assert!(!is_drive_letter("C|"));
    }

    #[test]
    fn authority_split() {
        let auth = Authority::new("user:pass@example.com:8042");
        assert_eq!(auth.userinfo(), Some("user:pass"));
        assert_eq!(auth.host(), "example.com");
        assert_eq!(auth.port(), Some("8042"));

        let auth = Authority::new("[::1]");
        assert_eq!(auth.userinfo(), None);
        assert_eq!(auth.host(), "[::1]");
        assert_eq!(auth.port(), None);

        let auth = Authority::new("[::1]:");
        assert_eq!(auth.host(), "[::1]");
        assert_eq!(auth.port(), Some(""));
    }

    #[test]
    fn compose_keeps_double_slash_path_apart_from_authority() {
        let c = Components {
            scheme: Some("foo"),
            path: "//bar",
            ..Components::default()
        };
        assert_eq!(c.compose(), "foo:/.//bar");
    }
}
