use crate::{component::Components, imp::UriRef};
use alloc::borrow::Cow;

/// Removes the path of a URI if it is a bare `"/"`.
///
/// The query and the fragment are kept as they are. The URI is returned
/// unchanged if it has no authority, or if its path is anything but `"/"`.
///
/// # Examples
///
/// ```
/// use urlmaster::clear_path_empty;
///
/// assert_eq!(clear_path_empty("http://www.google.com/"), "http://www.google.com");
/// assert_eq!(clear_path_empty("http://www.google.com/?a=b#123"), "http://www.google.com?a=b#123");
/// assert_eq!(clear_path_empty("http://www.google.com/a/b"), "http://www.google.com/a/b");
/// assert_eq!(clear_path_empty("http://www.google.com"), "http://www.google.com");
/// ```
#[must_use]
pub fn clear_path_empty(url: &str) -> Cow<'_, str> {
    let r = UriRef::parse(url);
    if !r.has_authority() || r.path().as_str() != "/" {
        return Cow::Borrowed(url);
    }
    let c = Components {
        path: "",
        ..r.to_components()
    };
    Cow::Owned(c.compose())
}

/// Gives a URI with an authority and an empty path the path `"/"`.
///
/// The query and the fragment are kept as they are. The URI is returned
/// unchanged if it has no authority, or if its path is not empty.
///
/// # Examples
///
/// ```
/// use urlmaster::add_path_empty;
///
/// assert_eq!(add_path_empty("http://www.google.com"), "http://www.google.com/");
/// assert_eq!(add_path_empty("http://www.google.com?a=b#123"), "http://www.google.com/?a=b#123");
/// assert_eq!(add_path_empty("http://www.google.com/"), "http://www.google.com/");
/// assert_eq!(add_path_empty("mailto:"), "mailto:");
/// ```
#[must_use]
pub fn add_path_empty(url: &str) -> Cow<'_, str> {
    let r = UriRef::parse(url);
    if !r.has_authority() || !r.path().is_empty() {
        return Cow::Borrowed(url);
    }
    let c = Components {
        path: "/",
        ..r.to_components()
    };
    Cow::Owned(c.compose())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bare_slash_is_owned() {
        assert!(matches!(clear_path_empty("http://h/"), Cow::Owned(_)));
        assert!(matches!(clear_path_empty("http://h/a"), Cow::Borrowed(_)));
        assert!(matches!(add_path_empty("http://h"), Cow::Owned(_)));
        assert!(matches!(add_path_empty("http://h/"), Cow::Borrowed(_)));
    }

    #[test]
    fn no_authority_is_untouched() {
        assert_eq!(clear_path_empty("/"), "/");
        assert_eq!(add_path_empty(""), "");
        assert_eq!(add_path_empty("?a=b"), "?a=b");
    }

    #[test]
    fn empty_authority() {
        assert_eq!(clear_path_empty("file:///"), "file://");
        assert_eq!(add_path_empty("file://"), "file:///");
        assert_eq!(add_path_empty("//h#f"), "//h/#f");
    }
}
