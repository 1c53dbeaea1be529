use crate::{
    component::{Authority, Components, Path, Scheme},
    error::ParseError,
    internal::Meta,
    parser,
};
use alloc::{borrow::ToOwned, string::String};
use borrow_or_share::{BorrowOrShare, Bos};
use core::{borrow::Borrow, cmp::Ordering, fmt, hash, str::FromStr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

macro_rules! ri {
    (Type = $Ty:ident, type_name = $ty:literal) => {
        impl<T> $Ty<T> {
            pub(crate) fn new(val: T, meta: Meta) -> Self {
                Self { val, meta }
            }
        }

        impl $Ty<String> {
            #[doc = concat!("Borrows this `", $ty, "<String>` as `", $ty, "<&str>`.")]
            #[allow(clippy::should_implement_trait)]
            #[inline]
            #[must_use]
            pub fn borrow(&self) -> $Ty<&str> {
                $Ty {
                    val: &self.val,
                    meta: self.meta,
                }
            }

            #[doc = concat!("Consumes this `", $ty, "<String>` and yields the underlying [`String`].")]
            #[inline]
            #[must_use]
            pub fn into_string(self) -> String {
                self.val
            }
        }

        impl $Ty<&str> {
            #[doc = concat!("Creates a new `", $ty, "<String>` by cloning the contents of this `", $ty, "<&str>`.")]
            #[inline]
            #[must_use]
            pub fn to_owned(&self) -> $Ty<String> {
                $Ty {
                    val: self.val.to_owned(),
                    meta: self.meta,
                }
            }
        }

        impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> $Ty<T> {
            pub(crate) fn make_ref(&'i self) -> RmrRef<'o, 'i> {
                RmrRef::new(self.val.borrow_or_share(), &self.meta)
            }

            #[doc = concat!("Returns the `", $ty, "` as a string slice.")]
            #[must_use]
            pub fn as_str(&'i self) -> &'o str {
                self.val.borrow_or_share()
            }

            /// Returns the [path] component.
            ///
            /// The path component is always present, although it may be empty.
            ///
            /// [path]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.3
            #[must_use]
            pub fn path(&'i self) -> &'o Path {
                self.make_ref().path()
            }

            /// Returns the optional [query] component, without the leading `'?'`.
            ///
            /// [query]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.4
            #[must_use]
            pub fn query(&'i self) -> Option<&'o str> {
                self.make_ref().query()
            }

            /// Returns the optional [fragment] component, without the leading `'#'`.
            ///
            /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.5
            #[must_use]
            pub fn fragment(&'i self) -> Option<&'o str> {
                self.make_ref().fragment()
            }

            /// Takes the components apart.
            ///
            /// Recomposing the result yields the same string.
            #[must_use]
            pub fn to_components(&'i self) -> Components<'o> {
                self.make_ref().to_components()
            }
        }

        impl<T: Bos<str>, U: Bos<str>> PartialEq<$Ty<U>> for $Ty<T> {
            fn eq(&self, other: &$Ty<U>) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl<T: Bos<str>> PartialEq<str> for $Ty<T> {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl<T: Bos<str>> PartialEq<$Ty<T>> for str {
            fn eq(&self, other: &$Ty<T>) -> bool {
                self == other.as_str()
            }
        }

        impl<T: Bos<str>> PartialEq<&str> for $Ty<T> {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl<T: Bos<str>> PartialEq<$Ty<T>> for &str {
            fn eq(&self, other: &$Ty<T>) -> bool {
                *self == other.as_str()
            }
        }

        impl<T: Bos<str>> Eq for $Ty<T> {}

        impl<T: Bos<str>> hash::Hash for $Ty<T> {
            fn hash<H: hash::Hasher>(&self, state: &mut H) {
                self.as_str().hash(state);
            }
        }

        impl<T: Bos<str>> PartialOrd for $Ty<T> {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<T: Bos<str>> Ord for $Ty<T> {
            fn cmp(&self, other: &Self) -> Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl<T: Bos<str>> AsRef<str> for $Ty<T> {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl<T: Bos<str>> Borrow<str> for $Ty<T> {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl From<$Ty<&str>> for $Ty<String> {
            #[inline]
            fn from(value: $Ty<&str>) -> Self {
                value.to_owned()
            }
        }

        impl<T: Bos<str>> fmt::Debug for $Ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let r = self.make_ref();
                f.debug_struct($ty)
                    .field("scheme", &r.scheme_opt())
                    .field("authority", &r.authority())
                    .field("path", &r.path())
                    .field("query", &r.query())
                    .field("fragment", &r.fragment())
                    .finish()
            }
        }

        impl<T: Bos<str>> fmt::Display for $Ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self.as_str(), f)
            }
        }

        #[cfg(feature = "serde")]
        impl<T: Bos<str>> Serialize for $Ty<T> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

/// A URI reference, parsed leniently.
///
/// Every string is a URI reference: its components are told apart by their
/// delimiters, as in [Appendix B of RFC 3986], and are not validated further.
///
/// Two variants of `UriRef` are available: `UriRef<&str>` (borrowed) and
/// `UriRef<String>` (owned). `UriRef<&'a str>` outputs references with
/// lifetime `'a` where possible (thanks to [`borrow-or-share`](borrow_or_share)).
///
/// [Appendix B of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986#appendix-B
///
/// # Examples
///
/// ```
/// use urlmaster::UriRef;
///
/// let r = UriRef::parse("foo://user@example.com:8042/over/there?name=ferret#nose");
/// assert_eq!(r.scheme().unwrap().as_str(), "foo");
/// assert_eq!(r.authority().unwrap().host(), "example.com");
/// assert_eq!(r.path().as_str(), "/over/there");
/// assert_eq!(r.query(), Some("name=ferret"));
/// assert_eq!(r.fragment(), Some("nose"));
///
/// let r = UriRef::parse("../a?b");
/// assert!(r.scheme().is_none());
/// assert_eq!(r.path().as_str(), "../a");
/// ```
#[derive(Clone, Copy, Default)]
pub struct UriRef<T> {
    val: T,
    meta: Meta,
}

ri!(Type = UriRef, type_name = "UriRef");

impl<'a> UriRef<&'a str> {
    /// Parses a URI reference from a string slice.
    ///
    /// This never fails.
    #[must_use]
    pub fn parse(s: &'a str) -> Self {
        UriRef::new(s, parser::parse(s.as_bytes()))
    }
}

impl UriRef<String> {
    /// Parses a URI reference from an owned string.
    ///
    /// This never fails.
    #[must_use]
    pub fn parse_from(s: String) -> Self {
        let meta = parser::parse(s.as_bytes());
        UriRef::new(s, meta)
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> UriRef<T> {
    /// Returns the optional [scheme] component.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[must_use]
    pub fn scheme(&'i self) -> Option<&'o Scheme> {
        self.make_ref().scheme_opt()
    }

    /// Returns the optional [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    #[must_use]
    pub fn authority(&'i self) -> Option<Authority<'o>> {
        self.make_ref().authority()
    }

    /// Returns `true` if the URI reference has a scheme.
    #[inline]
    #[must_use]
    pub fn has_scheme(&'i self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Returns `true` if the URI reference has an authority.
    #[inline]
    #[must_use]
    pub fn has_authority(&'i self) -> bool {
        self.meta.auth_bounds.is_some()
    }

    /// Returns `true` if the URI reference can serve as a base,
    /// i.e., it has both a scheme and an authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::UriRef;
    ///
    /// assert!(UriRef::parse("http://example.com").is_resolvable_base());
    /// assert!(UriRef::parse("file:///C:/x").is_resolvable_base());
    /// assert!(!UriRef::parse("abc").is_resolvable_base());
    /// assert!(!UriRef::parse("mailto:someone@example.com").is_resolvable_base());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_resolvable_base(&'i self) -> bool {
        self.has_scheme() && self.has_authority()
    }
}

impl<'a> From<&'a str> for UriRef<&'a str> {
    #[inline]
    fn from(s: &'a str) -> Self {
        UriRef::parse(s)
    }
}

impl From<String> for UriRef<String> {
    #[inline]
    fn from(s: String) -> Self {
        UriRef::parse_from(s)
    }
}

impl<T> From<Uri<T>> for UriRef<T> {
    #[inline]
    fn from(uri: Uri<T>) -> Self {
        UriRef::new(uri.val, uri.meta)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for UriRef<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(UriRef::parse_from)
    }
}

/// A URI that may serve as a base for resolution.
///
/// A `Uri` has both a scheme and an authority, although the authority may be
/// empty as in `file:///etc/hosts`.
///
/// Two variants of `Uri` are available: `Uri<&str>` (borrowed) and
/// `Uri<String>` (owned).
///
/// # Examples
///
/// ```
/// use urlmaster::{error::ParseErrorKind, Uri};
///
/// let uri = Uri::parse("http://www.google.com/foo/bar")?;
/// assert_eq!(uri.scheme().as_str(), "http");
/// assert_eq!(uri.authority().as_str(), "www.google.com");
/// assert!(uri.path().segments().eq(["foo", "bar"]));
///
/// assert_eq!(Uri::parse("abc").unwrap_err().kind(), ParseErrorKind::NoScheme);
/// assert_eq!(Uri::parse("").unwrap_err().kind(), ParseErrorKind::Empty);
/// # Ok::<_, urlmaster::error::ParseError>(())
/// ```
#[derive(Clone, Copy)]
pub struct Uri<T> {
    val: T,
    meta: Meta,
}

ri!(Type = Uri, type_name = "Uri");

impl<'a> Uri<&'a str> {
    /// Parses a URI from a string slice.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty, or has no scheme,
    /// or has no authority after the scheme.
    pub fn parse(s: &'a str) -> Result<Self, ParseError> {
        parser::parse_base(s.as_bytes()).map(|meta| Uri::new(s, meta))
    }
}

impl Uri<String> {
    /// Parses a URI from an owned string.
    ///
    /// # Errors
    ///
    /// Returns `Err` along with the string on the same conditions as [`Uri::parse`].
    pub fn parse_from(s: String) -> Result<Self, (ParseError, String)> {
        match parser::parse_base(s.as_bytes()) {
            Ok(meta) => Ok(Uri::new(s, meta)),
            Err(e) => Err((e, s)),
        }
    }
}

impl<'i, 'o, T: BorrowOrShare<'i, 'o, str>> Uri<T> {
    /// Returns the [scheme] component.
    ///
    /// Note that the scheme component is *case-insensitive*.
    /// See the documentation of [`Scheme`] for more details on comparison.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[must_use]
    pub fn scheme(&'i self) -> &'o Scheme {
        self.make_ref().scheme()
    }

    /// Returns the [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
    #[must_use]
    pub fn authority(&'i self) -> Authority<'o> {
        let r = self.make_ref();
        r.authority().unwrap_or(Authority::new(""))
    }
}

impl FromStr for Uri<String> {
    type Err = ParseError;

    /// Equivalent to `Uri::parse(s).map(|r| r.to_owned())`.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s).map(|r| r.to_owned())
    }
}

impl<'a> TryFrom<&'a str> for Uri<&'a str> {
    type Error = ParseError;

    #[inline]
    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Uri::parse(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri<String> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse_from(s).map_err(|(e, s)| {
            de::Error::custom(format_args!("failed to parse {s:?} as base URI: {e}"))
        })
    }
}

/// References to the value and the metadata of a `Uri` or `UriRef`.
#[derive(Clone, Copy)]
pub(crate) struct RmrRef<'v, 'm> {
    val: &'v str,
    meta: &'m Meta,
}

impl<'v, 'm> RmrRef<'v, 'm> {
    pub(crate) fn new(val: &'v str, meta: &'m Meta) -> Self {
        Self { val, meta }
    }

    pub(crate) fn as_str(self) -> &'v str {
        self.val
    }

    fn slice(self, start: usize, end: usize) -> &'v str {
        &self.val[start..end]
    }

    pub(crate) fn has_scheme(self) -> bool {
        self.meta.scheme_end.is_some()
    }

    pub(crate) fn scheme_opt(self) -> Option<&'v Scheme> {
        self.meta
            .scheme_end
            .map(|i| Scheme::new_validated(self.slice(0, i.get())))
    }

    // Must only be called on a value with a scheme.
    pub(crate) fn scheme(self) -> &'v Scheme {
        debug_assert!(self.has_scheme());
        let end = self.meta.scheme_end.map_or(0, |i| i.get());
        Scheme::new_validated(self.slice(0, end))
    }

    pub(crate) fn has_authority(self) -> bool {
        self.meta.auth_bounds.is_some()
    }

    pub(crate) fn authority(self) -> Option<Authority<'v>> {
        self.meta
            .auth_bounds
            .map(|(start, end)| Authority::new(self.slice(start, end)))
    }

    pub(crate) fn path(self) -> &'v Path {
        let (start, end) = self.meta.path_bounds;
        Path::new_validated(self.slice(start, end))
    }

    pub(crate) fn query(self) -> Option<&'v str> {
        let start = self.meta.path_bounds.1 + 1;
        self.meta.query_end.map(|i| self.slice(start, i.get()))
    }

    pub(crate) fn fragment(self) -> Option<&'v str> {
        let end = self.meta.query_or_path_end();
        (end < self.val.len()).then(|| self.slice(end + 1, self.val.len()))
    }

    pub(crate) fn to_components(self) -> Components<'v> {
        Components {
            scheme: self.scheme_opt().map(Scheme::as_str),
            authority: self.authority().map(|auth| auth.as_str()),
            path: self.path().as_str(),
            query: self.query(),
            fragment: self.fragment(),
        }
    }
}
