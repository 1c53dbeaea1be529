use crate::{
    error::ResolveError,
    imp::{Uri, UriRef},
    internal::{debug, trace},
    resolve::{resolve as resolve_pair, Options},
    shape::{Arg, Resolved, Shaped},
};
use alloc::string::String;
use borrow_or_share::Bos;

/// Resolves references against bases, broadcasting over sequences.
///
/// Each argument may be a string, a null (`None`), or a sequence of those,
/// nested to any depth. The output is shaped as the cross product of the two
/// arguments, `base` giving the outer levels:
///
/// | `base`   | `reference` | output                                   |
/// |----------|-------------|------------------------------------------|
/// | scalar   | scalar      | scalar                                   |
/// | scalar   | sequence    | one item per reference                   |
/// | sequence | scalar      | one item per base                        |
/// | sequence | sequence    | `out[i][j]` resolves `ref[j]` on `base[i]` |
///
/// A base that is null or not a URI with a scheme and an authority yields
/// `None` at every position it takes part in, without affecting its siblings.
/// So does a null reference.
///
/// A reference with an empty path (`""`, `"?q"` or `"#f"`) keeps the whole
/// base path, and keeps the base query unless it has a query of its own,
/// as in [Section 5.2.2 of RFC 3986](https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.2).
///
/// This uses the default options of [`Broadcaster`].
///
/// # Examples
///
/// ```
/// use urlmaster::{resolve, Shaped};
///
/// assert_eq!(
///     resolve("http://www.google.com/foo/bar", "a").into_scalar(),
///     Some(Some("http://www.google.com/foo/a".to_owned())),
/// );
/// assert_eq!(resolve("abc", "/def"), Shaped::Scalar(None));
///
/// let out = resolve("http://a/b/c?q", ["", "?y", "#s"]);
/// assert_eq!(
///     out.as_deref(),
///     Shaped::from(["http://a/b/c?q", "http://a/b/c?y", "http://a/b/c?q#s"]),
/// );
///
/// let out = resolve(
///     ["http://www.google.com/foo/bar", "http://www.yahoo.com/ace/fly"],
///     ["/a", "b"],
/// );
/// assert_eq!(
///     out.as_deref(),
///     Shaped::from([
///         ["http://www.google.com/a", "http://www.google.com/foo/b"],
///         ["http://www.yahoo.com/a", "http://www.yahoo.com/ace/b"],
///     ]),
/// );
/// ```
pub fn resolve<'a>(base: impl Into<Arg<'a>>, reference: impl Into<Arg<'a>>) -> Resolved {
    Broadcaster::new().resolve(base, reference)
}

/// Resolves `base` against `location`, then references against the result,
/// broadcasting over sequences.
///
/// `base` and `reference` are broadcast as in [`resolve()`], with every base first
/// resolved against the location. A null or empty base stands for the location
/// itself. A location that is null or not a URI with a scheme and an authority
/// yields `None` at every position.
///
/// This uses the default options of [`Broadcaster`].
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedShape`] if `location` is a sequence.
///
/// # Examples
///
/// ```
/// use urlmaster::{resolve_in, Shaped};
///
/// let out = resolve_in("http://www.google.com/foo/bar", "//www.foo.com/b/c", "a")?;
/// assert_eq!(out.as_deref(), Shaped::from("http://www.foo.com/b/a"));
///
/// let out = resolve_in("http://www.google.com/a/b", [None, Some("")], "e")?;
/// assert_eq!(
///     out.as_deref(),
///     Shaped::from(["http://www.google.com/a/e", "http://www.google.com/a/e"]),
/// );
/// # Ok::<_, urlmaster::error::ResolveError>(())
/// ```
pub fn resolve_in<'a>(
    location: impl Into<Arg<'a>>,
    base: impl Into<Arg<'a>>,
    reference: impl Into<Arg<'a>>,
) -> Result<Resolved, ResolveError> {
    Broadcaster::new().resolve_in(location, base, reference)
}

/// Returns `true` if the string can serve as a base, i.e., it is a URI
/// with a scheme and an authority.
///
/// # Examples
///
/// ```
/// use urlmaster::is_resolvable_base;
///
/// assert!(is_resolvable_base(Some("http://www.google.com")));
/// assert!(is_resolvable_base(Some("file:///C:/foo")));
/// assert!(!is_resolvable_base(Some("abc")));
/// assert!(!is_resolvable_base(Some("")));
/// assert!(!is_resolvable_base(None));
/// ```
#[must_use]
pub fn is_resolvable_base(s: Option<&str>) -> bool {
    s.map_or(false, |s| Uri::parse(s).is_ok())
}

/// A configurable resolver that broadcasts over its arguments.
///
/// [`resolve()`] and [`resolve_in`] use a `Broadcaster` with default options.
///
/// # Examples
///
/// ```
/// use urlmaster::{Broadcaster, Shaped};
///
/// let broadcaster = Broadcaster::new().remove_dot_segments(true);
/// let out = broadcaster.resolve("http://a/b/c/d", ["../g", "./h/../i"]);
/// assert_eq!(out.as_deref(), Shaped::from(["http://a/b/g", "http://a/b/c/i"]));
/// ```
#[derive(Clone, Copy, Debug, Default)]
#[must_use]
pub struct Broadcaster {
    options: Options,
}

impl Broadcaster {
    /// Creates a new `Broadcaster` with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to remove dot segments from resolved paths.
    ///
    /// See [`Resolver::remove_dot_segments`](crate::resolve::Resolver::remove_dot_segments).
    pub fn remove_dot_segments(mut self, value: bool) -> Self {
        self.options.remove_dot_segments = value;
        self
    }

    /// Sets whether to keep the Windows drive letter of a `file:///` base.
    ///
    /// See [`Resolver::windows_drive_letters`](crate::resolve::Resolver::windows_drive_letters).
    pub fn windows_drive_letters(mut self, value: bool) -> Self {
        self.options.windows_drive_letters = value;
        self
    }

    /// Resolves references against bases. See [`resolve()`](crate::resolve()).
    pub fn resolve<'a>(
        &self,
        base: impl Into<Arg<'a>>,
        reference: impl Into<Arg<'a>>,
    ) -> Resolved {
        let reference = reference.into();
        let bases = base.into().map(parse_base);
        bases.broadcast(&reference, &mut |b, r| self.resolve_leaf(b.as_ref(), *r))
    }

    /// Resolves bases against a location, then references against the results.
    /// See [`resolve_in`](crate::resolve_in).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedShape`] if `location` is a sequence.
    pub fn resolve_in<'a>(
        &self,
        location: impl Into<Arg<'a>>,
        base: impl Into<Arg<'a>>,
        reference: impl Into<Arg<'a>>,
    ) -> Result<Resolved, ResolveError> {
        let location = match location.into() {
            Shaped::Scalar(location) => location,
            Shaped::Seq(_) => {
                debug!("location must not be a sequence");
                return Err(ResolveError::UnsupportedShape);
            }
        };
        let (base, reference) = (base.into(), reference.into());

        let Some(location) = parse_base(location) else {
            return Ok(base.broadcast(&reference, &mut |_, _| None));
        };

        let bases = base.map(|b| self.effective_base(&location, b));
        Ok(bases.broadcast(&reference, &mut |b, r| self.resolve_leaf(b.as_ref(), *r)))
    }

    // Resolves `base` against `location`, or takes `location` itself for a null or empty base.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn effective_base(&self, location: &Uri<&str>, base: Option<&str>) -> Option<Uri<String>> {
        let base = match base {
            None | Some("") => return Some(location.to_owned()),
            Some(base) => base,
        };
        let resolved = resolve_pair(
            location.make_ref(),
            UriRef::parse(base).make_ref(),
            self.options,
        );
        match Uri::parse_from(resolved) {
            Ok(uri) => Some(uri),
            Err((e, resolved)) => {
                debug!(
                    base,
                    resolved = resolved.as_str(),
                    error = %e,
                    "effective base is not resolvable"
                );
                None
            }
        }
    }

    fn resolve_leaf<T: Bos<str>>(
        &self,
        base: Option<&Uri<T>>,
        reference: Option<&str>,
    ) -> Option<String> {
        let (base, reference) = (base?, reference?);
        let resolved = resolve_pair(
            base.make_ref(),
            UriRef::parse(reference).make_ref(),
            self.options,
        );
        trace!(
            base = base.as_str(),
            reference,
            resolved = resolved.as_str(),
            "resolved reference"
        );
        Some(resolved)
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn parse_base(base: Option<&str>) -> Option<Uri<&str>> {
    let base = base?;
    match Uri::parse(base) {
        Ok(uri) => Some(uri),
        Err(e) => {
            debug!(base, error = %e, "base is not resolvable");
            None
        }
    }
}
