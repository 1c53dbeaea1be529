//! Error types.

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input is empty.
    ///
    /// The error index is always zero.
    Empty,
    /// The input does not begin with a scheme followed by a colon.
    ///
    /// The error index is always zero.
    NoScheme,
    /// The scheme is not followed by `"//"` and an authority.
    ///
    /// The error index points to the byte after the colon of the scheme.
    NoAuthority,
}

/// An error occurred when parsing a string as a base [`Uri`].
///
/// [`Uri`]: crate::Uri
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index where the error occurred in the input string.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// An error occurred when broadcasting a resolution over its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The location passed to [`resolve_in`] is a sequence.
    ///
    /// Only a single location (or null) is supported.
    ///
    /// [`resolve_in`]: crate::resolve_in
    UnsupportedShape,
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}
