use crate::{
    error::{ParseError, ParseErrorKind},
    internal::Meta,
    table::{self, Table},
};
use core::{
    num::NonZeroUsize,
    ops::{Deref, DerefMut},
};

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

/// Parses a URI reference. Every string is accepted.
pub(crate) fn parse(bytes: &[u8]) -> Meta {
    let mut parser = Parser {
        reader: Reader::new(bytes),
        out: Meta::default(),
    };
    parser.parse_from_scheme();
    parser.out
}

/// Parses a URI that may serve as a base, i.e., one with a scheme and an authority.
pub(crate) fn parse_base(bytes: &[u8]) -> Result<Meta> {
    if bytes.is_empty() {
        err!(0, Empty);
    }
    let meta = parse(bytes);
    let Some(scheme_end) = meta.scheme_end else {
        err!(0, NoScheme);
    };
    if meta.auth_bounds.is_none() {
        err!(scheme_end.get() + 1, NoAuthority);
    }
    Ok(meta)
}

/// URI reference parser.
///
/// The grammar is lenient: components are told apart by their delimiters only,
/// and the characters inside them are not validated (except for the scheme).
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
///
/// # Preconditions and guarantees
///
/// Before parsing, ensure that `pos == 0`, `out` is default initialized
/// and `bytes` is valid UTF-8.
///
/// Start and finish parsing by calling `parse_from_scheme`.
/// When parsing succeeds, all output indexes are within bounds, correctly ordered
/// and on the boundary of a UTF-8 code point, since every delimiter is ASCII.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Meta,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl<'a> DerefMut for Parser<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    // Returns `true` iff any byte is read.
    fn read(&mut self, table: &Table) -> bool {
        let start = self.pos;
        while let Some(x) = self.peek(0) {
            if !table.allows(x) {
                break;
            }
            // INVARIANT: Only ASCII bytes are allowed by the tables.
            self.skip(1);
        }
        self.pos > start
    }

    // Reads up to (but excluding) the first byte allowed by `delims`.
    fn read_until(&mut self, delims: &Table) {
        let rem = &self.bytes[self.pos..];
        let n = rem
            .iter()
            .position(|&x| delims.allows(x))
            .unwrap_or(rem.len());
        // INVARIANT: Delimiters are ASCII, so `pos + n` is on a code point boundary.
        self.skip(n);
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }
}

impl<'a> Parser<'a> {
    fn parse_from_scheme(&mut self) {
        let start = self.pos;
        if matches!(self.peek(0), Some(x) if table::ALPHA.allows(x)) {
            self.read(table::SCHEME);
        }

        if self.pos > start && self.peek(0) == Some(b':') {
            // Scheme starts at 0, so its end is non-zero.
            self.out.scheme_end = NonZeroUsize::new(self.pos);
            self.skip(1);
        } else {
            // Not a scheme: back off and read the rest as a relative reference.
            self.pos = start;
        }

        self.parse_from_authority();
    }

    fn parse_from_authority(&mut self) {
        if self.read_str("//") {
            let start = self.pos;
            self.read_until(table::AUTHORITY_END);
            self.out.auth_bounds = Some((start, self.pos));
        }
        self.parse_from_path();
    }

    fn parse_from_path(&mut self) {
        let start = self.pos;
        self.read_until(table::PATH_END);
        self.out.path_bounds = (start, self.pos);

        if self.peek(0) == Some(b'?') {
            self.skip(1);
            self.read_until(table::QUERY_END);
            // The query is preceded by "?", so its end is non-zero.
            self.out.query_end = NonZeroUsize::new(self.pos);
        }

        // Whatever follows starts with "#" and is the fragment.
        debug_assert!(!self.has_remaining() || self.peek(0) == Some(b'#'));
    }
}
