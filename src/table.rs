//! Byte pattern tables from RFC 3986.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 2234].
//!
//! [RFC 2234]: https://datatracker.ietf.org/doc/html/rfc2234/

/// A table determining the bytes allowed in a string.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Table {
    arr: [bool; 256],
}

impl Table {
    /// Generates a table that only allows the given bytes.
    pub(crate) const fn gen(mut bytes: &[u8]) -> Table {
        let mut arr = [false; 256];
        while let [cur, rem @ ..] = bytes {
            arr[*cur as usize] = true;
            bytes = rem;
        }
        Table { arr }
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// either by `self` or by `other`.
    pub(crate) const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            self.arr[i] |= other.arr[i];
            i += 1;
        }
        self
    }

    /// Returns `true` if the given byte is allowed by the table.
    #[inline]
    pub(crate) const fn allows(&self, x: u8) -> bool {
        self.arr[x as usize]
    }

    /// Validates the given byte sequence with the table.
    pub(crate) const fn validate(&self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            if !self.allows(s[i]) {
                return false;
            }
            i += 1;
        }
        true
    }
}

const fn gen(bytes: &[u8]) -> Table {
    Table::gen(bytes)
}

/// ALPHA = A-Z / a-z
pub(crate) const ALPHA: &Table = &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// DIGIT = 0-9
pub(crate) const DIGIT: &Table = &gen(b"0123456789");

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub(crate) const SCHEME: &Table = &ALPHA.or(DIGIT).or(&gen(b"+-."));

/// Bytes that end an authority: "/" / "?" / "#"
pub(crate) const AUTHORITY_END: &Table = &gen(b"/?#");

/// Bytes that end a path: "?" / "#"
pub(crate) const PATH_END: &Table = &gen(b"?#");

/// Bytes that end a query: "#"
pub(crate) const QUERY_END: &Table = &gen(b"#");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_table() {
        assert!(SCHEME.validate(b"svn+ssh"));
        assert!(SCHEME.validate(b"x-foo.bar"));
        assert!(!SCHEME.validate(b"a b"));
        assert!(!SCHEME.validate(b"c:"));
        assert!(ALPHA.allows(b'Z'));
        assert!(!ALPHA.allows(b'1'));
    }

    #[test]
    fn delimiter_tables() {
        for x in *b"/?#" {
            assert!(AUTHORITY_END.allows(x));
        }
        assert!(!PATH_END.allows(b'/'));
        assert!(PATH_END.allows(b'?'));
        assert!(QUERY_END.allows(b'#'));
        assert!(!QUERY_END.allows(b'?'));
    }
}
