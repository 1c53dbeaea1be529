use alloc::{string::String, vec::Vec};
use core::{iter::FusedIterator, slice};

#[cfg(feature = "serde")]
use core::fmt;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A value that is either a single item or a (possibly nested) sequence of items.
///
/// This is the shape of the arguments and of the output of [`resolve`] and
/// [`resolve_in`]. Arguments are [`Arg`]s, in which `None` stands for null.
///
/// [`resolve`]: crate::resolve()
/// [`resolve_in`]: crate::resolve_in
///
/// # Examples
///
/// ```
/// use urlmaster::{Arg, Shaped};
///
/// let arg = Arg::from(["a", "b"]);
/// assert_eq!(arg, Shaped::Seq(vec![Shaped::Scalar(Some("a")), Shaped::Scalar(Some("b"))]));
///
/// let arg = Arg::from(None::<&str>);
/// assert_eq!(arg, Shaped::Scalar(None));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shaped<T> {
    /// A single item.
    Scalar(T),
    /// A sequence whose elements may themselves be sequences.
    Seq(Vec<Shaped<T>>),
}

/// An argument to [`resolve()`](crate::resolve()): strings and nulls, in any shape.
pub type Arg<'a> = Shaped<Option<&'a str>>;

/// The result of [`resolve()`](crate::resolve()): resolved strings and nulls, in the
/// shape of the arguments.
pub type Resolved = Shaped<Option<String>>;

impl<T> Shaped<T> {
    /// Returns `true` if this is a single item.
    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Shaped::Scalar(_))
    }

    /// Returns `true` if this is a sequence.
    #[inline]
    #[must_use]
    pub fn is_seq(&self) -> bool {
        matches!(self, Shaped::Seq(_))
    }

    /// Returns the single item, or `None` for a sequence.
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Shaped::Scalar(x) => Some(x),
            Shaped::Seq(_) => None,
        }
    }

    /// Returns the single item, or `None` for a sequence.
    #[inline]
    #[must_use]
    pub fn into_scalar(self) -> Option<T> {
        match self {
            Shaped::Scalar(x) => Some(x),
            Shaped::Seq(_) => None,
        }
    }

    /// Returns the elements of a sequence, or `None` for a single item.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Shaped<T>]> {
        match self {
            Shaped::Scalar(_) => None,
            Shaped::Seq(xs) => Some(xs),
        }
    }

    /// Maps every item with `f`, keeping the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::{Arg, Shaped};
    ///
    /// let lens = Arg::from([vec!["a", "bc"], vec!["def"]]).map(|s| s.map_or(0, str::len));
    /// assert_eq!(lens, Shaped::Seq(vec![
    ///     Shaped::Seq(vec![Shaped::Scalar(1), Shaped::Scalar(2)]),
    ///     Shaped::Seq(vec![Shaped::Scalar(3)]),
    /// ]));
    /// ```
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Shaped<U> {
        self.map_with(&mut f)
    }

    fn map_with<U, F: FnMut(T) -> U>(self, f: &mut F) -> Shaped<U> {
        match self {
            Shaped::Scalar(x) => Shaped::Scalar(f(x)),
            Shaped::Seq(xs) => Shaped::Seq(xs.into_iter().map(|x| x.map_with(f)).collect()),
        }
    }

    /// Maps every item by reference with `f`, keeping the shape.
    pub fn map_ref<'a, U, F: FnMut(&'a T) -> U>(&'a self, mut f: F) -> Shaped<U> {
        self.map_ref_with(&mut f)
    }

    fn map_ref_with<'a, U, F: FnMut(&'a T) -> U>(&'a self, f: &mut F) -> Shaped<U> {
        match self {
            Shaped::Scalar(x) => Shaped::Scalar(f(x)),
            Shaped::Seq(xs) => Shaped::Seq(xs.iter().map(|x| x.map_ref_with(f)).collect()),
        }
    }

    /// Returns an iterator over the items, depth first.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlmaster::Arg;
    ///
    /// let arg = Arg::from([vec!["a", "b"], vec!["c"]]);
    /// assert!(arg.leaves().eq([&Some("a"), &Some("b"), &Some("c")]));
    /// ```
    pub fn leaves(&self) -> Leaves<'_, T> {
        match self {
            Shaped::Scalar(x) => Leaves {
                scalar: Some(x),
                stack: Vec::new(),
            },
            Shaped::Seq(xs) => Leaves {
                scalar: None,
                stack: alloc::vec![xs.iter()],
            },
        }
    }

    /// Combines every item of `self` with every item of `other`.
    ///
    /// The output is shaped as the cross product of the two shapes: `self` gives
    /// the outer levels and `other` the inner ones. In particular, two flat
    /// sequences of lengths `m` and `n` give `m` sequences of length `n`.
    pub(crate) fn broadcast<U, V, F>(&self, other: &Shaped<U>, f: &mut F) -> Shaped<V>
    where
        F: FnMut(&T, &U) -> V,
    {
        match (self, other) {
            (Shaped::Scalar(x), Shaped::Scalar(y)) => Shaped::Scalar(f(x, y)),
            (Shaped::Scalar(_), Shaped::Seq(ys)) => {
                Shaped::Seq(ys.iter().map(|y| self.broadcast(y, f)).collect())
            }
            (Shaped::Seq(xs), _) => Shaped::Seq(xs.iter().map(|x| x.broadcast(other, f)).collect()),
        }
    }
}

impl Shaped<Option<String>> {
    /// Borrows every string, keeping the shape.
    ///
    /// This turns a [`Resolved`] back into an [`Arg`], such as for chaining resolutions.
    #[must_use]
    pub fn as_deref(&self) -> Shaped<Option<&str>> {
        self.map_ref(|x| x.as_deref())
    }
}

/// An iterator over the items of a [`Shaped`], depth first.
///
/// This struct is created by [`Shaped::leaves`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Leaves<'a, T> {
    scalar: Option<&'a T>,
    stack: Vec<slice::Iter<'a, Shaped<T>>>,
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if let Some(x) = self.scalar.take() {
            return Some(x);
        }
        loop {
            match self.stack.last_mut()?.next() {
                Some(Shaped::Scalar(x)) => return Some(x),
                Some(Shaped::Seq(xs)) => self.stack.push(xs.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<T> FusedIterator for Leaves<'_, T> {}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Shaped::Scalar(Some(s))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    #[inline]
    fn from(s: &'a String) -> Self {
        Shaped::Scalar(Some(s))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    #[inline]
    fn from(s: Option<&'a str>) -> Self {
        Shaped::Scalar(s)
    }
}

impl<'a, T: Into<Arg<'a>>> From<Vec<T>> for Arg<'a> {
    fn from(xs: Vec<T>) -> Self {
        Shaped::Seq(xs.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Into<Arg<'a>>, const N: usize> From<[T; N]> for Arg<'a> {
    fn from(xs: [T; N]) -> Self {
        Shaped::Seq(xs.into_iter().map(Into::into).collect())
    }
}

impl<'a, T: Copy + Into<Arg<'a>>> From<&[T]> for Arg<'a> {
    fn from(xs: &[T]) -> Self {
        Shaped::Seq(xs.iter().map(|&x| x.into()).collect())
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize> Serialize for Shaped<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Shaped::Scalar(x) => x.serialize(serializer),
            Shaped::Seq(xs) => serializer.collect_seq(xs),
        }
    }
}

/// Accepts a string, a null, or a sequence of those (nested to any depth).
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Shaped<Option<String>> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ShapedVisitor)
    }
}

#[cfg(feature = "serde")]
struct ShapedVisitor;

#[cfg(feature = "serde")]
impl<'de> de::Visitor<'de> for ShapedVisitor {
    type Value = Shaped<Option<String>>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, null, or a sequence of those")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        Ok(Shaped::Scalar(Some(s.into())))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
        Ok(Shaped::Scalar(Some(s)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Shaped::Scalar(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Shaped::Scalar(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        Shaped::deserialize(deserializer)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut xs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(x) = seq.next_element()? {
            xs.push(x);
        }
        Ok(Shaped::Seq(xs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn broadcast_shapes() {
        let x = Shaped::Seq(vec![Shaped::Scalar(1), Shaped::Scalar(2)]);
        let y = Shaped::Seq(vec![Shaped::Scalar(10), Shaped::Scalar(20)]);
        let out = x.broadcast(&y, &mut |a: &i32, b: &i32| a + b);
        assert_eq!(
            out,
            Shaped::Seq(vec![
                Shaped::Seq(vec![Shaped::Scalar(11), Shaped::Scalar(21)]),
                Shaped::Seq(vec![Shaped::Scalar(12), Shaped::Scalar(22)]),
            ])
        );

        let out = Shaped::Scalar(1).broadcast(&y, &mut |a: &i32, b: &i32| a + b);
        assert_eq!(out, Shaped::Seq(vec![Shaped::Scalar(11), Shaped::Scalar(21)]));

        let out = x.broadcast(&Shaped::Scalar(5), &mut |a: &i32, b: &i32| a * b);
        assert_eq!(out, Shaped::Seq(vec![Shaped::Scalar(5), Shaped::Scalar(10)]));
    }

    #[test]
    fn broadcast_over_empty_seq() {
        let empty: Shaped<i32> = Shaped::Seq(vec![]);
        let out = Shaped::Scalar(1).broadcast(&empty, &mut |a: &i32, b: &i32| a + b);
        assert_eq!(out, Shaped::Seq(vec![]));
    }

    #[test]
    fn leaves_skip_empty_seqs() {
        let x = Shaped::Seq(vec![
            Shaped::Seq(vec![]),
            Shaped::Scalar(1),
            Shaped::Seq(vec![Shaped::Seq(vec![Shaped::Scalar(2)])]),
        ]);
        assert!(x.leaves().copied().eq([1, 2]));
        assert!(Shaped::Scalar(7).leaves().copied().eq([7]));
    }
}
