use std::cmp::Ordering;

/// Three-way ordering used by a [`SkipList`](crate::SkipList).
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator, so custom orders
/// (case-insensitive strings, a single field of a struct, ...) don't need
/// a wrapper type.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The `Ord` ordering of `T`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Swaps the arguments of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<C> Reversed<C> {
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_and_reversed() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reversed(Natural).compare(&7, &7), Ordering::Equal);
    }

    #[test]
    fn test_closure() {
        let by_len = |a: &str, b: &str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare("abc", "xy"), Ordering::Greater);
        assert_eq!(Reversed(by_len).compare("abc", "xy"), Ordering::Less);
    }
}
