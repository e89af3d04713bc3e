/// A fixed-length backing container a tree can be built over.
///
/// Only the length is needed here; reading elements is the job of
/// `LazyOps::access`, so any container shape works.
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Sequence for [T] {
    fn len(&self) -> usize { <[T]>::len(self) }
}

impl<T, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize { N }
}

impl<T> Sequence for Vec<T> {
    fn len(&self) -> usize { Vec::len(self) }
}

impl Sequence for str {
    fn len(&self) -> usize { str::len(self) }
}

impl Sequence for String {
    fn len(&self) -> usize { String::len(self) }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    fn len(&self) -> usize { S::len(*self) }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    fn len(&self) -> usize { S::len(self) }
}
