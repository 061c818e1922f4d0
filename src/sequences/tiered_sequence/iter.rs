//! Iterator on tiered sequences.
use super::TieredSequence;

/// Iterator for enumerating elements in order, created by [`TieredSequence::iter()`].
pub struct Iter<'a, T> {
    seq: &'a TieredSequence<T>,
    pos: usize,
}

impl<'a, T> Iter<'a, T>
where
    T: Copy + Default,
{
    /// Creates a new iterator.
    pub fn new(seq: &'a TieredSequence<T>) -> Self {
        Self { seq, pos: 0 }
    }
}

impl<T> Iterator for Iter<'_, T>
where
    T: Copy + Default,
{
    type Item = T;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.seq.len() {
            let x = self.seq.root.get(&self.seq.schema, 0, self.pos);
            self.pos += 1;
            Some(x)
        } else {
            None
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.seq.len() - self.pos;
        (rest, Some(rest))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> where T: Copy + Default {}

impl<'a, T> IntoIterator for &'a TieredSequence<T>
where
    T: Copy + Default,
{
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
