use std::collections::VecDeque;

/// Iterator adapter that can peek arbitrarily far ahead.
///
/// Items are buffered at most once, so a scan that callers do not repeat
/// costs time linear in the distance peeked.
pub(crate) struct Lookahead<I: Iterator> {
    inner: I,
    buffer: VecDeque<I::Item>,
}

impl<I> Lookahead<I>
where
    I: Iterator,
    I::Item: Copy,
{
    pub(crate) fn new(inner: I) -> Self {
        Self {
            inner,
            buffer: VecDeque::new(),
        }
    }

    /// The `n`th item after the cursor, without consuming anything.
    pub(crate) fn peek(&mut self, n: usize) -> Option<I::Item> {
        while self.buffer.len() <= n {
            let item = self.inner.next()?;
            self.buffer.push_back(item);
        }
        self.buffer.get(n).copied()
    }
}

impl<I> Iterator for Lookahead<I>
where
    I: Iterator,
    I::Item: Copy,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.buffer.pop_front().or_else(|| self.inner.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeking_does_not_consume() {
        let mut it = Lookahead::new([1, 2, 3].into_iter());
        assert_eq!(it.peek(1), Some(2));
        assert_eq!(it.peek(5), None);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.peek(0), Some(2));
        assert_eq!(it.collect::<Vec<_>>(), vec![2, 3]);
    }
}
