//! Append-only height buffer with a lazily maintained sorted view.
//!
//! Pushes are O(1) appends onto an unsorted suffix. The first read after a
//! batch of pushes sorts only that suffix and merges it into the
//! already-sorted prefix, so a push-heavy streaming phase followed by a
//! read-heavy evaluation phase pays one suffix sort per bin instead of a
//! full re-sort per read.

/// Growable multiset of height values. `values[..sorted_len]` is ascending.
#[derive(Debug, Clone, Default)]
pub struct HeightAccumulator {
    values: Vec<f32>,
    sorted_len: usize,
}

/// Read-only window over a fully sorted accumulator.
///
/// Handing out a dedicated type (rather than a bare slice from a public
/// field) keeps callers from mutating through the buffer and silently
/// breaking the sorted-prefix invariant.
#[derive(Debug, Clone, Copy)]
pub struct SortedView<'a>(&'a [f32]);

impl<'a> SortedView<'a> {
    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> std::ops::Deref for SortedView<'a> {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.0
    }
}

impl HeightAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { values: Vec::with_capacity(cap), sorted_len: 0 }
    }

    /// Append one value to the unsorted suffix.
    #[inline]
    pub fn push(&mut self, value: f32) {
        self.values.push(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sort the pending suffix, merge it into the prefix, and return the
    /// whole buffer as a sorted view. After this call the buffer stays
    /// sorted until the next `push`.
    pub fn sorted_view(&mut self) -> SortedView<'_> {
        let n = self.values.len();
        if self.sorted_len < n {
            self.values[self.sorted_len..].sort_unstable_by(f32::total_cmp);
            self.merge_suffix();
            self.sorted_len = n;
        }
        SortedView(&self.values)
    }

    /// Merge the sorted prefix `[..sorted_len]` with the (now sorted)
    /// suffix `[sorted_len..]` in one O(n) pass through a scratch buffer.
    /// Skipped entirely when the runs are already in order, which is the
    /// common case for a near-sorted input stream.
    fn merge_suffix(&mut self) {
        let split = self.sorted_len;
        if split == 0 || split == self.values.len() {
            return;
        }
        if self.values[split - 1] <= self.values[split] {
            return;
        }

        let mut merged = Vec::with_capacity(self.values.len());
        let (prefix, suffix) = self.values.split_at(split);
        let (mut i, mut j) = (0, 0);
        while i < prefix.len() && j < suffix.len() {
            if prefix[i] <= suffix[j] {
                merged.push(prefix[i]);
                i += 1;
            } else {
                merged.push(suffix[j]);
                j += 1;
            }
        }
        merged.extend_from_slice(&prefix[i..]);
        merged.extend_from_slice(&suffix[j..]);
        self.values = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_gives_empty_view() {
        let mut acc = HeightAccumulator::new();
        assert!(acc.sorted_view().is_empty());
    }

    #[test]
    fn view_is_sorted_after_unordered_pushes() {
        let mut acc = HeightAccumulator::new();
        for v in [5.0, 1.0, 4.0, 2.0, 3.0] {
            acc.push(v);
        }
        assert_eq!(acc.sorted_view().as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn merge_after_interleaved_push_and_read() {
        let mut acc = HeightAccumulator::new();
        for v in [10.0, 2.0, 8.0] {
            acc.push(v);
        }
        assert_eq!(acc.sorted_view().len(), 3);
        // Suffix values straddle the existing prefix.
        for v in [1.0, 9.0, 5.0] {
            acc.push(v);
        }
        assert_eq!(
            acc.sorted_view().as_slice(),
            &[1.0, 2.0, 5.0, 8.0, 9.0, 10.0]
        );
    }

    #[test]
    fn appending_in_order_skips_the_merge() {
        let mut acc = HeightAccumulator::new();
        acc.push(1.0);
        acc.push(2.0);
        acc.sorted_view();
        acc.push(3.0);
        acc.push(4.0);
        assert_eq!(acc.sorted_view().as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn repeated_reads_are_stable() {
        let mut acc = HeightAccumulator::new();
        for v in [3.0, 1.0, 2.0] {
            acc.push(v);
        }
        let first: Vec<f32> = acc.sorted_view().as_slice().to_vec();
        let second: Vec<f32> = acc.sorted_view().as_slice().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn duplicates_survive_the_merge() {
        let mut acc = HeightAccumulator::new();
        for v in [2.0, 2.0, 1.0] {
            acc.push(v);
        }
        acc.sorted_view();
        acc.push(2.0);
        assert_eq!(acc.sorted_view().as_slice(), &[1.0, 2.0, 2.0, 2.0]);
    }
}
