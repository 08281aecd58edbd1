//! Row heights with O(log n) prefix sums, backed by a Fenwick tree.
//!
//! Used by the feed layout to map a scroll offset to the first visible row and
//! a row index to its top line.

use fenwick::array::{prefix_sum, update};

/// Cumulative row heights, built once per layout.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    len: usize,
    tree: Vec<i64>,
}

impl HeightIndex {
    /// Build from a full list of heights in one pass.
    ///
    /// ```
    /// # use livingdoc::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights(&[2, 6, 6]);
    /// assert_eq!(index.total(), 14);
    /// assert_eq!(index.prefix_sum(1), 8);
    /// ```
    pub fn from_heights(heights: &[u16]) -> Self {
        let mut tree = vec![0; heights.len()];
        for (i, &height) in heights.iter().enumerate() {
            update(&mut tree, i, i64::from(height));
        }
        Self {
            len: heights.len(),
            tree,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of heights `0..=index`. Saturates at the total for out-of-range indices.
    pub fn prefix_sum(&self, index: usize) -> usize {
        if self.is_empty() {
            return 0;
        }
        let index = index.min(self.len - 1);
        usize::try_from(prefix_sum(&self.tree, index)).unwrap_or(0)
    }

    /// Top line of row `index`.
    pub fn offset_of(&self, index: usize) -> usize {
        match index {
            0 => 0,
            i => self.prefix_sum(i - 1),
        }
    }

    /// Sum of all heights.
    pub fn total(&self) -> usize {
        match self.len {
            0 => 0,
            n => self.prefix_sum(n - 1),
        }
    }

    /// First row whose span contains `line`, i.e. the first index with
    /// `prefix_sum(index) > line`. `None` past the end.
    pub fn lower_bound(&self, line: usize) -> Option<usize> {
        let (mut left, mut right) = (0, self.len);
        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > line {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        (left < self.len).then_some(left)
    }
}
