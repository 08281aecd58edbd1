//! Flattened row layout of a snapshot.
//!
//! Each section contributes a header row followed by one row per item (none when the
//! section is collapsed). Row heights come from the render adapter, and a
//! [`HeightIndex`] answers "which rows cover lines `offset..offset + height`".

use super::height_index::HeightIndex;
use super::render::EventRenderAdapter;
use crate::state::snapshot::{ItemPath, Snapshot};
use crate::view::styles::Theme;
use std::ops::Range;

/// What a layout row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Header of a section.
    Header {
        /// Section index.
        section: usize,
    },
    /// One timeline item.
    Item(ItemPath),
}

/// One laid out row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// What the row shows.
    pub kind: RowKind,
    /// Height in terminal rows, at least one.
    pub height: u16,
}

/// Rows visible in a viewport.
///
/// # Invariants
/// - `rows.start <= rows.end`
/// - `skip` is less than the height of the first row when the range is non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRows {
    /// Row indices in view.
    pub rows: Range<usize>,
    /// Lines of the first row scrolled above the viewport.
    pub skip: usize,
}

impl VisibleRows {
    /// True when no row is in view.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Row layout for one snapshot at one width.
#[derive(Debug, Clone, Default)]
pub struct FeedLayout {
    rows: Vec<Row>,
    index: HeightIndex,
    width: u16,
}

impl FeedLayout {
    /// Measure every header and item of `snapshot` at `width`.
    pub fn compute(
        snapshot: &Snapshot,
        adapter: &EventRenderAdapter,
        width: u16,
        theme: &Theme,
    ) -> Self {
        let mut rows = Vec::with_capacity(snapshot.number_of_sections() + snapshot.total_items());

        for (section, header) in snapshot.sections().iter().enumerate() {
            let estimate = adapter.estimated_header_height(snapshot, section, width, theme);
            rows.push(Row {
                kind: RowKind::Header { section },
                height: estimate.height.max(1),
            });
            if header.collapsed {
                continue;
            }
            for item in 0..header.events.len() {
                let path = ItemPath::new(section, item);
                let estimate = adapter.estimated_item_height(snapshot, path, width, theme);
                rows.push(Row {
                    kind: RowKind::Item(path),
                    height: estimate.height.max(1),
                });
            }
        }

        let heights: Vec<u16> = rows.iter().map(|row| row.height).collect();
        let index = HeightIndex::from_heights(&heights);
        Self { rows, index, width }
    }

    /// Width the layout was measured at.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// All rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all row heights.
    pub fn total_height(&self) -> usize {
        self.index.total()
    }

    /// First line of `row`.
    pub fn row_top(&self, row: usize) -> usize {
        self.index.offset_of(row)
    }

    /// Rows intersecting lines `offset..offset + viewport_height`.
    pub fn visible_rows(&self, offset: usize, viewport_height: u16) -> VisibleRows {
        let Some(start) = self.index.lower_bound(offset) else {
            return VisibleRows {
                rows: self.len()..self.len(),
                skip: 0,
            };
        };
        if viewport_height == 0 {
            return VisibleRows {
                rows: start..start,
                skip: 0,
            };
        }
        let last_line = offset + usize::from(viewport_height) - 1;
        let end = self
            .index
            .lower_bound(last_line)
            .map_or(self.len(), |row| row + 1);
        VisibleRows {
            rows: start..end,
            skip: offset - self.row_top(start),
        }
    }

    /// Item paths shown by `rows`.
    ///
    /// The header of a collapsed section stands in for its last item, so reaching a
    /// collapsed final section still counts as reaching the end of the feed.
    pub fn displayed_items(&self, snapshot: &Snapshot, rows: Range<usize>) -> Vec<ItemPath> {
        self.rows
            .get(rows)
            .unwrap_or_default()
            .iter()
            .filter_map(|row| match row.kind {
                RowKind::Item(path) => Some(path),
                RowKind::Header { section } => {
                    let header = snapshot.section(section)?;
                    let last = header.events.len().checked_sub(1)?;
                    header.collapsed.then(|| ItemPath::new(section, last))
                }
            })
            .collect()
    }
}
