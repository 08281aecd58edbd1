//! Dispatch from event variants to cell renderers and height estimates.
//!
//! The adapter owns a registry of [`CellDescriptor`]s keyed by [`CellKind`]. Every
//! item and section header is rendered and measured through it, so the layout and the
//! drawn frame always agree on row heights.

use crate::model::{LargeEvent, SectionHeader, SmallEvent, TypedEvent};
use crate::state::snapshot::{ItemPath, Snapshot};
use crate::view::styles::Theme;
use ratatui::text::Line;
use std::collections::HashMap;
use std::fmt;
use tracing::error;

/// Default estimated height of a section header, in rows.
pub const DEFAULT_HEADER_ESTIMATE: u16 = 2;

/// Default estimated height of an item cell, in rows.
pub const DEFAULT_ITEM_ESTIMATE: u16 = 6;

/// Kind of cell; one descriptor is registered per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// A single significant revision.
    LargeEvent,
    /// A group of minor revisions.
    SmallEvent,
    /// A section title.
    SectionHeader,
}

/// Borrowed payload handed to a descriptor.
#[derive(Debug, Clone, Copy)]
pub enum CellContent<'a> {
    /// Large event payload.
    Large(&'a LargeEvent),
    /// Small event payload.
    Small(&'a SmallEvent),
    /// Section header payload.
    Header(&'a SectionHeader),
}

impl CellContent<'_> {
    /// Kind of cell that renders this content.
    pub fn kind(&self) -> CellKind {
        match self {
            CellContent::Large(_) => CellKind::LargeEvent,
            CellContent::Small(_) => CellKind::SmallEvent,
            CellContent::Header(_) => CellKind::SectionHeader,
        }
    }
}

impl<'a> From<&'a TypedEvent> for CellContent<'a> {
    fn from(event: &'a TypedEvent) -> Self {
        match event {
            TypedEvent::Large(large) => CellContent::Large(large),
            TypedEvent::Small(small) => CellContent::Small(small),
        }
    }
}

/// Renders one kind of cell.
///
/// `height_for` must agree with `render`; the default implementation guarantees it by
/// counting rendered lines.
pub trait CellDescriptor: Send + Sync {
    /// Kind this descriptor renders.
    fn kind(&self) -> CellKind;

    /// Lines for `content` laid out at `width` columns.
    fn render(&self, content: CellContent<'_>, width: u16, theme: &Theme) -> Vec<Line<'static>>;

    /// Exact height of `content` at `width`, at least one row.
    fn height_for(&self, content: CellContent<'_>, width: u16, theme: &Theme) -> u16 {
        let lines = self.render(content, width, theme).len();
        u16::try_from(lines).unwrap_or(u16::MAX).max(1)
    }
}

/// Height answer for a cell.
///
/// `precalculated` is true when a registered descriptor measured the content; false
/// when the configured default estimate was used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightEstimate {
    /// True when measured by a descriptor.
    pub precalculated: bool,
    /// Height in rows.
    pub height: u16,
}

/// Fallback heights used when no descriptor is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateDefaults {
    /// Section header height, in rows.
    pub header: u16,
    /// Item height, in rows.
    pub item: u16,
}

impl Default for EstimateDefaults {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER_ESTIMATE,
            item: DEFAULT_ITEM_ESTIMATE,
        }
    }
}

/// Registry of cell descriptors plus the dispatch logic over it.
pub struct EventRenderAdapter {
    descriptors: HashMap<CellKind, Box<dyn CellDescriptor>>,
    defaults: EstimateDefaults,
}

impl fmt::Debug for EventRenderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.descriptors.keys().collect();
        kinds.sort_by_key(|kind| format!("{kind:?}"));
        f.debug_struct("EventRenderAdapter")
            .field("registered", &kinds)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl EventRenderAdapter {
    /// Adapter with nothing registered.
    pub fn new(defaults: EstimateDefaults) -> Self {
        Self {
            descriptors: HashMap::new(),
            defaults,
        }
    }

    /// Adapter with the built-in cells for all three kinds.
    pub fn with_default_cells(defaults: EstimateDefaults) -> Self {
        use crate::view::cells::{LargeEventCell, SectionHeaderCell, SmallEventCell};

        let mut adapter = Self::new(defaults);
        adapter.register(Box::new(LargeEventCell));
        adapter.register(Box::new(SmallEventCell));
        adapter.register(Box::new(SectionHeaderCell));
        adapter
    }

    /// Register a descriptor, replacing any previous one for the same kind.
    pub fn register(&mut self, descriptor: Box<dyn CellDescriptor>) {
        self.descriptors.insert(descriptor.kind(), descriptor);
    }

    /// Fallback heights.
    pub fn defaults(&self) -> EstimateDefaults {
        self.defaults
    }

    /// Descriptor for an event variant.
    ///
    /// A missing descriptor is a configuration bug. It is always logged at error level.
    /// Debug builds then panic on an assertion; release builds skip the item.
    pub fn descriptor_for(&self, event: &TypedEvent) -> Option<&dyn CellDescriptor> {
        self.required(CellContent::from(event).kind())
    }

    /// Render the item at `path`; `None` when the path is stale or nothing is registered.
    pub fn render_item(
        &self,
        snapshot: &Snapshot,
        path: ItemPath,
        width: u16,
        theme: &Theme,
    ) -> Option<Vec<Line<'static>>> {
        let event = snapshot.item(path)?;
        let descriptor = self.descriptor_for(event)?;
        Some(descriptor.render(CellContent::from(event), width, theme))
    }

    /// Render the header of `section`.
    pub fn render_header(
        &self,
        snapshot: &Snapshot,
        section: usize,
        width: u16,
        theme: &Theme,
    ) -> Option<Vec<Line<'static>>> {
        let header = snapshot.section(section)?;
        let descriptor = self.required(CellKind::SectionHeader)?;
        Some(descriptor.render(CellContent::Header(header), width, theme))
    }

    /// Height of the item at `path`, or the default item estimate when it cannot be
    /// measured.
    pub fn estimated_item_height(
        &self,
        snapshot: &Snapshot,
        path: ItemPath,
        width: u16,
        theme: &Theme,
    ) -> HeightEstimate {
        let measured = snapshot.item(path).and_then(|event| {
            let content = CellContent::from(event);
            self.descriptors
                .get(&content.kind())
                .map(|descriptor| descriptor.height_for(content, width, theme))
        });
        estimate(measured, self.defaults.item)
    }

    /// Height of the header of `section`, or the default header estimate.
    pub fn estimated_header_height(
        &self,
        snapshot: &Snapshot,
        section: usize,
        width: u16,
        theme: &Theme,
    ) -> HeightEstimate {
        let measured = snapshot.section(section).and_then(|header| {
            self.descriptors
                .get(&CellKind::SectionHeader)
                .map(|descriptor| descriptor.height_for(CellContent::Header(header), width, theme))
        });
        estimate(measured, self.defaults.header)
    }

    /// Logs, then asserts in debug builds. Release builds return `None`.
    fn required(&self, kind: CellKind) -> Option<&dyn CellDescriptor> {
        let descriptor = self.descriptors.get(&kind).map(Box::as_ref);
        if descriptor.is_none() {
            error!(?kind, "No cell descriptor registered");
            debug_assert!(false, "no cell descriptor registered for {kind:?}");
        }
        descriptor
    }
}

impl Default for EventRenderAdapter {
    fn default() -> Self {
        Self::with_default_cells(EstimateDefaults::default())
    }
}

fn estimate(measured: Option<u16>, fallback: u16) -> HeightEstimate {
    match measured {
        Some(height) => HeightEstimate {
            precalculated: true,
            height,
        },
        None => HeightEstimate {
            precalculated: false,
            height: fallback,
        },
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
