// Layout surface abstraction - the engine's only view of rendered geometry
//
// The overflow calculator never talks to ratatui directly. It reads and
// toggles geometry through this capability, so the same decision procedure
// runs against real terminal rows and against in-memory test fixtures.

/// Extent of a rendered box, in terminal rows.
///
/// Per-item extents fit comfortably in `u16`, but the *content* extent is a
/// sum over all items and can exceed it on long lists, so everything is `u32`.
pub type Extent = u32;

/// Read/write view of one container's rendered geometry.
///
/// Contract notes:
/// - `content_extent` must honor the current visibility flags and must be
///   re-read on every call. Implementations never cache a measurement across
///   recomputation passes - item extents can change between passes.
/// - Geometry that has not been laid out yet reads as zero content extent.
/// - Visibility toggles affect measurement only; actually drawing (or not
///   drawing) hidden items is the caller's reconciliation step.
pub trait LayoutSurface {
    /// Number of items currently laid out in the container.
    fn item_count(&self) -> usize;

    /// Maximum extent the visible content must fit within.
    fn bound_extent(&self) -> Extent;

    /// Combined extent of all currently-visible items.
    fn content_extent(&self) -> Extent;

    /// Extent of a single item's rendered box.
    fn item_extent(&self, index: usize) -> Extent;

    /// Mark one item visible or hidden for subsequent measurements.
    fn set_item_visible(&mut self, index: usize, visible: bool);

    /// Mark the summary indicator visible or hidden.
    ///
    /// The summary is rendered in a sibling region and never counts against
    /// `content_extent`; the flag exists so a surface can suppress drawing it
    /// while the calculator probes.
    fn set_summary_visible(&mut self, visible: bool);
}

/// In-memory surface used by the engine's unit tests.
///
/// Holds a fixed list of item extents and a bound, and tracks the visibility
/// flags the calculator writes so tests can assert reconciliation state.
#[derive(Debug, Clone)]
pub struct FixtureSurface {
    extents: Vec<Extent>,
    bound: Extent,
    pub visible: Vec<bool>,
    pub summary_visible: bool,
}

impl FixtureSurface {
    pub fn new(extents: Vec<Extent>, bound: Extent) -> Self {
        let visible = vec![true; extents.len()];
        Self {
            extents,
            bound,
            visible,
            summary_visible: true,
        }
    }

    /// Change the bound, simulating a container resize.
    pub fn set_bound(&mut self, bound: Extent) {
        self.bound = bound;
    }

    /// Number of items currently hidden.
    pub fn hidden_count(&self) -> usize {
        self.visible.iter().filter(|v| !**v).count()
    }
}

impl LayoutSurface for FixtureSurface {
    fn item_count(&self) -> usize {
        self.extents.len()
    }

    fn bound_extent(&self) -> Extent {
        self.bound
    }

    fn content_extent(&self) -> Extent {
        self.extents
            .iter()
            .zip(&self.visible)
            .filter(|(_, v)| **v)
            .map(|(e, _)| *e)
            .sum()
    }

    fn item_extent(&self, index: usize) -> Extent {
        self.extents.get(index).copied().unwrap_or(0)
    }

    fn set_item_visible(&mut self, index: usize, visible: bool) {
        if let Some(slot) = self.visible.get_mut(index) {
            *slot = visible;
        }
    }

    fn set_summary_visible(&mut self, visible: bool) {
        self.summary_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_extent_honors_visibility() {
        let mut surface = FixtureSurface::new(vec![10, 20, 30], 100);
        assert_eq!(surface.content_extent(), 60);

        surface.set_item_visible(2, false);
        assert_eq!(surface.content_extent(), 30);
        assert_eq!(surface.hidden_count(), 1);

        surface.set_item_visible(2, true);
        assert_eq!(surface.content_extent(), 60);
    }

    #[test]
    fn empty_surface_measures_zero() {
        let surface = FixtureSurface::new(vec![], 50);
        assert_eq!(surface.item_count(), 0);
        assert_eq!(surface.content_extent(), 0);
    }

    #[test]
    fn out_of_range_item_reads_zero() {
        let surface = FixtureSurface::new(vec![5], 50);
        assert_eq!(surface.item_extent(3), 0);
    }
}
