// Overflow container - reconciliation glue around the calculator
//
// `OverflowList` is the stateful component callers embed: it owns the
// measurement driver, the current overflow count, and the key sequence of
// the last-seen item list. Each render frame it snapshots geometry, asks the
// driver whether a pass is due, runs the calculator if so, and applies the
// result by drawing only the items that survived.
//
// Component owns state; the app just renders and routes resize events.

use super::calculator;
use super::driver::{GeometrySignature, MeasurementDriver};
use super::surface::{Extent, LayoutSurface};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::Paragraph,
    Frame,
};

/// Where a recomputation cycle currently is.
///
/// A full pass walks `Probing -> Measuring -> Resolved` synchronously inside
/// one `recompute` call and settles back to `Idle` before it returns, so
/// observers between frames always see `Idle`. The field exists for tracing
/// and for asserting that no cycle overlaps another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Items reset to visible, summary hidden.
    Probing,
    /// Iterative hide-and-check in progress.
    Measuring,
    /// Count fixed, summary shown.
    Resolved,
}

/// Overflow-aware list container.
///
/// Generic over the caller's item key `K`. Keys must be unique within one
/// list and stable across re-renders of the same logical item; the engine
/// uses them only to detect list replacement, never for layout. Key
/// collisions are a caller contract violation and are not detected.
#[derive(Debug)]
pub struct OverflowList<K> {
    driver: MeasurementDriver,
    keys: Vec<K>,
    overflow_count: usize,
    phase: Phase,
    passes: u64,
}

impl<K: Clone + PartialEq> OverflowList<K> {
    pub fn new() -> Self {
        Self {
            driver: MeasurementDriver::new(),
            keys: Vec::new(),
            overflow_count: 0,
            phase: Phase::Idle,
            passes: 0,
        }
    }

    /// Number of trailing items currently hidden.
    pub fn overflow_count(&self) -> usize {
        self.overflow_count
    }

    /// Current cycle phase; `Idle` whenever no pass is executing.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total recomputation passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Forward an external size-affecting notification to the driver.
    pub fn schedule(&mut self) {
        self.driver.schedule();
    }

    /// Release the observation. The component keeps rendering its last
    /// resolved state but performs no further state writes.
    pub fn release(&mut self) {
        self.driver.release();
    }

    pub fn is_released(&self) -> bool {
        self.driver.is_released()
    }

    /// Run one recomputation cycle if the driver deems it due.
    ///
    /// Returns the current overflow count either way. A replaced item list
    /// (detected by comparing `keys` against the previous pass) resets the
    /// count to zero before remeasuring - a stale count from the old list
    /// must never be shown against new data.
    pub fn recompute(&mut self, surface: &mut dyn LayoutSurface, keys: &[K]) -> usize {
        if self.driver.is_released() {
            // Torn down: drop the trigger instead of running it.
            return self.overflow_count;
        }

        if keys != self.keys.as_slice() {
            self.keys = keys.to_vec();
            self.overflow_count = 0;
            self.driver.rearm();
        }

        let signature = GeometrySignature::capture(surface);
        if self.driver.observe(signature) {
            self.phase = Phase::Probing;
            calculator::reset(surface);

            self.phase = Phase::Measuring;
            let count = calculator::scan(surface);

            self.phase = Phase::Resolved;
            self.overflow_count = count;
            self.passes += 1;
            tracing::trace!(count, passes = self.passes, "overflow pass resolved");

            self.phase = Phase::Idle;
        }

        self.overflow_count
    }

    /// Render the list into `items_area` and the summary visual into
    /// `summary_area`, recomputing the overflow count first.
    ///
    /// The caller supplies the capabilities the engine is polymorphic over:
    /// key extraction, item rendering, and the summary renderer. The summary
    /// is drawn even when nothing overflows - its zero-count look belongs to
    /// the caller, not the engine. `style` is applied to the container
    /// region before items are drawn.
    #[allow(clippy::too_many_arguments)]
    pub fn render<T>(
        &mut self,
        f: &mut Frame,
        items_area: Rect,
        summary_area: Rect,
        items: &[T],
        get_key: impl Fn(&T) -> K,
        render_item: impl Fn(&T) -> Text<'static>,
        render_overflow: impl Fn(usize) -> Line<'static>,
        style: Style,
    ) {
        let rendered: Vec<Text<'static>> = items.iter().map(&render_item).collect();
        let keys: Vec<K> = items.iter().map(&get_key).collect();

        let mut surface = RowSurface::measure(&rendered, items_area);
        let count = self.recompute(&mut surface, &keys);

        // The surface is rebuilt all-visible every frame, but the calculator
        // only ran if the driver fired. Apply the resolved count either way
        // so quiet frames keep the same trailing items hidden.
        for index in rendered.len().saturating_sub(count)..rendered.len() {
            surface.set_item_visible(index, false);
        }

        f.buffer_mut().set_style(items_area, style);

        // Reconciliation: draw the survivors top-down, skip the trailing
        // hidden items. Hidden items keep their key and slot in `items`;
        // they just occupy no rows.
        let mut y = items_area.y;
        let bottom = items_area.bottom();
        for (index, text) in rendered.into_iter().enumerate() {
            if !surface.visible(index) || y >= bottom {
                continue;
            }
            let height = (text.height() as u16).min(bottom - y);
            let slot = Rect::new(items_area.x, y, items_area.width, height);
            f.render_widget(Paragraph::new(text), slot);
            y += height;
        }

        if summary_area.height > 0 {
            f.render_widget(Paragraph::new(render_overflow(count)), summary_area);
        }
    }
}

impl<K: Clone + PartialEq> Default for OverflowList<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal-backed surface: item extents are the row counts of the rendered
/// texts at the current frame, the bound is the container area's height.
/// Built fresh every render pass - rendered boxes are transient reads, never
/// cached.
struct RowSurface {
    extents: Vec<Extent>,
    bound: Extent,
    visible: Vec<bool>,
    summary_visible: bool,
}

impl RowSurface {
    fn measure(rendered: &[Text<'static>], items_area: Rect) -> Self {
        let extents: Vec<Extent> = rendered.iter().map(|t| t.height() as Extent).collect();
        let visible = vec![true; extents.len()];
        Self {
            extents,
            bound: Extent::from(items_area.height),
            visible,
            summary_visible: true,
        }
    }

    fn visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }
}

impl LayoutSurface for RowSurface {
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
    use crate::overflow::surface::FixtureSurface;

    #[test]
    fn first_recompute_runs_one_pass() {
        let mut list = OverflowList::new();
        let mut surface = FixtureSurface::new(vec![30; 5], 100);

        let count = list.recompute(&mut surface, &[1, 2, 3, 4, 5]);
        assert_eq!(count, 2);
        assert_eq!(list.passes(), 1);
        assert_eq!(list.phase(), Phase::Idle);
    }

    #[test]
    fn unchanged_frame_runs_no_extra_pass() {
        let mut list = OverflowList::new();
        let mut surface = FixtureSurface::new(vec![30; 5], 100);

        list.recompute(&mut surface, &[1, 2, 3, 4, 5]);
        let count = list.recompute(&mut surface, &[1, 2, 3, 4, 5]);

        assert_eq!(count, 2);
        assert_eq!(list.passes(), 1, "idempotent under identical geometry");
    }

    #[test]
    fn shrinking_bound_raises_count() {
        let mut list = OverflowList::new();
        let mut surface = FixtureSurface::new(vec![40; 4], 200);

        assert_eq!(list.recompute(&mut surface, &[1, 2, 3, 4]), 0);

        surface.set_bound(50);
        assert_eq!(list.recompute(&mut surface, &[1, 2, 3, 4]), 3);
        assert_eq!(list.passes(), 2);
    }

    #[test]
    fn list_replacement_resets_count() {
        let mut list = OverflowList::new();
        let mut surface = FixtureSurface::new(vec![40; 4], 50);
        assert_eq!(list.recompute(&mut surface, &[1, 2, 3, 4]), 3);

        // New list identity, identical geometry: the stale count must not
        // survive the swap, and the pass must rerun from a clean slate.
        let mut replacement = FixtureSurface::new(vec![10, 10], 50);
        assert_eq!(list.recompute(&mut replacement, &[9, 8]), 0);
        assert_eq!(replacement.hidden_count(), 0);
    }

    #[test]
    fn scheduled_trigger_reruns_same_geometry() {
        let mut list = OverflowList::new();
        let mut surface = FixtureSurface::new(vec![30; 5], 100);

        list.recompute(&mut surface, &[1, 2, 3, 4, 5]);
        list.schedule();
        let count = list.recompute(&mut surface, &[1, 2, 3, 4, 5]);

        // Deterministic: rerunning against unchanged geometry reproduces
        // the same count.
        assert_eq!(count, 2);
        assert_eq!(list.passes(), 2);
    }

    #[test]
    fn released_list_writes_nothing() {
        let mut list = OverflowList::new();
        let mut surface = FixtureSurface::new(vec![30; 5], 100);
        list.recompute(&mut surface, &[1, 2, 3, 4, 5]);

        list.release();

        // Changed geometry, changed keys, explicit schedule: none of it may
        // mutate state after teardown.
        surface.set_bound(10);
        let before = surface.visible.clone();
        list.schedule();
        let count = list.recompute(&mut surface, &[7, 7, 7]);

        assert_eq!(count, 2, "last resolved count survives");
        assert_eq!(list.passes(), 1);
        assert_eq!(surface.visible, before, "surface untouched after release");
    }

    #[test]
    fn hidden_items_stay_hidden_across_quiet_frames() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        // Body holds 3 rows; items take 1 + 1 + 2, so the 2-row item hides.
        // The second draw runs against unchanged geometry (the driver stays
        // quiet) and must not bring it back.
        let items = [("one", 1u16), ("two", 1), ("tall", 2)];
        let mut list: OverflowList<&str> = OverflowList::new();
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();

        for frame in 0..2 {
            terminal
                .draw(|f| {
                    list.render(
                        f,
                        Rect::new(0, 0, 10, 3),
                        Rect::new(0, 3, 10, 1),
                        &items,
                        |(name, _)| *name,
                        |(name, height)| {
                            Text::from(vec![Line::raw(*name); *height as usize])
                        },
                        |count| Line::raw(format!("+{} more", count)),
                        Style::default(),
                    );
                })
                .unwrap();

            let screen: String = terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|cell| cell.symbol())
                .collect();

            assert_eq!(list.overflow_count(), 1, "frame {}", frame);
            assert!(screen.contains("one"), "frame {}", frame);
            assert!(screen.contains("two"), "frame {}", frame);
            assert!(screen.contains("+1 more"), "frame {}", frame);
            assert!(
                !screen.contains("tall"),
                "frame {}: hidden item drawn again",
                frame
            );
        }
        assert_eq!(list.passes(), 1, "second frame must not rerun the pass");
    }

    #[test]
    fn count_never_exceeds_item_count() {
        let mut list = OverflowList::new();
        for n in 0..6 {
            let mut surface = FixtureSurface::new(vec![10; n], 0);
            let keys: Vec<usize> = (0..n).collect();
            let count = list.recompute(&mut surface, &keys);
            assert!(count <= n);
        }
    }
}
