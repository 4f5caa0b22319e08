// Measurement driver - decides *when* a recomputation pass runs
//
// The driver is the engine's trigger source. It watches for distinct
// size-affecting events (geometry changes, external resize notifications,
// item-list replacement) and answers one question per frame: does a pass
// need to run right now? Everything it does is bookkeeping; the actual
// measuring belongs to the calculator.

use super::surface::{Extent, LayoutSurface};

/// Comparison key for "did anything size-affecting change".
///
/// Two signatures are equal iff the bound and every item's rendered extent
/// are unchanged, in order. Item identity is tracked separately (by key) in
/// the container; the driver only cares about geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometrySignature {
    bound: Extent,
    items: Vec<Extent>,
}

impl GeometrySignature {
    /// Snapshot the surface's current geometry.
    pub fn capture(surface: &dyn LayoutSurface) -> Self {
        Self {
            bound: surface.bound_extent(),
            items: (0..surface.item_count())
                .map(|i| surface.item_extent(i))
                .collect(),
        }
    }
}

/// Live observation of one container's rendered box.
///
/// Lifecycle: created armed (the first observation always fires, so a fresh
/// mount gets measured), re-armed whenever the item list is replaced, and
/// released exactly once on teardown. After release no trigger fires and no
/// schedule is recorded - a pass already requested but not yet started is
/// dropped rather than run against a torn-down container.
#[derive(Debug, Default)]
pub struct MeasurementDriver {
    last: Option<GeometrySignature>,
    pending: bool,
    released: bool,
}

impl MeasurementDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an external size-affecting notification (e.g. terminal resize).
    ///
    /// Multiple notifications arriving before the next `observe` coalesce
    /// into a single pending pass.
    pub fn schedule(&mut self) {
        if !self.released {
            self.pending = true;
        }
    }

    /// The item list was replaced. Forget the old geometry so the next
    /// observation unconditionally fires and remeasures from a clean slate.
    pub fn rearm(&mut self) {
        if !self.released {
            self.last = None;
            self.pending = true;
        }
    }

    /// Report the container's current geometry; returns `true` exactly when
    /// a recomputation pass must run now.
    ///
    /// Fires on a changed signature or a pending schedule; stays quiet when
    /// nothing moved, so re-observing identical geometry is idempotent.
    pub fn observe(&mut self, signature: GeometrySignature) -> bool {
        if self.released {
            return false;
        }
        let changed = self.last.as_ref() != Some(&signature);
        if changed || self.pending {
            self.last = Some(signature);
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Release the observation. Idempotent; once released the driver never
    /// fires again.
    pub fn release(&mut self) {
        self.released = true;
        self.pending = false;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overflow::surface::FixtureSurface;

    fn sig(extents: Vec<Extent>, bound: Extent) -> GeometrySignature {
        GeometrySignature::capture(&FixtureSurface::new(extents, bound))
    }

    #[test]
    fn first_observation_fires() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10, 10], 50)));
    }

    #[test]
    fn unchanged_geometry_is_quiet() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10, 10], 50)));
        assert!(!driver.observe(sig(vec![10, 10], 50)));
        assert!(!driver.observe(sig(vec![10, 10], 50)));
    }

    #[test]
    fn bound_change_fires() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10, 10], 50)));
        assert!(driver.observe(sig(vec![10, 10], 30)));
    }

    #[test]
    fn item_extent_change_fires() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10, 10], 50)));
        assert!(driver.observe(sig(vec![10, 25], 50)));
    }

    #[test]
    fn schedule_coalesces_into_one_pass() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10], 50)));

        // A burst of resize notifications between frames...
        driver.schedule();
        driver.schedule();
        driver.schedule();

        // ...produces exactly one pass, even with unchanged geometry.
        assert!(driver.observe(sig(vec![10], 50)));
        assert!(!driver.observe(sig(vec![10], 50)));
    }

    #[test]
    fn rearm_forces_next_observation() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10], 50)));
        assert!(!driver.observe(sig(vec![10], 50)));

        driver.rearm();
        assert!(driver.observe(sig(vec![10], 50)));
        assert!(!driver.observe(sig(vec![10], 50)));
    }

    #[test]
    fn released_driver_never_fires() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10], 50)));

        driver.release();
        assert!(!driver.observe(sig(vec![99], 1)));

        // A schedule arriving after release is dropped, not queued.
        driver.schedule();
        assert!(!driver.observe(sig(vec![99], 1)));
    }

    #[test]
    fn release_is_idempotent() {
        let mut driver = MeasurementDriver::new();
        driver.release();
        driver.release();
        assert!(driver.is_released());
        assert!(!driver.observe(sig(vec![10], 50)));
    }

    #[test]
    fn pending_schedule_dropped_by_release() {
        let mut driver = MeasurementDriver::new();
        assert!(driver.observe(sig(vec![10], 50)));

        driver.schedule();
        driver.release();
        assert!(!driver.observe(sig(vec![10], 50)));
    }
}
