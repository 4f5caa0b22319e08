// Overflow calculator - pure decision procedure for the hidden-item count
//
// Given a surface's current geometry, determine the minimal number of
// trailing items to hide so the remainder fits the bound. The summary
// indicator is excluded from measurement for the whole probe (it occupies a
// sibling region, so its own size never counts against the space it reports
// as missing) and revealed once a count is chosen.
//
// The calculator only toggles visibility flags and returns an integer; it
// draws nothing. Applying the result is the container's reconciliation step.

use super::surface::LayoutSurface;

/// Probing step: reset to a clean slate before measuring.
///
/// Every item becomes visible and the summary is hidden. Required so a
/// shrinking hide-count (the container grew) re-reveals items instead of
/// ratcheting monotonically, and so the summary's extent never leaks into
/// the probe.
pub fn reset(surface: &mut dyn LayoutSurface) {
    surface.set_summary_visible(false);
    for index in 0..surface.item_count() {
        surface.set_item_visible(index, true);
    }
}

/// Measuring step: greedy incremental removal, scanning from the end.
///
/// 1. If the content already fits the bound, `k = 0`.
/// 2. Otherwise hide items last-to-first, re-measuring strictly after each
///    hide, and stop at the first fit.
/// 3. If nothing fits even with every item hidden, `k = n` (a single
///    oversized item still reports itself hidden; the scan terminates after
///    exhausting the list).
///
/// The summary is re-shown before returning, whatever `k` came out to be -
/// a zero-count summary renders whatever the caller decides, not the engine.
///
/// Expects `reset` to have run first. Deterministic for a fixed geometry
/// snapshot: removal order is always last-to-first and every measurement is
/// re-read from the surface, so repeated runs against unchanged geometry
/// yield the same `k`.
pub fn scan(surface: &mut dyn LayoutSurface) -> usize {
    let n = surface.item_count();

    let mut hidden = 0;
    while hidden < n && surface.content_extent() > surface.bound_extent() {
        surface.set_item_visible(n - 1 - hidden, false);
        hidden += 1;
    }

    surface.set_summary_visible(true);
    hidden
}

/// Full pass: reset, then scan. Convenience for callers that do not need to
/// interleave the phases with their own bookkeeping.
pub fn resolve(surface: &mut dyn LayoutSurface) -> usize {
    reset(surface);
    scan(surface)
}
