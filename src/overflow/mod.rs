// Adaptive overflow-layout engine
//
// Renders an ordered list of heterogeneous items into a bounded region,
// works out - reactively, as the region resizes - how many trailing items do
// not fit, hides exactly those, and reports the hidden count to a
// caller-supplied summary renderer ("+3 more").
//
// Split into four pieces:
// - surface: the abstract rendered-geometry capability the engine reads
// - calculator: the pure greedy removal search (reset -> hide-and-check)
// - driver: decides when a recomputation pass runs (resize, list swap)
// - container: the stateful component gluing the three into a widget
//
// The calendar's day cells are the primary consumer, but nothing in here
// knows about dates or events.

pub mod calculator;
pub mod container;
pub mod driver;
pub mod surface;

pub use container::{OverflowList, Phase};
pub use driver::{GeometrySignature, MeasurementDriver};
pub use surface::{Extent, FixtureSurface, LayoutSurface};
