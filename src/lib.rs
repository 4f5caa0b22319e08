//! Almanac - a month calendar for the terminal
//!
//! The interesting part lives in [`overflow`]: a generic container that
//! shows as many trailing items as fit a bounded region, hides the rest,
//! and reports the hidden count to a summary line. The calendar's day
//! cells are its first consumer; "+N more" in a crowded cell comes from
//! there.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod demo;
pub mod events;
pub mod logging;
pub mod overflow;
pub mod theme;
pub mod tui;
