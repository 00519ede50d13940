//! A headless cell-recycling engine with additive layout transitions.
//!
//! A scrollable collection may hold thousands of items, but only the few that intersect the
//! viewport need a live cell. This crate keeps that set small:
//! - a [`LayoutOracle`] reports which indexes are visible and where each item sits
//! - a [`DataSource`] builds (or recycles) cells for indexes that scroll in
//! - a [`ReusePool`] keeps cells that scrolled out, keyed by reuse identifier
//! - when an item's rect changes, its cell receives additive keyframes from
//!   [`relative_animation`] so overlapping transitions blend without jumps
//!
//! It is UI-agnostic. Scrolling, hit testing, drawing, and keyframe playback belong to the host.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cell;
mod engine;
mod key;
mod options;
mod oracle;
mod pool;
mod types;
mod visible;

#[cfg(test)]
mod tests;

pub use relative_animation as animation;
pub use relative_animation::{Keyframes, TimingCurve, Value};

pub use cell::{FrameProperty, FrameTransition, ReusableCell};
pub use engine::{Caterpillar, EngineState};
pub use options::CaterpillarOptions;
pub use oracle::{DataSource, LayoutOracle, SelectionDelegate};
pub use pool::{CellQueue, PoolStats, ReusePool};
pub use types::{IndexRange, Rect};
pub use visible::{RangeDiff, VisibleSetTracker};
