//! Unit bezier timing curves and additive keyframe generation.
//!
//! This crate turns an easing curve plus a `from`/`to` pair into a discrete list of keyframes that
//! an external animation runner can play back. It does not interpolate frames or draw anything.
//!
//! Keyframes come in two flavors:
//! - absolute: values run from `from` to `to`
//! - additive (the default): values run from `from - to` down to zero and are meant to be added
//!   to the resting (model) value, so interrupted animations blend without jumps
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animation;
mod curve;
mod error;
mod value;


pub use animation::{DEFAULT_STEPS, Keyframes, RelativeAnimation};
pub use curve::{TimingCurve, TimingFunction, UnitBezier};
pub use error::{AnimationError, ErrorKind};
pub use value::Value;
