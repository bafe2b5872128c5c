//! Scroll snapping for the `listview` crate.
//!
//! [`SnapController`] wraps a [`listview::ListView`] and keeps one item centered in the
//! viewport: it settles onto the nearest item when the user lets go, jumps or eases to a
//! requested record (taking the short way around in infinite lists), and reports which record
//! is snapped. [`Ease`] provides the interpolation curves.
//!
//! Like the list, the controller is framework-neutral. Adapters call:
//! - `tick(scroll, now_ms)` once per frame instead of `ListView::tick`
//! - `begin_drag` / `end_drag` from their pointer events
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod ease;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::{PointerButton, SnapChangeCallback, SnapController, SnapOptions, SnapState};
pub use ease::Ease;
pub use tween::Tween;
