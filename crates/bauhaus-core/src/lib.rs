//! Bauhaus core crate.
//!
//! Toolkit-agnostic primitives shared by the widget engine and its hosts:
//! coordinates, input vocabulary, paint types, the draw-command stream,
//! commit deadlines, and logger bootstrap.

pub mod coords;
pub mod input;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod time;
